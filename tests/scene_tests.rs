// Host-side tests for disc layout, scene objects and mesh generation.

use glam::Vec3;
use hero_core::*;

#[test]
fn six_discs_in_group_order() {
    let discs = make_discs();
    let names: Vec<&str> = discs.iter().map(|d| d.spec.name()).collect();
    assert_eq!(names, ["docusign", "shopify", "nbc", "xero", "lightspeed", "mindfeel"]);
    for d in &discs {
        assert!(d.spec.texture_path().starts_with("assets/"));
        assert!(d.spec.texture_path().ends_with(".jpg"));
        assert_eq!(d.material.opacity, 1.0);
        assert_eq!(d.material.texture_repeat, DISC_TEXTURE_REPEAT);
    }
}

#[test]
fn position_discs_restores_listed_homes() {
    let expected = [
        (LogoKind::Xero, Vec3::new(0.0, 0.0, 0.0)),
        (LogoKind::Docusign, Vec3::new(-0.6, 1.25, 0.0)),
        (LogoKind::Lightspeed, Vec3::new(0.9, 1.075, 0.0)),
        (LogoKind::Mindfeel, Vec3::new(1.0, -1.0, 0.0)),
        (LogoKind::Nbc, Vec3::new(-1.1, -0.85, 0.0)),
        (LogoKind::Shopify, Vec3::new(-1.6, 0.35, 0.0)),
    ];
    let mut discs = make_discs();
    for d in &mut discs {
        d.transform.position += Vec3::new(0.3, -0.2, 0.1);
    }
    position_discs(&mut discs);
    for (kind, home) in expected {
        let d = discs
            .iter()
            .find(|d| d.spec.kind == kind)
            .unwrap_or_else(|| panic!("missing {kind:?}"));
        assert_eq!(d.transform.position, home, "{}", kind.name());
    }
}

#[test]
fn position_discs_leaves_other_components_alone() {
    let mut discs = make_discs();
    discs[1].transform.rotation = Vec3::new(0.1, 0.2, 0.0);
    discs[1].material.opacity = 0.5;
    position_discs(&mut discs);
    assert_eq!(discs[1].transform.rotation, Vec3::new(0.1, 0.2, 0.0));
    assert_eq!(discs[1].material.opacity, 0.5);
}

#[test]
fn sink_ignores_unknown_discs() {
    let mut objects = SceneObjects::default();
    let before = objects.clone();
    objects.apply(Target::Disc(99), TweenValue::Opacity(0.0));
    assert_eq!(objects.discs.len(), before.discs.len());
    for (a, b) in objects.discs.iter().zip(&before.discs) {
        assert_eq!(a.material.opacity, b.material.opacity);
    }
}

#[test]
fn world_matrix_includes_group_offset() {
    let d = make_disc(LogoKind::Xero);
    let p = d.world_matrix().transform_point3(Vec3::ZERO);
    assert!((p - disc_group_offset_vec3()).length() < 1e-6);
}

#[test]
fn shadow_camera_contains_every_disc() {
    let lights = Lights::default();
    let vp = lights.shadow_view_proj();
    let config = AnimationConfig::default();
    for d in make_discs() {
        let centre = disc_group_offset_vec3() + d.home();
        for corner in [
            Vec3::new(-0.5, -0.5, -config.max_depth_distance),
            Vec3::new(0.5, 0.5, config.max_depth_distance),
        ] {
            let clip = vp * (centre + corner).extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.x.abs() <= 1.0 + 1e-4 && ndc.y.abs() <= 1.0 + 1e-4, "{} {:?}", d.spec.name(), ndc);
            assert!((0.0..=1.0).contains(&ndc.z), "{} depth {}", d.spec.name(), ndc.z);
        }
    }
}

#[test]
fn to_light_points_at_the_light() {
    let l = Lights::default();
    assert!((l.to_light() - Vec3::Z).length() < 1e-6);
}

#[test]
fn sphere_counts_match_segments() {
    let mesh = uv_sphere(0.5, 40, 40);
    assert_eq!(mesh.vertices.len(), 41 * 41);
    // pole rows contribute one triangle per segment, the rest two
    assert_eq!(mesh.indices.len(), (40 * 40 * 2 - 2 * 40) * 3);
    let max = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < max));
}

#[test]
fn disc_vertices_lie_on_the_flattened_ellipsoid() {
    let mesh = disc_mesh();
    let r = DISC_RADIUS;
    let rz = DISC_RADIUS * DISC_DEPTH_SCALE;
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        let e = (x / r).powi(2) + (y / r).powi(2) + (z / rz).powi(2);
        assert!((e - 1.0).abs() < 1e-4, "off ellipsoid: {:?}", v.position);
        let n = Vec3::from_array(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn disc_normals_face_outwards() {
    let mesh = disc_mesh();
    for v in &mesh.vertices {
        let p = Vec3::from_array(v.position);
        let n = Vec3::from_array(v.normal);
        assert!(p.dot(n) > 0.0, "inward normal at {p:?}");
    }
}

#[test]
fn sphere_uvs_stay_in_texture_space() {
    let mesh = uv_sphere(1.0, 8, 6);
    for v in &mesh.vertices {
        let [u, w] = v.uv;
        assert!((-0.1..=1.1).contains(&u));
        assert!((0.0..=1.0).contains(&w));
    }
    // v = 0 is the top of the image
    assert!(mesh.vertices[0].position[1] > 0.0);
    assert_eq!(mesh.vertices[0].uv[1], 0.0);
}

#[test]
fn plane_faces_positive_z() {
    let mesh = shadow_plane_mesh();
    assert_eq!(mesh.vertices.len(), 4);
    for tri in mesh.indices.chunks(3) {
        let p = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
        let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
        assert!(n.z > 0.0, "triangle {tri:?} winds clockwise");
    }
    let half = PLANE_SIZE * 0.5;
    for v in &mesh.vertices {
        assert_eq!(v.position[0].abs(), half);
        assert_eq!(v.position[1].abs(), half);
    }
}

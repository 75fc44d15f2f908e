// Host-side tests for the camera and the damped orbit controls.

use glam::Vec3;
use hero_core::{Camera, OrbitControls};
use std::f32::consts::PI;

fn camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, 12.0),
        target: Vec3::ZERO,
        up: Vec3::Y,
        aspect: 1.0,
        fovy_radians: 30f32.to_radians(),
        znear: 0.1,
        zfar: 100.0,
    }
}

#[test]
fn new_controls_reproduce_the_eye() {
    let eye = Vec3::new(1.0, 2.0, 12.0);
    let orbit = OrbitControls::new(eye, Vec3::ZERO);
    assert!((orbit.eye() - eye).length() < 1e-4);
    assert!((orbit.radius() - eye.length()).abs() < 1e-4);
}

#[test]
fn update_without_input_keeps_the_camera_still() {
    let mut orbit = OrbitControls::new(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
    let mut cam = camera();
    for _ in 0..10 {
        orbit.apply_to(&mut cam);
    }
    assert!((cam.eye - Vec3::new(0.0, 0.0, 12.0)).length() < 1e-4);
    assert_eq!(cam.target, Vec3::ZERO);
}

#[test]
fn damping_converges_to_the_full_drag() {
    let mut orbit = OrbitControls::new(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
    let start = orbit.azimuth();
    // a quarter of the viewport height is a quarter turn
    orbit.rotate_by_pixels(-100.0, 0.0, 400.0);
    let first = orbit.update();
    let after_one = orbit.azimuth() - start;
    assert!(after_one > 0.0 && after_one < PI / 2.0 * 0.1);
    for _ in 0..2000 {
        orbit.update();
    }
    assert!(((orbit.azimuth() - start) - PI / 2.0).abs() < 1e-3);
    assert!((first.length() - 12.0).abs() < 1e-3);
    assert!((orbit.radius() - 12.0).abs() < 1e-3);
}

#[test]
fn polar_angle_is_clamped_away_from_the_poles() {
    let mut orbit = OrbitControls::new(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
    orbit.rotate_by_pixels(0.0, 10_000.0, 100.0);
    for _ in 0..500 {
        orbit.update();
    }
    assert!(orbit.polar() > 0.0 && orbit.polar() < PI);
    let eye = orbit.eye();
    assert!(eye.is_finite());
    orbit.rotate_by_pixels(0.0, -20_000.0, 100.0);
    for _ in 0..500 {
        orbit.update();
    }
    assert!(orbit.polar() > 0.0 && orbit.polar() < PI);
}

#[test]
fn dolly_scales_the_radius() {
    let mut orbit = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    orbit.dolly(-1.0);
    orbit.update();
    assert!((orbit.radius() - 9.5).abs() < 1e-4);
    orbit.dolly(1.0);
    orbit.update();
    assert!((orbit.radius() - 10.0).abs() < 1e-4);
    orbit.dolly(0.0);
    orbit.update();
    assert!((orbit.radius() - 10.0).abs() < 1e-4);
}

#[test]
fn dolly_respects_distance_limits() {
    let mut orbit = OrbitControls::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    orbit.min_distance = 8.0;
    orbit.max_distance = 11.0;
    for _ in 0..20 {
        orbit.dolly(-1.0);
        orbit.update();
    }
    assert_eq!(orbit.radius(), 8.0);
    for _ in 0..20 {
        orbit.dolly(1.0);
        orbit.update();
    }
    assert_eq!(orbit.radius(), 11.0);
}

#[test]
fn set_viewport_updates_aspect_and_ignores_empty_sizes() {
    let mut cam = camera();
    cam.set_viewport(1600.0, 900.0);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    cam.set_viewport(0.0, 900.0);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
}

#[test]
fn view_proj_puts_the_target_at_screen_centre() {
    let cam = camera();
    let clip = cam.view_proj() * Vec3::ZERO.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!((0.0..=1.0).contains(&ndc.z));
}

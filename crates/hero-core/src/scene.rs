//! Scene objects: discs, the shadow plane and the two lights.
//!
//! A disc is split into an immutable description ([`DiscSpec`], built by
//! [`make_disc`]) and the mutable components the animators write to
//! ([`Transform`] and [`MaterialState`]).

use crate::constants::*;
use crate::layout::{LogoKind, LOGO_ORDER};
use crate::scheduler::{Target, TweenSink, TweenValue};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialState {
    pub color_rgb: [f32; 3],
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub texture_repeat: [f32; 2],
    pub texture_offset: [f32; 2],
}

impl MaterialState {
    pub fn disc() -> Self {
        Self {
            color_rgb: [1.0, 1.0, 1.0],
            opacity: 1.0,
            metalness: MATERIAL_METALNESS,
            roughness: MATERIAL_ROUGHNESS,
            texture_repeat: DISC_TEXTURE_REPEAT,
            texture_offset: DISC_TEXTURE_OFFSET,
        }
    }

    pub fn plane() -> Self {
        Self {
            color_rgb: PLANE_COLOR_RGB,
            opacity: PLANE_OPACITY,
            metalness: MATERIAL_METALNESS,
            roughness: MATERIAL_ROUGHNESS,
            texture_repeat: [1.0, 1.0],
            texture_offset: [0.0, 0.0],
        }
    }
}

/// Immutable description of a disc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscSpec {
    pub kind: LogoKind,
}

impl DiscSpec {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn texture_path(&self) -> &'static str {
        self.kind.asset_path()
    }
}

#[derive(Clone, Debug)]
pub struct Disc {
    pub spec: DiscSpec,
    pub transform: Transform,
    pub material: MaterialState,
}

impl Disc {
    pub fn home(&self) -> Vec3 {
        self.spec.kind.home()
    }

    /// World matrix including the disc group offset.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(disc_group_offset_vec3()) * self.transform.matrix()
    }
}

/// Build a disc at its layout home with a fresh material.
pub fn make_disc(kind: LogoKind) -> Disc {
    Disc {
        spec: DiscSpec { kind },
        transform: Transform::from_position(kind.home()),
        material: MaterialState::disc(),
    }
}

/// All six discs in group order.
pub fn make_discs() -> Vec<Disc> {
    LOGO_ORDER.iter().copied().map(make_disc).collect()
}

/// Snap every disc back to its layout home position.
pub fn position_discs(discs: &mut [Disc]) {
    for d in discs {
        d.transform.position = d.home();
    }
}

#[derive(Clone, Debug)]
pub struct Plane {
    pub transform: Transform,
    pub material: MaterialState,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            transform: Transform::from_position(Vec3::from_array(PLANE_POSITION)),
            material: MaterialState::plane(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lights {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub ambient_color: [f32; 3],
    pub directional_color: [f32; 3],
    pub directional_position: Vec3,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient_intensity: AMBIENT_INTENSITY,
            directional_intensity: DIRECTIONAL_INTENSITY,
            ambient_color: [1.0, 1.0, 1.0],
            directional_color: [1.0, 1.0, 1.0],
            directional_position: directional_position_vec3(),
        }
    }
}

impl Lights {
    /// View-projection of the directional light's orthographic shadow camera.
    pub fn shadow_view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.directional_position, Vec3::ZERO, Vec3::Y);
        let e = SHADOW_CAMERA_EXTENT;
        let proj = Mat4::orthographic_rh(-e, e, -e, e, SHADOW_CAMERA_NEAR, SHADOW_CAMERA_FAR);
        proj * view
    }

    /// Unit vector pointing from the scene towards the directional light.
    pub fn to_light(&self) -> Vec3 {
        self.directional_position.normalize_or_zero()
    }
}

/// Everything the animators write to.
#[derive(Clone, Debug)]
pub struct SceneObjects {
    pub discs: Vec<Disc>,
    pub plane: Plane,
}

impl Default for SceneObjects {
    fn default() -> Self {
        Self {
            discs: make_discs(),
            plane: Plane::default(),
        }
    }
}

impl TweenSink for SceneObjects {
    fn apply(&mut self, target: Target, value: TweenValue) {
        let (transform, material) = match target {
            Target::Disc(i) => match self.discs.get_mut(i) {
                Some(d) => (&mut d.transform, &mut d.material),
                None => return,
            },
            Target::Plane => (&mut self.plane.transform, &mut self.plane.material),
        };
        match value {
            TweenValue::Position(p) => transform.position = p,
            TweenValue::Rotation(r) => transform.rotation = r,
            TweenValue::Scale(s) => transform.scale = s,
            TweenValue::Opacity(o) => material.opacity = o,
        }
    }
}

use glam::Vec3;

// Shared scene/animation tuning constants used by the web frontend.

// Scene layout
pub const DISC_GROUP_OFFSET: [f32; 3] = [1.0, 0.5, 0.0]; // world position of the disc group
pub const PLANE_POSITION: [f32; 3] = [1.0, 0.5, -1.0]; // shadow-catching plane, behind the discs
pub const PLANE_SIZE: f32 = 5.0;

// Disc geometry
pub const DISC_RADIUS: f32 = 0.5;
pub const DISC_SEGMENTS: u32 = 40; // both width and height segments
pub const DISC_DEPTH_SCALE: f32 = 0.2; // flattens the sphere into a disc
pub const DISC_TEXTURE_REPEAT: [f32; 2] = [2.0, 1.0]; // logo wraps twice around the ellipsoid
pub const DISC_TEXTURE_OFFSET: [f32; 2] = [0.0, 0.0];

// Materials
pub const MATERIAL_METALNESS: f32 = 0.01;
pub const MATERIAL_ROUGHNESS: f32 = 0.6;
pub const PLANE_COLOR_RGB: [f32; 3] = [246.0 / 255.0, 249.0 / 255.0, 252.0 / 255.0]; // #f6f9fc
pub const PLANE_OPACITY: f32 = 0.31; // controls how strong the caught shadow reads

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.75;
pub const DIRECTIONAL_INTENSITY: f32 = 0.25;
pub const DIRECTIONAL_POSITION: [f32; 3] = [0.0, 0.0, 2.0]; // aimed at the origin
pub const SHADOW_CAMERA_EXTENT: f32 = 2.5; // orthographic half-size
pub const SHADOW_CAMERA_NEAR: f32 = 1.5;
pub const SHADOW_CAMERA_FAR: f32 = 5.0;

// Perpetual animation defaults
pub const DEFAULT_MAX_POSITION_DISTANCE: f32 = 0.0375;
pub const DEFAULT_MAX_DEPTH_DISTANCE: f32 = 0.175;
pub const DEFAULT_MAX_ROTATE_DISTANCE: f32 = 0.25;
pub const DEFAULT_TRANSLATE_DURATION: f32 = 3.0;
pub const DEFAULT_ROTATE_DURATION: f32 = 4.0;
pub const DEFAULT_KEYFRAME_COUNT: u32 = 5;

// Intro (one-shot) animation
pub const INTRO_DELAY_SEC: f32 = 0.5;
pub const INTRO_STAGGER_SEC: f32 = 0.05;
pub const INTRO_DURATION_SEC: f32 = 1.5;
pub const INTRO_SCALE_FROM: f32 = 0.975;
pub const PLANE_FADE_DELAY_SEC: f32 = 0.75;
pub const PLANE_FADE_DURATION_SEC: f32 = 1.5;

#[inline]
pub fn disc_group_offset_vec3() -> Vec3 {
    Vec3::from_array(DISC_GROUP_OFFSET)
}

#[inline]
pub fn directional_position_vec3() -> Vec3 {
    Vec3::from_array(DIRECTIONAL_POSITION)
}

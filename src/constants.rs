// Render, camera and viewport constants for the web frontend.
// Kept free of platform types so host tests can `include!` this file.

// Camera
pub const CAMERA_FOV_DEG: f32 = 30.0;
pub const CAMERA_Z: f32 = 12.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0; // caps backing-store resolution on dense displays

// Output
pub const BACKGROUND_RGB: [f64; 3] = [246.0 / 255.0, 249.0 / 255.0, 252.0 / 255.0]; // #f6f9fc
pub const MSAA_SAMPLES: u32 = 4;

// Shadows
pub const SHADOW_MAP_SIZE: u32 = 1024 * 3;
pub const SHADOW_RADIUS_TEXELS: f32 = 50.0;
pub const SHADOW_DEPTH_BIAS: f32 = 0.0015;

// Canvas lookup
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const PANEL_ID: &str = "settings-panel";

#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store size for a CSS viewport size at the given pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let r = clamp_pixel_ratio(device_pixel_ratio);
    let w = (css_width.max(0.0) * r).floor() as u32;
    let h = (css_height.max(0.0) * r).floor() as u32;
    (w.max(1), h.max(1))
}

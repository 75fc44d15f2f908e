//! Visual-side state types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! feeds pointer deltas into [`OrbitControls`] and reads the camera back each
//! frame.

use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

const MIN_POLAR: f32 = 1e-6;

/// Damped orbit around a target point.
///
/// Input accumulates into a pending delta; every [`update`] applies a
/// `damping_factor` fraction of it and decays the rest, so motion eases out
/// after the pointer stops.
///
/// [`update`]: OrbitControls::update
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    radius: f32,
    theta: f32,
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self {
            target,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    /// Pointer drag in pixels; a full viewport height of travel turns the
    /// camera one full revolution.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= 2.0 * PI * dx / h * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / h * self.rotate_speed;
    }

    /// Wheel input: positive `delta_y` moves away, negative moves closer.
    pub fn dolly(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.scale /= self.zoom_step;
        } else if delta_y < 0.0 {
            self.scale *= self.zoom_step;
        }
    }

    /// Apply one frame of damped motion and return the new eye position.
    pub fn update(&mut self) -> Vec3 {
        self.theta += self.delta_theta * self.damping_factor;
        self.phi += self.delta_phi * self.damping_factor;
        self.phi = self.phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        self.radius = (self.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.delta_theta *= 1.0 - self.damping_factor;
        self.delta_phi *= 1.0 - self.damping_factor;
        self.scale = 1.0;
        self.eye()
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * s * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * s * self.theta.cos(),
            )
    }

    pub fn apply_to(&mut self, camera: &mut Camera) {
        camera.eye = self.update();
        camera.target = self.target;
    }
}

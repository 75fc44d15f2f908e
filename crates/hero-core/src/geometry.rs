//! CPU-side mesh data for the disc and the plane.
//!
//! UVs are in texture space: v = 0 is the top row of the image.

use crate::constants::{DISC_DEPTH_SCALE, DISC_RADIUS, DISC_SEGMENTS, PLANE_SIZE};
use glam::{Mat3, Vec3};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Apply a scale to positions and the matching inverse-transpose to
    /// normals.
    pub fn scale(&mut self, s: Vec3) {
        let normal_matrix = Mat3::from_diagonal(s).inverse().transpose();
        for v in &mut self.vertices {
            v.position = (Vec3::from_array(v.position) * s).to_array();
            v.normal = (normal_matrix * Vec3::from_array(v.normal))
                .normalize_or_zero()
                .to_array();
        }
    }
}

/// UV sphere with the seam and pole layout of a conventional
/// `width × height` segment sphere.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        // Pole vertices sit half a segment over so each pole triangle gets
        // its own texel column.
        let u_offset = if iy == 0 {
            0.5 / ws as f32
        } else if iy == hs {
            -0.5 / ws as f32
        } else {
            0.0
        };
        let theta = v * PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * 2.0 * PI;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            vertices.push(Vertex {
                position: p.to_array(),
                normal: p.normalize_or_zero().to_array(),
                uv: [u + u_offset, v],
            });
        }
    }

    let row = ws + 1;
    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData { vertices, indices }
}

/// The flattened ellipsoid every logo is wrapped on.
pub fn disc_mesh() -> MeshData {
    let mut mesh = uv_sphere(DISC_RADIUS, DISC_SEGMENTS, DISC_SEGMENTS);
    mesh.scale(Vec3::new(1.0, 1.0, DISC_DEPTH_SCALE));
    mesh
}

/// Square plane in XY facing +Z, centred on the origin.
pub fn plane_mesh(size: f32) -> MeshData {
    let h = size * 0.5;
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex { position: [-h, h, 0.0], normal: n, uv: [0.0, 0.0] },
        Vertex { position: [h, h, 0.0], normal: n, uv: [1.0, 0.0] },
        Vertex { position: [-h, -h, 0.0], normal: n, uv: [0.0, 1.0] },
        Vertex { position: [h, -h, 0.0], normal: n, uv: [1.0, 1.0] },
    ];
    // Counter-clockwise seen from +Z.
    let indices = vec![0, 2, 1, 2, 3, 1];
    MeshData { vertices, indices }
}

pub fn shadow_plane_mesh() -> MeshData {
    plane_mesh(PLANE_SIZE)
}

use super::helpers;
use crate::constants::{MSAA_SAMPLES, SHADOW_MAP_SIZE};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen attachments for the render pipeline.
///
/// - `msaa_*` is the multisampled colour target resolved into the swapchain.
/// - `depth_*` is the multisampled depth buffer of the main pass.
/// - `shadow_*` is the fixed-size light depth map; it survives resizes.
pub(crate) struct RenderTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) shadow_tex: wgpu::Texture,
    pub(crate) shadow_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (msaa_tex, msaa_view) = create_msaa(device, color_format, width, height);
        let (depth_tex, depth_view) = create_depth(device, width, height);
        let (shadow_tex, shadow_view) = helpers::create_attachment(
            device,
            "shadow_map",
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            DEPTH_FORMAT,
            1,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
            shadow_tex,
            shadow_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        (self.msaa_tex, self.msaa_view) = create_msaa(device, color_format, width, height);
        (self.depth_tex, self.depth_view) = create_depth(device, width, height);
    }
}

fn create_msaa(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_attachment(
        device,
        "msaa_color",
        width,
        height,
        format,
        MSAA_SAMPLES,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    )
}

fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_attachment(
        device,
        "scene_depth",
        width,
        height,
        DEPTH_FORMAT,
        MSAA_SAMPLES,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    )
}

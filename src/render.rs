use crate::constants::*;
use glam::{Mat3, Mat4, Vec3};
use hero_core::{disc_mesh, shadow_plane_mesh, Camera, HeroScene, MaterialState};
use web_sys as web;

mod helpers;
mod mesh;
mod targets;
use mesh::GpuMesh;
use targets::{RenderTargets, DEPTH_FORMAT};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    to_light: [f32; 4],
    ambient: [f32; 4],
    directional: [f32; 4],
    shadow_params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniform {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    uv_transform: [f32; 4],
    surface: [f32; 4],
}

impl ObjectUniform {
    fn new(model: Mat4, material: &MaterialState, receives_shadow: bool) -> Self {
        let normal_matrix = Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose());
        let [r, g, b] = material.color_rgb;
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            uv_transform: [
                material.texture_repeat[0],
                material.texture_repeat[1],
                material.texture_offset[0],
                material.texture_offset[1],
            ],
            surface: [
                material.metalness,
                material.roughness,
                if receives_shadow { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// GPU resources of one drawable: its uniforms and its texture binding.
struct ObjectSlot {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: Option<wgpu::Texture>,
}

#[derive(Clone, Copy)]
enum DrawItem {
    Disc(usize),
    Plane,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    scene_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    shadow_globals_bg: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    albedo_sampler: wgpu::Sampler,
    placeholder_view: wgpu::TextureView,
    _placeholder: wgpu::Texture,

    disc_mesh: GpuMesh,
    plane_mesh: GpuMesh,
    discs: Vec<ObjectSlot>,
    plane: ObjectSlot,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, disc_count: usize) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let targets = RenderTargets::new(&device, format, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(hero_core::SCENE_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Depth,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        // The shadow pass writes the shadow map, so its globals group cannot
        // also bind it.
        let shadow_globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_globals_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let globals_buffer = helpers::create_uniform_buffer::<GlobalsUniform>(&device, "globals");
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let albedo_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("albedo_sampler"),
            // Repeat so the logo can wrap twice around the disc.
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_globals_bg"),
            layout: &shadow_globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let shadow_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pl"),
            bind_group_layouts: &[&shadow_globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let scene_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&scene_pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[mesh::VERTEX_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: MSAA_SAMPLES,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&shadow_pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shadow"),
                buffers: &[mesh::VERTEX_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Back faces cast, which keeps acne off the lit side.
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: None,
            cache: None,
            multiview: None,
        });

        let (placeholder, placeholder_view) = helpers::create_placeholder_texture(&device, &queue);
        let disc_mesh = GpuMesh::upload(&device, "disc_mesh", &disc_mesh());
        let plane_mesh = GpuMesh::upload(&device, "plane_mesh", &shadow_plane_mesh());

        let make_slot = |label: &str| {
            let uniform_buffer = helpers::create_uniform_buffer::<ObjectUniform>(&device, label);
            let bind_group = object_bind_group(
                &device,
                &object_bgl,
                &uniform_buffer,
                &placeholder_view,
                &albedo_sampler,
                label,
            );
            ObjectSlot {
                uniform_buffer,
                bind_group,
                texture: None,
            }
        };
        let discs = (0..disc_count)
            .map(|i| make_slot(&format!("disc_{}", i)))
            .collect::<Vec<_>>();
        let plane = make_slot("plane");

        let [r, g, b] = BACKGROUND_RGB;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene_pipeline,
            shadow_pipeline,
            globals_buffer,
            globals_bg,
            shadow_globals_bg,
            object_bgl,
            albedo_sampler,
            placeholder_view,
            _placeholder: placeholder,
            disc_mesh,
            plane_mesh,
            discs,
            plane,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    /// Swap a disc's placeholder for its decoded logo.
    pub fn set_disc_texture(&mut self, index: usize, width: u32, height: u32, rgba: &[u8]) {
        let Some(slot) = self.discs.get_mut(index) else {
            log::warn!("[gpu] no disc slot {}", index);
            return;
        };
        if width == 0 || height == 0 || rgba.len() != (width * height * 4) as usize {
            log::warn!("[gpu] bad texture data for disc {} ({}x{})", index, width, height);
            return;
        }
        let label = format!("disc_tex_{}", index);
        let (tex, view) =
            helpers::create_rgba_texture(&self.device, &self.queue, &label, width, height, rgba);
        slot.bind_group = object_bind_group(
            &self.device,
            &self.object_bgl,
            &slot.uniform_buffer,
            &view,
            &self.albedo_sampler,
            &label,
        );
        slot.texture = Some(tex);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface and rebuild size-dependent targets.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, self.config.format, self.width, self.height);
    }

    fn write_uniforms(&self, hero: &HeroScene, camera: &Camera) {
        let lights = &hero.lights;
        let amb = lights.ambient_color;
        let dir = lights.directional_color;
        let a = lights.ambient_intensity;
        let d = lights.directional_intensity;
        let to_light = lights.to_light();
        let globals = GlobalsUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_view_proj: lights.shadow_view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            to_light: to_light.extend(0.0).to_array(),
            ambient: [amb[0] * a, amb[1] * a, amb[2] * a, 1.0],
            directional: [dir[0] * d, dir[1] * d, dir[2] * d, 1.0],
            shadow_params: [
                1.0 / SHADOW_MAP_SIZE as f32,
                SHADOW_DEPTH_BIAS,
                SHADOW_RADIUS_TEXELS,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        for (slot, disc) in self.discs.iter().zip(&hero.objects.discs) {
            let u = ObjectUniform::new(disc.world_matrix(), &disc.material, false);
            self.queue
                .write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
        let plane = &hero.objects.plane;
        let u = ObjectUniform::new(plane.transform.matrix(), &plane.material, true);
        self.queue
            .write_buffer(&self.plane.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    /// Plane first, then discs back to front; everything is blended.
    fn draw_order(&self, hero: &HeroScene, camera: &Camera) -> Vec<DrawItem> {
        let view = camera.view_matrix();
        let depth = |m: Mat4| view.transform_point3(m.transform_point3(Vec3::ZERO)).z;
        let mut discs: Vec<(f32, usize)> = hero
            .objects
            .discs
            .iter()
            .take(self.discs.len())
            .enumerate()
            .map(|(i, d)| (depth(d.world_matrix()), i))
            .collect();
        discs.sort_by(|a, b| a.0.total_cmp(&b.0));
        std::iter::once(DrawItem::Plane)
            .chain(discs.into_iter().map(|(_, i)| DrawItem::Disc(i)))
            .collect()
    }

    pub fn render(&mut self, hero: &HeroScene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms(hero, camera);
        let order = self.draw_order(hero, camera);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: disc depth from the directional light
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.shadow_pipeline);
            rpass.set_bind_group(0, &self.shadow_globals_bg, &[]);
            for slot in &self.discs {
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                self.disc_mesh.draw(&mut rpass);
            }
        }

        // Pass 2: lit scene, multisampled and resolved into the swapchain
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.scene_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for item in order {
                match item {
                    DrawItem::Disc(i) => {
                        rpass.set_bind_group(1, &self.discs[i].bind_group, &[]);
                        self.disc_mesh.draw(&mut rpass);
                    }
                    DrawItem::Plane => {
                        rpass.set_bind_group(1, &self.plane.bind_group, &[]);
                        self.plane_mesh.draw(&mut rpass);
                    }
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

use crate::assets::TextureInbox;
use crate::constants::*;
use crate::render;
use glam::Vec3;
use hero_core::{Camera, HeroScene, OrbitControls};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn initial_camera(aspect: f32) -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, CAMERA_Z),
        target: Vec3::ZERO,
        up: Vec3::Y,
        aspect,
        fovy_radians: CAMERA_FOV_DEG.to_radians(),
        znear: CAMERA_NEAR,
        zfar: CAMERA_FAR,
    }
}

pub struct FrameContext<'a> {
    pub hero: Rc<RefCell<HeroScene>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub camera: Rc<RefCell<Camera>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub pending_textures: TextureInbox,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.hero.borrow_mut().tick(dt_sec);
        self.orbit
            .borrow_mut()
            .apply_to(&mut self.camera.borrow_mut());

        let Some(g) = &mut self.gpu else {
            return;
        };
        for tex in self.pending_textures.borrow_mut().drain(..) {
            g.set_disc_texture(tex.disc, tex.width, tex.height, &tex.rgba);
        }
        g.resize_if_needed(self.canvas.width(), self.canvas.height());

        let hero = self.hero.borrow();
        let camera = self.camera.borrow();
        match g.render(&hero, &camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    disc_count: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, disc_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}

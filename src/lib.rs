#![cfg(target_arch = "wasm32")]
use crate::constants::CANVAS_SELECTOR;
use hero_core::{Camera, HeroScene, OrbitControls};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod panel;
mod render;

fn sync_viewport(canvas: &web::HtmlCanvasElement, camera: &RefCell<Camera>) {
    if let Some((css_w, css_h)) = dom::sync_canvas_backing_size(canvas) {
        camera
            .borrow_mut()
            .set_viewport(css_w as f32, css_h as f32);
    }
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, camera: Rc<RefCell<Camera>>) {
    sync_viewport(canvas, &camera);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_viewport(&canvas_resize, &camera);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let camera = Rc::new(RefCell::new(frame::initial_camera(1.0)));
    wire_canvas_resize(&canvas, camera.clone());
    let orbit = {
        let c = camera.borrow();
        Rc::new(RefCell::new(OrbitControls::new(c.eye, c.target)))
    };

    let hero = Rc::new(RefCell::new(HeroScene::new(StdRng::from_entropy())));
    hero.borrow_mut().start();
    let specs = hero
        .borrow()
        .objects
        .discs
        .iter()
        .map(|d| d.spec)
        .collect::<Vec<_>>();
    let disc_count = specs.len();

    panel::build_panel(&document, hero.clone())?;
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        orbit: orbit.clone(),
    });

    let pending_textures: assets::TextureInbox = Rc::new(RefCell::new(Vec::new()));
    assets::load_disc_textures(specs, pending_textures.clone());

    let gpu = frame::init_gpu(&canvas, disc_count).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        hero,
        orbit,
        camera,
        canvas,
        gpu,
        pending_textures,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

use hero_core::OrbitControls;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last_x: f64,
    last_y: f64,
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub orbit: Rc<RefCell<OrbitControls>>,
}

/// Drag to orbit, wheel to dolly.
pub fn wire_input_handlers(w: InputWiring) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(&w, drag.clone());
    wire_pointermove(&w, drag.clone());
    wire_pointerup(&w, drag);
    wire_wheel(&w);
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    name: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring, drag: Rc<RefCell<DragState>>) {
    let canvas = w.canvas.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let mut ds = drag.borrow_mut();
        ds.active = true;
        ds.pointer_id = ev.pointer_id();
        ds.last_x = ev.client_x() as f64;
        ds.last_y = ev.client_y() as f64;
        _ = canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(w: &InputWiring, drag: Rc<RefCell<DragState>>) {
    let w = w.clone();
    let target = w.canvas.clone();
    listen(&target, "pointermove", move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        if !ds.active || ds.pointer_id != ev.pointer_id() {
            return;
        }
        let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
        let (dx, dy) = (x - ds.last_x, y - ds.last_y);
        ds.last_x = x;
        ds.last_y = y;
        let h = w.canvas.client_height() as f32;
        w.orbit
            .borrow_mut()
            .rotate_by_pixels(dx as f32, dy as f32, h);
    });
}

fn wire_pointerup(w: &InputWiring, drag: Rc<RefCell<DragState>>) {
    let canvas = w.canvas.clone();
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas_release = canvas.clone();
        listen(&canvas, name, move |ev: web::PointerEvent| {
            let mut ds = drag.borrow_mut();
            if ds.active && ds.pointer_id == ev.pointer_id() {
                ds.active = false;
                _ = canvas_release.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &InputWiring) {
    let orbit = w.orbit.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        orbit.borrow_mut().dolly(ev.delta_y() as f32);
    });
}

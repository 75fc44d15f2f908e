use crate::constants::backing_size;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn create_element(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}> failed: {:?}", tag, e))
}

/// CSS size of the viewport in CSS pixels.
pub fn viewport_css_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w, h)
}

/// Size the canvas to the viewport and set its backing store to the CSS size
/// times the clamped device pixel ratio. Returns the CSS size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Option<(f64, f64)> {
    let w = web::window()?;
    let (css_w, css_h) = viewport_css_size(&w);
    let (w_px, h_px) = backing_size(css_w, css_h, w.device_pixel_ratio());
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", css_w));
    _ = style.set_property("height", &format!("{}px", css_h));
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Some((css_w, css_h))
}

use hero_core::DiscSpec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Decoded logo waiting for the frame loop to upload it.
pub struct DecodedTexture {
    pub disc: usize,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub type TextureInbox = Rc<RefCell<Vec<DecodedTexture>>>;

/// Fetch and decode every disc texture in the background. Failures leave the
/// disc on its white placeholder.
pub fn load_disc_textures(specs: Vec<DiscSpec>, inbox: TextureInbox) {
    for (disc, spec) in specs.into_iter().enumerate() {
        let inbox = inbox.clone();
        spawn_local(async move {
            let path = spec.texture_path();
            match fetch_image(path).await {
                Ok(img) => {
                    let (width, height) = img.dimensions();
                    log::info!("[assets] {} loaded {}x{}", path, width, height);
                    inbox.borrow_mut().push(DecodedTexture {
                        disc,
                        width,
                        height,
                        rgba: img.into_raw(),
                    });
                }
                Err(e) => log::warn!("[assets] {} failed: {:?}", path, e),
            }
        });
    }
}

async fn fetch_image(path: &str) -> anyhow::Result<image::RgbaImage> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("fetch: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let buf = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("array_buffer: {:?}", e))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| anyhow::anyhow!("array_buffer: {:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    let img = image::load_from_memory(&bytes)?;
    Ok(img.to_rgba8())
}

//! PNG and GIF downloads through a temporary anchor element.

use super::webgl::WebGlBackend;
use crate::explorer::Explorer;
use mandelbrot_set_core::export::{
    data_url, encode_gif, encode_png, GIF_FRAME_DELAY_MS, GIF_MIME, PNG_MIME,
};
use mandelbrot_set_core::{cardioid_path, record_julia_frames};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAnchorElement;

/// Start a browser download of `url` as `filename`.
pub fn trigger_download(url: &str, filename: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}

/// Save the last frame drawn by `backend` as PNG.
pub fn download_png(backend: &WebGlBackend, filename: &str) -> Result<(), String> {
    let (width, height) = (backend.canvas().width(), backend.canvas().height());
    let pixels = backend.read_pixels().map_err(|e| e.to_string())?;
    let png = encode_png(&pixels, width, height).map_err(|e| e.to_string())?;
    trigger_download(&data_url(PNG_MIME, &png), filename).map_err(|e| format!("{e:?}"))?;
    log::info!("Downloaded {filename} ({width}x{height})");
    Ok(())
}

/// Render the Julia set along the cardioid path and download it as GIF.
///
/// Returns the number of frames encoded.
pub fn download_julia_animation(app: &mut Explorer, filename: &str) -> Result<usize, String> {
    let size = app.julia_surface().size();
    let frames = record_julia_frames(app, &cardioid_path(), |backend, _| backend.read_pixels())
        .map_err(|e| e.to_string())?;

    let gif = encode_gif(&frames, size.width, size.height, GIF_FRAME_DELAY_MS)
        .map_err(|e| e.to_string())?;
    trigger_download(&data_url(GIF_MIME, &gif), filename).map_err(|e| format!("{e:?}"))?;
    Ok(frames.len())
}

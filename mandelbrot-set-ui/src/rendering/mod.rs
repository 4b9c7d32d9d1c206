mod download;
mod webgl;

pub use download::{download_julia_animation, download_png};
pub use webgl::WebGlBackend;

mod app;
mod components;
mod explorer;
mod hooks;
mod rendering;

use wasm_bindgen::prelude::*;

pub use app::App;

#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount_to_body(App);
}

// mandelbrot-set-ui/src/components/export_buttons.rs
use crate::components::Notice;
use crate::explorer::ExplorerHandle;
use crate::rendering::{download_julia_animation, download_png};
use gloo_timers::future::TimeoutFuture;
use leptos::*;

const MAIN_PNG: &str = "multibrot.png";
const JULIA_PNG: &str = "julia.png";
const JULIA_GIF: &str = "julia.gif";

/// Lets the status notice paint before the blocking recording starts.
const PAINT_DELAY_MS: u32 = 50;

/// Snapshot and animation downloads.
#[component]
pub fn ExportButtons(explorer: ExplorerHandle, on_notice: Callback<Notice>) -> impl IntoView {
    let (recording, set_recording) = create_signal(false);

    let report = move |result: Option<Result<(), String>>| match result {
        Some(Ok(())) => {}
        Some(Err(err)) => {
            log::error!("export failed: {err}");
            on_notice.call(Notice::error(format!("Export failed: {err}")));
        }
        None => on_notice.call(Notice::error("Renderer not ready")),
    };

    let save_main = move |_| {
        report(explorer.with(|app| download_png(app.main_surface().backend(), MAIN_PNG)))
    };
    let save_julia = move |_| {
        report(explorer.with(|app| download_png(app.julia_surface().backend(), JULIA_PNG)))
    };

    let animate = move |_| {
        if recording.get_untracked() {
            return;
        }
        set_recording.set(true);
        on_notice.call(Notice::info("Recording Julia animation..."));
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(PAINT_DELAY_MS).await;
            match explorer.with(|app| download_julia_animation(app, JULIA_GIF)) {
                Some(Ok(frames)) => {
                    log::info!("Recorded {frames} frames to {JULIA_GIF}");
                    on_notice.call(Notice::info(format!("Saved {frames} frames")));
                }
                Some(Err(err)) => report(Some(Err(err))),
                None => report(None),
            }
            let _ = set_recording.try_set(false);
        });
    };

    let button = "px-2 py-1 rounded bg-white/10 hover:bg-white/20 text-white text-xs \
                  disabled:opacity-40";

    view! {
        <div class="flex flex-wrap gap-1">
            <button id="download-main" class=button on:click=save_main>"Save Multibrot"</button>
            <button id="download-julia" class=button on:click=save_julia>"Save Julia"</button>
            <button
                id="animate-julia"
                class=button
                prop:disabled=move || recording.get()
                on:click=animate
            >
                "Animate Julia"
            </button>
        </div>
    }
}

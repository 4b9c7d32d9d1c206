use crate::components::{
    ExportButtons, FractalCanvas, MovementPad, Notice, PalettePickers, ParameterPanel, Toast,
};
use crate::explorer::ExplorerHandle;
use crate::hooks::{
    load_state, use_debounced_save, use_hashchange_listener, use_hold_repeat, use_keyboard_steps,
    PersistedState,
};
use crate::rendering::WebGlBackend;
use leptos::html::Canvas;
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_use::use_window_size;
use mandelbrot_set_core::{
    Application, Palette, Point, RedrawReport, ScreenPoint, Settings, SurfaceSize, SurfaceTarget,
};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

/// Surface sizes for the current window. Side by side halves the width;
/// otherwise the Julia surface sits below the main one at full size.
fn surface_sizes(width: f64, height: f64, side_by_side: bool) -> (SurfaceSize, SurfaceSize) {
    let width = width.max(0.0) as u32;
    let height = height.max(0.0) as u32;
    let size = if side_by_side {
        SurfaceSize::new(width / 2, height)
    } else {
        SurfaceSize::new(width, height)
    };
    (size, size)
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // ========== Restore state (URL hash > localStorage > defaults) ==========
    let initial = load_state().unwrap_or_default();
    let initial_views = (initial.main_view, initial.julia_view);

    let (settings, set_settings) = create_signal(initial.settings);
    let (seed, set_seed) = create_signal(initial.seed);
    let (notice, set_notice) = create_signal(None::<Notice>);

    let explorer = ExplorerHandle::new();
    let main_ref = create_node_ref::<Canvas>();
    let julia_ref = create_node_ref::<Canvas>();
    let window_size = use_window_size();

    let layout = move || {
        surface_sizes(
            window_size.width.get(),
            window_size.height.get(),
            settings.with(|s| s.side_by_side),
        )
    };

    let on_notice = Callback::new(move |n: Notice| set_notice.set(Some(n)));
    let save = use_debounced_save();

    // Every redraw ends here: surface errors go to the toast, state is saved
    // once the burst of redraws settles.
    let on_report = Callback::new(move |report: RedrawReport| {
        if let Some(err) = report.first_error() {
            on_notice.call(Notice::error(err.to_string()));
        }
        let snapshot = explorer.with(|app| {
            PersistedState::new(
                settings.get_untracked(),
                *app.main_surface().transform(),
                *app.julia_surface().transform(),
                app.seed(),
            )
        });
        if let Some(state) = snapshot {
            save.call(state);
        }
    });

    // ========== Controller setup once both canvases are mounted ==========
    create_effect(move |_| {
        let (Some(main), Some(julia)) = (main_ref.get(), julia_ref.get()) else {
            return;
        };
        if explorer.is_ready() {
            return;
        }

        let main_canvas = main.unchecked_ref::<HtmlCanvasElement>().clone();
        let julia_canvas = julia.unchecked_ref::<HtmlCanvasElement>().clone();
        let (main_size, julia_size) = untrack(layout);

        let mut app = Application::new(
            WebGlBackend::new(main_canvas),
            main_size,
            WebGlBackend::new(julia_canvas),
            julia_size,
        );
        app.main_surface_mut().set_transform(initial_views.0);
        app.julia_surface_mut().set_transform(initial_views.1);

        let mut restored = settings.get_untracked();
        let report = match app.apply_settings(&restored) {
            Ok(report) => report,
            Err(err) => {
                log::warn!("Stored settings rejected, using defaults: {err}");
                restored = Settings {
                    side_by_side: restored.side_by_side,
                    ..Settings::default()
                };
                set_settings.set(restored.clone());
                app.apply_settings(&restored).unwrap_or_else(|_| app.redraw())
            }
        };
        if let Some(err) = report.first_error() {
            on_notice.call(Notice::error(err.to_string()));
        }
        if let Err(err) = app.set_julia_seed_plane(seed.get_untracked()) {
            log::warn!("Stored seed rejected: {err}");
            set_seed.set(app.seed());
        }

        log::info!(
            "Renderer ready: main {}x{}, julia {}x{}",
            main_size.width,
            main_size.height,
            julia_size.width,
            julia_size.height
        );
        explorer.install(app);
    });

    // ========== Resize both surfaces with the window or layout ==========
    create_effect(move |_| {
        let (main_size, julia_size) = layout();
        if let Some(report) = explorer.with(|app| app.resize(main_size, julia_size)) {
            on_report.call(report);
        }
    });

    // ========== Shared parameters (layout changes are handled above) ==========
    let render_settings = create_memo(move |_| {
        let mut s = settings.get();
        s.side_by_side = false;
        s
    });
    create_effect(move |prev: Option<()>| {
        let s = render_settings.get();
        if prev.is_none() {
            return;
        }
        match explorer.with(|app| app.apply_settings(&s)) {
            Some(Ok(report)) => on_report.call(report),
            Some(Err(err)) => on_notice.call(Notice::error(err.to_string())),
            None => {}
        }
    });

    // ========== Julia seed ==========
    let on_pick = Callback::new(move |point: ScreenPoint| {
        if let Some((report, picked)) = explorer.with(|app| {
            let report = app.set_julia_seed(point);
            (report, app.seed())
        }) {
            set_seed.set(picked);
            on_report.call(report);
        }
    });

    let on_seed = Callback::new(move |point: Point| {
        match explorer.with(|app| app.set_julia_seed_plane(point)) {
            Some(Ok(report)) => {
                set_seed.set(point);
                on_report.call(report);
            }
            Some(Err(err)) => on_notice.call(Notice::error(err.to_string())),
            None => {}
        }
    });

    let on_redraw = Callback::new(move |_: ()| {
        if let Some(report) = explorer.with(|app| app.redraw()) {
            on_report.call(report);
        }
    });

    let on_settings = Callback::new(move |next: Settings| set_settings.set(next));
    let on_palette = Callback::new(move |palette: Palette| {
        set_settings.update(|s| s.palette = palette);
    });

    // ========== Shared links pasted into this tab ==========
    use_hashchange_listener(move |state: PersistedState| {
        match explorer.with(|app| app.restore_view(state.main_view, state.julia_view, state.seed)) {
            Some(Ok(report)) => {
                set_seed.set(state.seed);
                on_report.call(report);
            }
            Some(Err(err)) => on_notice.call(Notice::error(err.to_string())),
            None => return,
        }
        set_settings.set(state.settings);
    });

    let hold = use_hold_repeat(explorer, on_report);
    use_keyboard_steps(explorer, on_report);

    let settings_signal = Signal::from(settings);
    let seed_signal = Signal::from(seed);
    let palette = Signal::from(create_memo(move |_| settings.with(|s| s.palette.clone())));

    view! {
        <Title text="Multibrot and Julia explorer" />
        <div class="relative w-screen min-h-screen bg-black overflow-auto">
            <div class=move || {
                if settings.with(|s| s.side_by_side) { "flex flex-row" } else { "flex flex-col" }
            }>
                <FractalCanvas id="multibrot" node_ref=main_ref on_pick=on_pick />
                <FractalCanvas id="julia" node_ref=julia_ref />
            </div>

            <div class="fixed top-2 left-2 z-40 p-3 rounded-lg bg-black/70 flex flex-col gap-3">
                <ParameterPanel
                    settings=settings_signal
                    seed=seed_signal
                    on_settings=on_settings
                    on_seed=on_seed
                    on_redraw=on_redraw
                    on_notice=on_notice
                />
                <PalettePickers palette=palette on_change=on_palette on_notice=on_notice />
                <div class="flex gap-3">
                    <MovementPad target=SurfaceTarget::Main title="Multibrot" hold=hold />
                    <MovementPad target=SurfaceTarget::Julia title="Julia" hold=hold />
                    <MovementPad target=SurfaceTarget::Both title="Both" hold=hold />
                </div>
                <ExportButtons explorer=explorer on_notice=on_notice />
            </div>

            <Toast notice=Signal::from(notice) />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_layout_gives_each_surface_the_full_window() {
        let (main, julia) = surface_sizes(800.0, 600.0, false);
        assert_eq!(main, SurfaceSize::new(800, 600));
        assert_eq!(julia, main);
    }

    #[test]
    fn side_by_side_halves_the_width() {
        let (main, julia) = surface_sizes(801.0, 600.0, true);
        assert_eq!(main, SurfaceSize::new(400, 600));
        assert_eq!(julia, main);
    }

    #[test]
    fn degenerate_windows_keep_one_pixel() {
        let (main, _) = surface_sizes(0.0, -5.0, true);
        assert_eq!(main, SurfaceSize::new(1, 1));
    }
}

// mandelbrot-set-ui/src/hooks/hold_repeat.rs
use crate::explorer::ExplorerHandle;
use gloo_timers::callback::Interval;
use leptos::*;
use mandelbrot_set_core::{Adjustment, HoldRepeat, RedrawReport, REPEAT_INTERVAL_MS};

/// Press/release callbacks for the pan and zoom pads.
#[derive(Clone, Copy)]
pub struct HoldControls {
    pub press: Callback<Adjustment>,
    pub release: Callback<()>,
}

/// Hook for press-and-hold pan/zoom:
/// - press applies one step at once, then one every `REPEAT_INTERVAL_MS`
/// - a new press replaces the running interval
/// - any mouseup/touchend on the window releases
pub fn use_hold_repeat(explorer: ExplorerHandle, on_report: Callback<RedrawReport>) -> HoldControls {
    let hold = store_value(HoldRepeat::<Interval>::new());

    let step = move |adjustment: Adjustment| {
        if let Some(report) = explorer.with(|app| app.apply(adjustment)) {
            on_report.call(report);
        }
    };

    let press = Callback::new(move |adjustment: Adjustment| {
        step(adjustment);
        let interval = Interval::new(REPEAT_INTERVAL_MS, move || step(adjustment));
        hold.update_value(|hold| hold.press(adjustment, interval));
    });

    let release = Callback::new(move |_: ()| {
        hold.update_value(|hold| {
            hold.release();
        });
    });

    let _ = leptos_use::use_event_listener(leptos_use::use_window(), ev::mouseup, move |_| {
        release.call(())
    });
    let _ = leptos_use::use_event_listener(leptos_use::use_window(), ev::touchend, move |_| {
        release.call(())
    });

    on_cleanup(move || {
        let _ = hold.try_update_value(|hold| hold.release());
    });

    HoldControls { press, release }
}

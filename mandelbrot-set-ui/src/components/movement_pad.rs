// mandelbrot-set-ui/src/components/movement_pad.rs
use crate::hooks::HoldControls;
use leptos::*;
use mandelbrot_set_core::{Adjustment, SurfaceTarget};

/// One pad button. Ids follow `{prefix}move-up`, `{prefix}zoom-in`, ...
#[component]
fn PadButton(
    id: String,
    label: &'static str,
    adjustment: Adjustment,
    hold: HoldControls,
) -> impl IntoView {
    view! {
        <button
            id=id
            class="w-9 h-9 rounded bg-white/10 hover:bg-white/20 text-white select-none"
            on:mousedown=move |_| hold.press.call(adjustment)
            on:mouseleave=move |_| hold.release.call(())
            on:touchstart=move |ev| {
                // Suppress the emulated mousedown that would press twice.
                ev.prevent_default();
                hold.press.call(adjustment);
            }
        >
            {label}
        </button>
    }
}

/// Directional pad with zoom buttons for one target.
#[component]
pub fn MovementPad(
    target: SurfaceTarget,
    title: &'static str,
    hold: HoldControls,
) -> impl IntoView {
    let prefix = target.id_prefix();
    let id = move |name: &str| format!("{prefix}{name}");

    view! {
        <div class="flex flex-col items-center gap-1">
            <span class="text-xs text-white/70">{title}</span>
            <div class="grid grid-cols-3 gap-1">
                <PadButton id=id("zoom-in") label="+" adjustment=Adjustment::zoom_in(target) hold=hold />
                <PadButton id=id("move-up") label="↑" adjustment=Adjustment::up(target) hold=hold />
                <PadButton id=id("zoom-out") label="−" adjustment=Adjustment::zoom_out(target) hold=hold />
                <PadButton id=id("move-left") label="←" adjustment=Adjustment::left(target) hold=hold />
                <div />
                <PadButton id=id("move-right") label="→" adjustment=Adjustment::right(target) hold=hold />
                <div />
                <PadButton id=id("move-down") label="↓" adjustment=Adjustment::down(target) hold=hold />
                <div />
            </div>
        </div>
    }
}

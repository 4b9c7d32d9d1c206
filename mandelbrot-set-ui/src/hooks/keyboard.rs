// mandelbrot-set-ui/src/hooks/keyboard.rs
use crate::explorer::ExplorerHandle;
use leptos::*;
use mandelbrot_set_core::{Adjustment, RedrawReport, SurfaceTarget};
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

/// Step for a key: arrows or w/a/s/d pan, z zooms in, x zooms out.
/// Every key moves both surfaces.
pub fn adjustment_for_key(key: &str) -> Option<Adjustment> {
    let target = SurfaceTarget::Both;
    match key {
        "ArrowUp" | "w" => Some(Adjustment::up(target)),
        "ArrowDown" | "s" => Some(Adjustment::down(target)),
        "ArrowLeft" | "a" => Some(Adjustment::left(target)),
        "ArrowRight" | "d" => Some(Adjustment::right(target)),
        "z" => Some(Adjustment::zoom_in(target)),
        "x" => Some(Adjustment::zoom_out(target)),
        _ => None,
    }
}

/// Typing into a parameter field must not pan the view.
fn is_form_field(target: Option<EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<HtmlInputElement>().is_some() || t.dyn_ref::<HtmlSelectElement>().is_some()
    })
}

fn step_for(ev: &KeyboardEvent) -> Option<Adjustment> {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || is_form_field(ev.target()) {
        return None;
    }
    adjustment_for_key(&ev.key())
}

/// Hook for discrete keyboard steps. Each keydown (including auto-repeat)
/// applies one adjustment.
pub fn use_keyboard_steps(explorer: ExplorerHandle, on_report: Callback<RedrawReport>) {
    let _ = leptos_use::use_event_listener(leptos_use::use_window(), ev::keydown, move |ev| {
        let Some(adjustment) = step_for(&ev) else {
            return;
        };
        ev.prevent_default();
        if let Some(report) = explorer.with(|app| app.apply(adjustment)) {
            on_report.call(report);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_letters_share_steps() {
        assert_eq!(adjustment_for_key("ArrowUp"), adjustment_for_key("w"));
        assert_eq!(adjustment_for_key("ArrowDown"), adjustment_for_key("s"));
        assert_eq!(adjustment_for_key("ArrowLeft"), adjustment_for_key("a"));
        assert_eq!(adjustment_for_key("ArrowRight"), adjustment_for_key("d"));
        assert_eq!(
            adjustment_for_key("w"),
            Some(Adjustment::up(SurfaceTarget::Both))
        );
    }

    #[test]
    fn z_and_x_zoom_both_surfaces() {
        assert_eq!(
            adjustment_for_key("z"),
            Some(Adjustment::zoom_in(SurfaceTarget::Both))
        );
        assert_eq!(
            adjustment_for_key("x"),
            Some(Adjustment::zoom_out(SurfaceTarget::Both))
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(adjustment_for_key("Enter"), None);
        assert_eq!(adjustment_for_key("W"), None);
        assert_eq!(adjustment_for_key("q"), None);
    }
}

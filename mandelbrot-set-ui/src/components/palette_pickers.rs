// mandelbrot-set-ui/src/components/palette_pickers.rs
use crate::components::Notice;
use leptos::*;
use mandelbrot_set_core::{Color, Palette};

/// One native color input per palette entry (`color-0`, `color-1`, ...).
#[component]
pub fn PalettePickers(
    palette: Signal<Palette>,
    on_change: Callback<Palette>,
    on_notice: Callback<Notice>,
) -> impl IntoView {
    let replace = move |index: usize, hex: String| {
        let color = match Color::from_hex(&hex) {
            Ok(color) => color,
            Err(err) => {
                on_notice.call(Notice::error(err.to_string()));
                return;
            }
        };
        let mut colors = palette.get_untracked().colors().to_vec();
        let Some(slot) = colors.get_mut(index) else {
            return;
        };
        *slot = color;
        match Palette::new(colors) {
            Ok(next) => on_change.call(next),
            Err(err) => on_notice.call(Notice::error(err.to_string())),
        }
    };

    let count = move || palette.with(Palette::len);

    view! {
        <div class="grid grid-cols-8 gap-1">
            {move || {
                (0..count())
                    .map(|index| {
                        let value = move || {
                            palette.with(|p| p.colors().get(index).map(Color::to_hex))
                        };
                        view! {
                            <input
                                id=format!("color-{index}")
                                type="color"
                                class="w-6 h-6 p-0 border-0 bg-transparent cursor-pointer"
                                prop:value=move || value().unwrap_or_default()
                                on:change=move |ev| replace(index, event_target_value(&ev))
                            />
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

//! Numeric parameters, algorithm selection and layout toggle.

use crate::components::Notice;
use leptos::*;
use mandelbrot_set_core::settings::{
    parse_bail_out, parse_exponent, parse_max_iterations, parse_seed_coordinate,
};
use mandelbrot_set_core::{
    ColoringAlgorithm, ConfigError, IterationAlgorithm, Point, Settings,
};

#[component]
fn NumberField(
    id: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_commit: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="flex items-center justify-between gap-2 text-xs text-white/80">
            <span>{label}</span>
            <input
                id=id
                type="text"
                inputmode="decimal"
                class="w-24 px-1 py-0.5 rounded bg-white/10 text-white text-right"
                prop:value=move || value.get()
                on:change=move |ev| on_commit.call(event_target_value(&ev))
            />
        </label>
    }
}

/// Commit a parsed value, or report the rejection and restore the field.
fn commit<T>(
    parsed: Result<T, ConfigError>,
    on_notice: Callback<Notice>,
    refresh: impl Fn(),
    apply: impl FnOnce(T),
) {
    match parsed {
        Ok(value) => apply(value),
        Err(err) => {
            log::warn!("rejected input: {err}");
            on_notice.call(Notice::error(err.to_string()));
            refresh();
        }
    }
}

#[component]
pub fn ParameterPanel(
    settings: Signal<Settings>,
    seed: Signal<Point>,
    on_settings: Callback<Settings>,
    on_seed: Callback<Point>,
    on_redraw: Callback<()>,
    on_notice: Callback<Notice>,
) -> impl IntoView {
    // Bumped to re-render field values from state after rejected input.
    let (revision, set_revision) = create_signal(0u32);
    let refresh = move || set_revision.update(|r| *r += 1);

    let field = move |read: fn(&Settings) -> String| {
        Signal::derive(move || {
            revision.get();
            settings.with(read)
        })
    };

    let update = move |change: &dyn Fn(&mut Settings)| {
        let mut next = settings.get_untracked();
        change(&mut next);
        on_settings.call(next);
    };

    let on_max_iterations = Callback::new(move |raw: String| {
        commit(parse_max_iterations(&raw), on_notice, refresh, |v| {
            update(&|s| s.max_iterations = v)
        })
    });
    let on_bail_out = Callback::new(move |raw: String| {
        commit(parse_bail_out(&raw), on_notice, refresh, |v| {
            update(&|s| s.bail_out = v)
        })
    });
    let on_exponent = Callback::new(move |raw: String| {
        commit(parse_exponent(&raw), on_notice, refresh, |v| {
            update(&|s| s.exponent = v)
        })
    });

    let seed_field = move |read: fn(Point) -> f32| {
        Signal::derive(move || {
            revision.get();
            read(seed.get()).to_string()
        })
    };
    let on_seed_x = Callback::new(move |raw: String| {
        commit(parse_seed_coordinate(&raw), on_notice, refresh, |x| {
            on_seed.call(Point::new(x, seed.get_untracked().y))
        })
    });
    let on_seed_y = Callback::new(move |raw: String| {
        commit(parse_seed_coordinate(&raw), on_notice, refresh, |y| {
            on_seed.call(Point::new(seed.get_untracked().x, y))
        })
    });

    let on_coloring = move |ev: ev::Event| {
        commit(
            ColoringAlgorithm::from_select_value(&event_target_value(&ev)),
            on_notice,
            refresh,
            |c| update(&|s| s.coloring = c),
        )
    };
    let on_iteration = move |ev: ev::Event| {
        commit(
            IterationAlgorithm::from_select_value(&event_target_value(&ev)),
            on_notice,
            refresh,
            |i| update(&|s| s.iteration = i),
        )
    };

    view! {
        <div class="flex flex-col gap-1.5 min-w-[14rem]">
            <NumberField
                id="max-iterations"
                label="Max iterations"
                value=field(|s| s.max_iterations.to_string())
                on_commit=on_max_iterations
            />
            <NumberField
                id="bail-out"
                label="Bail-out radius"
                value=field(|s| s.bail_out.to_string())
                on_commit=on_bail_out
            />
            <NumberField
                id="exponent"
                label="Exponent"
                value=field(|s| s.exponent.to_string())
                on_commit=on_exponent
            />
            <NumberField id="julia-x" label="Julia x" value=seed_field(|p| p.x) on_commit=on_seed_x />
            <NumberField id="julia-y" label="Julia y" value=seed_field(|p| p.y) on_commit=on_seed_y />

            <label class="flex items-center justify-between gap-2 text-xs text-white/80">
                <span>"Coloring"</span>
                <select
                    id="color-alg"
                    class="px-1 py-0.5 rounded bg-white/10 text-white"
                    on:change=on_coloring
                >
                    {ColoringAlgorithm::ALL
                        .iter()
                        .map(|&c| view! {
                            <option
                                value=c.select_value()
                                prop:selected=move || settings.with(|s| s.coloring == c)
                            >
                                {c.display_name()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </label>

            <label class="flex items-center justify-between gap-2 text-xs text-white/80">
                <span>"Iteration"</span>
                <select
                    id="iteration-alg"
                    class="px-1 py-0.5 rounded bg-white/10 text-white"
                    on:change=on_iteration
                >
                    {IterationAlgorithm::ALL
                        .iter()
                        .map(|&i| view! {
                            <option
                                value=i.select_value()
                                prop:selected=move || settings.with(|s| s.iteration == i)
                            >
                                {i.display_name()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </label>

            <label class="flex items-center gap-2 text-xs text-white/80">
                <input
                    id="side-by-side"
                    type="checkbox"
                    prop:checked=move || settings.with(|s| s.side_by_side)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        update(&|s| s.side_by_side = checked);
                    }
                />
                <span>"Side by side"</span>
            </label>

            <button
                id="redraw-btn"
                class="mt-1 px-2 py-1 rounded bg-white/10 hover:bg-white/20 text-white text-xs"
                on:click=move |_| on_redraw.call(())
            >
                "Redraw"
            </button>
        </div>
    }
}

// mandelbrot-set-ui/src/components/fractal_canvas.rs
use leptos::html::Canvas;
use leptos::*;
use mandelbrot_set_core::ScreenPoint;
use web_sys::Element;

fn relative_to(element: &Element, client_x: i32, client_y: i32) -> ScreenPoint {
    let rect = element.get_bounding_client_rect();
    ScreenPoint::new(
        client_x as f32 - rect.left() as f32,
        client_y as f32 - rect.top() as f32,
    )
}

/// Canvas for one render surface. Sizing and drawing are owned by the
/// controller; this only reports pointer picks.
#[component]
pub fn FractalCanvas(
    id: &'static str,
    node_ref: NodeRef<Canvas>,
    /// Called with the surface-relative position of a click or touch
    #[prop(optional)]
    on_pick: Option<Callback<ScreenPoint>>,
) -> impl IntoView {
    let pick = move |client_x: i32, client_y: i32| {
        let (Some(callback), Some(canvas)) = (on_pick, node_ref.get_untracked()) else {
            return;
        };
        callback.call(relative_to(&canvas, client_x, client_y));
    };

    view! {
        <canvas
            id=id
            node_ref=node_ref
            class="block touch-none"
            class:cursor-crosshair=on_pick.is_some()
            on:click=move |ev| pick(ev.client_x(), ev.client_y())
            on:touchstart=move |ev| {
                if let Some(touch) = ev.touches().get(0) {
                    ev.prevent_default();
                    pick(touch.client_x(), touch.client_y());
                }
            }
        />
    }
}

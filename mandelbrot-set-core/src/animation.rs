//! Julia-seed animation along a parametric curve.

use crate::controller::Application;
use crate::error::RenderError;
use crate::surface::GraphicsBackend;
use crate::viewport::{Point, SurfaceSize};
use std::f32::consts::TAU;

/// Parameter increment between animation frames.
pub const CARDIOID_STEP: f32 = 0.1;

/// Point on a curve hugging the main cardioid of the Mandelbrot set.
pub fn cardioid_point(t: f32) -> Point {
    Point::new(
        0.28 - 0.26 * (1.0 - 2.0 * t.cos() + (2.0 * t).cos()),
        0.26 * (2.0 * t.sin() - (2.0 * t).sin()),
    )
}

/// Sample `curve` at `start, start + step, ...` while below `end`.
pub fn curve_points<F>(start: f32, end: f32, step: f32, curve: F) -> Vec<Point>
where
    F: Fn(f32) -> Point,
{
    let valid = step.is_finite() && step > 0.0 && start < end;
    if !valid {
        return Vec::new();
    }
    // Index-based so that f32 accumulation error cannot add a frame.
    let count = ((end - start) / step).ceil() as usize;
    (0..count)
        .map(|i| start + i as f32 * step)
        .filter(|t| *t < end)
        .map(curve)
        .collect()
}

/// The full cardioid loop, `t` in `[0, 2pi)`.
pub fn cardioid_path() -> Vec<Point> {
    curve_points(0.0, TAU, CARDIOID_STEP, cardioid_point)
}

/// Draw the Julia surface once per seed in `path` and collect `capture`'s
/// output for each frame. The seed in effect before the call is restored.
pub fn record_julia_frames<B, F>(
    app: &mut Application<B>,
    path: &[Point],
    mut capture: F,
) -> Result<Vec<Vec<u8>>, RenderError>
where
    B: GraphicsBackend,
    F: FnMut(&B, SurfaceSize) -> Result<Vec<u8>, RenderError>,
{
    let original = app.seed();
    let mut frames = Vec::with_capacity(path.len());

    let result = path.iter().try_for_each(|seed| {
        let report = match app.set_julia_seed_plane(*seed) {
            Ok(report) => report,
            Err(err) => {
                log::warn!("skipping animation frame: {err}");
                return Ok(());
            }
        };
        if let Some(Err(err)) = report.julia {
            return Err(err);
        }
        let surface = app.julia_surface();
        frames.push(capture(surface.backend(), surface.size())?);
        Ok(())
    });

    if let Err(err) = app.set_julia_seed_plane(original) {
        log::warn!("could not restore julia seed: {err}");
    }
    result.map(|_| frames)
}

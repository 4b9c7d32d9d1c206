//! Screen <-> plane coordinate mapping.
//!
//! The fragment shader evaluates pixel `gl_FragCoord` at
//! `(frag - size / 2) * (scale / width) + offset`. Both directions here use the
//! same convention so that a click lands on the point drawn under the pointer:
//! - Y is flipped (screen Y grows downward, plane Y upward)
//! - both axes are scaled by `scale / width`, preserving the aspect ratio
//! - no axis is negated

use crate::viewport::{Point, ScreenPoint, SurfaceSize, ViewTransform};

/// Map a surface-relative screen position to a plane point.
pub fn screen_to_plane(size: SurfaceSize, transform: &ViewTransform, screen: ScreenPoint) -> Point {
    let width = size.width as f32;
    let height = size.height as f32;
    let units_per_pixel = transform.scale / width;

    let frag_x = screen.x;
    let frag_y = height - screen.y;

    Point {
        x: (frag_x - width / 2.0) * units_per_pixel + transform.offset.x,
        y: (frag_y - height / 2.0) * units_per_pixel + transform.offset.y,
    }
}

/// Map a plane point to a surface-relative screen position.
pub fn plane_to_screen(size: SurfaceSize, transform: &ViewTransform, point: Point) -> ScreenPoint {
    let width = size.width as f32;
    let height = size.height as f32;
    let pixels_per_unit = width / transform.scale;

    let frag_x = (point.x - transform.offset.x) * pixels_per_unit + width / 2.0;
    let frag_y = (point.y - transform.offset.y) * pixels_per_unit + height / 2.0;

    ScreenPoint {
        x: frag_x,
        y: height - frag_y,
    }
}

/// Plane point sampled at the center of pixel `(px, py)`, rows counted from
/// the bottom as in `gl_FragCoord`.
pub fn fragment_to_plane(size: SurfaceSize, transform: &ViewTransform, px: u32, py: u32) -> Point {
    let width = size.width as f32;
    let height = size.height as f32;
    let units_per_pixel = transform.scale / width;

    Point {
        x: (px as f32 + 0.5 - width / 2.0) * units_per_pixel + transform.offset.x,
        y: (py as f32 + 0.5 - height / 2.0) * units_per_pixel + transform.offset.y,
    }
}

/// Visible plane height for a surface (width is `transform.scale`).
pub fn visible_plane_height(size: SurfaceSize, transform: &ViewTransform) -> f32 {
    transform.scale * size.height as f32 / size.width as f32
}

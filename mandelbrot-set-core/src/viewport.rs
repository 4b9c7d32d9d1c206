use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default visible plane width across a surface.
pub const DEFAULT_SCALE: f32 = 4.0;

/// Smallest scale reachable by zooming; f32 evaluation degrades below this.
pub const MIN_SCALE: f32 = 1e-5;

/// Largest scale reachable by zooming out.
pub const MAX_SCALE: f32 = 64.0;

/// Point in the fractal plane (or a plain 2D vector).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Surface-relative pointer position in CSS pixels, Y growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Dimensions are raised to at least one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Per-surface pan and zoom.
///
/// `scale` is the plane width visible across the surface; the plane height
/// follows from the surface aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: Point::ORIGIN,
        }
    }
}

impl ViewTransform {
    /// Build a transform, rejecting non-positive or non-finite scales.
    pub fn with_scale(scale: f32, offset: Point) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(Self { scale, offset })
    }

    /// Shift the offset by `(dx, dy)` multiplied by the current scale.
    pub fn pan_scaled(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx * self.scale;
        self.offset.y += dy * self.scale;
    }

    /// Logarithmic zoom: `scale -= ln(1 + scale) * amount`, clamped.
    ///
    /// Returns true when the result had to be clamped.
    pub fn zoom_log(&mut self, amount: f32) -> bool {
        let target = self.scale - self.scale.ln_1p() * amount;
        let clamped = if target.is_finite() {
            target.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            self.scale
        };
        self.scale = clamped;
        clamped != target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_shows_four_units() {
        let t = ViewTransform::default();
        assert_eq!(t.scale, 4.0);
        assert_eq!(t.offset, Point::ORIGIN);
    }

    #[test]
    fn with_scale_rejects_degenerate_values() {
        assert!(ViewTransform::with_scale(0.0, Point::ORIGIN).is_err());
        assert!(ViewTransform::with_scale(-1.0, Point::ORIGIN).is_err());
        assert!(ViewTransform::with_scale(f32::NAN, Point::ORIGIN).is_err());
        assert!(ViewTransform::with_scale(f32::INFINITY, Point::ORIGIN).is_err());
        assert!(ViewTransform::with_scale(0.5, Point::ORIGIN).is_ok());
    }

    #[test]
    fn pan_is_proportional_to_scale() {
        let mut t = ViewTransform::with_scale(2.0, Point::new(1.0, 1.0)).unwrap();
        t.pan_scaled(0.05, -0.05);
        assert!((t.offset.x - 1.1).abs() < 1e-6);
        assert!((t.offset.y - 0.9).abs() < 1e-6);
    }

    #[test]
    fn zoom_in_shrinks_scale_logarithmically() {
        let mut t = ViewTransform::default();
        let clamped = t.zoom_log(0.05);
        assert!(!clamped);
        let expected = 4.0 - 5.0_f32.ln() * 0.05;
        assert!((t.scale - expected).abs() < 1e-6);
    }

    #[test]
    fn zoom_out_is_inverse_direction() {
        let mut t = ViewTransform::default();
        t.zoom_log(-0.05);
        assert!(t.scale > 4.0);
    }

    #[test]
    fn zoom_never_reaches_zero() {
        let mut t = ViewTransform::default();
        let mut clamped = false;
        for _ in 0..10_000 {
            clamped |= t.zoom_log(5.0);
        }
        assert!(clamped);
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn surface_size_is_at_least_one_pixel() {
        let size = SurfaceSize::new(0, 0);
        assert_eq!((size.width, size.height), (1, 1));
        assert_eq!(SurfaceSize::new(4, 3).pixel_count(), 12);
    }
}

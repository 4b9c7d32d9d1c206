//! CPU rendition of the fragment shader.
//!
//! Evaluates the iteration and coloring fragments in `f32` exactly as the
//! GLSL template does, so headless renders and tests agree with the GPU
//! output up to driver rounding. Rows are stored top to bottom.

use crate::color::Color;
use crate::error::{RenderError, ShaderStage};
use crate::shader::{
    unresolved_placeholders, ColoringAlgorithm, FractalKind, IterationAlgorithm, ShaderConfig,
    ShaderSource,
};
use crate::surface::{Frame, GraphicsBackend};
use crate::transforms::fragment_to_plane;
use crate::viewport::{Point, SurfaceSize};

/// Where the orbit of one pixel ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Escape {
    /// Iteration at which `|z| > bail-out` was first observed, or
    /// `max_iterations` if it never was.
    pub iterations: u32,
    /// Last value of `z`.
    pub z: Point,
}

impl Escape {
    pub fn escaped(&self, config: &ShaderConfig) -> bool {
        self.iterations < config.max_iterations()
    }
}

fn complex_mul(a: Point, b: Point) -> Point {
    Point::new(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x)
}

fn complex_pow(z: Point, n: f32) -> Point {
    let r = z.x.hypot(z.y);
    if r == 0.0 {
        return Point::ORIGIN;
    }
    let theta = z.y.atan2(z.x) * n;
    let magnitude = r.powf(n);
    Point::new(magnitude * theta.cos(), magnitude * theta.sin())
}

/// Iterate one pixel. `uv` is the pixel's plane point, `seed` the Julia
/// constant.
pub fn escape(config: &ShaderConfig, uv: Point, seed: Point) -> Escape {
    let (c, mut z) = match config.kind() {
        FractalKind::Mandelbrot => (uv, Point::ORIGIN),
        FractalKind::Julia => (seed, uv),
    };
    let bail_out_sq = config.bail_out() * config.bail_out();
    let exponent = config.effective_exponent();

    for i in 0..config.max_iterations() {
        if z.x * z.x + z.y * z.y > bail_out_sq {
            return Escape { iterations: i, z };
        }
        let step = match config.iteration() {
            IterationAlgorithm::Mandelbrot => complex_mul(z, z),
            IterationAlgorithm::Multibrot => complex_pow(z, exponent),
        };
        z = Point::new(step.x + c.x, step.y + c.y);
    }

    Escape {
        iterations: config.max_iterations(),
        z,
    }
}

/// Palette lookup at a fractional position, wrapping around and blending
/// adjacent entries.
fn palette_ramp(config: &ShaderConfig, t: f32) -> Color {
    let palette = config.palette();
    let len = palette.len() as f32;
    let wrapped = t - len * (t / len).floor();
    let lower = wrapped.floor();
    let fraction = wrapped - lower;
    let lower = lower as usize;
    palette
        .wrapped(lower)
        .lerp(&palette.wrapped(lower + 1), fraction)
}

/// Color for an orbit result under the configured scheme.
pub fn shade(config: &ShaderConfig, escape: Escape) -> Color {
    if !escape.escaped(config) {
        return Color::BLACK;
    }

    let iterations = escape.iterations as f32;
    let max = config.max_iterations() as f32;
    let palette = config.palette();

    match config.coloring() {
        ColoringAlgorithm::Grayscale => {
            let v = iterations / max;
            Color::from_fractions(v, v, v)
        }
        ColoringAlgorithm::Discrete => palette.wrapped(escape.iterations as usize),
        ColoringAlgorithm::Linear => {
            palette_ramp(config, iterations / max * (palette.len() as f32 - 1.0))
        }
        ColoringAlgorithm::NormalizedIterationCount => {
            let z = escape.z;
            let log_modulus = (z.x * z.x + z.y * z.y).ln() / 2.0;
            let nu = (log_modulus / config.bail_out().max(1.0001).ln()).ln()
                / config.effective_exponent().abs().max(1.0001).ln();
            palette_ramp(config, (iterations + 1.0 - nu).max(0.0))
        }
    }
}

/// Software backend rendering into an RGBA buffer.
#[derive(Debug, Default)]
pub struct ReferenceBackend {
    size: Option<SurfaceSize>,
    pixels: Vec<u8>,
    compiled: Option<ShaderSource>,
    compiles: usize,
    draws: usize,
}

impl ReferenceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// RGBA bytes, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Pixel at `(x, y)` with `y` counted from the top.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let size = self.size?;
        if x >= size.width || y >= size.height {
            return None;
        }
        let i = (y as usize * size.width as usize + x as usize) * 4;
        self.pixels
            .get(i..i + 4)
            .and_then(|p| p.try_into().ok())
    }

    /// Number of times a new source was accepted.
    pub fn compiles(&self) -> usize {
        self.compiles
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Reject sources the GLSL compiler would reject for the same reason.
    fn compile(&mut self, source: &ShaderSource) -> Result<(), RenderError> {
        if self.compiled.as_ref() == Some(source) {
            return Ok(());
        }
        let unresolved = unresolved_placeholders(&source.fragment);
        if !unresolved.is_empty() {
            let tokens: Vec<&str> = unresolved.iter().map(|p| p.token()).collect();
            return Err(RenderError::ShaderCompile {
                stage: ShaderStage::Fragment,
                log: format!("unresolved placeholders: {}", tokens.join(", ")),
            });
        }
        log::debug!("reference backend: new program");
        self.compiled = Some(source.clone());
        self.compiles += 1;
        Ok(())
    }
}

impl GraphicsBackend for ReferenceBackend {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.compile(frame.source)?;

        let size = frame.size;
        let seed = frame.seed.unwrap_or(Point::ORIGIN);
        let mut pixels = Vec::with_capacity(size.pixel_count() * 4);

        for row in 0..size.height {
            let py = size.height - 1 - row;
            for px in 0..size.width {
                let uv = fragment_to_plane(size, &frame.transform, px, py);
                let [r, g, b] = shade(frame.config, escape(frame.config, uv, seed)).to_rgb();
                pixels.extend_from_slice(&[r, g, b, 255]);
            }
        }

        self.size = Some(size);
        self.pixels = pixels;
        self.draws += 1;
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), RenderError> {
        self.size = Some(size);
        self.pixels.clear();
        Ok(())
    }
}

use super::templates;
use crate::error::ConfigError;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
pub const DEFAULT_BAIL_OUT: f32 = 2.0;
pub const DEFAULT_EXPONENT: f32 = 2.0;

/// Largest accepted iteration cap. Keeps the `MAX_ITERATIONS` literal a valid
/// GLSL `int` and a frame's cost bounded.
pub const MAX_ITERATIONS_LIMIT: u32 = 100_000;

/// Round to the two decimals the fragment shader literals carry.
///
/// Bail-out and exponent are stored at this precision so the reference
/// backend evaluates the same numbers the GPU compiles.
pub fn shader_precision(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Which set a surface renders. Selects the uniform and variable snippets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalKind {
    /// `c` is the pixel, `z` starts at zero.
    Mandelbrot,
    /// `c` is the seed uniform, `z` starts at the pixel.
    Julia,
}

impl FractalKind {
    pub fn uniforms(&self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => templates::MANDELBROT_UNIFORMS,
            FractalKind::Julia => templates::JULIA_UNIFORMS,
        }
    }

    pub fn variables(&self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => templates::MANDELBROT_VARIABLES,
            FractalKind::Julia => templates::JULIA_VARIABLES,
        }
    }
}

/// Per-pixel recurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IterationAlgorithm {
    /// z <- z^2 + c
    #[default]
    Mandelbrot,
    /// z <- z^exponent + c
    Multibrot,
}

impl IterationAlgorithm {
    pub const ALL: [IterationAlgorithm; 2] =
        [IterationAlgorithm::Mandelbrot, IterationAlgorithm::Multibrot];

    pub fn fragment(&self) -> &'static str {
        match self {
            IterationAlgorithm::Mandelbrot => templates::MANDELBROT_ITERATION,
            IterationAlgorithm::Multibrot => templates::MULTIBROT_ITERATION,
        }
    }

    pub fn select_value(&self) -> &'static str {
        match self {
            IterationAlgorithm::Mandelbrot => "0",
            IterationAlgorithm::Multibrot => "1",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IterationAlgorithm::Mandelbrot => "Mandelbrot",
            IterationAlgorithm::Multibrot => "Multibrot",
        }
    }

    pub fn from_select_value(value: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|a| a.select_value() == value.trim())
            .ok_or_else(|| ConfigError::UnknownAlgorithm(value.to_string()))
    }
}

/// Mapping from escape iteration count to color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColoringAlgorithm {
    /// Iteration count over max iterations, as gray.
    #[default]
    Grayscale,
    /// Palette entry `iterations mod palette length`.
    Discrete,
    /// Palette ramp over the iteration ratio, interpolated between entries.
    Linear,
    /// Smooth (continuous) iteration count, interpolated between entries.
    NormalizedIterationCount,
}

impl ColoringAlgorithm {
    pub const ALL: [ColoringAlgorithm; 4] = [
        ColoringAlgorithm::Grayscale,
        ColoringAlgorithm::Discrete,
        ColoringAlgorithm::Linear,
        ColoringAlgorithm::NormalizedIterationCount,
    ];

    pub fn fragment(&self) -> &'static str {
        match self {
            ColoringAlgorithm::Grayscale => templates::GRAYSCALE_COLORING,
            ColoringAlgorithm::Discrete => templates::DISCRETE_COLORING,
            ColoringAlgorithm::Linear => templates::LINEAR_COLORING,
            ColoringAlgorithm::NormalizedIterationCount => {
                templates::NORMALIZED_ITERATION_COUNT_COLORING
            }
        }
    }

    /// Value of the matching `<option>` in the coloring select.
    pub fn select_value(&self) -> &'static str {
        match self {
            ColoringAlgorithm::Grayscale => "0",
            ColoringAlgorithm::Discrete => "1",
            ColoringAlgorithm::Linear => "2",
            ColoringAlgorithm::NormalizedIterationCount => "3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColoringAlgorithm::Grayscale => "Grayscale",
            ColoringAlgorithm::Discrete => "Discrete",
            ColoringAlgorithm::Linear => "Linear",
            ColoringAlgorithm::NormalizedIterationCount => "Normalized iteration count",
        }
    }

    pub fn from_select_value(value: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|a| a.select_value() == value.trim())
            .ok_or_else(|| ConfigError::UnknownAlgorithm(value.to_string()))
    }

    /// True if the scheme reads from the palette.
    pub fn uses_palette(&self) -> bool {
        !matches!(self, ColoringAlgorithm::Grayscale)
    }
}

/// Parameters for one surface's fragment shader.
///
/// Numeric setters validate their input and leave the previous value in
/// place on error, so the assembled source never carries invalid numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderConfig {
    max_iterations: u32,
    bail_out: f32,
    exponent: f32,
    kind: FractalKind,
    iteration: IterationAlgorithm,
    coloring: ColoringAlgorithm,
    uniforms: String,
    variables: String,
    palette: Palette,
}

impl ShaderConfig {
    pub fn new(kind: FractalKind) -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            bail_out: DEFAULT_BAIL_OUT,
            exponent: DEFAULT_EXPONENT,
            kind,
            iteration: IterationAlgorithm::default(),
            coloring: ColoringAlgorithm::default(),
            uniforms: kind.uniforms().to_string(),
            variables: kind.variables().to_string(),
            palette: Palette::default(),
        }
    }

    pub fn mandelbrot() -> Self {
        Self::new(FractalKind::Mandelbrot)
    }

    pub fn julia() -> Self {
        Self::new(FractalKind::Julia)
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn bail_out(&self) -> f32 {
        self.bail_out
    }

    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Degree of the recurrence: 2 for Mandelbrot, the exponent for Multibrot.
    pub fn effective_exponent(&self) -> f32 {
        match self.iteration {
            IterationAlgorithm::Mandelbrot => 2.0,
            IterationAlgorithm::Multibrot => self.exponent,
        }
    }

    pub fn kind(&self) -> FractalKind {
        self.kind
    }

    pub fn iteration(&self) -> IterationAlgorithm {
        self.iteration
    }

    pub fn coloring(&self) -> ColoringAlgorithm {
        self.coloring
    }

    pub fn uniforms(&self) -> &str {
        &self.uniforms
    }

    pub fn variables(&self) -> &str {
        &self.variables
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// True if the fragment shader declares the seed uniform.
    pub fn accepts_seed(&self) -> bool {
        self.uniforms.contains("position")
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), ConfigError> {
        if max_iterations == 0 || max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(ConfigError::InvalidMaxIterations(max_iterations.to_string()));
        }
        self.max_iterations = max_iterations;
        Ok(())
    }

    pub fn set_bail_out(&mut self, bail_out: f32) -> Result<(), ConfigError> {
        let rounded = shader_precision(bail_out);
        if !rounded.is_finite() || rounded <= 0.0 {
            return Err(ConfigError::InvalidBailOut(bail_out.to_string()));
        }
        self.bail_out = rounded;
        Ok(())
    }

    pub fn set_exponent(&mut self, exponent: f32) -> Result<(), ConfigError> {
        let rounded = shader_precision(exponent);
        if !rounded.is_finite() {
            return Err(ConfigError::InvalidExponent(exponent.to_string()));
        }
        self.exponent = rounded;
        Ok(())
    }

    pub fn set_iteration(&mut self, iteration: IterationAlgorithm) {
        self.iteration = iteration;
    }

    pub fn set_coloring(&mut self, coloring: ColoringAlgorithm) {
        self.coloring = coloring;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Replace the uniform declaration snippet.
    pub fn set_uniforms(&mut self, uniforms: impl Into<String>) {
        self.uniforms = uniforms.into();
    }

    /// Replace the variable declaration snippet.
    pub fn set_variables(&mut self, variables: impl Into<String>) {
        self.variables = variables.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ShaderConfig::mandelbrot();
        assert_eq!(config.max_iterations(), 100);
        assert_eq!(config.bail_out(), 2.0);
        assert_eq!(config.exponent(), 2.0);
        assert_eq!(config.coloring(), ColoringAlgorithm::Grayscale);
        assert_eq!(config.palette().len(), 16);
    }

    #[test]
    fn julia_declares_seed_uniform() {
        assert!(ShaderConfig::julia().accepts_seed());
        assert!(!ShaderConfig::mandelbrot().accepts_seed());
    }

    #[test]
    fn invalid_numbers_keep_previous_value() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_max_iterations(250).unwrap();
        assert!(config.set_max_iterations(0).is_err());
        assert_eq!(config.max_iterations(), 250);

        assert!(config.set_bail_out(0.0).is_err());
        assert!(config.set_bail_out(f32::NAN).is_err());
        assert_eq!(config.bail_out(), 2.0);

        assert!(config.set_exponent(f32::INFINITY).is_err());
        assert_eq!(config.exponent(), 2.0);
    }

    #[test]
    fn iteration_cap_is_bounded() {
        let mut config = ShaderConfig::mandelbrot();
        assert!(config.set_max_iterations(MAX_ITERATIONS_LIMIT).is_ok());
        assert!(matches!(
            config.set_max_iterations(3_000_000_000),
            Err(ConfigError::InvalidMaxIterations(_))
        ));
        assert_eq!(config.max_iterations(), MAX_ITERATIONS_LIMIT);
    }

    #[test]
    fn bail_out_and_exponent_are_stored_at_shader_precision() {
        let mut config = ShaderConfig::mandelbrot();
        assert!(config.set_bail_out(0.004).is_err());
        assert_eq!(config.bail_out(), 2.0);

        config.set_bail_out(2.456).unwrap();
        assert_eq!(config.bail_out(), 2.46);

        config.set_exponent(2.004).unwrap();
        assert_eq!(config.exponent(), 2.0);
        assert!(config.set_exponent(f32::MAX).is_err());
    }

    #[test]
    fn select_values_round_trip() {
        for algorithm in ColoringAlgorithm::ALL {
            assert_eq!(
                ColoringAlgorithm::from_select_value(algorithm.select_value()),
                Ok(algorithm)
            );
        }
        for algorithm in IterationAlgorithm::ALL {
            assert_eq!(
                IterationAlgorithm::from_select_value(algorithm.select_value()),
                Ok(algorithm)
            );
        }
    }

    #[test]
    fn unknown_select_value_is_rejected() {
        assert!(matches!(
            ColoringAlgorithm::from_select_value("7"),
            Err(ConfigError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn mandelbrot_degree_ignores_exponent() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_exponent(5.0).unwrap();
        assert_eq!(config.effective_exponent(), 2.0);
        config.set_iteration(IterationAlgorithm::Multibrot);
        assert_eq!(config.effective_exponent(), 5.0);
    }
}

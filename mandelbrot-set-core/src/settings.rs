//! User-facing parameters and parsing of raw UI input.

use crate::error::ConfigError;
use crate::palette::Palette;
use crate::shader::{
    shader_precision, ColoringAlgorithm, IterationAlgorithm, DEFAULT_BAIL_OUT, DEFAULT_EXPONENT,
    DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_LIMIT,
};
use crate::viewport::Point;
use serde::{Deserialize, Serialize};

/// Parameters shared by both surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_iterations: u32,
    pub bail_out: f32,
    pub exponent: f32,
    pub coloring: ColoringAlgorithm,
    pub iteration: IterationAlgorithm,
    pub palette: Palette,
    /// Show the Julia surface next to the main one instead of below it.
    pub side_by_side: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            bail_out: DEFAULT_BAIL_OUT,
            exponent: DEFAULT_EXPONENT,
            coloring: ColoringAlgorithm::default(),
            iteration: IterationAlgorithm::default(),
            palette: Palette::default(),
            side_by_side: false,
        }
    }
}

impl Settings {
    /// Check every numeric field against the same rules the shader config
    /// applies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(ConfigError::InvalidMaxIterations(
                self.max_iterations.to_string(),
            ));
        }
        let bail_out = shader_precision(self.bail_out);
        if !bail_out.is_finite() || bail_out <= 0.0 {
            return Err(ConfigError::InvalidBailOut(self.bail_out.to_string()));
        }
        if !shader_precision(self.exponent).is_finite() {
            return Err(ConfigError::InvalidExponent(self.exponent.to_string()));
        }
        Ok(())
    }
}

pub fn parse_max_iterations(input: &str) -> Result<u32, ConfigError> {
    match input.trim().parse::<u32>() {
        Ok(value) if value > 0 && value <= MAX_ITERATIONS_LIMIT => Ok(value),
        _ => Err(ConfigError::InvalidMaxIterations(input.to_string())),
    }
}

/// Bail-out and exponent come back rounded to the precision the shader uses.
pub fn parse_bail_out(input: &str) -> Result<f32, ConfigError> {
    match input.trim().parse::<f32>().map(shader_precision) {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ConfigError::InvalidBailOut(input.to_string())),
    }
}

pub fn parse_exponent(input: &str) -> Result<f32, ConfigError> {
    match input.trim().parse::<f32>().map(shader_precision) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::InvalidExponent(input.to_string())),
    }
}

pub fn parse_seed_coordinate(input: &str) -> Result<f32, ConfigError> {
    match input.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::InvalidSeed(input.to_string())),
    }
}

/// Parse both seed inputs; either failing rejects the pair.
pub fn parse_seed(x: &str, y: &str) -> Result<Point, ConfigError> {
    Ok(Point::new(parse_seed_coordinate(x)?, parse_seed_coordinate(y)?))
}

/// Keep `current` when `parsed` is an error, logging the rejection.
pub fn keep_valid<T>(current: T, parsed: Result<T, ConfigError>) -> T {
    match parsed {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{err}, keeping previous value");
            current
        }
    }
}

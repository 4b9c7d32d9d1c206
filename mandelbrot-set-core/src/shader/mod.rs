//! Fragment-shader assembly from a parameterized template.

mod assemble;
mod config;
pub mod templates;

pub use assemble::{
    assemble, assemble_with_template, unresolved_placeholders, Placeholder, ShaderSource,
};
pub use config::{
    shader_precision, ColoringAlgorithm, FractalKind, IterationAlgorithm, ShaderConfig,
    DEFAULT_BAIL_OUT, DEFAULT_EXPONENT, DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_LIMIT,
};

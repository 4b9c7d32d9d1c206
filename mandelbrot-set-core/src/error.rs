//! Error types shared by the core and the browser front end.

use thiserror::Error;

/// Rejected configuration input. The previous valid value is always kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid max iterations: {0:?}")]
    InvalidMaxIterations(String),

    #[error("Invalid bail-out radius: {0:?}")]
    InvalidBailOut(String),

    #[error("Invalid exponent: {0:?}")]
    InvalidExponent(String),

    #[error("Invalid Julia seed coordinate: {0:?}")]
    InvalidSeed(String),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Invalid view scale: {0}")]
    InvalidScale(f32),

    #[error("Unknown algorithm selection: {0:?}")]
    UnknownAlgorithm(String),
}

/// Which shader stage a compile error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure reported by a graphics backend while drawing a surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Graphics context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Failed to link shader program: {0}")]
    ProgramLink(String),

    #[error("Graphics resource error: {0}")]
    Resource(String),

    #[error("Surface disabled after earlier failure: {0}")]
    SurfaceFailed(String),
}

/// Failure while encoding captured frames.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Frame has {actual} bytes, expected {expected}")]
    InvalidFrame { expected: usize, actual: usize },

    #[error("No frames to encode")]
    NoFrames,
}

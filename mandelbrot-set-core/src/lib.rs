pub mod animation;
pub mod color;
pub mod controller;
pub mod error;
pub mod export;
pub mod hold;
pub mod palette;
pub mod reference;
pub mod settings;
pub mod shader;
pub mod surface;
pub mod transforms;
pub mod viewport;

pub use animation::{cardioid_path, cardioid_point, curve_points, record_julia_frames};
pub use color::Color;
pub use controller::{
    Adjustment, Application, RedrawReport, SurfaceTarget, MOVEMENT_STEP, REPEAT_INTERVAL_MS,
};
pub use error::{ConfigError, ExportError, RenderError, ShaderStage};
pub use hold::{HoldRepeat, HoldState};
pub use palette::{Palette, DEFAULT_PALETTE_LEN};
pub use reference::ReferenceBackend;
pub use settings::Settings;
pub use shader::{
    assemble, ColoringAlgorithm, FractalKind, IterationAlgorithm, ShaderConfig, ShaderSource,
};
pub use surface::{Frame, GraphicsBackend, RenderSurface};
pub use transforms::{fragment_to_plane, plane_to_screen, screen_to_plane};
pub use viewport::{Point, ScreenPoint, SurfaceSize, ViewTransform, MAX_SCALE, MIN_SCALE};

mod export_buttons;
mod fractal_canvas;
mod movement_pad;
mod palette_pickers;
mod parameter_panel;
mod toast;

pub use export_buttons::ExportButtons;
pub use fractal_canvas::FractalCanvas;
pub use movement_pad::MovementPad;
pub use palette_pickers::PalettePickers;
pub use parameter_panel::ParameterPanel;
pub use toast::{Notice, Toast};

mod hold_repeat;
mod keyboard;
mod persistence;

pub use hold_repeat::{use_hold_repeat, HoldControls};
pub use keyboard::use_keyboard_steps;
pub use persistence::{load_state, use_debounced_save, use_hashchange_listener, PersistedState};

//! Component-shared access to the application controller.

use crate::rendering::WebGlBackend;
use leptos::*;
use mandelbrot_set_core::Application;

pub type Explorer = Application<WebGlBackend>;

/// Copyable handle to the controller, which exists once both canvases are
/// mounted.
#[derive(Clone, Copy)]
pub struct ExplorerHandle {
    inner: StoredValue<Option<Explorer>>,
}

impl ExplorerHandle {
    pub fn new() -> Self {
        Self {
            inner: store_value(None),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.with_value(Option::is_some)
    }

    pub fn install(&self, explorer: Explorer) {
        self.inner.set_value(Some(explorer));
    }

    /// Run `op` against the controller. Returns None before it is installed
    /// or when the handle has been disposed with its owner.
    pub fn with<R>(&self, op: impl FnOnce(&mut Explorer) -> R) -> Option<R> {
        self.inner
            .try_update_value(|explorer| explorer.as_mut().map(op))
            .flatten()
    }
}

impl Default for ExplorerHandle {
    fn default() -> Self {
        Self::new()
    }
}

// mandelbrot-set-ui/src/hooks/persistence.rs
//!
//! Browser persistence for settings, both views and the Julia seed.
//! Supports both localStorage and URL hash parameters.
//! Priority on load: URL hash > localStorage > defaults.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use leptos::*;
use mandelbrot_set_core::{Point, Settings, ViewTransform};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::time::Duration;

const STORAGE_KEY: &str = "mandelbrot_set_state";
const URL_HASH_PREFIX: &str = "v1:";

/// Quiet period before a burst of changes (held pan/zoom) is saved.
const SAVE_DEBOUNCE_MS: u64 = 500;

/// State persisted between sessions and shared through the URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub settings: Settings,
    pub main_view: ViewTransform,
    pub julia_view: ViewTransform,
    pub seed: Point,
    /// Schema version for future migrations
    version: u32,
}

impl PersistedState {
    const CURRENT_VERSION: u32 = 1;

    pub fn new(
        settings: Settings,
        main_view: ViewTransform,
        julia_view: ViewTransform,
        seed: Point,
    ) -> Self {
        Self {
            settings,
            main_view,
            julia_view,
            seed,
            version: Self::CURRENT_VERSION,
        }
    }

    /// Reject states that would put invalid numbers into the views.
    fn is_usable(&self) -> bool {
        let view_ok = |v: &ViewTransform| {
            ViewTransform::with_scale(v.scale, v.offset).is_ok()
                && v.offset.x.is_finite()
                && v.offset.y.is_finite()
        };
        self.version == Self::CURRENT_VERSION
            && self.settings.validate().is_ok()
            && view_ok(&self.main_view)
            && view_ok(&self.julia_view)
            && self.seed.x.is_finite()
            && self.seed.y.is_finite()
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::new(
            Settings::default(),
            ViewTransform::default(),
            ViewTransform::default(),
            Point::ORIGIN,
        )
    }
}

/// Load persisted state with priority: URL hash > localStorage > None.
pub fn load_state() -> Option<PersistedState> {
    // Priority 1: URL hash (shared links)
    if let Some(state) = load_from_url_hash() {
        return Some(state);
    }

    // Priority 2: localStorage (session persistence)
    load_from_local_storage()
}

fn load_from_local_storage() -> Option<PersistedState> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let json = storage.get_item(STORAGE_KEY).ok()??;

    match serde_json::from_str::<PersistedState>(&json) {
        Ok(state) if state.is_usable() => {
            log::info!("Loaded persisted state from localStorage");
            Some(state)
        }
        Ok(state) => {
            log::warn!(
                "Ignoring localStorage state (version {}, current: {})",
                state.version,
                PersistedState::CURRENT_VERSION
            );
            None
        }
        Err(e) => {
            log::warn!("Failed to parse localStorage state: {}", e);
            None
        }
    }
}

/// Save state to both localStorage and URL hash.
/// Logs a warning if saving fails (storage unavailable or quota exceeded).
pub fn save_state(state: &PersistedState) {
    save_to_local_storage(state);
    save_to_url_hash(state);
}

fn save_to_local_storage(state: &PersistedState) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return;
    };

    match serde_json::to_string(state) {
        Ok(json) => {
            if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
                log::warn!("Failed to save state to localStorage: {:?}", e);
            }
        }
        Err(e) => {
            log::warn!("Failed to serialize state: {}", e);
        }
    }
}

/// Tickets for pending saves; only the newest is still current.
#[derive(Debug, Default)]
struct SaveDebounce {
    latest: u64,
}

impl SaveDebounce {
    fn ticket(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Hook returning a save callback that writes only the last state of a
/// burst, `SAVE_DEBOUNCE_MS` after the final call.
pub fn use_debounced_save() -> Callback<PersistedState> {
    let debounce = store_value(SaveDebounce::default());

    Callback::new(move |state: PersistedState| {
        let Some(ticket) = debounce.try_update_value(SaveDebounce::ticket) else {
            return;
        };
        set_timeout(
            move || {
                if debounce.try_with_value(|d| d.is_current(ticket)) == Some(true) {
                    save_state(&state);
                }
            },
            Duration::from_millis(SAVE_DEBOUNCE_MS),
        );
    })
}

// =============================================================================
// URL Hash Encoding/Decoding
// =============================================================================

/// JSON, deflated, URL-safe base64, version prefixed.
fn encode_state(state: &PersistedState) -> Option<String> {
    let json = serde_json::to_string(state).ok()?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(json.as_bytes()).ok()?;
    let compressed = encoder.finish().ok()?;

    let encoded = URL_SAFE_NO_PAD.encode(&compressed);
    Some(format!("{URL_HASH_PREFIX}{encoded}"))
}

fn decode_state(encoded: &str) -> Option<PersistedState> {
    let data = encoded.strip_prefix(URL_HASH_PREFIX)?;
    let compressed = URL_SAFE_NO_PAD.decode(data).ok()?;

    let mut decoder = DeflateDecoder::new(&compressed[..]);
    let mut json = String::new();
    decoder.read_to_string(&mut json).ok()?;

    let state: PersistedState = serde_json::from_str(&json).ok()?;
    if state.is_usable() {
        Some(state)
    } else {
        log::warn!(
            "Ignoring URL hash state (version {}, current: {})",
            state.version,
            PersistedState::CURRENT_VERSION
        );
        None
    }
}

fn load_from_url_hash() -> Option<PersistedState> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    let hash = hash.strip_prefix('#').unwrap_or(&hash);

    if hash.is_empty() {
        return None;
    }

    match decode_state(hash) {
        Some(state) => {
            log::info!("Loaded state from URL hash");
            Some(state)
        }
        None => {
            log::warn!("Failed to decode URL hash state");
            None
        }
    }
}

/// Update the URL hash without navigation or a history entry.
fn save_to_url_hash(state: &PersistedState) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let Some(encoded) = encode_state(state) else {
        log::warn!("Failed to encode state for URL hash");
        return;
    };

    if let Ok(history) = window.history() {
        let new_url = format!("#{encoded}");
        if let Err(e) =
            history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url))
        {
            log::warn!("Failed to update URL hash: {:?}", e);
        }
    }
}

// =============================================================================
// Hashchange Listener Hook
// =============================================================================

/// Call `on_change` with the decoded state whenever the URL hash changes
/// (for example when a shared link is pasted into the current tab).
pub fn use_hashchange_listener<F>(on_change: F)
where
    F: Fn(PersistedState) + 'static,
{
    let _ = leptos_use::use_event_listener(
        leptos_use::use_window(),
        ev::hashchange,
        move |_| {
            if let Some(state) = load_from_url_hash() {
                on_change(state);
            }
        },
    );
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_hashchange_triggers_callback() {
        use gloo_timers::future::TimeoutFuture;

        let runtime = create_runtime();

        let received = Rc::new(Cell::new(None::<u32>));
        let received_clone = Rc::clone(&received);

        use_hashchange_listener(move |state| {
            received_clone.set(Some(state.settings.max_iterations));
        });

        TimeoutFuture::new(10).await;

        let mut state = PersistedState::default();
        state.settings.max_iterations = 321;
        if let Some(encoded) = encode_state(&state) {
            let window = web_sys::window().unwrap();
            let _ = window.location().set_hash(&encoded);

            let event = web_sys::HashChangeEvent::new("hashchange").unwrap();
            let _ = window.dispatch_event(&event);
        }

        TimeoutFuture::new(10).await;

        assert_eq!(received.get(), Some(321));

        runtime.dispose();
    }

    fn stored_max_iterations() -> Option<u32> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let json = storage.get_item(STORAGE_KEY).ok()??;
        serde_json::from_str::<PersistedState>(&json)
            .ok()
            .map(|s| s.settings.max_iterations)
    }

    #[wasm_bindgen_test]
    async fn test_burst_of_saves_writes_last_state_once_quiet() {
        use gloo_timers::future::TimeoutFuture;

        let runtime = create_runtime();
        if let Some(storage) = web_sys::window().unwrap().local_storage().unwrap() {
            let _ = storage.remove_item(STORAGE_KEY);
        }

        let save = use_debounced_save();
        for max_iterations in [101, 102, 103] {
            let mut state = PersistedState::default();
            state.settings.max_iterations = max_iterations;
            save.call(state);
        }

        TimeoutFuture::new(50).await;
        assert_eq!(stored_max_iterations(), None);

        TimeoutFuture::new(SAVE_DEBOUNCE_MS as u32 + 100).await;
        assert_eq!(stored_max_iterations(), Some(103));

        runtime.dispose();
    }
}

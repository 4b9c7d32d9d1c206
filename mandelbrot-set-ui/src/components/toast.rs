//! Transient status line for render errors, rejected input and exports.

use leptos::*;

const VISIBLE_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// Shows the latest notice, fading out after a few seconds.
///
/// A newer notice restarts the timer; stale timers only hide the notice they
/// were started for.
#[component]
pub fn Toast(notice: Signal<Option<Notice>>) -> impl IntoView {
    let (shown, set_shown) = create_signal(None::<Notice>);
    let generation = store_value(0u64);

    create_effect(move |_| {
        let Some(next) = notice.get() else {
            return;
        };
        generation.update_value(|g| *g += 1);
        let mine = generation.get_value();
        set_shown.set(Some(next));

        set_timeout(
            move || {
                if generation.try_get_value() == Some(mine) {
                    set_shown.set(None);
                }
            },
            std::time::Duration::from_millis(VISIBLE_MS),
        );
    });

    let tone = move || match shown.get().map(|n| n.level) {
        Some(NoticeLevel::Error) => "bg-red-900/90 opacity-100",
        Some(NoticeLevel::Info) => "bg-black/80 opacity-100",
        None => "bg-black/80 opacity-0",
    };

    view! {
        <div
            role="status"
            class=move || format!(
                "fixed bottom-12 left-1/2 -translate-x-1/2 z-50 px-4 py-2 rounded-lg \
                 text-white text-sm transition-opacity duration-300 pointer-events-none {}",
                tone()
            )
        >
            {move || shown.get().map(|n| n.text).unwrap_or_default()}
        </div>
    }
}

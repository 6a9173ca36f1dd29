//! Toast stack in the bottom-right corner.

use dioxus::prelude::*;
use petrescue_views::TOAST_DURATION_MS;

use crate::js_bridge;
use crate::state::AppState;

/// How often expired toasts are swept.
const SWEEP_INTERVAL_MS: u32 = 500;

/// Renders `AppState::toasts` and dismisses each one after its lifetime.
#[component]
pub fn ToastStack() -> Element {
    let mut state = use_context::<AppState>();

    use_future(move || async move {
        loop {
            js_bridge::sleep_ms(SWEEP_INTERVAL_MS).await;
            let now = js_bridge::now_ms();
            let stale = state
                .toasts
                .peek()
                .items()
                .iter()
                .any(|t| now.saturating_sub(t.shown_at_ms) >= TOAST_DURATION_MS);
            if stale {
                state.toasts.write().expire(now);
            }
        }
    });

    let toasts: Vec<(u64, String, &'static str)> = state
        .toasts
        .read()
        .items()
        .iter()
        .map(|t| (t.id, t.notice.message.clone(), t.notice.kind.color()))
        .collect();

    rsx! {
        div {
            style: "position: fixed; right: 16px; bottom: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 1100;",
            for (id, message, color) in toasts {
                div {
                    key: "{id}",
                    role: "status",
                    style: "min-width: 240px; max-width: 360px; padding: 12px 16px; border-radius: 8px; color: white; background: {color}; box-shadow: 0 4px 12px rgba(0,0,0,0.2); display: flex; justify-content: space-between; gap: 12px;",
                    span { "{message}" }
                    button {
                        style: "background: none; border: none; color: white; cursor: pointer; font-size: 16px;",
                        onclick: move |_| state.toasts.write().dismiss(id),
                        "×"
                    }
                }
            }
        }
    }
}

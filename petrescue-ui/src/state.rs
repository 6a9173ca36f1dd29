//! Application state managed via Dioxus context.
//!
//! `AppState` is provided once by the root with `use_context_provider` and
//! read anywhere with `use_context::<AppState>()`. The backend client is
//! provided as its own context value (`ApiClient`) since it is not `Copy`.

use dioxus::prelude::*;
use petrescue_core::refresh::RefreshTrigger;
use petrescue_views::{Notice, Toasts};

use crate::js_bridge;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Bumped after every successful mutation; list and map refetch on change.
    pub refresh: Signal<RefreshTrigger>,
    /// Transient notifications shown in the corner.
    pub toasts: Signal<Toasts>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            refresh: Signal::new(RefreshTrigger::new()),
            toasts: Signal::new(Toasts::new()),
        }
    }

    /// Tell every view that backend data changed.
    pub fn notify_changed(&mut self) {
        let generation = self.refresh.write().bump();
        log::info!("Data changed, refresh generation {}", generation);
    }

    pub fn toast(&mut self, notice: Notice) {
        self.toasts.write().push(notice, js_bridge::now_ms());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

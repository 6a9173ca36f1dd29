//! Dioxus components and Google Maps bridge for the PetRescue web app.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the map script, geolocation, object URLs
//!   and timers via `js_sys::eval()` and `web-sys`
//! - `state`: shared `AppState` (refresh trigger, toasts) with Dioxus Signals
//! - `components`: the report form, case list, case map and their pieces

pub mod components;
pub mod js_bridge;
pub mod state;

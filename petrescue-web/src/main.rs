//! PetRescue Map
//!
//! Single-page client for reporting stray or at-risk animals and tracking
//! each case until it is resolved.
//!
//! Layout:
//! 1. Report form: description, photo (uploaded on pick), location from the
//!    device, an address or manual entry.
//! 2. Case map: one marker per case plus heat zones over clusters of active
//!    cases.
//! 3. Case list: stats, filter tabs, status shortcuts, inline edit, delete.
//!
//! The root owns the refresh trigger in `AppState`. The form and the list
//! bump it after a successful mutation; the list and the map each refetch
//! independently when it moves.

use dioxus::prelude::*;
use petrescue_api::{ApiClient, ClientConfig};
use petrescue_ui::components::{CaseListView, CaseMapView, ReportFormView, ToastStack, WalkingPaws};
use petrescue_ui::state::AppState;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("petrescue-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(AppState::new);
    use_context_provider(|| {
        let config = ClientConfig::from_build_env();
        log::info!("Using backend at {}", config.api_base());
        if config.maps_api_key().is_empty() {
            log::warn!("PETRESCUE_MAPS_KEY was not set at build time; the map will not load");
        }
        ApiClient::new(config)
    });

    rsx! {
        div {
            style: "min-height: 100vh; background: #f9fafb; font-family: system-ui, -apple-system, sans-serif; color: #111827;",
            WalkingPaws {}
            header {
                style: "padding: 20px; text-align: center; background: linear-gradient(135deg, #f97316, #ef4444); color: white;",
                h1 { style: "margin: 0; font-size: 28px;", "🐾 PetRescue Map" }
                p {
                    style: "margin: 6px 0 0 0; opacity: 0.9;",
                    "Report animals in need and follow each case until it is resolved"
                }
            }
            main {
                style: "position: relative; z-index: 1; max-width: 1200px; margin: 0 auto; padding: 20px; display: grid; grid-template-columns: minmax(300px, 400px) 1fr; gap: 20px; align-items: start;",
                ReportFormView {}
                CaseMapView {}
                div {
                    style: "grid-column: 1 / -1;",
                    CaseListView {}
                }
            }
            ToastStack {}
        }
    }
}

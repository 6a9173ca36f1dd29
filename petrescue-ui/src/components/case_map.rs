//! Map of all cases with status markers and heat-zone circles.

use dioxus::prelude::*;
use petrescue_api::ApiClient;
use petrescue_views::{MapDisplay, MapView};

use super::{ErrorDisplay, LoadingSpinner, StatusBadge};
use crate::js_bridge;
use crate::state::AppState;

/// DOM id for the Google Maps container div.
const MAP_CONTAINER_ID: &str = "case-map";

const EMPTY_ZOOM: u8 = 12;
const CASES_ZOOM: u8 = 13;

/// JSON payloads for one map render.
#[derive(Clone, PartialEq)]
struct MapPayload {
    markers: String,
    zones: String,
    config: String,
}

#[component]
pub fn CaseMapView() -> Element {
    let state = use_context::<AppState>();
    let api = use_context::<ApiClient>();
    let mut view = use_signal(MapView::new);
    let mut maps_ready = use_signal(|| false);

    // One-time provider load and marker click wiring.
    let maps_key = api.config().maps_api_key().to_string();
    use_hook(move || {
        js_bridge::on_marker_select(move |id| {
            view.write().select(&id);
        });
        spawn(async move {
            match js_bridge::load_maps_api(&maps_key).await {
                Ok(()) => maps_ready.set(true),
                Err(e) => {
                    log::error!("Failed to load map provider: {:#}", e);
                    view.write().set_provider_failed(format!("{:#}", e));
                }
            }
        });
    });

    // Independent fetch, on mount and on every refresh bump.
    let fetch_api = api.clone();
    use_effect(move || {
        let trigger = (state.refresh)();
        let stale = view.write().needs_fetch(&trigger);
        if !stale {
            return;
        }
        let api = fetch_api.clone();
        spawn(async move {
            let result = api.list_cases().await;
            view.write().apply_fetch(result);
        });
    });

    // Only changes when markers, zones or center change, not on selection.
    let config = api.config().clone();
    let payload = use_memo(move || {
        let view = view.read();
        let zoom = if view.cases().is_empty() { EMPTY_ZOOM } else { CASES_ZOOM };
        MapPayload {
            markers: serde_json::to_string(&view.markers(&config)).unwrap_or_else(|_| "[]".into()),
            zones: serde_json::to_string(&view.zones()).unwrap_or_else(|_| "[]".into()),
            config: serde_json::json!({ "center": view.center(), "zoom": zoom }).to_string(),
        }
    });

    use_effect(move || {
        let payload = payload();
        if !maps_ready() {
            return;
        }
        js_bridge::render_case_map(
            MAP_CONTAINER_ID,
            &payload.markers,
            &payload.zones,
            &payload.config,
        );
    });

    let snapshot = view.read();
    let display = snapshot.display();
    let warning = snapshot.warning().map(str::to_string);
    let image_config = api.config();
    let selected = snapshot.selected().map(|case| {
        let coords = format!("{:.5}, {:.5}", case.latitude, case.longitude);
        let image = case.image_url.as_deref().and_then(|p| image_config.image_url(p));
        (case.clone(), coords, image)
    });
    drop(snapshot);

    if let MapDisplay::ProviderFailed(message) = &display {
        return rsx! {
            section {
                h2 { style: "margin: 0 0 8px 0;", "Case map" }
                ErrorDisplay { message: format!("The map could not be loaded. {message}") }
            }
        };
    }

    rsx! {
        section {
            h2 { style: "margin: 0 0 8px 0;", "Case map" }

            if let Some(message) = warning {
                ErrorDisplay { message, warning: true }
            }

            div {
                style: "position: relative; width: 100%; height: 420px; border-radius: 10px; overflow: hidden; background: #e5e7eb;",
                div {
                    id: MAP_CONTAINER_ID,
                    style: "width: 100%; height: 100%;",
                }
                {match display {
                    MapDisplay::Loading => rsx! {
                        div {
                            style: "position: absolute; inset: 0;",
                            LoadingSpinner { label: "Loading map..." }
                        }
                    },
                    MapDisplay::Empty => rsx! {
                        div {
                            style: "position: absolute; top: 12px; left: 50%; transform: translateX(-50%); padding: 8px 14px; border-radius: 999px; background: white; color: #444; box-shadow: 0 1px 4px rgba(0,0,0,0.15);",
                            "No cases yet. Report the first one!"
                        }
                    },
                    _ => rsx! {},
                }}
            }

            if let Some((case, coords, image)) = selected {
                div {
                    style: "margin-top: 10px; padding: 14px; border-radius: 8px; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); display: flex; gap: 12px;",
                    if let Some(src) = image {
                        img {
                            src: "{src}",
                            alt: "Photo of the animal",
                            style: "width: 96px; height: 96px; object-fit: cover; border-radius: 6px;",
                        }
                    }
                    div {
                        style: "flex: 1; display: flex; flex-direction: column; gap: 6px;",
                        StatusBadge { status: case.status }
                        span { "{case.description}" }
                        span { style: "font-size: 12px; color: #888;", "{coords}" }
                    }
                    button {
                        style: "align-self: flex-start; background: none; border: none; font-size: 18px; cursor: pointer;",
                        onclick: move |_| view.write().clear_selection(),
                        "×"
                    }
                }
            }
        }
    }
}

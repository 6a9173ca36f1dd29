//! Typed wrappers around JS interop via `js_sys::eval()` and `web-sys`.
//!
//! The map code lives in `assets/js/case-map.js` and is evaluated once as a
//! global script exposing `window.petrescue*` functions. Data crosses the
//! boundary as JSON strings. Browser APIs that hand back a `Promise`
//! (script loading, geolocation, timers) are awaited through `JsFuture`.

use anyhow::{anyhow, Context};
use js_sys::Promise;
use petrescue_core::locate::{LocateError, LocateOptions, LocationFix};
use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

static CASE_MAP_JS: &str = include_str!("../assets/js/case-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('PetRescue JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a Rust string as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "''".to_string())
}

fn js_error_text(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn eval_promise(code: &str) -> anyhow::Result<Promise> {
    let value = js_sys::eval(code).map_err(|e| anyhow!("eval failed: {}", js_error_text(&e)))?;
    value
        .dyn_into::<Promise>()
        .map_err(|_| anyhow!("expected a Promise"))
}

/// Evaluate the map script. Safe to call more than once.
pub fn load_map_scripts() {
    let store_js = format!(
        "if (!window.petrescueRenderCaseMap) {{ (0, eval)({}); }}",
        js_string(CASE_MAP_JS)
    );
    call_js(&store_js);
}

/// Inject the Google Maps script and wait for it.
///
/// An error here is a provider failure and should block the map view.
pub async fn load_maps_api(api_key: &str) -> anyhow::Result<()> {
    if api_key.trim().is_empty() {
        anyhow::bail!("no Google Maps API key configured");
    }
    load_map_scripts();
    let promise = eval_promise(&format!(
        "window.petrescueLoadGoogleMaps({})",
        js_string(api_key)
    ))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("{}", js_error_text(&e)))
        .context("Google Maps failed to load")?;
    log::info!("Google Maps loaded");
    Ok(())
}

/// Render markers and heat zones into `container_id`.
///
/// Polls until the maps API, the map script and the container element are
/// all available, then draws. Re-rendering replaces the previous overlays.
pub fn render_case_map(container_id: &str, markers_json: &str, zones_json: &str, config_json: &str) {
    let container = js_string(container_id);
    let markers = js_string(markers_json);
    let zones = js_string(zones_json);
    let config = js_string(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.google && window.google.maps &&
                    typeof window.petrescueRenderCaseMap !== 'undefined' &&
                    document.getElementById({container})) {{
                    clearInterval(poll);
                    try {{
                        window.petrescueRenderCaseMap({container}, {markers}, {zones}, {config});
                    }} catch(e) {{ console.error('[PetRescue] renderCaseMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Register the callback invoked with a case id when a marker is clicked.
///
/// The closure is leaked on purpose; register once per app.
pub fn on_marker_select(mut handler: impl FnMut(String) + 'static) {
    let closure = Closure::<dyn FnMut(String)>::new(move |id: String| handler(id));
    if let Some(window) = web_sys::window() {
        if js_sys::Reflect::set(
            &window,
            &JsValue::from_str("petrescueSelectCase"),
            closure.as_ref(),
        )
        .is_err()
        {
            log::warn!("Failed to register marker click handler");
        }
    }
    closure.forget();
}

#[derive(Deserialize)]
struct GeoFailure {
    code: u16,
    #[serde(default)]
    message: String,
}

/// One-shot device position request.
pub async fn current_position(options: &LocateOptions) -> Result<LocationFix, LocateError> {
    let js = format!(
        r#"
        (function() {{
            return new Promise(function(resolve, reject) {{
                if (!navigator.geolocation) {{
                    reject(JSON.stringify({{code: 0, message: 'unsupported'}}));
                    return;
                }}
                navigator.geolocation.getCurrentPosition(
                    function(pos) {{
                        resolve(JSON.stringify({{
                            latitude: pos.coords.latitude,
                            longitude: pos.coords.longitude,
                            accuracy: pos.coords.accuracy
                        }}));
                    }},
                    function(err) {{
                        reject(JSON.stringify({{code: err.code, message: err.message}}));
                    }},
                    {options}
                );
            }});
        }})()
        "#,
        options = options.to_position_options(),
    );

    let promise = eval_promise(&js).map_err(|e| LocateError::Other(e.to_string()))?;
    match JsFuture::from(promise).await {
        Ok(value) => {
            let text = value.as_string().unwrap_or_default();
            serde_json::from_str(&text).map_err(|e| LocateError::Other(e.to_string()))
        }
        Err(err) => {
            let text = js_error_text(&err);
            match serde_json::from_str::<GeoFailure>(&text) {
                Ok(GeoFailure { code: 0, .. }) => Err(LocateError::Unsupported),
                Ok(failure) => Err(LocateError::from_code(failure.code, &failure.message)),
                Err(_) => Err(LocateError::Other(text)),
            }
        }
    }
}

/// Object URL for a local image preview.
pub fn create_object_url(bytes: &[u8], content_type: Option<&str>) -> Option<String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        options.set_type(content_type);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

pub fn revoke_object_url(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        log::warn!("Failed to revoke object URL: {}", js_error_text(&e));
    }
}

/// Resolve after `ms` milliseconds.
pub async fn sleep_ms(ms: u32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
        }
    });
    let _ = JsFuture::from(promise).await;
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Uniform draw in `[0, 1)`.
pub fn random() -> f64 {
    js_sys::Math::random()
}

//! Report form: description, photo, location and submit.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use petrescue_api::{ApiClient, ImageUpload};
use petrescue_core::locate::LocateOptions;
use petrescue_views::{FormPhase, ReportForm};

use crate::js_bridge;
use crate::state::AppState;

const INPUT_STYLE: &str =
    "width: 100%; padding: 10px; border: 1px solid #ddd; border-radius: 6px; font-size: 14px; box-sizing: border-box;";
const SECONDARY_BUTTON: &str =
    "padding: 8px 12px; border: 1px solid #ddd; border-radius: 6px; background: white; cursor: pointer;";

/// Read a picked or dropped file and upload it right away.
async fn upload_file(mut form: Signal<ReportForm>, api: ApiClient, file: FileData) {
    let file_name = file.name();
    let content_type = file.content_type();
    let bytes = match file.read_bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            log::error!("Failed to read {}: {}", file_name, e);
            return;
        }
    };

    let preview = js_bridge::create_object_url(&bytes, content_type.as_deref());
    let started = form.write().begin_upload(&file_name, preview.clone());
    match started {
        Ok(Some(replaced)) => js_bridge::revoke_object_url(&replaced),
        Ok(None) => {}
        Err(e) => {
            log::warn!("Ignoring image while busy: {}", e);
            if let Some(url) = preview {
                js_bridge::revoke_object_url(&url);
            }
            return;
        }
    }

    let result = api
        .upload_image(ImageUpload {
            file_name,
            content_type,
            bytes,
        })
        .await;
    let rolled_back = form.write().finish_upload(result);
    if let Some(url) = rolled_back {
        js_bridge::revoke_object_url(&url);
    }
}

#[component]
pub fn ReportFormView() -> Element {
    let mut state = use_context::<AppState>();
    let api = use_context::<ApiClient>();
    let mut form = use_signal(ReportForm::new);
    let mut dragging = use_signal(|| false);

    let pick_api = api.clone();
    let on_pick = move |evt: FormEvent| {
        if let Some(file) = evt.files().into_iter().next() {
            spawn(upload_file(form, pick_api.clone(), file));
        }
    };

    let drop_api = api.clone();
    let on_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        if let Some(file) = evt.files().into_iter().next() {
            spawn(upload_file(form, drop_api.clone(), file));
        }
    };

    let geocode_api = api.clone();
    let on_geocode = move |_: MouseEvent| {
        let address = match form.write().begin_geocode() {
            Ok(address) => address,
            Err(_) => return,
        };
        let api = geocode_api.clone();
        spawn(async move {
            let result = api.geocode_address(&address).await;
            form.write().finish_geocode(result);
        });
    };

    let on_locate = move |_: MouseEvent| {
        if !form.write().begin_locate() {
            return;
        }
        spawn(async move {
            let result = js_bridge::current_position(&LocateOptions::default()).await;
            form.write().finish_locate(result);
        });
    };

    let on_remove_image = move |_: MouseEvent| {
        if let Some(url) = form.write().remove_image() {
            js_bridge::revoke_object_url(&url);
        }
    };

    let submit_api = api.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let prepared = form.write().prepare_submission();
        let Ok(payload) = prepared else {
            return;
        };
        let preview = form.read().image().and_then(|img| img.preview_url.clone());
        let api = submit_api.clone();
        spawn(async move {
            let result = api.create_case(&payload).await;
            let created = form.write().finish_submission(result);
            if created {
                if let Some(url) = preview {
                    js_bridge::revoke_object_url(&url);
                }
                state.notify_changed();
            }
        });
    };

    let snapshot = form.read().clone();
    let busy = snapshot.is_busy();
    let submit_label = match snapshot.phase() {
        FormPhase::Idle => "Report case",
        FormPhase::UploadingImage => "Uploading image...",
        FormPhase::Submitting => "Creating case...",
    };
    let preview_url = snapshot.image().and_then(|img| img.preview_url.clone());
    let file_name = snapshot.image().map(|img| img.file_name.clone());
    let location = snapshot
        .coordinates()
        .map(|c| format!("{:.5}, {:.5}", c.latitude(), c.longitude()));
    let notice = snapshot
        .notice()
        .map(|n| (n.message.clone(), n.kind.color()));
    let drop_style = format!(
        "border: 2px dashed {}; border-radius: 8px; padding: 16px; text-align: center; color: #666; background: {};",
        if dragging() { "#3b82f6" } else { "#ccc" },
        if dragging() { "#eff6ff" } else { "#fafafa" },
    );

    rsx! {
        form {
            style: "background: white; padding: 20px; border-radius: 10px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); display: flex; flex-direction: column; gap: 14px;",
            onsubmit: on_submit,

            h2 { style: "margin: 0;", "Report an animal" }

            label {
                style: "font-weight: 600;",
                "Description"
                textarea {
                    style: "{INPUT_STYLE} min-height: 80px; margin-top: 4px;",
                    placeholder: "What did you see? Breed, condition, exact spot...",
                    value: "{snapshot.description}",
                    oninput: move |evt| form.write().description = evt.value(),
                }
            }

            div {
                style: "{drop_style}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| dragging.set(false),
                ondrop: on_drop,
                if let Some(url) = preview_url {
                    img {
                        src: "{url}",
                        alt: "Selected photo",
                        style: "max-width: 100%; max-height: 200px; border-radius: 6px; display: block; margin: 0 auto 8px auto;",
                    }
                }
                if let Some(name) = file_name {
                    div {
                        style: "display: flex; justify-content: center; gap: 8px; align-items: center;",
                        span { "{name}" }
                        button {
                            r#type: "button",
                            style: "{SECONDARY_BUTTON}",
                            disabled: snapshot.phase() == FormPhase::UploadingImage,
                            onclick: on_remove_image,
                            "Remove"
                        }
                    }
                } else {
                    p { style: "margin: 0 0 8px 0;", "Drag a photo here or" }
                    input {
                        r#type: "file",
                        accept: "image/*",
                        disabled: busy,
                        onchange: on_pick,
                    }
                }
            }

            div {
                style: "display: flex; flex-direction: column; gap: 8px;",
                span { style: "font-weight: 600;", "Location" }
                div {
                    style: "display: flex; gap: 8px; flex-wrap: wrap;",
                    button {
                        r#type: "button",
                        style: "{SECONDARY_BUTTON}",
                        disabled: snapshot.is_locating(),
                        onclick: on_locate,
                        if snapshot.is_locating() { "Locating..." } else { "Use my location" }
                    }
                    button {
                        r#type: "button",
                        style: "{SECONDARY_BUTTON}",
                        onclick: move |_| form.write().toggle_manual_coords(),
                        if snapshot.manual_coords() { "Hide coordinates" } else { "Enter coordinates" }
                    }
                }
                div {
                    style: "display: flex; gap: 8px;",
                    input {
                        style: "{INPUT_STYLE}",
                        placeholder: "Address, e.g. Calle 26 #57-83, Bogotá",
                        value: "{snapshot.address}",
                        oninput: move |evt| form.write().address = evt.value(),
                    }
                    button {
                        r#type: "button",
                        style: "{SECONDARY_BUTTON} white-space: nowrap;",
                        disabled: snapshot.is_geocoding(),
                        onclick: on_geocode,
                        if snapshot.is_geocoding() { "Searching..." } else { "Find" }
                    }
                }
                if snapshot.manual_coords() {
                    div {
                        style: "display: flex; gap: 8px;",
                        input {
                            style: "{INPUT_STYLE}",
                            r#type: "number",
                            step: "any",
                            min: "-90",
                            max: "90",
                            placeholder: "Latitude",
                            value: "{snapshot.latitude}",
                            oninput: move |evt| form.write().latitude = evt.value(),
                        }
                        input {
                            style: "{INPUT_STYLE}",
                            r#type: "number",
                            step: "any",
                            min: "-180",
                            max: "180",
                            placeholder: "Longitude",
                            value: "{snapshot.longitude}",
                            oninput: move |evt| form.write().longitude = evt.value(),
                        }
                    }
                }
                if let Some(location) = location {
                    span { style: "font-size: 13px; color: #059669;", "📍 {location}" }
                }
            }

            if let Some((message, color)) = notice {
                div {
                    style: "font-size: 14px; color: {color};",
                    "{message}"
                }
            }

            button {
                r#type: "submit",
                disabled: busy,
                style: "padding: 12px; border: none; border-radius: 6px; background: #ef4444; color: white; font-weight: 600; font-size: 15px; cursor: pointer;",
                "{submit_label}"
            }
        }
    }
}

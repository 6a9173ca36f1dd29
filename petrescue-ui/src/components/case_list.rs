//! Case list with stats, filter tabs, inline edit, status shortcuts and
//! confirmed delete.

use dioxus::prelude::*;
use petrescue_api::ApiClient;
use petrescue_core::{AnimalCase, CaseStatus, StatusFilter};
use petrescue_views::case_list::forward_action;
use petrescue_views::{CaseList, EditDraft};

use super::{CaseSkeleton, ConfirmModal, ErrorDisplay, StatsPanel, StatusBadge};
use crate::state::AppState;

const CARD_STYLE: &str =
    "display: flex; gap: 12px; padding: 16px; margin: 8px 0; border-radius: 8px; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1);";
const SMALL_BUTTON: &str =
    "padding: 6px 10px; border: 1px solid #ddd; border-radius: 6px; background: white; cursor: pointer; font-size: 13px;";

/// Move the list's pending notice into the toast stack.
fn flush_notice(mut list: Signal<CaseList>, mut state: AppState) {
    let notice = list.write().take_notice();
    if let Some(notice) = notice {
        state.toast(notice);
    }
}

#[component]
pub fn CaseListView() -> Element {
    let mut state = use_context::<AppState>();
    let api = use_context::<ApiClient>();
    let mut list = use_signal(CaseList::new);

    // Refetch on mount and on every refresh bump.
    let fetch_api = api.clone();
    use_effect(move || {
        let trigger = (state.refresh)();
        let stale = list.write().needs_fetch(&trigger);
        if !stale {
            return;
        }
        let api = fetch_api.clone();
        spawn(async move {
            let result = api.list_cases().await;
            list.write().apply_fetch(result);
        });
    });

    let advance_api = api.clone();
    let on_advance = use_callback(move |id: String| {
        let request = list.read().advance_request(&id);
        let Some((id, update)) = request else {
            return;
        };
        let api = advance_api.clone();
        spawn(async move {
            let result = api.update_case(&id, &update).await;
            let changed = list.write().apply_advanced(&id, result);
            flush_notice(list, state);
            if changed {
                state.notify_changed();
            }
        });
    });

    let save_api = api.clone();
    let on_save = use_callback(move |_: ()| {
        let request = list.write().save_request();
        let Some((id, update)) = request else {
            flush_notice(list, state);
            return;
        };
        let api = save_api.clone();
        spawn(async move {
            let result = api.update_case(&id, &update).await;
            let changed = list.write().apply_saved(&id, result);
            flush_notice(list, state);
            if changed {
                state.notify_changed();
            }
        });
    });

    let delete_api = api.clone();
    let on_confirm_delete = use_callback(move |_: ()| {
        let confirmed = list.write().confirm_delete();
        let Some(id) = confirmed else {
            return;
        };
        let api = delete_api.clone();
        spawn(async move {
            let result = api.delete_case(&id).await;
            let changed = list.write().apply_deleted(&id, result);
            flush_notice(list, state);
            if changed {
                state.notify_changed();
            }
        });
    });

    let snapshot = list.read();
    let stats = snapshot.stats();
    let filter = snapshot.filter();
    let loading = snapshot.is_loading() && snapshot.cases().is_empty();
    let error = snapshot.error().map(str::to_string);
    let editing = snapshot.editing().cloned();
    let visible: Vec<AnimalCase> = snapshot.visible().into_iter().cloned().collect();
    let pending = snapshot
        .pending_delete()
        .map(|c| format!("\"{}\" will be removed permanently.", c.description));
    drop(snapshot);

    let config = api.config().clone();
    let empty_message = match filter {
        StatusFilter::All => "No cases reported yet.".to_string(),
        StatusFilter::Only(status) => format!("No {} cases.", status.label().to_lowercase()),
    };

    rsx! {
        section {
            h2 { style: "margin: 0 0 8px 0;", "Reported cases" }

            StatsPanel { stats }

            div {
                role: "tablist",
                style: "display: flex; gap: 6px; margin: 8px 0 12px 0; flex-wrap: wrap;",
                for tab in StatusFilter::ALL {
                    button {
                        key: "{tab.key()}",
                        role: "tab",
                        style: if tab == filter {
                            "padding: 6px 14px; border-radius: 999px; border: none; background: #111827; color: white; cursor: pointer;"
                        } else {
                            "padding: 6px 14px; border-radius: 999px; border: 1px solid #ddd; background: white; cursor: pointer;"
                        },
                        onclick: move |_| list.write().set_filter(tab),
                        "{tab.label()} ({stats.count(tab)})"
                    }
                }
            }

            if let Some(message) = error {
                ErrorDisplay { message }
            } else if loading {
                CaseSkeleton { count: 3 }
            } else if visible.is_empty() {
                p { style: "color: #666; text-align: center; padding: 24px;", "{empty_message}" }
            } else {
                for case in visible {
                    if editing.as_ref().is_some_and(|d| d.id == case.id) {
                        EditCard {
                            key: "{case.id}",
                            draft: editing.clone().unwrap_or_else(|| EditDraft::from_case(&case)),
                            on_change: move |draft: EditDraft| {
                                if let Some(slot) = list.write().editing_mut() {
                                    *slot = draft;
                                }
                            },
                            on_save: on_save,
                            on_cancel: move |_| list.write().cancel_edit(),
                        }
                    } else {
                        CaseCard {
                            key: "{case.id}",
                            image_src: case.image_url.as_deref().and_then(|p| config.image_url(p)),
                            case: case.clone(),
                            on_edit: move |id: String| {
                                list.write().start_edit(&id);
                            },
                            on_advance: on_advance,
                            on_delete: move |id: String| {
                                list.write().request_delete(&id);
                            },
                        }
                    }
                }
            }

            if let Some(message) = pending {
                ConfirmModal {
                    title: "Delete case?",
                    message,
                    confirm_text: "Delete",
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| list.write().cancel_delete(),
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct CaseCardProps {
    case: AnimalCase,
    image_src: Option<String>,
    on_edit: EventHandler<String>,
    on_advance: EventHandler<String>,
    on_delete: EventHandler<String>,
}

#[component]
fn CaseCard(props: CaseCardProps) -> Element {
    let case = props.case;
    let shortcut = forward_action(&case).map(|(_, label)| label);
    let coords = format!("{:.5}, {:.5}", case.latitude, case.longitude);
    let (edit_id, advance_id, delete_id) = (case.id.clone(), case.id.clone(), case.id.clone());

    rsx! {
        article {
            style: "{CARD_STYLE}",
            if let Some(src) = props.image_src {
                img {
                    src: "{src}",
                    alt: "Photo of the animal",
                    style: "width: 72px; height: 72px; object-fit: cover; border-radius: 6px;",
                }
            } else {
                div {
                    style: "width: 72px; height: 72px; border-radius: 6px; background: #f3f4f6; display: flex; align-items: center; justify-content: center; font-size: 28px;",
                    "🐾"
                }
            }
            div {
                style: "flex: 1; display: flex; flex-direction: column; gap: 6px;",
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; gap: 8px;",
                    strong { "{case.description}" }
                    StatusBadge { status: case.status }
                }
                span { style: "font-size: 12px; color: #888;", "📍 {coords}" }
                div {
                    style: "display: flex; gap: 6px; flex-wrap: wrap;",
                    if let Some(label) = shortcut {
                        button {
                            style: "{SMALL_BUTTON} border-color: #10b981; color: #047857;",
                            onclick: move |_| props.on_advance.call(advance_id.clone()),
                            "{label}"
                        }
                    }
                    button {
                        style: "{SMALL_BUTTON}",
                        onclick: move |_| props.on_edit.call(edit_id.clone()),
                        "Edit"
                    }
                    button {
                        style: "{SMALL_BUTTON} color: #b91c1c;",
                        onclick: move |_| props.on_delete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct EditCardProps {
    draft: EditDraft,
    on_change: EventHandler<EditDraft>,
    on_save: EventHandler<()>,
    on_cancel: EventHandler<()>,
}

#[component]
fn EditCard(props: EditCardProps) -> Element {
    let draft = props.draft;
    let on_change = props.on_change;
    let (d1, d2, d3, d4) = (draft.clone(), draft.clone(), draft.clone(), draft.clone());
    let input_style = "width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 6px; box-sizing: border-box;";

    rsx! {
        article {
            style: "{CARD_STYLE} flex-direction: column; border: 2px solid #3b82f6;",
            textarea {
                style: "{input_style} min-height: 60px;",
                value: "{draft.description}",
                oninput: move |evt| {
                    let mut next = d1.clone();
                    next.description = evt.value();
                    on_change.call(next);
                },
            }
            div {
                style: "display: flex; gap: 8px;",
                input {
                    style: "{input_style}",
                    r#type: "number",
                    step: "any",
                    value: "{draft.latitude}",
                    oninput: move |evt| {
                        let mut next = d2.clone();
                        next.latitude = evt.value();
                        on_change.call(next);
                    },
                }
                input {
                    style: "{input_style}",
                    r#type: "number",
                    step: "any",
                    value: "{draft.longitude}",
                    oninput: move |evt| {
                        let mut next = d3.clone();
                        next.longitude = evt.value();
                        on_change.call(next);
                    },
                }
                select {
                    style: "{input_style}",
                    onchange: move |evt| {
                        if let Ok(status) = evt.value().parse::<CaseStatus>() {
                            let mut next = d4.clone();
                            next.status = status;
                            on_change.call(next);
                        }
                    },
                    for status in CaseStatus::ALL {
                        option {
                            key: "{status.as_str()}",
                            value: status.as_str(),
                            selected: status == draft.status,
                            {status.label()}
                        }
                    }
                }
            }
            div {
                style: "display: flex; gap: 8px; justify-content: flex-end;",
                button {
                    style: "{SMALL_BUTTON}",
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }
                button {
                    style: "{SMALL_BUTTON} background: #3b82f6; color: white; border: none;",
                    onclick: move |_| props.on_save.call(()),
                    "Save"
                }
            }
        }
    }
}

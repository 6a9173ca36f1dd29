//! Confirmation dialog.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmModalProps {
    pub title: String,
    pub message: String,
    #[props(default = "Confirm".to_string())]
    pub confirm_text: String,
    #[props(default = "Cancel".to_string())]
    pub cancel_text: String,
    pub on_confirm: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

/// Modal overlay with a confirm and a cancel button. Clicking the backdrop
/// cancels.
#[component]
pub fn ConfirmModal(props: ConfirmModalProps) -> Element {
    let on_confirm = props.on_confirm;
    let on_cancel = props.on_cancel;

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.45); display: flex; align-items: center; justify-content: center; z-index: 1000;",
            onclick: move |_| on_cancel.call(()),
            div {
                role: "dialog",
                style: "background: white; border-radius: 10px; padding: 24px; max-width: 420px; width: 90%; box-shadow: 0 10px 30px rgba(0,0,0,0.25);",
                onclick: move |evt| evt.stop_propagation(),
                h3 { style: "margin: 0 0 8px 0;", "{props.title}" }
                p { style: "margin: 0 0 20px 0; color: #555;", "{props.message}" }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: "padding: 8px 16px; border: 1px solid #ddd; border-radius: 6px; background: white; cursor: pointer;",
                        onclick: move |_| on_cancel.call(()),
                        "{props.cancel_text}"
                    }
                    button {
                        style: "padding: 8px 16px; border: none; border-radius: 6px; background: #ef4444; color: white; cursor: pointer;",
                        onclick: move |_| on_confirm.call(()),
                        "{props.confirm_text}"
                    }
                }
            }
        }
    }
}

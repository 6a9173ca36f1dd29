//! Colored status pill.

use dioxus::prelude::*;
use petrescue_core::CaseStatus;

#[component]
pub fn StatusBadge(status: CaseStatus) -> Element {
    let style = format!(
        "display: inline-block; padding: 2px 10px; border-radius: 999px; font-size: 12px; font-weight: 600; color: white; background: {};",
        status.color()
    );
    let label = status.label();
    rsx! {
        span { style: "{style}", "{label}" }
    }
}

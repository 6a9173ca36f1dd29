//! Per-status totals above the case list.

use dioxus::prelude::*;
use petrescue_core::stats::CaseStats;
use petrescue_core::CaseStatus;

#[derive(Props, Clone, PartialEq)]
pub struct StatsPanelProps {
    pub stats: CaseStats,
}

#[component]
pub fn StatsPanel(props: StatsPanelProps) -> Element {
    let stats = props.stats;
    let tiles = [
        ("Total", stats.total, "#374151"),
        (CaseStatus::Open.label(), stats.open, CaseStatus::Open.color()),
        (CaseStatus::InProgress.label(), stats.in_progress, CaseStatus::InProgress.color()),
        (CaseStatus::Resolved.label(), stats.resolved, CaseStatus::Resolved.color()),
    ];

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin: 12px 0;",
            for (label, count, color) in tiles {
                div {
                    key: "{label}",
                    style: "padding: 12px; border-radius: 8px; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); text-align: center;",
                    div {
                        style: "font-size: 24px; font-weight: 700; color: {color};",
                        "{count}"
                    }
                    div { style: "font-size: 12px; color: #666;", "{label}" }
                }
            }
        }
    }
}

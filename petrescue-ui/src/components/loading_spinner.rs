//! Loading placeholders.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading...".to_string())]
    pub label: String,
}

/// Simple loading indicator.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "{props.label}"
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct CaseSkeletonProps {
    #[props(default = 3)]
    pub count: usize,
}

/// Grey placeholder cards shown while the case list loads.
#[component]
pub fn CaseSkeleton(props: CaseSkeletonProps) -> Element {
    rsx! {
        for i in 0..props.count {
            div {
                key: "{i}",
                style: "display: flex; gap: 12px; padding: 16px; margin: 8px 0; border-radius: 8px; background: #f5f5f5;",
                div { style: "width: 72px; height: 72px; border-radius: 6px; background: #e0e0e0;" }
                div {
                    style: "flex: 1;",
                    div { style: "height: 14px; width: 60%; margin-bottom: 10px; border-radius: 4px; background: #e0e0e0;" }
                    div { style: "height: 12px; width: 40%; border-radius: 4px; background: #e0e0e0;" }
                }
            }
        }
    }
}

//! Error and warning banners.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Amber, non-blocking style instead of red.
    #[props(default = false)]
    pub warning: bool,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let (background, color, border, prefix) = if props.warning {
        ("#FFF8E1", "#8D6E00", "#FFE082", "Warning: ")
    } else {
        ("#FFEBEE", "#C62828", "#EF9A9A", "Error: ")
    };
    let style = format!(
        "padding: 12px 16px; margin: 8px 0; background: {background}; color: {color}; border-radius: 4px; border: 1px solid {border};"
    );

    rsx! {
        div {
            role: "alert",
            style: "{style}",
            strong { "{prefix}" }
            "{props.message}"
        }
    }
}

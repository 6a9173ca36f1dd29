//! Reusable Dioxus RSX components for the PetRescue app.

mod case_list;
mod case_map;
mod confirm_modal;
mod error_display;
mod loading_spinner;
mod report_form;
mod stats_panel;
mod status_badge;
mod toasts;
mod walking_paws;

pub use case_list::CaseListView;
pub use case_map::CaseMapView;
pub use confirm_modal::ConfirmModal;
pub use error_display::ErrorDisplay;
pub use loading_spinner::{CaseSkeleton, LoadingSpinner};
pub use report_form::ReportFormView;
pub use stats_panel::StatsPanel;
pub use status_badge::StatusBadge;
pub use toasts::ToastStack;
pub use walking_paws::WalkingPaws;

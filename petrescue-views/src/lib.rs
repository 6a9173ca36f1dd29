//! View controllers for the PetRescue client.
//!
//! Each controller owns the local state of one view (report form, case list,
//! map) and exposes it as plain transitions. An async operation is split in
//! two: a synchronous step that validates and produces the request, and an
//! `apply_*`/`finish_*` step that folds the response back in. The Dioxus
//! components hold a controller in a `Signal` and never keep it borrowed
//! across an `.await`; tests and the CLI use the `async` helpers that chain
//! both steps against any [`petrescue_api::CaseApi`].

pub mod case_list;
pub mod map_view;
pub mod notice;
pub mod report_form;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use case_list::{CaseList, EditDraft};
pub use map_view::{MapDisplay, MapView, MarkerSpec};
pub use notice::{Notice, NoticeKind, Toast, Toasts, TOAST_DURATION_MS};
pub use report_form::{FormError, FormPhase, ReportForm, SelectedImage};

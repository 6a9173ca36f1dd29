//! Case list: fetch, filter, inline edit, status shortcuts and delete.
//!
//! Local state only changes after the server acknowledged a mutation, so a
//! failed save/advance/delete leaves the list exactly as it was and only
//! produces an error notice.

use log::{debug, error, info, warn};
use petrescue_api::{ApiError, CaseApi};
use petrescue_core::refresh::{RefreshTrigger, RefreshWatcher};
use petrescue_core::stats::CaseStats;
use petrescue_core::{AnimalCase, CaseStatus, CaseUpdate, Coordinates, StatusFilter, ValidationError};

use crate::notice::Notice;

/// Editable copy of one case.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub status: CaseStatus,
}

impl EditDraft {
    pub fn from_case(case: &AnimalCase) -> Self {
        Self {
            id: case.id.clone(),
            description: case.description.clone(),
            latitude: case.latitude.to_string(),
            longitude: case.longitude.to_string(),
            status: case.status,
        }
    }

    /// The partial update carrying the draft's fields.
    pub fn to_update(&self) -> Result<CaseUpdate, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let coords = Coordinates::parse(&self.latitude, &self.longitude)?;
        Ok(CaseUpdate {
            description: Some(description.to_string()),
            latitude: Some(coords.latitude()),
            longitude: Some(coords.longitude()),
            image_url: None,
            status: Some(self.status),
        })
    }
}

/// The single forward shortcut offered for a case, with its caption.
pub fn forward_action(case: &AnimalCase) -> Option<(CaseStatus, &'static str)> {
    let next = case.status.next()?;
    let label = case.status.advance_label()?;
    Some((next, label))
}

#[derive(Debug, Clone, Default)]
pub struct CaseList {
    cases: Vec<AnimalCase>,
    loading: bool,
    error: Option<String>,
    filter: StatusFilter,
    editing: Option<EditDraft>,
    pending_delete: Option<String>,
    notice: Option<Notice>,
    watcher: RefreshWatcher,
}

impl CaseList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cases(&self) -> &[AnimalCase] {
        &self.cases
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch failure message; when set no cases are shown.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Cases in the current filter tab, in fetch order.
    pub fn visible(&self) -> Vec<&AnimalCase> {
        self.filter.apply(&self.cases)
    }

    pub fn stats(&self) -> CaseStats {
        CaseStats::from_cases(&self.cases)
    }

    /// Pending notice for the toast stack, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// True when the trigger moved since the last fetch. Marks the list as
    /// loading.
    pub fn needs_fetch(&mut self, trigger: &RefreshTrigger) -> bool {
        let stale = self.watcher.observe(trigger);
        if stale {
            self.loading = true;
        }
        stale
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<AnimalCase>, ApiError>) {
        self.loading = false;
        match result {
            Ok(cases) => {
                self.cases = cases;
                self.error = None;
                if let Some(draft) = &self.editing {
                    if !self.cases.iter().any(|c| c.id == draft.id) {
                        self.editing = None;
                    }
                }
            }
            Err(e) => {
                warn!("Failed to load cases: {}", e);
                self.cases.clear();
                self.editing = None;
                self.error = Some(e.message());
            }
        }
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    /// Enter edit mode for `id`, discarding any other open draft.
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.cases.iter().find(|c| c.id == id) {
            Some(case) => {
                self.editing = Some(EditDraft::from_case(case));
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate the open draft into a request. An invalid draft stays open
    /// with an error notice.
    pub fn save_request(&mut self) -> Option<(String, CaseUpdate)> {
        let draft = self.editing.as_ref()?;
        match draft.to_update() {
            Ok(update) => Some((draft.id.clone(), update)),
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                None
            }
        }
    }

    /// Fold a save response in. Returns true when the other views should
    /// refresh.
    pub fn apply_saved(&mut self, id: &str, result: Result<AnimalCase, ApiError>) -> bool {
        match result {
            Ok(updated) => {
                self.replace_case(id, updated);
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                self.notice = Some(Notice::success("Case updated"));
                true
            }
            Err(e) => {
                error!("Failed to update case {}: {}", id, e);
                self.notice = Some(Notice::error(format!(
                    "Failed to update case: {}",
                    e.message()
                )));
                false
            }
        }
    }

    /// Request for the forward shortcut of `id`; `None` for resolved or
    /// unknown cases.
    pub fn advance_request(&self, id: &str) -> Option<(String, CaseUpdate)> {
        let case = self.cases.iter().find(|c| c.id == id)?;
        let (next, _) = forward_action(case)?;
        Some((case.id.clone(), CaseUpdate::status(next)))
    }

    pub fn apply_advanced(&mut self, id: &str, result: Result<AnimalCase, ApiError>) -> bool {
        match result {
            Ok(updated) => {
                info!("Case {} is now {}", id, updated.status);
                self.notice = Some(Notice::success(format!(
                    "Case marked {}",
                    updated.status.label().to_lowercase()
                )));
                self.replace_case(id, updated);
                true
            }
            Err(e) => {
                error!("Failed to change status of case {}: {}", id, e);
                self.notice = Some(Notice::error(format!(
                    "Failed to change status: {}",
                    e.message()
                )));
                false
            }
        }
    }

    /// Swap in the server copy. A case that left the list meanwhile stays
    /// gone.
    fn replace_case(&mut self, id: &str, updated: AnimalCase) {
        match self.cases.iter_mut().find(|c| c.id == id) {
            Some(slot) => *slot = updated,
            None => debug!("Case {} is no longer listed; dropping the update", id),
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if !self.cases.iter().any(|c| c.id == id) {
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    /// Case awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&AnimalCase> {
        let id = self.pending_delete.as_deref()?;
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user acknowledged the dialog. Returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    pub fn apply_deleted(&mut self, id: &str, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.cases.retain(|c| c.id != id);
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                self.notice = Some(Notice::success("Case deleted"));
                true
            }
            Err(e) => {
                error!("Failed to delete case {}: {}", id, e);
                self.notice = Some(Notice::error(format!(
                    "Failed to delete case: {}",
                    e.message()
                )));
                false
            }
        }
    }

    /// Refetch if the trigger moved. Returns whether a fetch happened.
    pub async fn sync<A: CaseApi>(&mut self, api: &A, trigger: &RefreshTrigger) -> bool {
        if !self.needs_fetch(trigger) {
            return false;
        }
        let result = api.list_cases().await;
        self.apply_fetch(result);
        true
    }

    pub async fn save<A: CaseApi>(&mut self, api: &A) -> bool {
        let Some((id, update)) = self.save_request() else {
            return false;
        };
        let result = api.update_case(&id, &update).await;
        self.apply_saved(&id, result)
    }

    pub async fn advance<A: CaseApi>(&mut self, api: &A, id: &str) -> bool {
        let Some((id, update)) = self.advance_request(id) else {
            return false;
        };
        let result = api.update_case(&id, &update).await;
        self.apply_advanced(&id, result)
    }

    /// Delete the case awaiting confirmation, if any.
    pub async fn delete_confirmed<A: CaseApi>(&mut self, api: &A) -> bool {
        let Some(id) = self.confirm_delete() else {
            return false;
        };
        let result = api.delete_case(&id).await;
        self.apply_deleted(&id, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{case, FakeApi};
    use crate::notice::NoticeKind;

    fn seeded() -> FakeApi {
        FakeApi::with_cases(vec![
            case("1", 4.60, -74.08, CaseStatus::Open),
            case("2", 4.61, -74.07, CaseStatus::InProgress),
            case("3", 4.62, -74.06, CaseStatus::Resolved),
            case("4", 4.63, -74.05, CaseStatus::Open),
        ])
    }

    async fn loaded(api: &FakeApi) -> CaseList {
        let mut list = CaseList::new();
        assert!(list.sync(api, &RefreshTrigger::new()).await);
        list
    }

    #[tokio::test]
    async fn fetches_on_mount_and_on_every_bump() {
        let api = seeded();
        let mut trigger = RefreshTrigger::new();
        let mut list = CaseList::new();

        assert!(list.sync(&api, &trigger).await);
        assert!(!list.sync(&api, &trigger).await);
        assert_eq!(api.calls("list"), 1);

        trigger.bump();
        assert!(list.sync(&api, &trigger).await);
        assert_eq!(api.calls("list"), 2);
        assert!(!list.is_loading());
        assert_eq!(list.cases().len(), 4);
    }

    #[tokio::test]
    async fn filters_are_computed_locally() {
        let api = seeded();
        let mut list = loaded(&api).await;

        list.set_filter(StatusFilter::Only(CaseStatus::Open));
        let ids: Vec<&str> = list.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let stats = list.stats();
        assert_eq!((stats.total, stats.open, stats.in_progress, stats.resolved), (4, 2, 1, 1));
        assert_eq!(api.calls("list"), 1);
    }

    #[tokio::test]
    async fn fetch_failure_shows_error_and_no_cases() {
        let api = seeded();
        let mut list = loaded(&api).await;

        api.fail_next(ApiError::Network("connection refused".to_string()));
        let mut trigger = RefreshTrigger::new();
        trigger.bump();
        list.sync(&api, &trigger).await;

        assert!(list.cases().is_empty());
        assert!(list.visible().is_empty());
        assert!(list.error().is_some());
    }

    #[test]
    fn each_status_offers_the_expected_shortcut() {
        let open = case("1", 0.0, 0.0, CaseStatus::Open);
        let working = case("2", 0.0, 0.0, CaseStatus::InProgress);
        let done = case("3", 0.0, 0.0, CaseStatus::Resolved);

        assert_eq!(
            forward_action(&open),
            Some((CaseStatus::InProgress, "Mark in progress"))
        );
        assert_eq!(
            forward_action(&working),
            Some((CaseStatus::Resolved, "Mark resolved"))
        );
        assert_eq!(forward_action(&done), None);
    }

    #[tokio::test]
    async fn advancing_moves_one_step_forward() {
        let api = seeded();
        let mut list = loaded(&api).await;

        assert!(list.advance(&api, "1").await);
        assert_eq!(list.cases()[0].status, CaseStatus::InProgress);
        assert!(list.advance(&api, "1").await);
        assert_eq!(list.cases()[0].status, CaseStatus::Resolved);

        assert!(!list.advance(&api, "1").await);
        assert_eq!(api.calls("update"), 2);
        assert_eq!(
            list.take_notice().map(|n| n.message),
            Some("Case marked resolved".to_string())
        );
    }

    #[tokio::test]
    async fn edit_replaces_the_case_with_the_server_copy() {
        let api = seeded();
        let mut list = loaded(&api).await;

        assert!(list.start_edit("2"));
        {
            let draft = list.editing_mut().unwrap();
            draft.description = "  Dog moved to shelter  ".to_string();
            draft.status = CaseStatus::Resolved;
        }
        assert!(list.save(&api).await);

        assert!(list.editing().is_none());
        let edited = list.cases().iter().find(|c| c.id == "2").unwrap();
        assert_eq!(edited.description, "Dog moved to shelter");
        assert_eq!(edited.status, CaseStatus::Resolved);
        // No refetch on this path.
        assert_eq!(api.calls("list"), 1);
    }

    #[tokio::test]
    async fn update_for_a_case_gone_from_the_list_is_dropped() {
        let api = seeded();
        let mut list = loaded(&api).await;
        let (id, update) = list.advance_request("1").unwrap();

        api.cases.borrow_mut().retain(|c| c.id != "1");
        let mut trigger = RefreshTrigger::new();
        trigger.bump();
        assert!(list.sync(&api, &trigger).await);
        assert_eq!(list.cases().len(), 3);

        let mut server_copy = case("1", 4.60, -74.08, CaseStatus::InProgress);
        server_copy.description = "late response".to_string();
        assert!(list.apply_advanced(&id, Ok(server_copy)));
        assert_eq!(update.status, Some(CaseStatus::InProgress));
        assert_eq!(list.cases().len(), 3);
        assert!(list.cases().iter().all(|c| c.id != "1"));
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        let api = seeded();
        let mut list = loaded(&api).await;

        list.start_edit("1");
        list.editing_mut().unwrap().latitude = "95".to_string();
        assert!(!list.save(&api).await);

        assert_eq!(api.calls("update"), 0);
        assert!(list.editing().is_some());
        assert_eq!(list.take_notice().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[tokio::test]
    async fn only_one_draft_is_open_at_a_time() {
        let api = seeded();
        let mut list = loaded(&api).await;
        list.start_edit("1");
        list.start_edit("4");
        assert_eq!(list.editing().map(|d| d.id.as_str()), Some("4"));
        assert!(!list.start_edit("missing"));
    }

    #[tokio::test]
    async fn failed_mutations_leave_state_untouched() {
        let api = seeded();
        let mut list = loaded(&api).await;
        let before = list.cases().to_vec();

        api.fail_next(ApiError::Network("offline".to_string()));
        assert!(!list.advance(&api, "1").await);

        list.request_delete("2");
        api.fail_next(ApiError::Rejected {
            status: 500,
            payload: serde_json::json!({"detail": "database is locked"}),
        });
        assert!(!list.delete_confirmed(&api).await);

        assert_eq!(list.cases(), before.as_slice());
        let notice = list.take_notice().unwrap();
        assert!(notice.is_error());
        assert!(notice.message.contains("database is locked"));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let api = seeded();
        let mut list = loaded(&api).await;

        // Nothing pending: nothing is deleted.
        assert!(!list.delete_confirmed(&api).await);

        assert!(list.request_delete("3"));
        assert_eq!(list.pending_delete().map(|c| c.id.as_str()), Some("3"));
        list.cancel_delete();
        assert!(!list.delete_confirmed(&api).await);
        assert_eq!(api.calls("delete"), 0);

        list.request_delete("3");
        assert!(list.delete_confirmed(&api).await);
        assert_eq!(api.calls("delete"), 1);
        assert!(list.cases().iter().all(|c| c.id != "3"));
        assert!(list.pending_delete().is_none());
    }
}

//! Read and update commands over the existing case set.

use std::io::Write;

use anyhow::{anyhow, bail};
use petrescue_api::CaseApi;
use petrescue_core::refresh::RefreshTrigger;
use petrescue_core::{AnimalCase, CaseUpdate, StatusFilter};
use petrescue_views::{CaseList, MapView, Notice};

/// One line per case: id, status, position and description.
pub fn case_line(case: &AnimalCase) -> String {
    format!(
        "#{:<6} {:<12} {:>9.5},{:>10.5}  {}",
        case.id,
        case.status.as_str(),
        case.latitude,
        case.longitude,
        case.description
    )
}

/// Fetch into a fresh list, failing on connectivity errors.
async fn load<A: CaseApi>(api: &A) -> anyhow::Result<CaseList> {
    let mut list = CaseList::new();
    list.sync(api, &RefreshTrigger::new()).await;
    if let Some(message) = list.error() {
        bail!("{}", message);
    }
    Ok(list)
}

/// Turn the controller's notice into the command outcome.
fn finish<W: Write>(notice: Option<Notice>, out: &mut W) -> anyhow::Result<()> {
    match notice {
        Some(notice) if notice.is_error() => Err(anyhow!(notice.message)),
        Some(notice) => {
            writeln!(out, "{}", notice.message)?;
            Ok(())
        }
        None => Ok(()),
    }
}

pub async fn list<A: CaseApi, W: Write>(
    api: &A,
    filter: StatusFilter,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut list = load(api).await?;
    list.set_filter(filter);
    let visible = list.visible();
    log::info!("{} of {} cases match {}", visible.len(), list.cases().len(), filter.key());

    if visible.is_empty() {
        writeln!(out, "No cases.")?;
        return Ok(());
    }
    for case in visible {
        writeln!(out, "{}", case_line(case))?;
    }
    Ok(())
}

pub async fn stats<A: CaseApi, W: Write>(api: &A, out: &mut W) -> anyhow::Result<()> {
    let list = load(api).await?;
    let stats = list.stats();
    for filter in StatusFilter::ALL {
        writeln!(out, "{:<12} {}", filter.label(), stats.count(filter))?;
    }
    writeln!(out, "{:<12} {}", "Active", stats.active())?;
    Ok(())
}

pub async fn zones<A: CaseApi, W: Write>(api: &A, out: &mut W) -> anyhow::Result<()> {
    let mut view = MapView::new();
    view.sync(api, &RefreshTrigger::new()).await;
    if let Some(warning) = view.warning() {
        bail!("{}", warning);
    }

    let zones = view.zones();
    if zones.is_empty() {
        writeln!(out, "No heat zones.")?;
        return Ok(());
    }
    for zone in zones {
        writeln!(
            out,
            "{:>9.5},{:>10.5}  {} active  {:?} ({} m)",
            zone.lat, zone.lng, zone.count, zone.intensity, zone.radius_m
        )?;
    }
    Ok(())
}

pub async fn advance<A: CaseApi, W: Write>(api: &A, id: &str, out: &mut W) -> anyhow::Result<()> {
    let mut list = load(api).await?;
    let Some(case) = list.cases().iter().find(|c| c.id == id) else {
        bail!("case {} not found", id);
    };
    if list.advance_request(id).is_none() {
        bail!("case {} is already {}", id, case.status.label().to_lowercase());
    }
    list.advance(api, id).await;
    finish(list.take_notice(), out)
}

/// Partial update. Validated before anything is sent.
pub async fn edit<A: CaseApi, W: Write>(
    api: &A,
    id: &str,
    update: CaseUpdate,
    out: &mut W,
) -> anyhow::Result<()> {
    update.validate()?;
    let update = CaseUpdate {
        description: update.description.map(|d| d.trim().to_string()),
        ..update
    };
    let updated = api.update_case(id, &update).await?;
    log::info!("Updated case {}", id);
    writeln!(out, "{}", case_line(&updated))?;
    Ok(())
}

/// Delete requires `confirmed`, the CLI counterpart of the confirm dialog.
pub async fn delete<A: CaseApi, W: Write>(
    api: &A,
    id: &str,
    confirmed: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    if !confirmed {
        bail!("refusing to delete case {} without --yes", id);
    }
    let mut list = load(api).await?;
    if !list.request_delete(id) {
        bail!("case {} not found", id);
    }
    list.delete_confirmed(api).await;
    finish(list.take_notice(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrescue_api::ApiError;
    use petrescue_core::CaseStatus;
    use petrescue_views::fake::{case, FakeApi};

    fn seeded() -> FakeApi {
        FakeApi::with_cases(vec![
            case("1", 4.6000, -74.0800, CaseStatus::Open),
            case("2", 4.6010, -74.0805, CaseStatus::InProgress),
            case("3", 4.7000, -74.0000, CaseStatus::Resolved),
        ])
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    fn status_of(api: &FakeApi, id: &str) -> Option<CaseStatus> {
        api.find(id).map(|c| c.status)
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let api = seeded();
        let mut buf = Vec::new();
        list(&api, StatusFilter::Only(CaseStatus::Open), &mut buf)
            .await
            .unwrap();
        let text = output(buf);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("#1 "));
        assert!(text.contains("open"));
    }

    #[tokio::test]
    async fn list_says_when_nothing_matches() {
        let api = FakeApi::default();
        let mut buf = Vec::new();
        list(&api, StatusFilter::All, &mut buf).await.unwrap();
        assert_eq!(output(buf), "No cases.\n");
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error() {
        let api = seeded();
        api.fail_next(ApiError::Network("connection refused".to_string()));
        let err = list(&api, StatusFilter::All, &mut Vec::new()).await.unwrap_err();
        assert!(err.to_string().contains("Could not reach"));
    }

    #[tokio::test]
    async fn stats_counts_each_status() {
        let api = seeded();
        let mut buf = Vec::new();
        stats(&api, &mut buf).await.unwrap();
        let text = output(buf);
        let counts: Vec<&str> = text
            .lines()
            .map(|l| l.split_whitespace().last().unwrap())
            .collect();
        assert_eq!(counts, vec!["3", "1", "1", "1", "2"]);
    }

    #[tokio::test]
    async fn zones_cluster_active_cases_only() {
        let api = seeded();
        let mut buf = Vec::new();
        zones(&api, &mut buf).await.unwrap();
        let text = output(buf);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("2 active"));
        assert!(text.contains("Low"));
    }

    #[tokio::test]
    async fn advance_moves_open_to_in_progress() {
        let api = seeded();
        let mut buf = Vec::new();
        advance(&api, "1", &mut buf).await.unwrap();
        assert_eq!(status_of(&api, "1"), Some(CaseStatus::InProgress));
        assert_eq!(output(buf), "Case marked in progress\n");
    }

    #[tokio::test]
    async fn advance_refuses_resolved_cases() {
        let api = seeded();
        let err = advance(&api, "3", &mut Vec::new()).await.unwrap_err();
        assert!(err.to_string().contains("already resolved"));
        assert_eq!(api.calls("update"), 0);
    }

    #[tokio::test]
    async fn edit_rejects_out_of_range_values_locally() {
        let api = seeded();
        let update = CaseUpdate {
            latitude: Some(91.0),
            ..CaseUpdate::default()
        };
        assert!(edit(&api, "1", update, &mut Vec::new()).await.is_err());
        assert_eq!(api.calls("update"), 0);
    }

    #[tokio::test]
    async fn edit_sends_partial_update() {
        let api = seeded();
        let update = CaseUpdate {
            status: Some(CaseStatus::Resolved),
            ..CaseUpdate::default()
        };
        let mut buf = Vec::new();
        edit(&api, "2", update, &mut buf).await.unwrap();
        assert_eq!(status_of(&api, "2"), Some(CaseStatus::Resolved));
        assert!(output(buf).contains("resolved"));
    }

    #[tokio::test]
    async fn edit_trims_the_description() {
        let api = seeded();
        let update = CaseUpdate {
            description: Some("  Taken to the vet  ".to_string()),
            ..CaseUpdate::default()
        };
        edit(&api, "1", update, &mut Vec::new()).await.unwrap();
        assert_eq!(api.find("1").unwrap().description, "Taken to the vet");
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let api = seeded();
        assert!(delete(&api, "1", false, &mut Vec::new()).await.is_err());
        assert_eq!(api.total_calls(), 0);

        let mut buf = Vec::new();
        delete(&api, "1", true, &mut buf).await.unwrap();
        assert_eq!(api.cases.borrow().len(), 2);
        assert_eq!(output(buf), "Case deleted\n");
    }

    #[tokio::test]
    async fn delete_of_unknown_case_fails() {
        let api = seeded();
        let err = delete(&api, "42", true, &mut Vec::new()).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(api.calls("delete"), 0);
    }
}

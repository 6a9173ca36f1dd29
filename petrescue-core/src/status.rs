//! Case status and its forward-only transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::case::AnimalCase;
use crate::error::ValidationError;

/// Lifecycle status of a reported case.
///
/// The only forward transitions are `Open -> InProgress -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [CaseStatus::Open, CaseStatus::InProgress, CaseStatus::Resolved];

    /// The status a shortcut button advances to, if any.
    pub fn next(self) -> Option<CaseStatus> {
        match self {
            CaseStatus::Open => Some(CaseStatus::InProgress),
            CaseStatus::InProgress => Some(CaseStatus::Resolved),
            CaseStatus::Resolved => None,
        }
    }

    /// Open and in-progress cases still need attention.
    pub fn is_active(self) -> bool {
        !matches!(self, CaseStatus::Resolved)
    }

    /// Wire representation used by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Resolved => "resolved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CaseStatus::Open => "Open",
            CaseStatus::InProgress => "In progress",
            CaseStatus::Resolved => "Resolved",
        }
    }

    /// Badge and marker color.
    pub fn color(self) -> &'static str {
        match self {
            CaseStatus::Open => "#ef4444",
            CaseStatus::InProgress => "#f59e0b",
            CaseStatus::Resolved => "#10b981",
        }
    }

    /// Caption for the shortcut that moves a case to `self.next()`.
    pub fn advance_label(self) -> Option<&'static str> {
        match self.next()? {
            CaseStatus::InProgress => Some("Mark in progress"),
            CaseStatus::Resolved => Some("Mark resolved"),
            CaseStatus::Open => None,
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(CaseStatus::Open),
            "in_progress" => Ok(CaseStatus::InProgress),
            "resolved" => Ok(CaseStatus::Resolved),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// One of the four mutually exclusive list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CaseStatus),
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(CaseStatus::Open),
        StatusFilter::Only(CaseStatus::InProgress),
        StatusFilter::Only(CaseStatus::Resolved),
    ];

    pub fn matches(self, status: CaseStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Filter a fetched case set, preserving fetch order.
    pub fn apply(self, cases: &[AnimalCase]) -> Vec<&AnimalCase> {
        cases.iter().filter(|c| self.matches(c.status)).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// Stable key used for tab ids and the CLI `--status` flag.
    pub fn key(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, status: CaseStatus) -> AnimalCase {
        AnimalCase {
            id: id.to_string(),
            description: format!("case {id}"),
            latitude: 4.7,
            longitude: -74.0,
            image_url: None,
            status,
        }
    }

    #[test]
    fn forward_transitions_follow_table() {
        assert_eq!(CaseStatus::Open.next(), Some(CaseStatus::InProgress));
        assert_eq!(CaseStatus::InProgress.next(), Some(CaseStatus::Resolved));
        assert_eq!(CaseStatus::Resolved.next(), None);
    }

    #[test]
    fn each_status_offers_at_most_one_shortcut() {
        assert_eq!(CaseStatus::Open.advance_label(), Some("Mark in progress"));
        assert_eq!(CaseStatus::InProgress.advance_label(), Some("Mark resolved"));
        assert_eq!(CaseStatus::Resolved.advance_label(), None);
    }

    #[test]
    fn wire_names_round_trip_through_serde() {
        let json = serde_json::to_string(&CaseStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: CaseStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, CaseStatus::Resolved);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "closed".parse::<CaseStatus>(),
            Err(ValidationError::UnknownStatus("closed".to_string()))
        );
    }

    #[test]
    fn active_excludes_resolved_only() {
        assert!(CaseStatus::Open.is_active());
        assert!(CaseStatus::InProgress.is_active());
        assert!(!CaseStatus::Resolved.is_active());
    }

    #[test]
    fn filters_are_mutually_exclusive_views() {
        let cases = vec![
            case("1", CaseStatus::Open),
            case("2", CaseStatus::InProgress),
            case("3", CaseStatus::Open),
            case("4", CaseStatus::Resolved),
        ];

        let all = StatusFilter::All.apply(&cases);
        assert_eq!(all.len(), 4);

        let open: Vec<&str> = StatusFilter::Only(CaseStatus::Open)
            .apply(&cases)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(open, vec!["1", "3"]);

        let per_status: usize = StatusFilter::ALL[1..]
            .iter()
            .map(|f| f.apply(&cases).len())
            .sum();
        assert_eq!(per_status, cases.len());
    }

    #[test]
    fn filter_parses_cli_keys() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "in_progress".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(CaseStatus::InProgress))
        );
        assert!("nope".parse::<StatusFilter>().is_err());
    }
}

//! Per-status counts for the stats panel and the list filter tabs.

use serde::Serialize;

use crate::case::AnimalCase;
use crate::status::{CaseStatus, StatusFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CaseStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl CaseStats {
    pub fn from_cases(cases: &[AnimalCase]) -> Self {
        cases.iter().fold(Self::default(), |mut stats, case| {
            stats.total += 1;
            match case.status {
                CaseStatus::Open => stats.open += 1,
                CaseStatus::InProgress => stats.in_progress += 1,
                CaseStatus::Resolved => stats.resolved += 1,
            }
            stats
        })
    }

    pub fn count(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total,
            StatusFilter::Only(CaseStatus::Open) => self.open,
            StatusFilter::Only(CaseStatus::InProgress) => self.in_progress,
            StatusFilter::Only(CaseStatus::Resolved) => self.resolved,
        }
    }

    /// Cases that still need attention.
    pub fn active(&self) -> usize {
        self.open + self.in_progress
    }
}

use crate::model::NormalizedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a raw row produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Both name columns empty or placeholders.
    MissingNames,
    /// The flexible column holds a table title.
    TitleRow,
    /// Clinical notes bled in from a neighbouring row.
    Garbage,
    /// Nothing beyond the names survived normalization.
    NoDetail,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingNames => write!(f, "missing names"),
            RejectReason::TitleRow => write!(f, "title row"),
            RejectReason::Garbage => write!(f, "bled clinical notes"),
            RejectReason::NoDetail => write!(f, "no detail fields"),
        }
    }
}

/// Result of normalizing a single raw row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(NormalizedRecord),
    Rejected(RejectReason),
}

impl RowOutcome {
    pub fn record(self) -> Option<NormalizedRecord> {
        match self {
            RowOutcome::Accepted(r) => Some(r),
            RowOutcome::Rejected(_) => None,
        }
    }
}

/// Counts of rows dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectCounts {
    pub missing_names: usize,
    pub title_row: usize,
    pub garbage: usize,
    pub no_detail: usize,
}

impl RejectCounts {
    pub fn add(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::MissingNames => self.missing_names += 1,
            RejectReason::TitleRow => self.title_row += 1,
            RejectReason::Garbage => self.garbage += 1,
            RejectReason::NoDetail => self.no_detail += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.missing_names + self.title_row + self.garbage + self.no_detail
    }
}

/// Records for one query plus how they were arrived at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub query: String,
    /// Raw rows returned by the matcher.
    pub candidates: usize,
    pub rejected: RejectCounts,
    pub duplicates_removed: usize,
    pub records: Vec<NormalizedRecord>,
}

/// What a front end shows after a search box interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Blank query; nothing has been asked yet.
    NotIssued,
    /// A query ran but no record survived.
    NoMatches { query: String, candidates: usize },
    Found(SearchReport),
}

impl SearchOutcome {
    pub fn records(&self) -> &[NormalizedRecord] {
        match self {
            SearchOutcome::Found(report) => &report.records,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_counts() {
        let mut counts = RejectCounts::default();
        counts.add(RejectReason::Garbage);
        counts.add(RejectReason::Garbage);
        counts.add(RejectReason::TitleRow);
        assert_eq!(counts.garbage, 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_not_issued_has_no_records() {
        assert!(SearchOutcome::NotIssued.records().is_empty());
    }

    #[test]
    fn test_outcome_serializes_status() {
        let json = serde_json::to_value(SearchOutcome::NoMatches {
            query: "xyz".into(),
            candidates: 2,
        })
        .unwrap();
        assert_eq!(json["status"], "no_matches");
        assert_eq!(json["candidates"], 2);
    }
}

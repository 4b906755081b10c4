pub mod cache;
pub mod classify;
pub mod dedupe;
pub mod error;
pub mod filter;
pub mod model;
pub mod parsing;
pub mod rules;
pub mod search;
pub mod store;

use classify::outcome::{RejectCounts, RowOutcome, SearchOutcome, SearchReport};
use error::LabRefError;
use model::{NormalizedRecord, RawRow};
use parsing::RowNormalizer;
use rules::schema::{DedupeKey, PipelineConfig, SearchDef};

/// Search, normalize, filter and deduplicate in one pass.
///
/// Holds no mutable state, so one pipeline can serve any number of queries
/// over any snapshot of rows.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: RowNormalizer,
    search: SearchDef,
    dedupe: DedupeKey,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let search = config.search;
        let dedupe = config.dedupe;
        Pipeline {
            normalizer: RowNormalizer::new(config),
            search,
            dedupe,
        }
    }

    /// Pipeline configured from the default built-in preset.
    pub fn builtin() -> Result<Self, LabRefError> {
        let config = rules::builtin::load_preset(rules::builtin::DEFAULT_PRESET)?;
        Ok(Pipeline::new(config))
    }

    pub fn with_search(mut self, search: SearchDef) -> Self {
        self.search = search;
        self
    }

    pub fn with_dedupe(mut self, dedupe: DedupeKey) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        self.normalizer.config()
    }

    pub fn normalize_row(&self, row: &RawRow) -> RowOutcome {
        self.normalizer.normalize(row)
    }

    /// Raw rows matching `query`, in stored order.
    pub fn search<'a>(&self, rows: &'a [RawRow], query: &str) -> Vec<&'a RawRow> {
        search::search(rows, query, &self.config().layout, &self.search)
    }

    /// Main API entry point: structured records for a search-box query.
    pub fn search_and_normalize(&self, rows: &[RawRow], query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::NotIssued;
        }

        let candidates = self.search(rows, query);
        let (records, rejected) = self.normalize_all(&candidates);

        let before = records.len();
        let records = dedupe::dedupe(records, self.dedupe);
        let duplicates_removed = before - records.len();

        tracing::debug!(
            query,
            candidates = candidates.len(),
            rejected = rejected.total(),
            duplicates_removed,
            records = records.len(),
            "search finished"
        );

        if records.is_empty() {
            return SearchOutcome::NoMatches {
                query: query.to_string(),
                candidates: candidates.len(),
            };
        }

        SearchOutcome::Found(SearchReport {
            query: query.to_string(),
            candidates: candidates.len(),
            rejected,
            duplicates_removed,
            records,
        })
    }

    fn normalize_all(&self, rows: &[&RawRow]) -> (Vec<NormalizedRecord>, RejectCounts) {
        let mut records = Vec::new();
        let mut rejected = RejectCounts::default();

        for row in rows {
            match self.normalizer.normalize(row) {
                RowOutcome::Accepted(record) => records.push(record),
                RowOutcome::Rejected(reason) => {
                    tracing::debug!(%reason, code = row.cell(self.config().layout.code), "row rejected");
                    rejected.add(reason);
                }
            }
        }

        (records, rejected)
    }
}

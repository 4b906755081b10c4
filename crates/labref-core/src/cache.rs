use crate::error::LabRefError;
use crate::model::RawRow;
use crate::store::RowSource;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default lifetime of a loaded dataset.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Holds the full raw dataset for a fixed time-to-live.
///
/// Callers get a shared snapshot; a stale snapshot stays valid for as long as
/// they hold it. Reloading happens lazily on the first access after expiry.
pub struct SnapshotCache<S: RowSource> {
    source: S,
    ttl: Duration,
    snapshot: Option<(Instant, Arc<Vec<RawRow>>)>,
}

impl<S: RowSource> SnapshotCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        SnapshotCache {
            source,
            ttl,
            snapshot: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current rows, loading them if absent or expired.
    pub fn rows(&mut self) -> Result<Arc<Vec<RawRow>>, LabRefError> {
        self.rows_at(Instant::now())
    }

    fn rows_at(&mut self, now: Instant) -> Result<Arc<Vec<RawRow>>, LabRefError> {
        if let Some((loaded_at, rows)) = &self.snapshot {
            if now.saturating_duration_since(*loaded_at) < self.ttl {
                return Ok(Arc::clone(rows));
            }
            tracing::debug!(backend = self.source.backend_name(), "row snapshot expired");
        }

        let rows = Arc::new(self.source.load_rows()?);
        self.snapshot = Some((now, Arc::clone(&rows)));
        Ok(rows)
    }

    /// Drop the snapshot so the next access reloads.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }
}

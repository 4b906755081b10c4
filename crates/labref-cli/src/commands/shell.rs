use labref_core::cache::SnapshotCache;
use labref_core::error::LabRefError;
use labref_core::store::sqlite::SqliteStore;
use labref_core::store::RowSource;
use labref_core::Pipeline;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use super::build_pipeline;
use crate::output;
use crate::PipelineArgs;

pub fn run(args: &PipelineArgs, ttl_secs: u64) -> Result<(), LabRefError> {
    let pipeline = build_pipeline(args)?;
    let mut cache = SnapshotCache::new(SqliteStore::new(&args.db), Duration::from_secs(ttl_secs));

    // Fail early when the database is missing rather than on the first query.
    let rows = cache.rows()?;
    eprintln!(
        "{} rows loaded from {}. Type a query, :reload or :quit.",
        rows.len(),
        args.db.display()
    );
    drop(rows);

    query_loop(&pipeline, &mut cache, io::stdin().lock())
}

/// Answer one query per input line until `:quit` or end of input.
///
/// A storage failure is reported and the loop keeps going.
fn query_loop<S: RowSource, R: BufRead>(
    pipeline: &Pipeline,
    cache: &mut SnapshotCache<S>,
    input: R,
) -> Result<(), LabRefError> {
    prompt()?;
    for line in input.lines() {
        let line = line?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":reload" => {
                cache.invalidate();
                match cache.rows() {
                    Ok(rows) => eprintln!("{} rows reloaded", rows.len()),
                    Err(e) => eprintln!("Data unavailable: {e}"),
                }
            }
            query => match cache.rows() {
                Ok(rows) => output::table::print(&pipeline.search_and_normalize(&rows, query)),
                Err(e) => eprintln!("Data unavailable: {e}"),
            },
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<(), LabRefError> {
    let mut stderr = io::stderr();
    write!(stderr, "> ")?;
    stderr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use labref_core::model::RawRow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every load after the first `ok_loads`.
    struct FlakySource {
        loads: AtomicUsize,
        ok_loads: usize,
    }

    impl FlakySource {
        fn new(ok_loads: usize) -> Self {
            FlakySource {
                loads: AtomicUsize::new(0),
                ok_loads,
            }
        }
    }

    impl RowSource for FlakySource {
        fn load_rows(&self) -> Result<Vec<RawRow>, LabRefError> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst);
            if n < self.ok_loads {
                Ok(vec![RawRow::from_strs(&[
                    "09026", "胎兒蛋白", "AFP", "", "", "<10 ng/mL", "", "肝癌時上升",
                ])])
            } else {
                Err(LabRefError::DataUnavailable("database file is locked".into()))
            }
        }

        fn backend_name(&self) -> &str {
            "flaky"
        }
    }

    #[test]
    fn test_failed_reload_keeps_shell_running() {
        let pipeline = Pipeline::builtin().unwrap();
        let mut cache = SnapshotCache::new(FlakySource::new(0), Duration::from_secs(600));

        let input = ":reload\nAFP\n:reload\n".as_bytes();
        query_loop(&pipeline, &mut cache, input).unwrap();

        // Every line reached the source, so no failure ended the loop early.
        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_quit_stops_reading() {
        let pipeline = Pipeline::builtin().unwrap();
        let mut cache = SnapshotCache::new(FlakySource::new(1), Duration::from_secs(600));

        let input = "AFP\n:quit\n:reload\n".as_bytes();
        query_loop(&pipeline, &mut cache, input).unwrap();

        assert_eq!(cache.source().loads.load(Ordering::SeqCst), 1);
    }
}

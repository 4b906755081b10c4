use labref_core::classify::outcome::SearchOutcome;
use labref_core::error::LabRefError;
use labref_core::store::sqlite::SqliteStore;
use labref_core::store::RowSource;

use super::build_pipeline;
use crate::output;
use crate::PipelineArgs;

pub fn run(
    query: &str,
    args: &PipelineArgs,
    output_format: &str,
    show_raw: bool,
) -> Result<(), LabRefError> {
    let pipeline = build_pipeline(args)?;
    let store = SqliteStore::new(&args.db);
    let rows = store.load_rows()?;

    let outcome = pipeline.search_and_normalize(&rows, query);

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => output::table::print(&outcome),
    }

    if show_raw {
        if let SearchOutcome::NoMatches { .. } = outcome {
            let raw = pipeline.search(&rows, query);
            output::table::print_raw(&raw);
        }
    }

    Ok(())
}

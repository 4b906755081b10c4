use labref_core::error::LabRefError;
use labref_core::store::fill::forward_fill;
use labref_core::store::sqlite::SqliteStore;
use labref_core::store::{json, xlsx};
use std::path::Path;

pub fn run(input_file: &Path, db: &Path, sheet: Option<&str>, fill: bool) -> Result<(), LabRefError> {
    let bytes = std::fs::read(input_file)?;

    let is_xlsx = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    let mut rows = if is_xlsx {
        xlsx::parse_xlsx_rows(&bytes, sheet)?
    } else {
        json::parse_rows(&bytes)?
    };

    tracing::debug!(rows = rows.len(), xlsx = is_xlsx, "parsed input file");

    if rows.is_empty() {
        eprintln!("No rows found in {}; database left untouched.", input_file.display());
        return Ok(());
    }

    if fill {
        forward_fill(&mut rows);
    } else {
        tracing::info!("forward fill disabled; storing rows as extracted");
    }

    let stored = SqliteStore::new(db).replace_rows(&rows)?;
    eprintln!("Stored {} row(s) in {}", stored, db.display());
    Ok(())
}

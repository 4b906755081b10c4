use crate::error::LabRefError;
use crate::model::{field_index, field_name, RawRow};
use crate::parsing::normalize::clean_text;
use crate::store::{pad_rows, RowSource};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Table holding the extracted manual rows.
pub const TABLE: &str = "tests";

/// SQLite store with one TEXT column per cell position.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the database file, if it exists.
    pub fn last_modified(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
    }

    fn open_read_only(&self) -> Result<Connection, LabRefError> {
        if !self.path.exists() {
            return Err(LabRefError::DataUnavailable(format!(
                "database {} does not exist. Run `labref import` first",
                self.path.display()
            )));
        }
        Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| LabRefError::DataUnavailable(format!("cannot open {}: {e}", self.path.display())))
    }

    /// Number of stored rows.
    pub fn count_rows(&self) -> Result<usize, LabRefError> {
        let conn = self.open_read_only()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |row| row.get(0))
            .map_err(|e| LabRefError::DataUnavailable(format!("table '{TABLE}' unreadable: {e}")))?;
        Ok(count.max(0) as usize)
    }

    /// Replace the table contents with `rows`, widening it to the widest row.
    pub fn replace_rows(&self, rows: &[RawRow]) -> Result<usize, LabRefError> {
        let mut padded = rows.to_vec();
        let width = pad_rows(&mut padded).max(1);

        let mut conn = Connection::open(&self.path)?;
        let tx = conn.transaction()?;

        let columns: Vec<String> = (0..width).map(field_name).collect();
        tx.execute(&format!("DROP TABLE IF EXISTS {TABLE}"), [])?;
        tx.execute(
            &format!(
                "CREATE TABLE {TABLE} ({})",
                columns
                    .iter()
                    .map(|c| format!("{c} TEXT"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            [],
        )?;

        {
            let placeholders: Vec<String> = (1..=width).map(|i| format!("?{i}")).collect();
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {TABLE} ({}) VALUES ({})",
                columns.join(", "),
                placeholders.join(", ")
            ))?;
            for row in &padded {
                let mut cells: Vec<&str> = row.cells().iter().map(String::as_str).collect();
                cells.resize(width, "");
                stmt.execute(rusqlite::params_from_iter(cells))?;
            }
        }

        tx.commit()?;
        tracing::info!(rows = padded.len(), columns = width, path = %self.path.display(), "stored raw rows");
        Ok(padded.len())
    }
}

impl RowSource for SqliteStore {
    fn load_rows(&self) -> Result<Vec<RawRow>, LabRefError> {
        let conn = self.open_read_only()?;
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {TABLE}"))
            .map_err(|e| LabRefError::DataUnavailable(format!("table '{TABLE}' unreadable: {e}")))?;

        // Map result columns to cell positions by their `field_<i>` suffix.
        let positions: Vec<Option<usize>> = stmt
            .column_names()
            .iter()
            .map(|name| field_index(name))
            .collect();
        let width = positions.iter().flatten().map(|i| i + 1).max().unwrap_or(0);
        if positions.iter().any(Option::is_none) {
            tracing::warn!("ignoring columns without a field_<i> name in table '{TABLE}'");
        }

        let rows = stmt.query_map([], |row| {
            let mut cells = vec![String::new(); width];
            for (col, pos) in positions.iter().enumerate() {
                let Some(pos) = pos else { continue };
                cells[*pos] = match row.get_ref(col)? {
                    ValueRef::Null => String::new(),
                    ValueRef::Text(t) => clean_text(&String::from_utf8_lossy(t)),
                    ValueRef::Integer(i) => i.to_string(),
                    ValueRef::Real(f) => f.to_string(),
                    ValueRef::Blob(_) => String::new(),
                };
            }
            Ok(RawRow::new(cells))
        })?;

        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::info!(rows = rows.len(), path = %self.path.display(), "loaded raw rows");
        Ok(rows)
    }

    fn backend_name(&self) -> &str {
        "sqlite"
    }
}

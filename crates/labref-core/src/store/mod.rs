pub mod fill;
pub mod json;
pub mod sqlite;
pub mod xlsx;

use crate::error::LabRefError;
use crate::model::RawRow;

/// Trait for raw-row storage backends.
pub trait RowSource: Send + Sync {
    /// Load every stored row in insertion order.
    fn load_rows(&self) -> Result<Vec<RawRow>, LabRefError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Pad every row with empty cells up to the widest row.
pub fn pad_rows(rows: &mut [RawRow]) -> usize {
    let width = rows.iter().map(RawRow::len).max().unwrap_or(0);
    for row in rows.iter_mut() {
        if row.len() < width {
            let mut cells = std::mem::take(row).into_cells();
            cells.resize(width, String::new());
            *row = RawRow::new(cells);
        }
    }
    width
}

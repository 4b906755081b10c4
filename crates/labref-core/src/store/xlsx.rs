use std::io::Cursor;

use calamine::{Reader, Xlsx};

use crate::error::LabRefError;
use crate::model::RawRow;

/// Read every row of a worksheet as raw cells.
///
/// Uses `sheet` when given, otherwise the first worksheet in the workbook.
pub fn parse_xlsx_rows(bytes: &[u8], sheet: Option<&str>) -> Result<Vec<RawRow>, LabRefError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| LabRefError::Xlsx(format!("failed to open xlsx: {e}")))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LabRefError::Xlsx("workbook has no worksheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LabRefError::Xlsx(format!("sheet '{sheet_name}' not found: {e}")))?;

    let rows = range
        .rows()
        .map(|row| RawRow::new(row.iter().map(cell_as_string).collect()))
        .collect();

    Ok(rows)
}

fn cell_as_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::String(s) => s.trim().to_string(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        calamine::Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}

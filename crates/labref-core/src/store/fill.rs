use crate::model::RawRow;

/// Repair merged cells by carrying values down their column.
///
/// The extractor emits a merged cell's text only on its first row. Every
/// whitespace-only cell takes the last non-empty value seen above it in the
/// same column; cells above the first value stay empty.
pub fn forward_fill(rows: &mut [RawRow]) {
    let mut last: Vec<Option<String>> = Vec::new();

    for row in rows.iter_mut() {
        let mut cells = std::mem::take(row).into_cells();
        if last.len() < cells.len() {
            last.resize(cells.len(), None);
        }
        for (i, cell) in cells.iter_mut().enumerate() {
            if cell.trim().is_empty() {
                match &last[i] {
                    Some(prev) => *cell = prev.clone(),
                    None => cell.clear(),
                }
            } else {
                last[i] = Some(cell.clone());
            }
        }
        *row = RawRow::new(cells);
    }
}

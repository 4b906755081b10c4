use super::normalize::{clean_text, has_cjk};
use crate::classify::value::ValueClassifier;
use crate::model::{RawRow, NONE};
use crate::rules::schema::NotesDef;

/// Gather clinical-significance text from `start` to the end of the row.
///
/// Kept cells are newline-joined in column order.
pub fn extract_clinical_notes(
    row: &RawRow,
    start: usize,
    classifier: &ValueClassifier,
    def: &NotesDef,
) -> String {
    let notes: Vec<String> = (start..row.len())
        .map(|col| clean_text(row.cell(col)))
        .filter(|cell| keep_note(cell, classifier, def))
        .collect();

    if notes.is_empty() {
        NONE.to_string()
    } else {
        notes.join("\n")
    }
}

fn keep_note(cell: &str, classifier: &ValueClassifier, def: &NotesDef) -> bool {
    if !classifier.is_valid_content(cell) || cell.chars().count() < def.min_chars {
        return false;
    }
    if def.section_headers.iter().any(|h| cell.contains(h.as_str())) {
        return false;
    }
    has_cjk(cell) || (def.accept_long_latin_notes && cell.chars().count() > def.long_note_chars)
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for an absent or invalid field value.
pub const NONE: &str = "NONE";

/// Prefix of positional column names in the raw table store.
pub const FIELD_PREFIX: &str = "field_";

/// One row as produced by the upstream table extractor.
///
/// Cells are addressed by position. Reading past the end of the row yields
/// an empty string, so short rows never need special casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        RawRow { cells }
    }

    pub fn from_strs(cells: &[&str]) -> Self {
        RawRow {
            cells: cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Cell at `index`, or `""` when the row is shorter.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

/// Storage column name for the cell at `index`.
pub fn field_name(index: usize) -> String {
    format!("{FIELD_PREFIX}{index}")
}

/// Parse `field_<i>` back into its index.
pub fn field_index(name: &str) -> Option<usize> {
    name.strip_prefix(FIELD_PREFIX)?.parse().ok()
}

/// A cleaned, typed view of one laboratory test row.
///
/// Every field is either a trimmed string or [`NONE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub code: String,
    pub chinese_name: String,
    pub english_name: String,
    pub sub_item: String,
    pub age_qualifier: String,
    pub reference_value: String,
    pub clinical_notes: String,
}

impl NormalizedRecord {
    /// True when every field besides the two names is [`NONE`].
    pub fn has_no_detail(&self) -> bool {
        [
            &self.code,
            &self.sub_item,
            &self.age_qualifier,
            &self.reference_value,
            &self.clinical_notes,
        ]
        .iter()
        .all(|f| f.as_str() == NONE)
    }

    /// Heading used by list-style front ends: `zh | en - sub`.
    pub fn title(&self) -> String {
        let mut title = format!("{} | {}", self.chinese_name, self.english_name);
        if self.sub_item != NONE {
            title.push_str(" - ");
            title.push_str(&self.sub_item);
        }
        title
    }
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.title())
    }
}

/// Map an empty string to [`NONE`].
pub fn or_none(value: String) -> String {
    if value.is_empty() {
        NONE.to_string()
    } else {
        value
    }
}

use super::value::ValueClassifier;
use crate::parsing::normalize::strip_ordinal;
use crate::rules::schema::SubItemDef;
use serde::{Deserialize, Serialize};

/// What the flexible column holds for one row.
///
/// The same physical column carries a panel sub-test name for some tests
/// and a reference range for others; the shape of the text decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum FlexibleCell {
    SubItem(String),
    ReferenceValue(String),
    Empty,
}

/// The flexible column holds a table title ("...組套...項目...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRow;

impl FlexibleCell {
    /// Classify an already cleaned flexible cell.
    pub fn classify(
        cleaned: &str,
        classifier: &ValueClassifier,
        def: &SubItemDef,
    ) -> Result<FlexibleCell, TitleRow> {
        let value = strip_ordinal(cleaned).trim();

        if value.contains(def.panel_marker.as_str()) && value.contains(def.item_word.as_str()) {
            return Err(TitleRow);
        }

        // Bare numbers are not noise here: the column may hold a single value.
        if classifier.is_placeholder(value) || classifier.is_row_index_noise(value) {
            return Ok(FlexibleCell::Empty);
        }

        let lower = value.to_lowercase();
        if def.specimen_words.iter().any(|w| w.to_lowercase() == lower) {
            return Ok(FlexibleCell::Empty);
        }

        if lower == "negative" {
            return Ok(FlexibleCell::ReferenceValue("Negative".into()));
        }

        if classifier.looks_like_reference_value(value) {
            Ok(FlexibleCell::ReferenceValue(value.to_string()))
        } else {
            Ok(FlexibleCell::SubItem(value.to_string()))
        }
    }

    pub fn sub_item(&self) -> Option<&str> {
        match self {
            FlexibleCell::SubItem(s) => Some(s),
            _ => None,
        }
    }

    pub fn reference_value(&self) -> Option<&str> {
        match self {
            FlexibleCell::ReferenceValue(s) => Some(s),
            _ => None,
        }
    }
}

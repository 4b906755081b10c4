use serde::{Deserialize, Serialize};

/// Tunable knobs and fixed vocabularies for the normalization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub layout: ColumnLayout,
    pub classifier: ClassifierDef,
    pub sub_items: SubItemDef,
    /// Substrings marking an age- or sex-restricted range in the age column.
    #[serde(default)]
    pub age_indicators: Vec<String>,
    pub reference: ReferenceDef,
    pub notes: NotesDef,
    #[serde(default)]
    pub bleed_rules: Vec<BleedRuleDef>,
    #[serde(default)]
    pub search: SearchDef,
    #[serde(default)]
    pub dedupe: DedupeKey,
}

/// Fixed column positions of the upstream extractor's layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub code: usize,
    pub chinese_name: usize,
    pub english_name: usize,
    /// Holds either a sub-item name or a reference value.
    pub flexible: usize,
    pub age: usize,
    /// Reference value columns, highest priority first.
    pub reference: Vec<usize>,
    /// First column scanned for clinical notes.
    pub notes_start: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierDef {
    /// Placeholder tokens, compared case-insensitively.
    pub invalid_values: Vec<String>,
    /// Branch names that leak into data columns.
    #[serde(default)]
    pub hospital_names: Vec<String>,
    /// Unit substrings that mark a reference value, compared case-insensitively.
    #[serde(default)]
    pub reference_units: Vec<String>,
    /// Reject a number alone or a number with a trailing `%`.
    #[serde(default)]
    pub reject_bare_numeric: bool,
    /// Reject a 1-2 digit integer alone.
    #[serde(default)]
    pub reject_row_index_noise: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubItemDef {
    pub panel_marker: String,
    pub item_word: String,
    /// Specimen types that are never sub-items, compared case-insensitively.
    #[serde(default)]
    pub specimen_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDef {
    pub max_len: usize,
    pub separator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesDef {
    /// Cells containing any of these are section headings, not notes.
    pub section_headers: Vec<String>,
    pub min_chars: usize,
    /// Also keep Latin-only cells longer than `long_note_chars`.
    #[serde(default)]
    pub accept_long_latin_notes: bool,
    #[serde(default = "default_long_note_chars")]
    pub long_note_chars: usize,
}

fn default_long_note_chars() -> usize {
    20
}

/// Notes mentioning `marker` belong to a test named by one of
/// `required_in_name`; otherwise they bled in from a neighbouring row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BleedRuleDef {
    pub marker: String,
    pub required_in_name: Vec<String>,
    /// Match `required_in_name` terms as whole words only (for acronyms like `PT`).
    #[serde(default)]
    pub whole_word: bool,
    #[serde(default)]
    pub note: Option<String>,
}

/// Enabled match strategies. Plain substring matching is always on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDef {
    #[serde(default = "default_true")]
    pub whitespace_insensitive: bool,
    #[serde(default)]
    pub english_word_boundary: bool,
    #[serde(default)]
    pub all_tokens: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SearchDef {
    fn default() -> Self {
        SearchDef {
            whitespace_insensitive: true,
            english_word_boundary: false,
            all_tokens: false,
        }
    }
}

impl SearchDef {
    /// Substring plus whitespace-insensitive plus English word boundary.
    pub fn strict() -> Self {
        SearchDef {
            english_word_boundary: true,
            ..SearchDef::default()
        }
    }

    /// Substring plus whitespace-insensitive plus multi-token AND.
    pub fn loose() -> Self {
        SearchDef {
            all_tokens: true,
            ..SearchDef::default()
        }
    }

    pub fn from_mode(mode: &str) -> Option<SearchDef> {
        match mode {
            "default" => Some(SearchDef::default()),
            "strict" => Some(SearchDef::strict()),
            "loose" => Some(SearchDef::loose()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupeKey {
    /// `(code, english_name, sub_item)`.
    #[default]
    Identity,
    /// All seven fields.
    FullRecord,
}

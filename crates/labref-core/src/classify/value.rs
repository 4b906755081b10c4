use crate::rules::schema::ClassifierDef;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static BARE_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?%?$").expect("valid regex"));

static ROW_INDEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}$").expect("valid regex"));

/// Decides what a single cleaned token is worth.
///
/// Stateless once built; the vocabularies come from [`ClassifierDef`].
#[derive(Debug, Clone)]
pub struct ValueClassifier {
    invalid_values: HashSet<String>,
    hospital_names: HashSet<String>,
    reference_units: Vec<String>,
    reject_bare_numeric: bool,
    reject_row_index_noise: bool,
}

impl ValueClassifier {
    pub fn new(def: &ClassifierDef) -> Self {
        ValueClassifier {
            invalid_values: def
                .invalid_values
                .iter()
                .map(|v| v.trim().to_lowercase())
                .collect(),
            hospital_names: def.hospital_names.iter().map(|v| v.trim().to_string()).collect(),
            reference_units: def
                .reference_units
                .iter()
                .map(|u| u.to_lowercase())
                .collect(),
            reject_bare_numeric: def.reject_bare_numeric,
            reject_row_index_noise: def.reject_row_index_noise,
        }
    }

    /// Empty, a sentinel such as `none`/`nan`/`*`, or a hospital branch name.
    ///
    /// Codes and names go through this check only, since a bare number is a
    /// legitimate billing code.
    pub fn is_placeholder(&self, token: &str) -> bool {
        let token = token.trim();
        token.is_empty()
            || self.invalid_values.contains(&token.to_lowercase())
            || self.hospital_names.contains(token)
    }

    /// True if the token can be treated as clinical content.
    pub fn is_valid_content(&self, token: &str) -> bool {
        let token = token.trim();
        if self.is_placeholder(token) {
            return false;
        }
        if self.reject_bare_numeric && BARE_NUMERIC.is_match(token) {
            return false;
        }
        if self.is_row_index_noise(token) {
            return false;
        }
        true
    }

    /// A 1-2 digit integer alone, when that noise rule is enabled.
    pub fn is_row_index_noise(&self, token: &str) -> bool {
        self.reject_row_index_noise && ROW_INDEX.is_match(token.trim())
    }

    /// Digit-led, carries a comparison operator, or mentions a known unit.
    pub fn looks_like_reference_value(&self, token: &str) -> bool {
        let token = token.trim();
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
        if token.contains('<') || token.contains('>') {
            return true;
        }
        let lower = token.to_lowercase();
        self.reference_units.iter().any(|u| lower.contains(u.as_str()))
    }
}

/// True for `negative`/`positive` in any case.
pub fn is_qualitative_result(token: &str) -> bool {
    let lower = token.trim().to_lowercase();
    lower == "negative" || lower == "positive"
}

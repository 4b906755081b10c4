use crate::rules::schema::BleedRuleDef;

#[derive(Debug, Clone)]
struct BleedRule {
    marker: String,
    required_in_name: Vec<String>,
    whole_word: bool,
}

/// Rejects records whose clinical notes belong to a different test.
///
/// The upstream extractor sometimes attaches the notes of a neighbouring row.
/// Each rule pairs a test term seen in the notes with the English-name terms
/// that legitimately own it.
#[derive(Debug, Clone, Default)]
pub struct GarbageFilter {
    rules: Vec<BleedRule>,
}

impl GarbageFilter {
    pub fn new(defs: &[BleedRuleDef]) -> Self {
        let rules = defs
            .iter()
            .map(|d| BleedRule {
                marker: d.marker.trim().to_lowercase(),
                required_in_name: d
                    .required_in_name
                    .iter()
                    .map(|r| r.trim().to_lowercase())
                    .filter(|r| !r.is_empty())
                    .collect(),
                whole_word: d.whole_word,
            })
            .collect();
        GarbageFilter { rules }
    }

    pub fn is_garbage(&self, clinical_notes: &str, english_name: &str) -> bool {
        let notes = clinical_notes.to_lowercase();
        let name = english_name.to_lowercase();
        self.rules.iter().any(|rule| {
            notes.contains(&rule.marker)
                && !rule
                    .required_in_name
                    .iter()
                    .any(|term| {
                        if rule.whole_word {
                            contains_word(&name, term)
                        } else {
                            name.contains(term.as_str())
                        }
                    })
        })
    }
}

/// `needle` occurs in `haystack` with no ASCII letter or digit on either side.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

use regex::Regex;
use std::sync::LazyLock;

static LATIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s\-.]+$").expect("valid regex"));

// The remainder must start with a letter, otherwise "10 - 20" would lose its
// lower bound.
static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+(\p{L}.*)$").expect("valid regex"));

/// Clean a raw cell: trim, turn newlines into spaces, collapse whitespace runs.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if the text contains a CJK unified ideograph.
pub fn has_cjk(s: &str) -> bool {
    s.chars().any(is_cjk)
}

fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' | '\u{f900}'..='\u{faff}')
}

/// True for names made only of Latin letters, spaces, hyphens and periods.
pub fn is_latin_name(s: &str) -> bool {
    LATIN_NAME.is_match(s)
}

/// Drop a leading row ordinal: `"3 WBC(10/ul)"` -> `"WBC(10/ul)"`.
pub fn strip_ordinal(s: &str) -> &str {
    match ORDINAL_PREFIX.captures(s).and_then(|c| c.get(1)) {
        Some(rest) => rest.as_str(),
        None => s,
    }
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

use crate::model::RawRow;
use crate::rules::schema::{ColumnLayout, SearchDef};
use regex::{Regex, RegexBuilder};

/// A query compiled against a column layout and a set of match strategies.
#[derive(Debug, Clone)]
pub struct Matcher {
    columns: [usize; 4],
    chinese_name: usize,
    english_name: usize,
    lower: String,
    /// Set only when the query contains a space and the strategy is on.
    no_space: Option<String>,
    english_boundary: Option<Regex>,
    tokens: Vec<String>,
}

impl Matcher {
    /// Returns `None` for a blank query.
    pub fn new(query: &str, layout: &ColumnLayout, options: &SearchDef) -> Option<Matcher> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let lower = query.to_lowercase();

        let no_space = if options.whitespace_insensitive && query.contains(char::is_whitespace) {
            Some(strip_spaces(&lower))
        } else {
            None
        };

        let english_boundary = if options.english_word_boundary {
            let pattern = format!(
                r"(?:^|[^A-Za-z0-9]){}(?:[^A-Za-z0-9]|$)",
                regex::escape(query)
            );
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .ok()
        } else {
            None
        };

        let tokens = if options.all_tokens {
            lower.split_whitespace().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        Some(Matcher {
            columns: [
                layout.code,
                layout.chinese_name,
                layout.english_name,
                layout.flexible,
            ],
            chinese_name: layout.chinese_name,
            english_name: layout.english_name,
            lower,
            no_space,
            english_boundary,
            tokens,
        })
    }

    pub fn matches(&self, row: &RawRow) -> bool {
        self.columns.iter().any(|&col| self.matches_column(row, col)) || self.matches_all_tokens(row)
    }

    fn matches_column(&self, row: &RawRow, col: usize) -> bool {
        let cell = row.cell(col).to_lowercase();
        if cell.is_empty() {
            return false;
        }

        let direct = match (&self.english_boundary, col == self.english_name) {
            (Some(re), true) => re.is_match(&cell),
            _ => cell.contains(&self.lower),
        };
        if direct {
            return true;
        }

        match &self.no_space {
            Some(compact) => strip_spaces(&cell).contains(compact.as_str()),
            None => false,
        }
    }

    fn matches_all_tokens(&self, row: &RawRow) -> bool {
        if self.tokens.len() < 2 {
            return false;
        }
        let zh = row.cell(self.chinese_name).to_lowercase();
        let en = row.cell(self.english_name).to_lowercase();
        self.tokens
            .iter()
            .all(|t| zh.contains(t.as_str()) || en.contains(t.as_str()))
    }
}

fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Rows whose searchable columns match `query`, in input order.
pub fn search<'a>(
    rows: &'a [RawRow],
    query: &str,
    layout: &ColumnLayout,
    options: &SearchDef,
) -> Vec<&'a RawRow> {
    match Matcher::new(query, layout, options) {
        Some(matcher) => rows.iter().filter(|r| matcher.matches(r)).collect(),
        None => Vec::new(),
    }
}

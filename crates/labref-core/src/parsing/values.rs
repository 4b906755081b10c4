use super::normalize::clean_text;
use crate::classify::value::{is_qualitative_result, ValueClassifier};
use crate::model::{RawRow, NONE};
use crate::rules::schema::ReferenceDef;

/// Keep the age cell verbatim when it names an age or sex restriction.
///
/// Single letters (`M`, `F`) and CJK indicators match exactly; multi-letter
/// ASCII words (`year`, `day`, `month`) match in any case.
pub fn extract_age_qualifier(cell: &str, indicators: &[String]) -> String {
    let cleaned = clean_text(cell);
    if cleaned.is_empty() {
        return NONE.to_string();
    }
    let lower = cleaned.to_lowercase();
    let hit = indicators.iter().any(|ind| {
        let is_word = ind.len() > 1 && ind.chars().all(|c| c.is_ascii_alphabetic());
        if is_word {
            lower.contains(&ind.to_lowercase())
        } else {
            cleaned.contains(ind.as_str())
        }
    });
    if hit {
        cleaned
    } else {
        NONE.to_string()
    }
}

/// Collect reference values from the priority columns.
///
/// A cell qualifies when it is valid content, shorter than `max_len`, and
/// either shaped like a range or a qualitative result. Values already covered
/// by the accumulated text are skipped.
pub fn scan_reference_columns(
    row: &RawRow,
    columns: &[usize],
    classifier: &ValueClassifier,
    def: &ReferenceDef,
) -> String {
    let mut values: Vec<String> = Vec::new();

    for &col in columns {
        let cell = clean_text(row.cell(col));
        if !classifier.is_valid_content(&cell) || cell.chars().count() >= def.max_len {
            continue;
        }
        if !(classifier.looks_like_reference_value(&cell) || is_qualitative_result(&cell)) {
            continue;
        }
        if !values.join(&def.separator).contains(cell.as_str()) {
            values.push(cell);
        }
    }

    if values.is_empty() {
        NONE.to_string()
    } else {
        values.join(&def.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::load_preset;

    fn indicators() -> Vec<String> {
        load_preset("tch").unwrap().age_indicators
    }

    fn scan(cells: &[&str]) -> String {
        let config = load_preset("tch").unwrap();
        let classifier = ValueClassifier::new(&config.classifier);
        scan_reference_columns(
            &RawRow::from_strs(cells),
            &config.layout.reference,
            &classifier,
            &config.reference,
        )
    }

    #[test]
    fn test_age_indicators() {
        let ind = indicators();
        assert_eq!(extract_age_qualifier("18歲以上", &ind), "18歲以上");
        assert_eq!(extract_age_qualifier("0~7天", &ind), "0~7天");
        assert_eq!(extract_age_qualifier(" M ", &ind), "M");
        assert_eq!(extract_age_qualifier("Adult 18 Years", &ind), "Adult 18 Years");
        assert_eq!(extract_age_qualifier("1 Month", &ind), "1 Month");
    }

    #[test]
    fn test_age_without_indicator() {
        let ind = indicators();
        assert_eq!(extract_age_qualifier("", &ind), NONE);
        assert_eq!(extract_age_qualifier("3.5-5.0", &ind), NONE);
        assert_eq!(extract_age_qualifier("mg", &ind), NONE);
    }

    #[test]
    fn test_reference_priority_order() {
        let cells = ["", "", "", "", "", "3.5-5.0 g/dL", "<10", "", "", "Negative"];
        assert_eq!(scan(&cells), "3.5-5.0 g/dL | <10 | Negative");
    }

    #[test]
    fn test_reference_skips_repeats() {
        let cells = ["", "", "", "", "", "<10", "<10", "", "", ""];
        assert_eq!(scan(&cells), "<10");
    }

    #[test]
    fn test_reference_skips_noise_and_long_text() {
        let long = "1".repeat(60) + " mg/dl";
        let cells = ["", "", "", "", "", "12", long.as_str(), "", "", "忠孝"];
        assert_eq!(scan(&cells), NONE);
    }

    #[test]
    fn test_reference_past_row_end() {
        assert_eq!(scan(&["09026", "胎兒蛋白"]), NONE);
    }
}

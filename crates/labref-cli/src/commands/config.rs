use labref_core::error::LabRefError;
use labref_core::rules::builtin;
use std::path::Path;

pub fn show(preset: &str) -> Result<(), LabRefError> {
    let json = builtin::preset_json(preset)?;
    print!("{}", json);
    if !json.ends_with('\n') {
        println!();
    }
    Ok(())
}

const SCHEMA_HELP: &str = r#"JSON Pipeline Config Schema
===========================

A config file tells labref how the extracted rows of a laboratory
reference manual are laid out and which values count as noise. Pass it
with `labref search --config <file>`; without one the built-in "tch"
preset is used (`labref config show tch`).

Top-level fields:
  name            (string, required)  Human-readable name of the manual
  description     (string, optional)  What this config is for
  version         (string, required)  Version identifier (e.g., "2025.1")
  layout          (object, required)  Column positions (see below)
  classifier      (object, required)  Placeholder and noise vocabulary
  sub_items       (object, required)  Panel and sub-item vocabulary
  age_indicators  (array, optional)   Tokens marking an age/sex qualifier
                                      Example: ["歲", "天", "M", "F"]
  reference       (object, required)  { "max_len": 50, "separator": " | " }
  notes           (object, required)  Clinical notes extraction (see below)
  bleed_rules     (array, optional)   Neighbouring-row bleed detection
  search          (object, optional)  Default match strategies
  dedupe          (string, optional)  "identity" (default) or "full_record"

layout:
  code, chinese_name, english_name   (integer)  Primary columns
  flexible        (integer)  Column holding a sub-item or a reference value
  age             (integer)  Age/sex qualifier column; scanned as the first
                             reference column when it holds no qualifier
  reference       (array)    Reference columns in priority order
  notes_start     (integer)  First column of the clinical notes tail

classifier:
  invalid_values  (array)    Placeholder cells, compared case-insensitively
  hospital_names  (array)    Branch names that leak into data cells; treated
                             as placeholders (exact match)
  reference_units (array)    Units that identify a reference value
  reject_bare_numeric     (bool)  Treat bare numbers as noise
  reject_row_index_noise  (bool)  Treat a 1-2 digit integer alone as noise

sub_items:
  panel_marker    (string)   Word that marks a panel title row (e.g., "組套")
  item_word       (string)   Word that, combined with the marker, means title
  specimen_words  (array)    Specimen names that are never sub-items

notes:
  section_headers          (array)   Phrases that are headers, not notes
  min_chars                (integer) Shortest accepted note
  accept_long_latin_notes  (bool)    Also accept long notes without CJK text
  long_note_chars          (integer) Length threshold for the flag above

Each rule in "bleed_rules":
  marker            (string)  Text in the notes that belongs to another test
  required_in_name  (array)   The row is kept only if its English name
                              contains one of these (case-insensitive)
  whole_word        (bool, optional)  Match those terms as whole words only,
                              so "PT" does not match inside "Haptoglobin"
  note              (string, optional)  Explanation

search:
  whitespace_insensitive  (bool)  Also match the query with spaces removed
  english_word_boundary   (bool)  Match English names on word boundaries
  all_tokens              (bool)  Match multi-word queries token by token

Example:
{
  "name": "My manual",
  "version": "1.0",
  "layout": {
    "code": 0, "chinese_name": 1, "english_name": 2, "flexible": 3,
    "age": 4, "reference": [5, 6], "notes_start": 7
  },
  "classifier": { "invalid_values": ["無", "none", "nan", "null"] },
  "sub_items": { "panel_marker": "組套", "item_word": "項目" },
  "reference": { "max_len": 50, "separator": " | " },
  "notes": { "section_headers": ["臨床意義"], "min_chars": 2 }
}
"#;

pub fn schema() -> Result<(), LabRefError> {
    print!("{}", SCHEMA_HELP);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LabRefError> {
    let config = labref_core::rules::load_config(file)?;

    println!("Config '{}' (v{}) is valid.", config.name, config.version);
    println!(
        "  Primary columns: code {}, Chinese {}, English {}",
        config.layout.code, config.layout.chinese_name, config.layout.english_name
    );
    println!(
        "  Reference columns: {:?}, notes from column {}",
        config.layout.reference, config.layout.notes_start
    );
    println!("  Bleed rules: {}", config.bleed_rules.len());

    // Potential issues, not errors
    let mut warnings = Vec::new();
    if config.bleed_rules.is_empty() {
        warnings.push("no bleed rules; rows carrying notes of neighbouring tests are kept".to_string());
    }
    if config.age_indicators.is_empty() {
        warnings.push("no age indicators; every age qualifier will be NONE".to_string());
    }
    if config.classifier.reference_units.is_empty() {
        warnings.push("no reference units; only comparison and range values are recognised".to_string());
    }
    if config.layout.reference.contains(&config.layout.flexible) {
        warnings.push(format!(
            "flexible column {} is also scanned as a reference column",
            config.layout.flexible
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_help_describes_classifier_noise() {
        assert!(SCHEMA_HELP.contains("Branch names that leak into data cells"));
        assert!(SCHEMA_HELP.contains("1-2 digit integer alone"));
        assert!(!SCHEMA_HELP.contains("mark a header row"));
        assert!(!SCHEMA_HELP.contains("style indexes"));
    }

    #[test]
    fn test_schema_help_example_parses() {
        let start = SCHEMA_HELP.find("Example:\n").unwrap() + "Example:\n".len();
        let example = &SCHEMA_HELP[start..];
        let config = labref_core::rules::parse_config_str(example).unwrap();
        assert_eq!(config.name, "My manual");
        assert!(config.bleed_rules.is_empty());
    }

    #[test]
    fn test_preset_json_shown() {
        assert!(builtin::preset_json("tch").is_ok());
        assert!(show("nope").is_err());
    }
}

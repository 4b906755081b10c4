pub mod builtin;
pub mod schema;

use crate::error::LabRefError;
use schema::PipelineConfig;
use std::collections::HashSet;
use std::path::Path;

/// Load a pipeline config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, LabRefError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabRefError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a pipeline config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<PipelineConfig, LabRefError> {
    let config: PipelineConfig =
        serde_json::from_str(json).map_err(|e| LabRefError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a pipeline config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<PipelineConfig, LabRefError> {
    let config: PipelineConfig = serde_json::from_str(json).map_err(LabRefError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is well-formed.
pub fn validate_config(config: &PipelineConfig) -> Result<(), LabRefError> {
    let layout = &config.layout;

    let primary = [
        ("code", layout.code),
        ("chinese_name", layout.chinese_name),
        ("english_name", layout.english_name),
        ("flexible", layout.flexible),
    ];
    let mut seen = HashSet::new();
    for (name, index) in primary {
        if !seen.insert(index) {
            return Err(LabRefError::ConfigInvalid(format!(
                "layout column '{}' reuses index {}",
                name, index
            )));
        }
    }

    if layout.reference.is_empty() {
        return Err(LabRefError::ConfigInvalid(
            "layout.reference must not be empty".into(),
        ));
    }

    if let Some(&clash) = layout.reference.iter().find(|i| seen.contains(*i)) {
        return Err(LabRefError::ConfigInvalid(format!(
            "layout.reference index {} overlaps a name or code column",
            clash
        )));
    }

    if layout.notes_start <= layout.flexible {
        return Err(LabRefError::ConfigInvalid(format!(
            "layout.notes_start ({}) must come after the flexible column ({})",
            layout.notes_start, layout.flexible
        )));
    }

    if config.classifier.invalid_values.is_empty() {
        return Err(LabRefError::ConfigInvalid(
            "classifier.invalid_values must not be empty".into(),
        ));
    }

    if config.sub_items.panel_marker.is_empty() || config.sub_items.item_word.is_empty() {
        return Err(LabRefError::ConfigInvalid(
            "sub_items.panel_marker and sub_items.item_word must not be empty".into(),
        ));
    }

    if config.reference.max_len == 0 {
        return Err(LabRefError::ConfigInvalid(
            "reference.max_len must be greater than zero".into(),
        ));
    }

    if config.notes.accept_long_latin_notes && config.notes.long_note_chars == 0 {
        return Err(LabRefError::ConfigInvalid(
            "notes.long_note_chars must be greater than zero".into(),
        ));
    }

    for rule in &config.bleed_rules {
        if rule.marker.trim().is_empty() {
            return Err(LabRefError::ConfigInvalid(
                "bleed rule marker must not be empty".into(),
            ));
        }
        if rule.required_in_name.iter().all(|r| r.trim().is_empty()) {
            return Err(LabRefError::ConfigInvalid(format!(
                "bleed rule '{}' has no required name terms",
                rule.marker
            )));
        }
    }

    Ok(())
}

use crate::error::LabRefError;
use crate::rules::schema::PipelineConfig;

pub(crate) const TCH_JSON: &str = include_str!("../../../../rules/tch.json");

/// Available predefined configs.
pub const PRESETS: &[&str] = &["tch"];

pub const DEFAULT_PRESET: &str = "tch";

/// Load a predefined config by name.
pub fn load_preset(name: &str) -> Result<PipelineConfig, LabRefError> {
    match name {
        "tch" => {
            let config: PipelineConfig = serde_json::from_str(TCH_JSON)?;
            Ok(config)
        }
        _ => Err(LabRefError::UnknownPreset(format!(
            "{}. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// Raw JSON of a predefined config, for `config show`.
pub fn preset_json(name: &str) -> Result<&'static str, LabRefError> {
    match name {
        "tch" => Ok(TCH_JSON),
        _ => Err(LabRefError::UnknownPreset(name.to_string())),
    }
}

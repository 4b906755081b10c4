pub mod config;
pub mod import;
pub mod info;
pub mod search;
pub mod shell;

use crate::PipelineArgs;
use labref_core::error::LabRefError;
use labref_core::rules::builtin;
use labref_core::rules::schema::{DedupeKey, SearchDef};
use labref_core::Pipeline;

/// Build a pipeline from the config file (or built-in preset) plus CLI overrides.
pub fn build_pipeline(args: &PipelineArgs) -> Result<Pipeline, LabRefError> {
    let config = match &args.config {
        Some(path) => labref_core::rules::load_config(path)?,
        None => builtin::load_preset(builtin::DEFAULT_PRESET)?,
    };
    let mut pipeline = Pipeline::new(config);

    if let Some(mode) = args.mode.as_deref() {
        let search = SearchDef::from_mode(mode).ok_or_else(|| {
            LabRefError::ConfigInvalid(format!(
                "unknown search mode '{}' (expected default, strict or loose)",
                mode
            ))
        })?;
        pipeline = pipeline.with_search(search);
    }

    if let Some(key) = args.dedupe.as_deref() {
        let dedupe = match key {
            "identity" => DedupeKey::Identity,
            "full" | "full_record" => DedupeKey::FullRecord,
            other => {
                return Err(LabRefError::ConfigInvalid(format!(
                    "unknown dedupe key '{}' (expected identity or full)",
                    other
                )))
            }
        };
        pipeline = pipeline.with_dedupe(dedupe);
    }

    Ok(pipeline)
}

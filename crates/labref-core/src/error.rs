use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LabRefError {
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("failed to import rows: {0}")]
    Import(String),

    #[error("failed to read xlsx: {0}")]
    Xlsx(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

use crate::pso::PsoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("data file contains invalid JSON: {path}: {reason}")]
    MalformedData { path: String, reason: String },

    #[error("record {index}: field `{field}` {reason}")]
    InvalidRecord {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("optimizer error: {0}")]
    Pso(#[from] PsoError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;

use crate::error::{Result, SwarmError};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Raw records of a data file together with the SHA-256 of the bytes they were parsed from.
#[derive(Debug, Clone)]
pub struct RepoData {
    pub records: Vec<Value>,
    /// `None` when the file does not exist.
    pub sha256: Option<String>,
}

/// Reads the raw repository records from a JSON array file.
///
/// A missing file is not an error: it yields an empty dataset and a warning.
/// Malformed JSON, or a top-level value other than an array, is reported as
/// [`SwarmError::MalformedData`].
pub fn load_repo_data(path: &Path) -> Result<RepoData> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "data file not found");
            return Ok(RepoData {
                records: Vec::new(),
                sha256: None,
            });
        }
        Err(err) => return Err(SwarmError::Io(err)),
    };
    let sha256 = sha256_hex(content.as_bytes());

    let value: Value =
        serde_json::from_str(&content).map_err(|err| SwarmError::MalformedData {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    match value {
        Value::Array(records) => {
            debug!(
                path = %path.display(),
                records = records.len(),
                sha256 = %sha256,
                "loaded repository data"
            );
            Ok(RepoData {
                records,
                sha256: Some(sha256),
            })
        }
        other => Err(SwarmError::MalformedData {
            path: path.display().to_string(),
            reason: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

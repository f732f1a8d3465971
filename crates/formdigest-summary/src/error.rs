use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("missing key: {0}")]
    MissingKey(String),
    #[error("{path} is not {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },
    #[error("{0} is empty")]
    EmptyValue(String),
    #[error("cannot read record {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

//!
//! src/errors.rs
//!
//! Defines the error enum for the aggregator and conversions from the
//! library errors it runs into
//!
//!

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("config error: {0}")]
    Config(String),
    #[error("input not found: {path}: {reason}")]
    InputNotFound { path: String, reason: String },
    #[error("input malformed: {path}: {reason}")]
    InputMalformed { path: String, reason: String },
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("output error: {0}")]
    Output(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error)
}

impl AggregatorError {
    pub fn not_found(path: &Path, reason: impl ToString) -> Self {
        AggregatorError::InputNotFound {
            path: path.display().to_string(),
            reason: reason.to_string()
        }
    }

    pub fn malformed(path: &Path, reason: impl ToString) -> Self {
        AggregatorError::InputMalformed {
            path: path.display().to_string(),
            reason: reason.to_string()
        }
    }
}

impl From<serde_json::Error> for AggregatorError {
    fn from(e: serde_json::Error) -> Self { AggregatorError::Serialize(e.to_string()) }
}

//! Error types for viewport misuse, config loading and label parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Caller mistakes caught by the viewport and projection APIs.
///
/// None of these are transient; they point at a bug in the caller. State is
/// always left untouched when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewportError {
    #[error("invalid pan direction {0:?} (expected up, down, left or right)")]
    InvalidDirection(String),
    #[error("unknown viewport command {0:?}")]
    UnknownCommand(String),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("duplicate entity id {0:?}")]
    DuplicateId(String),
}

/// Errors that can occur when loading a viewport config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A string that does not name any variant of a labelled enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

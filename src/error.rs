// ⚠️ Error types for the NEO model, linker and exporters

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the model and export layers
pub type NeoResult<T> = std::result::Result<T, NeoError>;

#[derive(Error, Debug)]
pub enum NeoError {
    /// A raw record is missing a required field or carries an unparsable value
    #[error("malformed record: field `{field}` = {value:?}: {reason}")]
    MalformedRecord {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// An approach reached formatting or export without a linked NEO
    #[error("close approach of `{designation}` at {time} is not linked to a NEO")]
    UnlinkedApproach { designation: String, time: String },

    /// The linker tried to set an approach's NEO a second time
    #[error("close approach of `{designation}` is already linked")]
    AlreadyLinked { designation: String },

    /// Output path has neither a `.csv` nor a `.json` extension
    #[error("unsupported output format for {path:?}: expected .csv or .json")]
    UnsupportedFormat { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NeoError {
    pub(crate) fn malformed(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        NeoError::MalformedRecord {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

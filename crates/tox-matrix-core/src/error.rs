use thiserror::Error;

use crate::job::JobRecord;

/// Errors that abort matrix generation. None of them is recoverable: the
/// caller reports the first one and emits nothing.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Bad input value, or a version outside the known catalog.
    #[error("{0}")]
    Configuration(String),

    /// Two jobs resolved to the same name.
    #[error(
        "tried to add a job with duplicate name {name}: {existing} already present while trying to add {attempted}"
    )]
    DuplicateJob {
        name: String,
        existing: Box<JobRecord>,
        attempted: Box<JobRecord>,
    },

    #[error("unexpected failure: {0}")]
    Unexpected(#[from] serde_json::Error),
}

impl MatrixError {
    pub fn config(message: impl Into<String>) -> Self {
        MatrixError::Configuration(message.into())
    }
}

//! Error types for the diff rendering crate.

/// Errors that can occur while normalizing or rendering a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A path string could not be tokenized into keys and indices.
    #[error("malformed path {path:?}: {reason}")]
    MalformedPath { path: String, reason: String },

    /// The grouped diff named a category outside the five known kinds.
    #[error("unsupported change category: {0}")]
    UnsupportedChangeCategory(String),

    /// A payload did not have the shape its category requires.
    #[error("malformed payload for {category} at {path}")]
    MalformedPayload { category: String, path: String },

    /// Serialization of a value for display failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Writing to the output sink failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiffError {
    pub(crate) fn malformed_path(path: &str, reason: impl Into<String>) -> Self {
        DiffError::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

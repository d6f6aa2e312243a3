use thiserror::Error;

/// Errors raised by a backend while operating on a single object.
///
/// Deleting an object that does not exist is not an error; backends
/// report it as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("object not found: {target}")]
    NotFound { target: String },

    #[error("backend unavailable: {target}: {message}")]
    Unavailable { target: String, message: String },

    #[error("permission denied: {target}: {message}")]
    PermissionDenied { target: String, message: String },

    #[error("backend error: {target}: {message}")]
    Backend {
        target: String,
        message: String,
        // Cause kept as a string so the error stays Clone.
        cause: Option<String>,
    },
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }

    /// The message followed by the stringified cause chain, as written
    /// into failure audit records.
    pub fn trace(&self) -> String {
        match self {
            BackendError::Backend {
                cause: Some(cause), ..
            } => format!("{self}: caused by: {cause}"),
            _ => self.to_string(),
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

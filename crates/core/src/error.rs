use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure reported by a persistence collaborator (ledger or lock tracker).
///
/// The backend error is kept as the source so callers can log it; the
/// display text never includes query parameters.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct StorageError {
    context: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl StorageError {
    /// Wrap a backend error with a short description of the failed operation.
    pub fn new<E>(context: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            context,
            source: source.into(),
        }
    }

    /// The operation that failed (e.g. `"upsert attendance mark"`).
    pub fn context(&self) -> &'static str {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display_includes_context_and_source() {
        let err = StorageError::new("load locked rolls", "connection reset");
        assert_eq!(err.to_string(), "load locked rolls: connection reset");
        assert_eq!(err.context(), "load locked rolls");
    }

    #[test]
    fn storage_error_converts_into_core_error() {
        let err: CoreError = StorageError::new("merge locked rolls", "timeout").into();
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(err.to_string().starts_with("Storage error: merge locked rolls"));
    }
}

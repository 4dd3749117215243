use thiserror::Error;

/// Errors surfaced by repository operations.
///
/// Absence is never an error: `delete` on a missing identity is a no-op and
/// `get_or_default` returns `Ok(None)`. The repository layer performs no
/// retries or local recovery; backend failures are forwarded unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{type_name} already exists: {id}")]
    Conflict { type_name: &'static str, id: String },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Errors detected when interpreting storage configuration.
///
/// Fatal and surfaced immediately at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend: {0}")]
    UnknownBackend(String),
    #[error("Missing required parameter '{parameter}' for the {backend} backend")]
    MissingParameter {
        backend: &'static str,
        parameter: &'static str,
    },
}

/// Errors returned by the repository factory, which can fail either on the
/// configuration itself or while constructing the chosen backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateRepositoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let error = StorageError::Conflict {
            type_name: "person",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "person already exists: abc-123");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = StorageError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_query_failed_display() {
        let error = StorageError::QueryFailed("no such table".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table");
    }

    #[test]
    fn test_unknown_backend_display() {
        let error = ConfigError::UnknownBackend("mongodb".to_string());
        assert_eq!(error.to_string(), "Unknown storage backend: mongodb");
    }

    #[test]
    fn test_missing_parameter_display() {
        let error = ConfigError::MissingParameter {
            backend: "sqlite",
            parameter: "sqlite_path",
        };
        assert_eq!(
            error.to_string(),
            "Missing required parameter 'sqlite_path' for the sqlite backend"
        );
    }

    #[test]
    fn test_create_repository_error_wraps_both() {
        let config: CreateRepositoryError = ConfigError::UnknownBackend("x".to_string()).into();
        let storage: CreateRepositoryError =
            StorageError::ConnectionFailed("refused".to_string()).into();

        assert_eq!(config.to_string(), "Unknown storage backend: x");
        assert_eq!(storage.to_string(), "Connection failed: refused");
    }
}

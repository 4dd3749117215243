use std::str::FromStr;

use super::ConfigError;

/// The configurable storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Relational store backed by SQLite.
    Sqlite,
    /// Key-value table store backed by DynamoDB.
    DynamoDb,
}

impl BackendKind {
    /// Backend name used in configuration and error messages.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::DynamoDb => "dynamodb",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(BackendKind::Sqlite),
            "dynamodb" => Ok(BackendKind::DynamoDb),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// The backend discriminator plus connection parameters for every backend.
///
/// Only the parameters of the selected backend are required; the factory
/// validates their presence and rejects the settings otherwise.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: BackendKind,
    /// Path to the SQLite database file. `:memory:` is accepted for tests.
    pub sqlite_path: Option<String>,
    /// DynamoDB endpoint URL (for example a local instance).
    pub dynamodb_endpoint: Option<String>,
    /// AWS region; the factory defaults to `us-east-1` when unset.
    pub dynamodb_region: Option<String>,
}

impl StorageSettings {
    /// Settings for the SQLite backend with the given database path.
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::Sqlite,
            sqlite_path: Some(path.into()),
            dynamodb_endpoint: None,
            dynamodb_region: None,
        }
    }

    /// Settings for the DynamoDB backend with the given endpoint.
    pub fn dynamodb(endpoint: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::DynamoDb,
            sqlite_path: None,
            dynamodb_endpoint: Some(endpoint.into()),
            dynamodb_region: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parses_known_names() {
        assert_eq!("sqlite".parse::<BackendKind>(), Ok(BackendKind::Sqlite));
        assert_eq!("dynamodb".parse::<BackendKind>(), Ok(BackendKind::DynamoDb));
    }

    #[test]
    fn test_backend_kind_rejects_unknown_name() {
        assert_eq!(
            "mssql".parse::<BackendKind>(),
            Err(ConfigError::UnknownBackend("mssql".to_string()))
        );
    }

    #[test]
    fn test_backend_kind_names_round_trip() {
        for kind in [BackendKind::Sqlite, BackendKind::DynamoDb] {
            assert_eq!(kind.name().parse::<BackendKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_sqlite_settings_carry_path() {
        let settings = StorageSettings::sqlite("records.db");

        assert_eq!(settings.backend, BackendKind::Sqlite);
        assert_eq!(settings.sqlite_path.as_deref(), Some("records.db"));
        assert_eq!(settings.dynamodb_endpoint, None);
    }

    #[test]
    fn test_dynamodb_settings_carry_endpoint() {
        let settings = StorageSettings::dynamodb("http://localhost:8000");

        assert_eq!(settings.backend, BackendKind::DynamoDb);
        assert_eq!(
            settings.dynamodb_endpoint.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(settings.sqlite_path, None);
    }
}

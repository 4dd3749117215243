//! Storage backend implementations and the repository factory.
//!
//! This module provides concrete implementations of the repository contract
//! defined in `recordstore_core::storage`. The backend is selected at
//! runtime from [`StorageSettings`] via [`create_repository`]; the trait's
//! generic operations rule out trait objects, so the chosen backend is
//! carried in the [`AnyRepository`] enum and dispatched statically.

pub mod dynamodb;
pub mod inmemory;
pub mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use recordstore_core::record::Record;
use recordstore_core::storage::{
    BackendKind, ConfigError, CreateRepositoryError, Repository, Result, StorageSettings,
};

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
pub use sqlite::SqliteRepository;

/// The repository backend chosen by configuration.
#[derive(Debug)]
pub enum AnyRepository {
    Sqlite(SqliteRepository),
    DynamoDb(DynamoDbRepository),
}

/// Constructs the repository named by the settings.
///
/// Fails with a configuration error when the selected backend is missing a
/// required parameter, and with a storage error when the backend itself
/// cannot be constructed.
pub async fn create_repository(
    settings: &StorageSettings,
) -> std::result::Result<AnyRepository, CreateRepositoryError> {
    match settings.backend {
        BackendKind::Sqlite => {
            let path =
                settings
                    .sqlite_path
                    .as_deref()
                    .ok_or(ConfigError::MissingParameter {
                        backend: "sqlite",
                        parameter: "sqlite_path",
                    })?;
            Ok(AnyRepository::Sqlite(SqliteRepository::new(path).await?))
        }
        BackendKind::DynamoDb => {
            let endpoint =
                settings
                    .dynamodb_endpoint
                    .as_deref()
                    .ok_or(ConfigError::MissingParameter {
                        backend: "dynamodb",
                        parameter: "dynamodb_endpoint",
                    })?;
            let region = settings.dynamodb_region.as_deref().unwrap_or("us-east-1");
            Ok(AnyRepository::DynamoDb(
                DynamoDbRepository::connect(endpoint, region).await,
            ))
        }
    }
}

#[async_trait]
impl Repository for AnyRepository {
    async fn add<R: Record>(&self, record: &R) -> Result<()> {
        match self {
            AnyRepository::Sqlite(repo) => repo.add(record).await,
            AnyRepository::DynamoDb(repo) => repo.add(record).await,
        }
    }

    async fn delete<R: Record>(&self, id: Uuid) -> Result<()> {
        match self {
            AnyRepository::Sqlite(repo) => repo.delete::<R>(id).await,
            AnyRepository::DynamoDb(repo) => repo.delete::<R>(id).await,
        }
    }

    async fn get_or_default<R: Record>(&self, id: Uuid) -> Result<Option<R>> {
        match self {
            AnyRepository::Sqlite(repo) => repo.get_or_default(id).await,
            AnyRepository::DynamoDb(repo) => repo.get_or_default(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_settings_build_sqlite_backend() {
        let settings = StorageSettings::sqlite(":memory:");

        let repo = create_repository(&settings).await.unwrap();
        assert!(matches!(repo, AnyRepository::Sqlite(_)));
    }

    #[tokio::test]
    async fn test_sqlite_without_path_is_rejected() {
        let settings = StorageSettings {
            backend: BackendKind::Sqlite,
            sqlite_path: None,
            dynamodb_endpoint: None,
            dynamodb_region: None,
        };

        let err = create_repository(&settings).await.unwrap_err();
        assert_eq!(
            err,
            CreateRepositoryError::Config(ConfigError::MissingParameter {
                backend: "sqlite",
                parameter: "sqlite_path",
            })
        );
    }

    #[tokio::test]
    async fn test_dynamodb_without_endpoint_is_rejected() {
        let settings = StorageSettings {
            backend: BackendKind::DynamoDb,
            sqlite_path: None,
            dynamodb_endpoint: None,
            dynamodb_region: None,
        };

        let err = create_repository(&settings).await.unwrap_err();
        assert_eq!(
            err,
            CreateRepositoryError::Config(ConfigError::MissingParameter {
                backend: "dynamodb",
                parameter: "dynamodb_endpoint",
            })
        );
    }
}

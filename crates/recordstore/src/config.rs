use std::env;

use recordstore_core::storage::{BackendKind, ConfigError, StorageSettings};

/// Loads storage settings from environment variables.
///
/// Environment variables:
/// - `STORAGE_BACKEND` - `sqlite` (default) or `dynamodb`
/// - `SQLITE_PATH` - SQLite database path (default: "recordstore.db")
/// - `DYNAMODB_ENDPOINT` - DynamoDB endpoint URL (required for dynamodb)
/// - `DYNAMODB_REGION` - AWS region (default: "us-east-1")
///
/// An unrecognized `STORAGE_BACKEND` is an error; missing backend parameters
/// are caught later by the repository factory.
pub fn settings_from_env() -> Result<StorageSettings, ConfigError> {
    let backend = match env::var("STORAGE_BACKEND") {
        Ok(value) => value.parse::<BackendKind>()?,
        Err(_) => BackendKind::Sqlite,
    };

    Ok(StorageSettings {
        backend,
        sqlite_path: Some(env::var("SQLITE_PATH").unwrap_or_else(|_| "recordstore.db".to_string())),
        dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
        dynamodb_region: env::var("DYNAMODB_REGION").ok(),
    })
}

//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StorageError` from
//! `recordstore_core::storage`. Constraint violations on the identity column
//! become `Conflict`; everything absence-related is handled at the call site
//! and never reaches here.

use recordstore_core::storage::StorageError;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
pub fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Whether a `CREATE TABLE` failure means the table is already there.
///
/// Two instances can race past the catalog check and both issue the create;
/// the loser's failure is success for our purposes.
pub fn is_already_exists(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.ends_with("already exists"))
}

fn map_rusqlite_error(err: &rusqlite::Error, type_name: &'static str, id: &str) -> StorageError {
    match err {
        // Identity collision: UNIQUE or PRIMARY KEY constraint on the id column
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StorageError::Conflict {
                type_name,
                id: id.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            StorageError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        _ => StorageError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StorageError, attributing identity
/// conflicts to the given record type and id.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    type_name: &'static str,
    id: &str,
) -> StorageError {
    match err {
        tokio_rusqlite::Error::Rusqlite(e) => map_rusqlite_error(&e, type_name, id),
        tokio_rusqlite::Error::ConnectionClosed => {
            StorageError::ConnectionFailed("Connection closed".to_string())
        }
        other => StorageError::QueryFailed(other.to_string()),
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::record::Record;

use super::Result;

/// Storage-agnostic repository over any [`Record`] type.
///
/// Each backend provisions the record type's table lazily on first use and
/// memoizes the existence check per repository instance, so repeated calls
/// for the same type issue no further catalog round-trips.
///
/// Concurrent `add` calls for the same identity are not serialized here; the
/// backend's own uniqueness constraint decides the winner and the loser gets
/// [`StorageError::Conflict`](super::StorageError::Conflict).
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persists a new record.
    ///
    /// Fails with [`StorageError::Conflict`](super::StorageError::Conflict)
    /// when a record with the same identity already exists.
    async fn add<R: Record>(&self, record: &R) -> Result<()>;

    /// Removes the record with the given identity.
    ///
    /// Deleting an identity that was never written is a successful no-op.
    async fn delete<R: Record>(&self, id: Uuid) -> Result<()>;

    /// Fetches the record with the given identity, or `None` if absent.
    async fn get_or_default<R: Record>(&self, id: Uuid) -> Result<Option<R>>;
}

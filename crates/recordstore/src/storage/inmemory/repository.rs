//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use recordstore_core::record::{FieldMap, FieldValue, Record};
use recordstore_core::storage::{Repository, Result, StorageError};

/// In-memory storage backend for testing.
///
/// Stores field maps keyed by record type then identity in a HashMap wrapped
/// in `Arc<RwLock<_>>` for thread-safe access. Data is not persisted and is
/// lost when the last clone is dropped. Semantics match the real backends:
/// duplicate add conflicts, delete and get treat absence as normal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<HashMap<&'static str, HashMap<Uuid, FieldMap>>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn add<R: Record>(&self, record: &R) -> Result<()> {
        let mut fields = FieldMap::new();
        for field in R::fields() {
            match record.value(field.name) {
                FieldValue::Absent => {}
                value => {
                    fields.insert(field.name.to_string(), value);
                }
            }
        }

        let mut records = self.records.write().await;
        let table = records.entry(R::TYPE_NAME).or_default();
        if table.contains_key(&record.id()) {
            return Err(StorageError::Conflict {
                type_name: R::TYPE_NAME,
                id: record.id().to_string(),
            });
        }
        table.insert(record.id(), fields);
        Ok(())
    }

    async fn delete<R: Record>(&self, id: Uuid) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(table) = records.get_mut(R::TYPE_NAME) {
            table.remove(&id);
        }
        Ok(())
    }

    async fn get_or_default<R: Record>(&self, id: Uuid) -> Result<Option<R>> {
        let records = self.records.read().await;
        Ok(records
            .get(R::TYPE_NAME)
            .and_then(|table| table.get(&id))
            .map(|fields| R::from_stored(id, fields)))
    }
}

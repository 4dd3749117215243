//! DynamoDB repository implementation.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableDescription, TableStatus,
};
use aws_sdk_dynamodb::Client;
use tokio::sync::Mutex;
use uuid::Uuid;

use recordstore_core::record::Record;
use recordstore_core::storage::{Repository, Result, StorageError};

use super::conversions::{self, PK, SK};
use super::error::{
    map_create_table_error, map_delete_item_error, map_describe_table_error, map_get_item_error,
    map_put_item_error,
};

const ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_DELAY: Duration = Duration::from_secs(2);

/// Whether a described table is ready to serve reads and writes.
fn table_is_active(description: Option<&TableDescription>) -> bool {
    matches!(
        description.and_then(|table| table.table_status.as_ref()),
        Some(TableStatus::Active)
    )
}

/// DynamoDB-based repository implementation.
///
/// One table per record type, named after the type. The backend's own
/// create-table call rejects duplicates without side effects, so lazy
/// provisioning needs no catalog query; the per-instance memo only saves the
/// round-trip on calls after the first.
#[derive(Debug)]
pub struct DynamoDbRepository {
    client: Client,
    provisioned: Mutex<HashSet<&'static str>>,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            provisioned: Mutex::new(HashSet::new()),
        }
    }

    /// Creates a new repository against the given endpoint and region.
    ///
    /// Credentials come from the AWS SDK default chain.
    pub async fn connect(endpoint: &str, region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .load()
            .await;

        Self::new(Client::new(&config))
    }

    /// Lazy table provisioning for one record type.
    ///
    /// `ResourceInUse` from the create call means the table already exists,
    /// created now by a concurrent caller or long ago. Either way the table
    /// may still be in `CREATING` status, so activation is polled before the
    /// memo is written; only an `ACTIVE` table counts as confirmation.
    async fn ensure_table(&self, table: &'static str) -> Result<()> {
        {
            let provisioned = self.provisioned.lock().await;
            if provisioned.contains(table) {
                return Ok(());
            }
        }

        let key_schema = [
            KeySchemaElement::builder()
                .attribute_name(PK)
                .key_type(KeyType::Hash)
                .build()
                .map_err(|e| StorageError::QueryFailed(e.to_string()))?,
            KeySchemaElement::builder()
                .attribute_name(SK)
                .key_type(KeyType::Range)
                .build()
                .map_err(|e| StorageError::QueryFailed(e.to_string()))?,
        ];
        let attribute_definitions = [
            AttributeDefinition::builder()
                .attribute_name(PK)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| StorageError::QueryFailed(e.to_string()))?,
            AttributeDefinition::builder()
                .attribute_name(SK)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| StorageError::QueryFailed(e.to_string()))?,
        ];

        let outcome = self
            .client
            .create_table()
            .table_name(table)
            .set_key_schema(Some(key_schema.into()))
            .set_attribute_definitions(Some(attribute_definitions.into()))
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        if let Err(err) = outcome {
            if let Some(e) = map_create_table_error(err) {
                return Err(e);
            }
        }

        self.wait_for_table_active(table).await?;

        self.provisioned.lock().await.insert(table);
        Ok(())
    }

    /// Polls the table until it reports `ACTIVE`.
    ///
    /// A freshly created table stays in `CREATING` for a while and rejects
    /// reads and writes until activation. `ResourceNotFound` during the poll
    /// means the create has not propagated yet and is retried like any other
    /// non-active status.
    async fn wait_for_table_active(&self, table: &'static str) -> Result<()> {
        for attempt in 0..ACTIVATION_ATTEMPTS {
            match self.client.describe_table().table_name(table).send().await {
                Ok(output) => {
                    if table_is_active(output.table.as_ref()) {
                        return Ok(());
                    }
                }
                Err(err) => {
                    if let Some(e) = map_describe_table_error(err) {
                        return Err(e);
                    }
                }
            }

            if attempt + 1 < ACTIVATION_ATTEMPTS {
                tokio::time::sleep(ACTIVATION_DELAY).await;
            }
        }

        Err(StorageError::QueryFailed(format!(
            "table '{table}' did not become active"
        )))
    }
}

#[async_trait]
impl Repository for DynamoDbRepository {
    async fn add<R: Record>(&self, record: &R) -> Result<()> {
        self.ensure_table(R::TYPE_NAME).await?;

        let item = conversions::record_to_item(record);

        self.client
            .put_item()
            .table_name(R::TYPE_NAME)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, R::TYPE_NAME, record.id().to_string()))?;

        Ok(())
    }

    async fn delete<R: Record>(&self, id: Uuid) -> Result<()> {
        self.ensure_table(R::TYPE_NAME).await?;

        // Unconditional: deleting a missing key is a successful no-op.
        self.client
            .delete_item()
            .table_name(R::TYPE_NAME)
            .key(PK, AttributeValue::S(id.to_string()))
            .key(SK, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn get_or_default<R: Record>(&self, id: Uuid) -> Result<Option<R>> {
        self.ensure_table(R::TYPE_NAME).await?;

        let result = self
            .client
            .get_item()
            .table_name(R::TYPE_NAME)
            .key(PK, AttributeValue::S(id.to_string()))
            .key(SK, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => {
                let fields = conversions::item_to_fields(&item, R::fields())?;
                Ok(Some(R::from_stored(id, &fields)))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn described(status: TableStatus) -> TableDescription {
        TableDescription::builder().table_status(status).build()
    }

    #[test]
    fn test_active_table_is_active() {
        assert!(table_is_active(Some(&described(TableStatus::Active))));
    }

    #[test]
    fn test_creating_table_is_not_active() {
        assert!(!table_is_active(Some(&described(TableStatus::Creating))));
        assert!(!table_is_active(Some(&described(TableStatus::Updating))));
    }

    #[test]
    fn test_missing_description_is_not_active() {
        assert!(!table_is_active(None));
        assert!(!table_is_active(Some(&TableDescription::builder().build())));
    }
}

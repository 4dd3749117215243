//! SQLite repository implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use recordstore_core::record::{FieldDef, FieldMap, FieldValue, Record};
use recordstore_core::storage::{Repository, Result, StorageError};

use super::error::{is_already_exists, map_tokio_rusqlite_error, wrap_err};
use super::sql;

/// SQLite-based repository implementation.
///
/// One table per record type, provisioned lazily: the first operation for a
/// type checks the catalog and creates the table when missing, then the
/// outcome is memoized for the lifetime of this instance. The memo is written
/// only after the backend has confirmed the table exists, so a cancelled call
/// never leaves it inconsistent.
#[derive(Debug)]
pub struct SqliteRepository {
    conn: Connection,
    provisioned: Mutex<HashSet<&'static str>>,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file is created if it doesn't exist; tables are not -
    /// they appear on first use per record type.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            conn,
            provisioned: Mutex::new(HashSet::new()),
        })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            conn,
            provisioned: Mutex::new(HashSet::new()),
        })
    }

    /// Lazy schema provisioning for one record type.
    ///
    /// Cache hit: no round-trip at all. Otherwise the catalog is consulted
    /// and the table created when absent. An existing table is taken as-is;
    /// column drift against the current declaration is not detected.
    /// Concurrent first use may issue redundant creates - the loser's
    /// "already exists" failure counts as success.
    async fn ensure_table<R: Record>(&self) -> Result<()> {
        let table = R::TYPE_NAME;

        {
            let provisioned = self.provisioned.lock().await;
            if provisioned.contains(table) {
                return Ok(());
            }
        }

        let exists = self
            .conn
            .call(move |conn| {
                let count: i64 = conn
                    .query_row(sql::TABLE_EXISTS, [table], |row| row.get(0))
                    .map_err(wrap_err)?;
                Ok(count > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, table, ""))?;

        if !exists {
            let ddl = sql::create_table(table, R::fields());
            self.conn
                .call(move |conn| match conn.execute(&ddl, []) {
                    Ok(_) => Ok(()),
                    Err(e) if is_already_exists(&e) => Ok(()),
                    Err(e) => Err(wrap_err(e)),
                })
                .await
                .map_err(|e| map_tokio_rusqlite_error(e, table, ""))?;
        }

        self.provisioned.lock().await.insert(table);
        Ok(())
    }
}

/// Binds a field value as a SQL parameter. Dates are stored as ISO-8601
/// text in the `DATE` column; absent values bind NULL.
fn to_sql_value(value: FieldValue) -> rusqlite::types::Value {
    match value {
        FieldValue::Text(text) => rusqlite::types::Value::Text(text),
        FieldValue::Date(date) => {
            rusqlite::types::Value::Text(date.format("%Y-%m-%d").to_string())
        }
        FieldValue::Absent => rusqlite::types::Value::Null,
    }
}

/// Reads the selected row back into a field map. Column 0 is the identity;
/// declared fields follow in declaration order. NULL columns are left out of
/// the map so reconstruction keeps them unset.
fn row_to_fields(row: &rusqlite::Row<'_>, fields: &[FieldDef]) -> rusqlite::Result<FieldMap> {
    let mut map = FieldMap::new();
    for (i, field) in fields.iter().enumerate() {
        let column = i + 1;
        let Some(text) = row.get::<_, Option<String>>(column)? else {
            continue;
        };
        let value = if field.kind.is_date() {
            let date = text.parse::<NaiveDate>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    column,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            FieldValue::Date(date)
        } else {
            FieldValue::Text(text)
        };
        map.insert(field.name.to_string(), value);
    }
    Ok(map)
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn add<R: Record>(&self, record: &R) -> Result<()> {
        self.ensure_table::<R>().await?;

        let id = record.id().to_string();
        let statement = sql::insert(R::TYPE_NAME, R::fields());

        let mut params = Vec::with_capacity(R::fields().len() + 1);
        params.push(rusqlite::types::Value::Text(id.clone()));
        for field in R::fields() {
            params.push(to_sql_value(record.value(field.name)));
        }

        self.conn
            .call(move |conn| {
                conn.execute(&statement, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, R::TYPE_NAME, &id))
    }

    async fn delete<R: Record>(&self, id: Uuid) -> Result<()> {
        self.ensure_table::<R>().await?;

        let id_str = id.to_string();
        let statement = sql::delete_by_id(R::TYPE_NAME);

        self.conn
            .call(move |conn| {
                // Zero affected rows is a successful no-op.
                conn.execute(&statement, [&id_str]).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, R::TYPE_NAME, &id.to_string()))
    }

    async fn get_or_default<R: Record>(&self, id: Uuid) -> Result<Option<R>> {
        self.ensure_table::<R>().await?;

        let id_str = id.to_string();
        let statement = sql::select_by_id(R::TYPE_NAME, R::fields());
        let fields = R::fields();

        let stored = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&statement).map_err(wrap_err)?;
                match stmt.query_row([&id_str], |row| row_to_fields(row, fields)) {
                    Ok(map) => Ok(Some(map)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, R::TYPE_NAME, &id.to_string()))?;

        Ok(stored.map(|map| R::from_stored(id, &map)))
    }
}

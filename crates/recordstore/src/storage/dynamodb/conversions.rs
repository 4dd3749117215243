//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB attribute maps and record
//! field maps. These are testable in isolation without DynamoDB access.
//!
//! The table store has no date-only type: date fields are written as an
//! RFC 3339 timestamp at day start UTC and truncated back to calendar-date
//! granularity on read. Absent optional fields are omitted from the item
//! entirely - never written as an explicit null.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use recordstore_core::record::{FieldDef, FieldMap, FieldValue, Record};
use recordstore_core::storage::StorageError;

/// Partition key attribute name.
pub const PK: &str = "PK";
/// Sort key attribute name.
pub const SK: &str = "SK";

/// The fixed reference time-of-day used when a date round-trips through a
/// timestamp attribute.
fn date_to_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc3339()
}

fn timestamp_to_date(value: &str) -> Result<NaiveDate, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| StorageError::InvalidData(format!("invalid timestamp '{value}': {e}")))
}

/// Converts a record to a DynamoDB item.
///
/// Both keys are the identity's string form, making every record its own
/// partition; no range queries are supported or needed.
pub fn record_to_item<R: Record>(record: &R) -> HashMap<String, AttributeValue> {
    let id = record.id().to_string();

    let mut item = HashMap::new();
    item.insert(PK.to_string(), AttributeValue::S(id.clone()));
    item.insert(SK.to_string(), AttributeValue::S(id));

    for field in R::fields() {
        match record.value(field.name) {
            FieldValue::Text(text) => {
                item.insert(field.name.to_string(), AttributeValue::S(text));
            }
            FieldValue::Date(date) => {
                item.insert(
                    field.name.to_string(),
                    AttributeValue::S(date_to_timestamp(date)),
                );
            }
            FieldValue::Absent => {}
        }
    }

    item
}

/// Converts a DynamoDB item back to a field map, driven by the record type's
/// declared schema. Attributes missing from the item stay out of the map so
/// reconstruction leaves those fields unset.
pub fn item_to_fields(
    item: &HashMap<String, AttributeValue>,
    fields: &[FieldDef],
) -> Result<FieldMap, StorageError> {
    let mut map = FieldMap::new();
    for field in fields {
        let Some(attr) = item.get(field.name) else {
            continue;
        };
        let AttributeValue::S(text) = attr else {
            return Err(StorageError::InvalidData(format!(
                "attribute '{}' has an unexpected type",
                field.name
            )));
        };
        let value = if field.kind.is_date() {
            FieldValue::Date(timestamp_to_date(text)?)
        } else {
            FieldValue::Text(text.clone())
        };
        map.insert(field.name.to_string(), value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use recordstore_core::record::FieldKind;
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Demo {
        id: Uuid,
        name: Option<String>,
        born_on: Option<NaiveDate>,
    }

    impl Record for Demo {
        const TYPE_NAME: &'static str = "demo";

        fn fields() -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[
                FieldDef::new("name", FieldKind::OptionalText),
                FieldDef::new("born_on", FieldKind::OptionalDate),
            ];
            FIELDS
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn value(&self, field: &str) -> FieldValue {
            match field {
                "name" => FieldValue::from_opt_text(self.name.as_deref()),
                "born_on" => FieldValue::from_opt_date(self.born_on),
                _ => FieldValue::Absent,
            }
        }

        fn from_stored(id: Uuid, fields: &FieldMap) -> Self {
            Self {
                id,
                name: fields
                    .get("name")
                    .and_then(|v| v.as_text())
                    .map(str::to_string),
                born_on: fields.get("born_on").and_then(|v| v.as_date()),
            }
        }
    }

    #[test]
    fn test_keys_are_both_the_identity() {
        let id = Uuid::new_v4();
        let record = Demo {
            id,
            name: None,
            born_on: None,
        };

        let item = record_to_item(&record);

        assert_eq!(item.get(PK), Some(&AttributeValue::S(id.to_string())));
        assert_eq!(item.get(SK), Some(&AttributeValue::S(id.to_string())));
    }

    #[test]
    fn test_absent_fields_are_omitted_not_null() {
        let record = Demo {
            id: Uuid::new_v4(),
            name: None,
            born_on: None,
        };

        let item = record_to_item(&record);

        assert!(!item.contains_key("name"));
        assert!(!item.contains_key("born_on"));
    }

    #[test]
    fn test_date_written_as_day_start_utc() {
        let record = Demo {
            id: Uuid::new_v4(),
            name: None,
            born_on: Some(NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()),
        };

        let item = record_to_item(&record);

        assert_eq!(
            item.get("born_on"),
            Some(&AttributeValue::S("1990-04-12T00:00:00+00:00".to_string()))
        );
    }

    #[test]
    fn test_date_round_trips_at_day_granularity() {
        let id = Uuid::new_v4();
        let record = Demo {
            id,
            name: Some("Test".to_string()),
            born_on: Some(NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()),
        };

        let item = record_to_item(&record);
        let fields = item_to_fields(&item, Demo::fields()).unwrap();
        let restored = Demo::from_stored(id, &fields);

        assert_eq!(restored, record);
    }

    #[test]
    fn test_missing_attributes_stay_unset() {
        let id = Uuid::new_v4();
        let mut item = HashMap::new();
        item.insert(PK.to_string(), AttributeValue::S(id.to_string()));
        item.insert(SK.to_string(), AttributeValue::S(id.to_string()));
        item.insert("name".to_string(), AttributeValue::S("Test".to_string()));

        let fields = item_to_fields(&item, Demo::fields()).unwrap();
        let restored = Demo::from_stored(id, &fields);

        assert_eq!(restored.name.as_deref(), Some("Test"));
        assert_eq!(restored.born_on, None);
    }

    #[test]
    fn test_malformed_timestamp_is_invalid_data() {
        let mut item = HashMap::new();
        item.insert(
            "born_on".to_string(),
            AttributeValue::S("not-a-timestamp".to_string()),
        );

        let err = item_to_fields(&item, Demo::fields()).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }

    #[test]
    fn test_unexpected_attribute_type_is_invalid_data() {
        let mut item = HashMap::new();
        item.insert("name".to_string(), AttributeValue::N("42".to_string()));

        let err = item_to_fields(&item, Demo::fields()).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }
}

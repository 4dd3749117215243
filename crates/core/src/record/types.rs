use std::collections::HashMap;

use chrono::NaiveDate;

/// The semantic kind of a declared record field.
///
/// The kind decides the storage representation: date-only values have no
/// native type in the key-value backend and are converted at the boundary,
/// everything else is stored as text. Types without a natural text form
/// serialize themselves and declare `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required text value.
    Text,
    /// Text value that may be unset.
    OptionalText,
    /// Required calendar date (no time-of-day component).
    Date,
    /// Calendar date that may be unset.
    OptionalDate,
}

impl FieldKind {
    /// Whether values of this kind carry a calendar date.
    pub fn is_date(self) -> bool {
        matches!(self, FieldKind::Date | FieldKind::OptionalDate)
    }
}

/// One entry of a record type's declared schema: field name plus kind.
///
/// The identity field is never part of a schema; it is handled separately by
/// every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A single field value in its store-agnostic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    /// An optional field with no value. Backends never store this as an
    /// explicit null entity property; the relational backend binds SQL NULL.
    Absent,
}

impl FieldValue {
    /// Wraps an optional text value, mapping `None` to [`FieldValue::Absent`].
    pub fn from_opt_text(value: Option<&str>) -> Self {
        match value {
            Some(text) => FieldValue::Text(text.to_string()),
            None => FieldValue::Absent,
        }
    }

    /// Wraps an optional date value, mapping `None` to [`FieldValue::Absent`].
    pub fn from_opt_date(value: Option<NaiveDate>) -> Self {
        match value {
            Some(date) => FieldValue::Date(date),
            None => FieldValue::Absent,
        }
    }

    /// Returns the contained text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the contained date, if any.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }
}

/// The non-identity fields of one stored record, keyed by field name.
///
/// Fields that were absent on write are simply missing from the map; record
/// reconstruction leaves them at their unset default.
pub type FieldMap = HashMap<String, FieldValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_kinds_are_dates() {
        assert!(FieldKind::Date.is_date());
        assert!(FieldKind::OptionalDate.is_date());
        assert!(!FieldKind::Text.is_date());
        assert!(!FieldKind::OptionalText.is_date());
    }

    #[test]
    fn test_from_opt_text_maps_none_to_absent() {
        assert_eq!(FieldValue::from_opt_text(None), FieldValue::Absent);
        assert_eq!(
            FieldValue::from_opt_text(Some("hello")),
            FieldValue::Text("hello".to_string())
        );
    }

    #[test]
    fn test_from_opt_date_maps_none_to_absent() {
        let date = NaiveDate::from_ymd_opt(1990, 4, 12).unwrap();

        assert_eq!(FieldValue::from_opt_date(None), FieldValue::Absent);
        assert_eq!(FieldValue::from_opt_date(Some(date)), FieldValue::Date(date));
    }

    #[test]
    fn test_accessors_reject_wrong_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(FieldValue::Date(date).as_text(), None);
        assert_eq!(FieldValue::Text("x".to_string()).as_date(), None);
        assert_eq!(FieldValue::Absent.as_text(), None);
        assert_eq!(FieldValue::Absent.as_date(), None);
    }
}

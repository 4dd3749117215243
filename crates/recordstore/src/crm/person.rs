use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recordstore_core::record::{FieldDef, FieldKind, FieldMap, FieldValue, Record};

/// A person tracked by the CRM.
///
/// Plain data; every non-identity field is optional and validated by the
/// service layer before it reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Person {
    /// Creates an empty person with the given identity.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            email: None,
            phone_number: None,
            birth_date: None,
        }
    }

    /// Sets the first and last name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    pub fn with_phone_number(mut self, number: impl Into<String>) -> Self {
        self.phone_number = Some(number.into());
        self
    }

    /// Sets the birth date.
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// First and last name joined the way the external directory lists them.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

impl Record for Person {
    const TYPE_NAME: &'static str = "person";

    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::new("first_name", FieldKind::OptionalText),
            FieldDef::new("last_name", FieldKind::OptionalText),
            FieldDef::new("email", FieldKind::OptionalText),
            FieldDef::new("phone_number", FieldKind::OptionalText),
            FieldDef::new("birth_date", FieldKind::OptionalDate),
        ];
        FIELDS
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "first_name" => FieldValue::from_opt_text(self.first_name.as_deref()),
            "last_name" => FieldValue::from_opt_text(self.last_name.as_deref()),
            "email" => FieldValue::from_opt_text(self.email.as_deref()),
            "phone_number" => FieldValue::from_opt_text(self.phone_number.as_deref()),
            "birth_date" => FieldValue::from_opt_date(self.birth_date),
            _ => FieldValue::Absent,
        }
    }

    fn from_stored(id: Uuid, fields: &FieldMap) -> Self {
        let text = |name: &str| {
            fields
                .get(name)
                .and_then(|v| v.as_text())
                .map(str::to_string)
        };
        Self {
            id,
            first_name: text("first_name"),
            last_name: text("last_name"),
            email: text("email"),
            phone_number: text("phone_number"),
            birth_date: fields.get("birth_date").and_then(|v| v.as_date()),
        }
    }
}

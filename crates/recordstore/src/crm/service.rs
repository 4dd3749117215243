//! The person service: validation, external checks and metering in front of
//! the repository.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use recordstore_core::storage::{Repository, StorageError};
use recordstore_core::validation::{require_letters_or_spaces, ValidationError};

use super::dependencies::{DependencyError, ExternalChecks};
use super::metrics::CrmMetrics;
use super::person::Person;
use super::validations::validate_phone_number;

/// A rejected or failed person operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("birth date cannot be in the future")]
    BirthDateInFuture,
    #[error("a person named '{0}' already exists in the external system")]
    NameTaken(String),
    #[error("phone number '{0}' was rejected by the number check")]
    PhoneNumberRejected(String),
    #[error(transparent)]
    Dependency(#[from] DependencyError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Business layer over the generic repository for person records.
///
/// Validates field content, consults the external checks and counts the
/// metric before delegating; storage failures pass through unchanged.
pub struct PersonService<R, C> {
    repository: R,
    checks: C,
    metrics: CrmMetrics,
}

impl<R: Repository, C: ExternalChecks> PersonService<R, C> {
    pub fn new(repository: R, checks: C) -> Self {
        Self {
            repository,
            checks,
            metrics: CrmMetrics::new(),
        }
    }

    /// Counters for the operations performed through this service.
    pub fn metrics(&self) -> &CrmMetrics {
        &self.metrics
    }

    /// Validates and stores a new person.
    pub async fn add_person(&self, person: &Person) -> Result<(), ServiceError> {
        tracing::info!(id = %person.id, "adding person");

        require_letters_or_spaces("first name", person.first_name.as_deref())?;
        require_letters_or_spaces("last name", person.last_name.as_deref())?;
        validate_phone_number(person.phone_number.as_deref())?;

        if let Some(birth_date) = person.birth_date {
            if birth_date > Utc::now().date_naive() {
                return Err(ServiceError::BirthDateInFuture);
            }
        }

        let full_name = person.full_name();
        if self.checks.name_in_use(&full_name).await? {
            return Err(ServiceError::NameTaken(full_name));
        }

        if let Some(number) = person.phone_number.as_deref() {
            if !self.checks.phone_number_ok(number).await? {
                return Err(ServiceError::PhoneNumberRejected(number.to_string()));
            }
        }

        self.repository.add(person).await?;
        self.metrics.person_added();
        Ok(())
    }

    /// Removes a person; absent identities are a no-op.
    pub async fn delete_person(&self, id: Uuid) -> Result<(), ServiceError> {
        tracing::info!(%id, "deleting person");

        self.repository.delete::<Person>(id).await?;
        Ok(())
    }

    /// Fetches a person, or `None` if absent.
    pub async fn get_person_or_default(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
        tracing::info!(%id, "fetching person");

        Ok(self.repository.get_or_default(id).await?)
    }
}

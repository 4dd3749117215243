//! The CRM business layer over the generic repository.

pub mod dependencies;
pub mod metrics;
pub mod person;
pub mod service;
mod validations;

pub use dependencies::CrmDependencies;
pub use person::Person;
pub use service::{PersonService, ServiceError};

//! External collaborators of the CRM service.
//!
//! Two simple HTTP checks: the external directory that may already list a
//! person under the same name, and the phone-number service that vets a
//! number. Both sit behind the [`ExternalChecks`] trait so the service layer
//! can be tested without the network.

use async_trait::async_trait;
use thiserror::Error;

const EXTERNAL_USER_URL: &str = "https://jsonplaceholder.typicode.com/users/1";
const PHONE_CHECK_URL: &str = "https://coredidemo.azurewebsites.net/phonenumbercheck.html";

/// A failed call to an external collaborator.
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// The external checks consulted before a person is stored.
#[async_trait]
pub trait ExternalChecks: Send + Sync {
    /// Whether the external directory already lists this full name.
    async fn name_in_use(&self, full_name: &str) -> Result<bool, DependencyError>;

    /// Whether the phone-number service accepts this number.
    async fn phone_number_ok(&self, number: &str) -> Result<bool, DependencyError>;
}

/// HTTP-backed implementation of the external checks.
pub struct CrmDependencies {
    http: reqwest::Client,
}

impl CrmDependencies {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ExternalChecks for CrmDependencies {
    async fn name_in_use(&self, full_name: &str) -> Result<bool, DependencyError> {
        let body: serde_json::Value = self
            .http
            .get(EXTERNAL_USER_URL)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let name = body
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| DependencyError::Malformed("missing 'name' field".to_string()))?;

        Ok(name == full_name)
    }

    async fn phone_number_ok(&self, number: &str) -> Result<bool, DependencyError> {
        let accepted: bool = self
            .http
            .get(PHONE_CHECK_URL)
            .query(&[("number", number)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(accepted)
    }
}

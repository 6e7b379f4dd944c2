use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use super::domain::{ApplicationId, ApplicationSubmission, LoanApplication};
use super::repository::{ApplicationRepository, RepositoryError};
use super::validation::{validate_create, validate_status, ValidationError};

/// Registry composing the validation gate with an injected store.
pub struct LoanApplicationService<R> {
    repository: Arc<R>,
}

impl<R> LoanApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new application. Status always starts as `Pending`.
    pub async fn create(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<LoanApplication, ApplicationServiceError> {
        let application = validate_create(submission, Utc::now())?;
        let stored = self.repository.insert(application).await?;

        info!(
            application_id = %stored.id,
            loan_amount = %stored.loan_amount,
            "loan application submitted"
        );
        Ok(stored)
    }

    pub async fn list(&self) -> Result<Vec<LoanApplication>, ApplicationServiceError> {
        Ok(self.repository.all().await?)
    }

    pub async fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<LoanApplication, ApplicationServiceError> {
        self.repository
            .fetch(application_id)
            .await?
            .ok_or_else(|| ApplicationServiceError::NotFound(application_id.clone()))
    }

    /// Move an application to any of the three statuses.
    ///
    /// The status is validated before the store is consulted, so a bad status
    /// on an unknown id reports `InvalidStatus` rather than `NotFound`.
    pub async fn update_status(
        &self,
        application_id: &ApplicationId,
        status: Option<&Value>,
    ) -> Result<LoanApplication, ApplicationServiceError> {
        let status = validate_status(status)?;
        let updated = self
            .repository
            .update_status(application_id, status)
            .await?
            .ok_or_else(|| ApplicationServiceError::NotFound(application_id.clone()))?;

        info!(application_id = %updated.id, %status, "loan application status updated");
        Ok(updated)
    }
}

/// Error raised by the application registry.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

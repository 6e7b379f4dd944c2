use async_trait::async_trait;

use super::domain::{ApplicationId, ApplicationStatus, LoanApplication, NewApplication};

/// Storage abstraction so the registry can run against memory, disk, or a fake.
///
/// Implementations own id assignment and keep `all` in a stable order.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: NewApplication)
        -> Result<LoanApplication, RepositoryError>;
    async fn all(&self) -> Result<Vec<LoanApplication>, RepositoryError>;
    async fn fetch(&self, id: &ApplicationId)
        -> Result<Option<LoanApplication>, RepositoryError>;
    /// Replace only the status; `None` when no record has that id.
    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<LoanApplication>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("repository io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

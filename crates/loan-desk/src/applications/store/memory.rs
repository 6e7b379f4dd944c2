use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::applications::domain::{
    ApplicationId, ApplicationStatus, LoanApplication, NewApplication,
};
use crate::applications::repository::{ApplicationRepository, RepositoryError};

/// Process-local store. Records are kept in insertion order and vanish on restart.
#[derive(Debug, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<RwLock<Vec<LoanApplication>>>,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryApplicationRepository {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl InMemoryApplicationRepository {
    fn next_application_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ApplicationId(format!("APP-{id:06}"))
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<LoanApplication, RepositoryError> {
        let record = application.with_id(self.next_application_id());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<LoanApplication>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, RepositoryError> {
        let guard = self.records.read().await;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<LoanApplication>, RepositoryError> {
        let mut guard = self.records.write().await;
        Ok(guard.iter_mut().find(|record| &record.id == id).map(|record| {
            record.status = status;
            record.clone()
        }))
    }
}

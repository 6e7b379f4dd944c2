use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::applications::domain::{
    ApplicationId, ApplicationStatus, LoanApplication, NewApplication,
};
use crate::applications::repository::{ApplicationRepository, RepositoryError};

/// Document store persisting every application as one JSON array on disk.
///
/// The whole collection is cached in memory and the file is rewritten after
/// each mutation. A mutation only becomes visible once the write succeeded,
/// so a failed save leaves both copies on the previous state.
#[derive(Debug, Clone)]
pub struct JsonFileApplicationRepository {
    records: Arc<RwLock<Vec<LoanApplication>>>,
    file_path: PathBuf,
}

impl JsonFileApplicationRepository {
    /// Open the document at `path`, creating it (and its parent) when missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, RepositoryError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let records = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                write_document(&file_path, &[]).await?;
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        debug!(path = %file_path.display(), count = records.len(), "application store opened");

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            file_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

async fn write_document(path: &Path, records: &[LoanApplication]) -> Result<(), RepositoryError> {
    let data = serde_json::to_vec_pretty(records)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    fs::write(&staging, data).await?;
    if let Err(err) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err.into());
    }
    Ok(())
}

fn next_application_id() -> ApplicationId {
    ApplicationId(format!("APP-{}", Uuid::new_v4().simple()))
}

#[async_trait]
impl ApplicationRepository for JsonFileApplicationRepository {
    async fn insert(
        &self,
        application: NewApplication,
    ) -> Result<LoanApplication, RepositoryError> {
        let mut guard = self.records.write().await;
        let record = application.with_id(next_application_id());

        let mut next = guard.clone();
        next.push(record.clone());
        write_document(&self.file_path, &next).await?;
        *guard = next;

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
        let Some(index) = guard.iter().position(|record| &record.id == id) else {
            return Ok(None);
        };

        let mut next = guard.clone();
        next[index].status = status;
        write_document(&self.file_path, &next).await?;
        let updated = next[index].clone();
        *guard = next;

        Ok(Some(updated))
    }
}

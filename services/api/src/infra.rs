use loan_desk::applications::{
    InMemoryApplicationRepository, JsonFileApplicationRepository, RepositoryError,
};
use loan_desk::config::{StoreBackend, StoreConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The store chosen at startup. The registry is generic, so each arm is wired separately.
pub(crate) enum SelectedStore {
    Memory(Arc<InMemoryApplicationRepository>),
    File(Arc<JsonFileApplicationRepository>),
}

pub(crate) async fn open_store(config: &StoreConfig) -> Result<SelectedStore, RepositoryError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("using in-memory application store");
            Ok(SelectedStore::Memory(Arc::new(
                InMemoryApplicationRepository::default(),
            )))
        }
        StoreBackend::File => {
            let store = JsonFileApplicationRepository::open(config.path.clone()).await?;
            info!(path = %store.path().display(), "using file-backed application store");
            Ok(SelectedStore::File(Arc::new(store)))
        }
    }
}

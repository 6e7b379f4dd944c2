use crate::cli::ServeArgs;
use crate::infra::{open_store, AppState, SelectedStore};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_desk::applications::LoanApplicationService;
use loan_desk::config::AppConfig;
use loan_desk::error::AppError;
use loan_desk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(store) = args.store.take() {
        config.store.backend = store.into();
    }
    if let Some(path) = args.store_path.take() {
        config.store.path = path;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let router = match open_store(&config.store).await? {
        SelectedStore::Memory(repository) => {
            with_application_routes(Arc::new(LoanApplicationService::new(repository)))
        }
        SelectedStore::File(repository) => {
            with_application_routes(Arc::new(LoanApplicationService::new(repository)))
        }
    };

    let app = router
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, store = ?config.store.backend, "loan desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}

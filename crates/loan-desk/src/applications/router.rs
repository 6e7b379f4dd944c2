use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use super::domain::{ApplicationId, ApplicationSubmission, LoanApplication, StatusUpdate};
use super::repository::ApplicationRepository;
use super::service::{ApplicationServiceError, LoanApplicationService};

pub const NOT_FOUND_MESSAGE: &str = "Application not found.";
pub const STATUS_UPDATED_MESSAGE: &str = "Application status updated successfully.";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be valid JSON.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Body returned by a successful status update.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub message: &'static str,
    pub application: LoanApplication,
}

/// Router builder exposing the loan application endpoints.
pub fn application_router<R>(service: Arc<LoanApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/applications/:application_id",
            get(get_handler::<R>).put(update_status_handler::<R>),
        )
        .with_state(service)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected request body");
    message(StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE)
}

impl IntoResponse for ApplicationServiceError {
    fn into_response(self) -> Response {
        match self {
            ApplicationServiceError::Validation(err) => {
                message(StatusCode::BAD_REQUEST, &err.to_string())
            }
            ApplicationServiceError::NotFound(_) => {
                message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            ApplicationServiceError::Repository(err) => {
                error!(error = %err, "application store fault");
                message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.create(submission).await {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.list().await {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.get(&ApplicationId(application_id)).await {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_status_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let Json(update) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    let id = ApplicationId(application_id);
    match service.update_status(&id, update.status.as_ref()).await {
        Ok(application) => (
            StatusCode::OK,
            Json(StatusUpdateResponse {
                message: STATUS_UPDATED_MESSAGE,
                application,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

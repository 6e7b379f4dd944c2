use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::{json, Value};

use crate::applications::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, LoanApplication, NewApplication,
};
use crate::applications::repository::{ApplicationRepository, RepositoryError};
use crate::applications::store::InMemoryApplicationRepository;
use crate::applications::{application_router, LoanApplicationService};

pub(super) fn submission_json() -> Value {
    json!({
        "applicantName": "Alice",
        "email": "a@x.com",
        "loanAmount": 5000,
        "loanPurpose": "car"
    })
}

pub(super) fn submission() -> ApplicationSubmission {
    serde_json::from_value(submission_json()).expect("fixture parses")
}

pub(super) fn submission_for(name: &str, amount: f64) -> ApplicationSubmission {
    ApplicationSubmission {
        applicant_name: Some(json!(name)),
        email: Some(json!(format!("{}@example.com", name.to_ascii_lowercase()))),
        loan_amount: Some(json!(amount)),
        loan_purpose: Some(json!("working capital")),
    }
}

pub(super) fn build_service() -> (
    LoanApplicationService<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let service = LoanApplicationService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_memory_store() -> axum::Router {
    let (service, _) = build_service();
    application_router(Arc::new(service))
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializable body")))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose backend is permanently offline.
pub(super) struct UnavailableRepository;

#[async_trait]
impl ApplicationRepository for UnavailableRepository {
    async fn insert(
        &self,
        _application: NewApplication,
    ) -> Result<LoanApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn all(&self) -> Result<Vec<LoanApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn fetch(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<LoanApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Option<LoanApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn unavailable_service() -> LoanApplicationService<UnavailableRepository> {
    LoanApplicationService::new(Arc::new(UnavailableRepository))
}

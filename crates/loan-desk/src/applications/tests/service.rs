use super::common::*;
use serde_json::json;

use crate::applications::domain::{ApplicationId, ApplicationStatus};
use crate::applications::repository::{ApplicationRepository, RepositoryError};
use crate::applications::validation::ValidationError;
use crate::applications::ApplicationServiceError;

#[tokio::test]
async fn create_forces_pending_and_assigns_unique_ids() {
    let (service, _) = build_service();

    let first = service.create(submission()).await.expect("first stored");
    let second = service
        .create(submission_for("Brook", 250.75))
        .await
        .expect("second stored");

    assert_eq!(first.status, ApplicationStatus::Pending);
    assert_eq!(second.status, ApplicationStatus::Pending);
    assert!(!first.id.0.is_empty());
    assert_ne!(first.id, second.id);
    assert_eq!(first.applicant_name, "Alice");
    assert_eq!(first.loan_amount, serde_json::Number::from(5000));
    assert_eq!(second.loan_amount.as_f64(), Some(250.75));
}

#[tokio::test]
async fn create_rejects_missing_fields_before_touching_store() {
    let service = unavailable_service();
    let mut submission = submission();
    submission.loan_purpose = Some(json!(""));

    match service.create(submission).await {
        Err(ApplicationServiceError::Validation(ValidationError::MissingField {
            field: "loanPurpose",
        })) => {}
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[tokio::test]
async fn create_rejects_non_positive_amounts() {
    let (service, repository) = build_service();

    let err = service
        .create(submission_for("Cy", -10.0))
        .await
        .expect_err("negative amount rejected");

    assert!(matches!(
        err,
        ApplicationServiceError::Validation(ValidationError::InvalidAmount)
    ));
    assert!(repository.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_every_application_and_get_returns_it_unchanged() {
    let (service, _) = build_service();
    assert!(service.list().await.unwrap().is_empty());

    let a = service.create(submission()).await.unwrap();
    let b = service.create(submission_for("Brook", 900.0)).await.unwrap();

    let all = service.list().await.unwrap();
    assert_eq!(all, vec![a.clone(), b]);
    assert_eq!(service.get(&a.id).await.unwrap(), a);
}

#[tokio::test]
async fn get_reports_not_found() {
    let (service, _) = build_service();
    let missing = ApplicationId("APP-does-not-exist".to_string());

    match service.get(&missing).await {
        Err(ApplicationServiceError::NotFound(id)) => assert_eq!(id, missing),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn update_status_changes_only_the_status() {
    let (service, _) = build_service();
    let created = service.create(submission()).await.unwrap();

    let updated = service
        .update_status(&created.id, Some(&json!("Approved")))
        .await
        .expect("update succeeds");

    assert_eq!(updated.status, ApplicationStatus::Approved);
    let mut expected = created.clone();
    expected.status = ApplicationStatus::Approved;
    assert_eq!(updated, expected);
    assert_eq!(service.get(&created.id).await.unwrap(), expected);
}

#[tokio::test]
async fn invalid_status_leaves_record_unchanged() {
    let (service, _) = build_service();
    let created = service.create(submission()).await.unwrap();

    let err = service
        .update_status(&created.id, Some(&json!("NotAStatus")))
        .await
        .expect_err("invalid status rejected");

    assert!(matches!(
        err,
        ApplicationServiceError::Validation(ValidationError::InvalidStatus)
    ));
    assert_eq!(service.get(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn invalid_status_wins_over_unknown_id() {
    let (service, _) = build_service();
    let missing = ApplicationId("APP-does-not-exist".to_string());

    let err = service
        .update_status(&missing, Some(&json!("Closed")))
        .await
        .expect_err("rejected");
    assert!(matches!(
        err,
        ApplicationServiceError::Validation(ValidationError::InvalidStatus)
    ));

    let err = service
        .update_status(&missing, Some(&json!("Approved")))
        .await
        .expect_err("rejected");
    assert!(matches!(err, ApplicationServiceError::NotFound(_)));
}

#[tokio::test]
async fn approving_twice_matches_approving_once() {
    let (service, _) = build_service();
    let created = service.create(submission()).await.unwrap();

    let once = service
        .update_status(&created.id, Some(&json!("Approved")))
        .await
        .unwrap();
    let twice = service
        .update_status(&created.id, Some(&json!("Approved")))
        .await
        .unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn transitions_are_unrestricted() {
    let (service, _) = build_service();
    let created = service.create(submission()).await.unwrap();

    for label in ["Approved", "Pending", "Rejected", "Approved", "Rejected", "Pending"] {
        let updated = service
            .update_status(&created.id, Some(&json!(label)))
            .await
            .unwrap_or_else(|err| panic!("transition to {label} failed: {err}"));
        assert_eq!(updated.status.label(), label);
    }
}

#[tokio::test]
async fn store_faults_surface_as_repository_errors() {
    let service = unavailable_service();

    assert!(matches!(
        service.create(submission()).await,
        Err(ApplicationServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        service.list().await,
        Err(ApplicationServiceError::Repository(_))
    ));
    assert!(matches!(
        service
            .update_status(&ApplicationId("APP-1".to_string()), Some(&json!("Rejected")))
            .await,
        Err(ApplicationServiceError::Repository(_))
    ));
}

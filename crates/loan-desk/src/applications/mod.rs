//! Loan application intake and status tracking.
//!
//! Requests flow through the validation gate, then a single call into an
//! [`ApplicationRepository`], then response shaping in [`router`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, LoanApplication, NewApplication,
    StatusUpdate,
};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::{application_router, StatusUpdateResponse};
pub use service::{ApplicationServiceError, LoanApplicationService};
pub use store::{InMemoryApplicationRepository, JsonFileApplicationRepository};
pub use validation::{validate_create, validate_status, ValidationError};

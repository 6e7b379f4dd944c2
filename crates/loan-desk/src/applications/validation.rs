use chrono::{DateTime, Utc};
use serde_json::Value;

use super::domain::{ApplicationStatus, ApplicationSubmission, NewApplication};

/// Client input errors raised before any store interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide all required fields.")]
    MissingField { field: &'static str },
    #[error("Loan amount must be a positive number.")]
    InvalidAmount,
    #[error("Invalid status. Must be one of: Pending, Approved, Rejected.")]
    InvalidStatus,
}

/// JSON truthiness: absent, `null`, `false`, `0` and `""` count as missing.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64().map_or(false, |n| n == 0.0),
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn required_text(field: &'static str, value: Option<Value>) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField { field }),
    }
}

/// Check a creation payload and normalize it into a pending application.
///
/// Presence of all four fields is checked before the amount is inspected,
/// so `{"loanAmount": -5}` without a name reports the missing name.
pub fn validate_create(
    submission: ApplicationSubmission,
    now: DateTime<Utc>,
) -> Result<NewApplication, ValidationError> {
    let presence = [
        ("applicantName", submission.applicant_name.as_ref()),
        ("email", submission.email.as_ref()),
        ("loanAmount", submission.loan_amount.as_ref()),
        ("loanPurpose", submission.loan_purpose.as_ref()),
    ];
    if let Some(&(field, _)) = presence.iter().find(|(_, value)| is_falsy(*value)) {
        return Err(ValidationError::MissingField { field });
    }

    let loan_amount = match &submission.loan_amount {
        Some(Value::Number(number))
            if number
                .as_f64()
                .is_some_and(|amount| amount.is_finite() && amount > 0.0) =>
        {
            number.clone()
        }
        _ => return Err(ValidationError::InvalidAmount),
    };

    Ok(NewApplication {
        applicant_name: required_text("applicantName", submission.applicant_name)?,
        email: required_text("email", submission.email)?,
        loan_amount,
        loan_purpose: required_text("loanPurpose", submission.loan_purpose)?,
        status: ApplicationStatus::Pending,
        submitted_at: now,
    })
}

/// Accept exactly one of the three status labels.
pub fn validate_status(value: Option<&Value>) -> Result<ApplicationStatus, ValidationError> {
    value
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
        .ok_or(ValidationError::InvalidStatus)
}

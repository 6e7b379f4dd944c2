use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Identifier wrapper for stored applications. Assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review state of an application. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact, case-sensitive match against the three labels.
impl FromStr for ApplicationStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == value)
            .ok_or(())
    }
}

/// Raw creation payload as the client sent it.
///
/// Fields stay untyped JSON so the validation gate can tell an absent field
/// from an empty or mistyped one. Unknown keys such as `status` or
/// `submittedAt` are dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[serde(default)]
    pub applicant_name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub loan_amount: Option<Value>,
    #[serde(default)]
    pub loan_purpose: Option<Value>,
}

/// Body of a status update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<Value>,
}

/// Validated application that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub applicant_name: String,
    pub email: String,
    /// Kept as the client wrote it so `5000` is echoed back as `5000`.
    pub loan_amount: Number,
    pub loan_purpose: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl NewApplication {
    pub fn with_id(self, id: ApplicationId) -> LoanApplication {
        LoanApplication {
            id,
            applicant_name: self.applicant_name,
            email: self.email,
            loan_amount: self.loan_amount,
            loan_purpose: self.loan_purpose,
            status: self.status,
            submitted_at: self.submitted_at,
        }
    }
}

/// A stored loan application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: ApplicationId,
    pub applicant_name: String,
    pub email: String,
    pub loan_amount: Number,
    pub loan_purpose: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A sales prospect. Every string field except `first_name` defaults to an
/// empty string; `first_name` must be non-empty for the row to exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub country_code: String,
    pub company_name: String,
    pub message: String,
    pub gender: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Resolves a template placeholder name (wire-format, e.g. `companyName`)
    /// to the lead's value. `None` for names that are not substitutable
    /// fields; id and timestamps are deliberately excluded.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "firstName" => Some(&self.first_name),
            "lastName" => Some(&self.last_name),
            "email" => Some(&self.email),
            "jobTitle" => Some(&self.job_title),
            "countryCode" => Some(&self.country_code),
            "companyName" => Some(&self.company_name),
            "message" => Some(&self.message),
            "gender" => Some(&self.gender),
            _ => None,
        }
    }
}

/// The writable projection of a lead: everything except id and timestamps.
/// Used for create, full-overwrite update and import reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub country_code: String,
    pub company_name: String,
    pub message: String,
    pub gender: String,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::lead::{Lead, LeadFields};

/// Body of `POST /leads`. Mirrors the historical wire shape: `name` becomes
/// the lead's first name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `PATCH`/`PUT /leads/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateLeadPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMessagePayload {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePreviewPayload {
    pub message: String,
    pub lead_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePreviewResponse {
    pub warnings: Vec<String>,
}

/// One candidate row of a bulk import, as parsed from CSV or posted as JSON.
/// Unknown keys are ignored; known fields coerce to empty strings during
/// reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeadRow {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub country_code: Option<String>,
    pub company_name: Option<String>,
    pub message: Option<String>,
    pub gender: Option<String>,
}

impl RawLeadRow {
    /// Coerce into the writable projection: every absent field becomes an
    /// empty string, including `first_name` (callers reject empty ones).
    pub fn sanitize(&self) -> LeadFields {
        LeadFields {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            job_title: self.job_title.clone().unwrap_or_default(),
            country_code: self.country_code.clone().unwrap_or_default(),
            company_name: self.company_name.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
            gender: self.gender.clone().unwrap_or_default(),
        }
    }

    pub fn has_first_name(&self) -> bool {
        self.first_name.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.job_title,
            &self.country_code,
            &self.company_name,
            &self.message,
            &self.gender,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, str::is_empty))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPayload {
    pub leads: Vec<RawLeadRow>,
}

/// Result of a bulk import. Ordering within each list is not guaranteed:
/// dedupe-key groups are reconciled concurrently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported_leads: Vec<Lead>,
    pub updated_leads: Vec<Lead>,
    pub failed_leads: Vec<RawLeadRow>,
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::lead_dto::{
        CreateLeadPayload, GenerateMessagePayload, ImportPayload, MessagePreviewPayload,
        MessagePreviewResponse, UpdateLeadPayload,
    },
    error::{Error, Result},
    models::lead::{Lead, LeadFields},
    services::lead_service::LeadStore,
    utils::csv,
    AppState,
};

#[axum::debug_handler]
pub async fn create_lead(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let fields = LeadFields {
        first_name: payload.name,
        email: payload.email.unwrap_or_default(),
        ..Default::default()
    };
    let lead = state.lead_service.create(fields).await?;
    Ok(Json(lead))
}

#[axum::debug_handler]
pub async fn list_leads(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let leads = state.lead_service.list().await?;
    Ok(Json(leads))
}

/// Historical wire contract: an unknown id answers 200 with a JSON `null`
/// body rather than 404.
#[axum::debug_handler]
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Lead>>> {
    let lead = state.lead_service.get(id).await?;
    Ok(Json(lead))
}

#[axum::debug_handler]
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLeadPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let existing = state
        .lead_service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Lead not found".to_string()))?;

    let mut fields = LeadFields {
        first_name: existing.first_name,
        last_name: existing.last_name,
        email: existing.email,
        job_title: existing.job_title,
        country_code: existing.country_code,
        company_name: existing.company_name,
        message: existing.message,
        gender: existing.gender,
    };
    if let Some(name) = payload.name {
        fields.first_name = name;
    }
    if let Some(email) = payload.email {
        fields.email = email;
    }
    let lead = state.lead_service.update(id, fields).await?;
    Ok(Json(lead))
}

/// Deleting an unknown id is 404, not a silent no-op.
#[axum::debug_handler]
pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.lead_service.delete(id).await?;
    Ok(StatusCode::OK)
}

#[axum::debug_handler]
pub async fn generate_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<GenerateMessagePayload>,
) -> Result<impl IntoResponse> {
    let lead = state.message_service.generate(id, &payload.message).await?;
    Ok(Json(lead))
}

#[axum::debug_handler]
pub async fn preview_message(
    State(state): State<AppState>,
    Json(payload): Json<MessagePreviewPayload>,
) -> Result<impl IntoResponse> {
    let warnings = state
        .message_service
        .preview(&payload.message, &payload.lead_ids)
        .await?;
    Ok(Json(MessagePreviewResponse { warnings }))
}

#[axum::debug_handler]
pub async fn enrich_gender(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let lead = state.enrichment_service.enrich_gender(id).await?;
    Ok(Json(lead))
}

#[axum::debug_handler]
pub async fn import_leads(
    State(state): State<AppState>,
    Json(payload): Json<ImportPayload>,
) -> Result<impl IntoResponse> {
    let outcome = state.import_service.import_batch(payload.leads).await;
    info!(
        imported = outcome.imported_leads.len(),
        updated = outcome.updated_leads.len(),
        failed = outcome.failed_leads.len(),
        "import batch reconciled"
    );
    Ok(Json(outcome))
}

/// Same reconciliation as `/leads/import`, but over a raw CSV body. Rows
/// without a first name still flow through and come back as failed, matching
/// the JSON endpoint.
#[axum::debug_handler]
pub async fn import_leads_csv(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse> {
    let rows = csv::parse_leads_csv(&body);
    let (valid, invalid) = csv::partition_by_first_name(rows);
    info!(
        valid = valid.len(),
        invalid = invalid.len(),
        "csv parsed for import"
    );

    let mut all = valid;
    all.extend(invalid);
    let outcome = state.import_service.import_batch(all).await;
    Ok(Json(outcome))
}

use tracing::info;

use crate::error::{Error, Result};
use crate::models::lead::Lead;
use crate::services::lead_service::LeadStore;
use crate::services::template_service;

/// Mail-merge over a single lead: renders the template and persists the
/// result as the lead's message.
#[derive(Clone)]
pub struct MessageService<S> {
    store: S,
}

impl<S: LeadStore> MessageService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Renders and persists. The empty all-or-nothing result is persisted
    /// too, overwriting any previous message.
    pub async fn generate(&self, id: i64, template: &str) -> Result<Lead> {
        let lead = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Lead not found".to_string()))?;

        let rendered = template_service::render(template, &lead);
        if !rendered.missing.is_empty() {
            info!(
                lead_id = id,
                missing = ?rendered.missing,
                "template fields missing, storing empty message"
            );
        }
        self.store.set_message(id, &rendered.output).await
    }

    /// Advisory pre-submit report for a selection of leads. Ids that no
    /// longer resolve are skipped rather than failing the preview.
    pub async fn preview(&self, template: &str, lead_ids: &[i64]) -> Result<Vec<String>> {
        let mut leads = Vec::with_capacity(lead_ids.len());
        for id in lead_ids {
            if let Some(lead) = self.store.get(*id).await? {
                leads.push(lead);
            }
        }
        Ok(template_service::missing_field_report(template, &leads))
    }
}

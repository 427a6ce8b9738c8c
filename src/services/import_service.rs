use std::collections::HashMap;

use futures::future::join_all;
use tracing::warn;

use crate::dto::lead_dto::{ImportOutcome, RawLeadRow};
use crate::error::Result;
use crate::models::lead::{Lead, LeadFields};
use crate::services::lead_service::LeadStore;

enum RowOutcome {
    Created(Lead),
    Updated(Lead),
}

/// Bulk-import reconciler: classifies each candidate row as create, update
/// or failure. Rows are grouped by the dedupe identity (first_name,
/// last_name); groups run concurrently, rows within a group sequentially, so
/// a repeated key inside one batch reconciles as create-then-update instead
/// of racing its own existence check.
#[derive(Clone)]
pub struct ImportService<S> {
    store: S,
}

impl<S: LeadStore> ImportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Never fails as a whole: per-row persistence errors downgrade the row
    /// to `failed_leads`. Ordering within the result lists is unspecified.
    pub async fn import_batch(&self, rows: Vec<RawLeadRow>) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();

        let mut groups: HashMap<(String, String), Vec<(RawLeadRow, LeadFields)>> = HashMap::new();
        for row in rows {
            let fields = row.sanitize();
            if fields.first_name.is_empty() {
                outcome.failed_leads.push(row);
                continue;
            }
            groups
                .entry((fields.first_name.clone(), fields.last_name.clone()))
                .or_default()
                .push((row, fields));
        }

        let tasks = groups
            .into_values()
            .map(|group| self.reconcile_group(group));
        for (created, updated, failed) in join_all(tasks).await {
            outcome.imported_leads.extend(created);
            outcome.updated_leads.extend(updated);
            outcome.failed_leads.extend(failed);
        }
        outcome
    }

    async fn reconcile_group(
        &self,
        group: Vec<(RawLeadRow, LeadFields)>,
    ) -> (Vec<Lead>, Vec<Lead>, Vec<RawLeadRow>) {
        let mut created = Vec::new();
        let mut updated = Vec::new();
        let mut failed = Vec::new();
        for (row, fields) in group {
            match self.reconcile_row(fields).await {
                Ok(RowOutcome::Created(lead)) => created.push(lead),
                Ok(RowOutcome::Updated(lead)) => updated.push(lead),
                Err(err) => {
                    warn!(error = %err, "import row failed, continuing batch");
                    failed.push(row);
                }
            }
        }
        (created, updated, failed)
    }

    async fn reconcile_row(&self, fields: LeadFields) -> Result<RowOutcome> {
        match self
            .store
            .find_by_name(&fields.first_name, &fields.last_name)
            .await?
        {
            Some(existing) => {
                let lead = self.store.update(existing.id, fields).await?;
                Ok(RowOutcome::Updated(lead))
            }
            None => {
                let lead = self.store.create(fields).await?;
                Ok(RowOutcome::Created(lead))
            }
        }
    }
}

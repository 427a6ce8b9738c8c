use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::lead::Lead;
use crate::services::lead_service::LeadStore;

/// Answer of a name→gender lookup. The service reports `gender: null` for
/// names it has no data on.
#[derive(Debug, Clone, Deserialize)]
pub struct GenderGuess {
    pub gender: Option<String>,
    pub probability: Option<f64>,
    pub count: Option<i64>,
}

#[async_trait]
pub trait GenderLookup: Send + Sync {
    async fn lookup(&self, first_name: &str) -> Result<GenderGuess>;
}

/// genderize.io-compatible client: `GET {base}/?name={firstName}`.
#[derive(Clone)]
pub struct GenderizeClient {
    client: Client,
    base_url: String,
}

impl GenderizeClient {
    pub fn new(base_url: String, client: Client) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl GenderLookup for GenderizeClient {
    async fn lookup(&self, first_name: &str) -> Result<GenderGuess> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", first_name)])
            .send()
            .await?;
        let guess = response.error_for_status()?.json::<GenderGuess>().await?;
        Ok(guess)
    }
}

#[derive(Clone)]
pub struct EnrichmentService<S, G> {
    store: S,
    lookup: G,
}

impl<S: LeadStore, G: GenderLookup> EnrichmentService<S, G> {
    pub fn new(store: S, lookup: G) -> Self {
        Self { store, lookup }
    }

    /// Looks the lead's first name up and persists the gender on success.
    /// A lookup without a gender value is a 404 condition; any transport or
    /// decode failure is a generic 500. Neither mutates the store, and there
    /// is no retry.
    pub async fn enrich_gender(&self, id: i64) -> Result<Lead> {
        let lead = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Lead not found".to_string()))?;

        let guess = match self.lookup.lookup(&lead.first_name).await {
            Ok(guess) => guess,
            Err(err) => {
                warn!(lead_id = id, error = %err, "gender lookup failed");
                return Err(Error::ExternalService("Failed to guess gender".to_string()));
            }
        };

        match guess.gender.filter(|g| !g.is_empty()) {
            Some(gender) => {
                info!(
                    lead_id = id,
                    gender = %gender,
                    probability = ?guess.probability,
                    count = ?guess.count,
                    "gender enriched"
                );
                self.store.set_gender(id, &gender).await
            }
            None => Err(Error::NotFound("Gender not found".to_string())),
        }
    }
}

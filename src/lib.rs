pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod ui;
pub mod utils;

use crate::services::{
    enrichment_service::{EnrichmentService, GenderizeClient},
    import_service::ImportService,
    lead_service::LeadService,
    message_service::MessageService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub lead_service: LeadService,
    pub message_service: MessageService<LeadService>,
    pub import_service: ImportService<LeadService>,
    pub enrichment_service: EnrichmentService<LeadService, GenderizeClient>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client");

        let lead_service = LeadService::new(pool.clone());
        let message_service = MessageService::new(lead_service.clone());
        let import_service = ImportService::new(lead_service.clone());
        let genderize = GenderizeClient::new(config.genderize_api_url.clone(), http_client);
        let enrichment_service = EnrichmentService::new(lead_service.clone(), genderize);

        Self {
            pool,
            lead_service,
            message_service,
            import_service,
            enrichment_service,
        }
    }
}

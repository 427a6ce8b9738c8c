pub mod enrichment_service;
pub mod import_service;
pub mod lead_service;
pub mod message_service;
pub mod template_service;

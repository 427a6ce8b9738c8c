pub mod health;
pub mod lead_routes;

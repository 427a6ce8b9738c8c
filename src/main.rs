use axum::{
    routing::{get, post},
    Router,
};
use leads_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/leads",
            get(routes::lead_routes::list_leads).post(routes::lead_routes::create_lead),
        )
        .route("/leads/import", post(routes::lead_routes::import_leads))
        .route(
            "/leads/import/csv",
            post(routes::lead_routes::import_leads_csv),
        )
        .route(
            "/leads/message/preview",
            post(routes::lead_routes::preview_message),
        )
        .route(
            "/leads/:id",
            get(routes::lead_routes::get_lead)
                .patch(routes::lead_routes::update_lead)
                .put(routes::lead_routes::update_lead)
                .delete(routes::lead_routes::delete_lead),
        )
        .route(
            "/leads/:id/message",
            post(routes::lead_routes::generate_message),
        )
        .route(
            "/leads/:id/enrich-gender",
            post(routes::lead_routes::enrich_gender),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

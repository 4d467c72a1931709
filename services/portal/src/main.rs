use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::info;

use portal::config::PortalConfig;
use portal::router::build_router;
use portal::state::AppState;
use portal_core::config::Config;

#[tokio::main]
async fn main() {
    portal_core::tracing::init_tracing();

    let config = PortalConfig::from_env();

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.portal_max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let router = build_router(AppState::new(db));
    let http_addr = format!("0.0.0.0:{}", config.portal_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("portal service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}

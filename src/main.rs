use catalog::config::CONFIG;
use catalog::{CatalogService, InMemoryStorage, JwtService, RateLimiter, api};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(config = ?*CONFIG, "configuration loaded");
    if CONFIG.uses_dev_secret() {
        warn!("SECRET_KEY is not set; tokens are signed with the development secret");
    }

    // Document store
    let storage = InMemoryStorage::new();
    info!("in-memory document store ready");

    let jwt = JwtService::new(&CONFIG.secret_key, CONFIG.token_ttl_secs);
    let service = Arc::new(CatalogService::new(storage, jwt));
    let limiter = RateLimiter::new(CONFIG.rate_limit_max, CONFIG.rate_limit_window());

    let app = api::with_trailing_slash_tolerance(api::app(service, limiter));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    info!("Server running on port {}", CONFIG.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

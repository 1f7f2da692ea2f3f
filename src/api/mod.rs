pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod rate_limit;

use axum::{Router, extract::Request, middleware::map_request, routing::get};
use http::{Method, Uri, header, uri::PathAndQuery};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::services::CatalogService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use openapi::ApiDoc;
use rate_limit::RateLimiter;

const DOCS_PATH: &str = "/api-docs";

pub type SharedService = Arc<CatalogService<InMemoryStorage>>;

async fn root() -> &'static str {
    "Exploring the Product Catalog API! Visit /api-docs for documentation."
}

/// Full application router: API routes, docs, and the HTTP layers.
pub fn app(service: SharedService, limiter: RateLimiter) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(handlers::api_routes(service, limiter))
        .merge(SwaggerUi::new(DOCS_PATH).url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()) // Request tracing
}

/// Lets `/users/` reach the `/users` route. The docs keep their own
/// trailing-slash redirect.
pub fn with_trailing_slash_tolerance(router: Router) -> Router {
    Router::new()
        .fallback_service(router)
        .layer(map_request(trim_trailing_slash))
}

async fn trim_trailing_slash(mut req: Request) -> Request {
    let path = req.uri().path();
    if path.len() <= 1 || !path.ends_with('/') || path.starts_with(DOCS_PATH) {
        return req;
    }

    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    let rewritten = match req.uri().query() {
        Some(query) => format!("{}?{}", trimmed, query),
        None => trimmed.to_string(),
    };
    if let Ok(path_and_query) = rewritten.parse::<PathAndQuery>() {
        let mut parts = req.uri().clone().into_parts();
        parts.path_and_query = Some(path_and_query);
        if let Ok(uri) = Uri::from_parts(parts) {
            *req.uri_mut() = uri;
        }
    }
    req
}

pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::api::rate_limit::RateLimiter;
pub use crate::auth::jwt::JwtService;
pub use crate::core::errors::CatalogError;
pub use crate::core::services::CatalogService;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;

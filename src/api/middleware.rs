use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::api::{SharedService, models::ApiError};
use crate::auth::jwt::{Claims, NO_TOKEN};
use crate::core::errors::CatalogError;
use crate::core::models::user::Role;

/// Verifies the bearer token and attaches its [`Claims`] to the request.
pub async fn authenticate(
    State(service): State<SharedService>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| CatalogError::Unauthenticated(NO_TOKEN.to_string()))?;

    let claims = service.validate_token(token.trim())?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Lets the request through only when the authenticated role equals the
/// required one. Must run after [`authenticate`].
pub async fn authorize(State(required): State<Role>, req: Request, next: Next) -> Result<Response, ApiError> {
    let permitted = req
        .extensions()
        .get::<Claims>()
        .is_some_and(|claims| claims.role == required);
    if !permitted {
        return Err(CatalogError::Forbidden.into());
    }
    Ok(next.run(req).await)
}

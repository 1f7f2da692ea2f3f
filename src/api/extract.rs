use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::api::models::ApiError;
use crate::core::errors::CatalogError;
use crate::core::validation::{Schema, validate};

/// JSON body checked against `T`'s schema. An empty body counts as `{}`.
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Schema + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| CatalogError::validation(vec![rejection.body_text()]))?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| CatalogError::validation(vec![format!("Malformed JSON body: {}", e)]))?
        };

        validate::<T>(&body)
            .map(Valid)
            .map_err(|details| CatalogError::validation(details).into())
    }
}

/// Query string checked against `T`'s schema.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: Schema + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CatalogError::query_validation(vec![rejection.body_text()]))?;

        let doc: Map<String, Value> = params.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        validate::<T>(&Value::Object(doc))
            .map(ValidQuery)
            .map_err(|details| CatalogError::query_validation(details).into())
    }
}

//! Caller identity extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user id, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller's user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(ApiError::Unauthorized("missing user id"))?;

        raw.to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(AuthUser)
            .ok_or(ApiError::Unauthorized("malformed user id"))
    }
}

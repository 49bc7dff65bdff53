//! Delegated credential check: `Authorization: Bearer <token>` against the configured API token.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Token from the `Authorization` header, if it carries the `Bearer` scheme.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Succeeds when no token is configured or the request presents the configured one.
#[derive(Clone, Debug)]
pub struct Authorized {
    /// Whether a credential was actually checked.
    pub checked: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.api_token.as_deref() else {
            return Ok(Authorized { checked: false });
        };
        match bearer_token(parts) {
            Some(token) if token == expected => Ok(Authorized { checked: true }),
            presented => {
                tracing::warn!(
                    path = %parts.uri.path(),
                    presented = presented.is_some(),
                    "rejected credentials"
                );
                Err(AppError::Unauthorized)
            }
        }
    }
}

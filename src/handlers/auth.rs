//! Auth collaborator surface. Credential issuance lives outside this service.

use crate::extractors::Authorized;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyBody {
    pub authenticated: bool,
    pub required: bool,
}

/// GET /auth/verify — 200 when the presented credential would pass protected routes, 401 otherwise.
/// `required` reflects whether a token is configured at all.
#[utoipa::path(
    get,
    path = "/auth/verify",
    responses(
        (status = 200, description = "Credential accepted", body = VerifyBody),
        (status = 401, description = "Missing or invalid credentials")
    ),
    tag = "auth"
)]
pub async fn verify(State(state): State<AppState>, auth: Authorized) -> Json<VerifyBody> {
    Json(VerifyBody {
        authenticated: auth.checked,
        required: state.api_token.is_some(),
    })
}

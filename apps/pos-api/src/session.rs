//! # Operator Identification
//!
//! The sale commit and payment registration record the acting operator for
//! audit. Full login/session management lives outside this core; this
//! module is the seam where an authenticated-session provider plugs in.
//!
//! The current provider is header-based: the upstream session layer (or a
//! reverse proxy that already authenticated the user) forwards the operator
//! id in `x-operator-id`. Requests without it are rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Header carrying the authenticated operator's identifier.
pub const OPERATOR_HEADER: &str = "x-operator-id";

/// Extractor yielding the acting operator's id.
///
/// ## Usage
/// ```rust,ignore
/// async fn commit_sale(
///     Operator(user_id): Operator,
///     State(state): State<AppState>,
///     Json(request): Json<CommitSaleRequest>,
/// ) -> Result<Json<CommitSaleResponse>, ApiError> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Operator(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(OPERATOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match value {
            Some(id) => Ok(Operator(id.to_string())),
            None => Err(ApiError::unauthorized(format!(
                "missing {} header",
                OPERATOR_HEADER
            ))),
        }
    }
}

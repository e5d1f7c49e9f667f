use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::{Identity, CARD_OWNER_ROLE};
use crate::error::ApiError;

/// Coarse role gate, evaluated after authentication and before any store
/// interaction. Identities without the card-owner role get a uniform 403
/// regardless of which record the request targets.
pub async fn require_card_owner(request: Request, next: Next) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(ApiError::unauthorized)?;

    if !identity.has_role(CARD_OWNER_ROLE) {
        return Err(ApiError::forbidden());
    }

    Ok(next.run(request).await)
}

use axum::{
    extract::{Request, State},
    http::header::{self, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::auth::{verify_password, Identity};
use crate::error::ApiError;
use crate::services::AppState;

/// HTTP Basic authentication middleware: resolves the request's credentials
/// against the identity directory and injects the authenticated `Identity`
/// into request extensions. Any failure is a uniform 401.
pub async fn basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (name, password) = parse_basic_credentials(request.headers())?;

    let account = state
        .directory
        .find_user(&name)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    if !verify_password(&password, &account.salt, &account.password_digest) {
        return Err(ApiError::unauthorized());
    }

    request
        .extensions_mut()
        .insert(Identity::new(account.name, account.roles));

    Ok(next.run(request).await)
}

/// Extract the username/password pair from an `Authorization: Basic` header.
fn parse_basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(ApiError::unauthorized)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized())?;

    let encoded = auth_str
        .strip_prefix("Basic ")
        .ok_or_else(ApiError::unauthorized)?;

    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_| ApiError::unauthorized())?;
    let decoded = String::from_utf8(decoded).map_err(|_| ApiError::unauthorized())?;

    let (name, password) = decoded
        .split_once(':')
        .ok_or_else(ApiError::unauthorized)?;

    if name.is_empty() {
        return Err(ApiError::unauthorized());
    }

    Ok((name.to_string(), password.to_string()))
}

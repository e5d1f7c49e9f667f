use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use tower::ServiceExt;

use cashcard_api::auth::directory::{InMemoryDirectory, UserAccount};
use cashcard_api::auth::CARD_OWNER_ROLE;
use cashcard_api::database::memory_store::InMemoryCardStore;
use cashcard_api::handlers;
use cashcard_api::services::AppState;

pub const SARAH: (&str, &str) = ("sarah1", "abc123");
pub const KUMAR: (&str, &str) = ("kumar2", "xyz789");
pub const HANK: (&str, &str) = ("hank-owns-no-cards", "qrs456");

/// Build the router over a fresh in-memory store and the fixture directory.
pub fn app() -> Router {
    let store = Arc::new(InMemoryCardStore::new());
    let directory = InMemoryDirectory::with_users(vec![
        UserAccount::new(SARAH.0, SARAH.1, vec![CARD_OWNER_ROLE.to_string()]),
        UserAccount::new(KUMAR.0, KUMAR.1, vec![CARD_OWNER_ROLE.to_string()]),
        UserAccount::new(HANK.0, HANK.1, vec!["non-owner".to_string()]),
    ]);

    handlers::router(AppState::new(store, Arc::new(directory)))
}

pub fn basic(credentials: (&str, &str)) -> String {
    let encoded = BASE64.encode(format!("{}:{}", credentials.0, credentials.1));
    format!("Basic {}", encoded)
}

pub fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Drive one request through the router in-process.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .context("failed to read response body")?;
    Ok(bytes.to_vec())
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = body_bytes(response).await?;
    serde_json::from_slice(&bytes).context("response body is not JSON")
}

/// POST a card as the given user and return the Location of the new record.
pub async fn create_card(app: &Router, auth: &str, amount: &str) -> Result<String> {
    let response = send(
        app,
        request(
            Method::POST,
            "/cashcards",
            Some(auth),
            Some(serde_json::json!({ "amount": amount })),
        ),
    )
    .await;

    anyhow::ensure!(
        response.status() == axum::http::StatusCode::CREATED,
        "create failed with {}",
        response.status()
    );

    let location = response
        .headers()
        .get(header::LOCATION)
        .context("missing Location header")?
        .to_str()?
        .to_string();
    Ok(location)
}

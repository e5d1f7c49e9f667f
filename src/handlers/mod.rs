use axum::{
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::middleware::auth::basic_auth;
use crate::middleware::require_role::require_card_owner;
use crate::services::AppState;

pub mod cards;

/// Assemble the application router. Card routes sit behind the Basic-auth
/// and role-gate layers; the root and health endpoints stay public.
pub fn router(state: AppState) -> Router {
    let card_routes = Router::new()
        .route("/cashcards", get(cards::card_list).post(cards::card_post))
        .route(
            "/cashcards/:id",
            get(cards::card_get)
                .put(cards::card_put)
                .delete(cards::card_delete),
        )
        // Innermost layer runs last: authenticate, then gate on role
        .layer(from_fn(require_card_owner))
        .layer(from_fn_with_state(state.clone(), basic_auth))
        .with_state(state.clone());

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .merge(card_routes)
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Cash Card API",
            "version": version,
            "description": "Ownership-scoped cash card REST API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "cashcards": "/cashcards[/:id] (protected - requires card-owner role)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}

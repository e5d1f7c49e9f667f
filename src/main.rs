use std::sync::Arc;

use cashcard_api::auth::directory::{IdentityDirectory, InMemoryDirectory};
use cashcard_api::database::memory_store::InMemoryCardStore;
use cashcard_api::database::pg_store::PgCardStore;
use cashcard_api::database::store::CardStore;
use cashcard_api::database::manager;
use cashcard_api::handlers;
use cashcard_api::services::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, CASHCARD_USERS, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = cashcard_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Cash Card API in {:?} mode", config.environment);

    let state = build_state().await;
    let app = handlers::router(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("CASHCARD_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Cash Card API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Wire the collaborators: Postgres store when DATABASE_URL is set, the
/// in-memory store otherwise; identity directory seeded from CASHCARD_USERS.
async fn build_state() -> AppState {
    let store: Arc<dyn CardStore> = if std::env::var("DATABASE_URL").is_ok() {
        let pool = manager::connect()
            .await
            .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));
        let store = PgCardStore::new(pool);
        store
            .ensure_schema()
            .await
            .unwrap_or_else(|e| panic!("failed to ensure schema: {}", e));
        Arc::new(store)
    } else {
        tracing::warn!("DATABASE_URL not set, using in-memory card store");
        Arc::new(InMemoryCardStore::new())
    };

    let directory: Arc<dyn IdentityDirectory> = match InMemoryDirectory::from_env() {
        Some(directory) => Arc::new(directory),
        None => {
            tracing::warn!("CASHCARD_USERS not set, starting with an empty identity directory");
            Arc::new(InMemoryDirectory::new())
        }
    };

    AppState::new(store, directory)
}

#![allow(dead_code)]

use axum_test::TestServer;
use coursefeed_server::core::AppState;
use coursefeed_server::feed::{Aggregator, EventSource, FeedSettings};
use coursefeed_server::repositories::MIGRATOR;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Crea un database in memoria con migrazioni e fixture applicate
///
/// Una sola connessione: ogni connessione `:memory:` vedrebbe un database diverso.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    MIGRATOR.run(&pool).await.expect("Failed to run migrations");

    sqlx::raw_sql(include_str!("../../fixtures/users.sql"))
        .execute(&pool)
        .await
        .expect("Failed to load users fixture");
    sqlx::raw_sql(include_str!("../../fixtures/feed.sql"))
        .execute(&pool)
        .await
        .expect("Failed to load feed fixture");
    pool
}

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool SQLite
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test e la finestra di default
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(
        pool,
        JWT_SECRET.to_string(),
        FeedSettings::default(),
    ))
}

/// Come `create_test_state`, con una sorgente di eventi aggiuntiva
/// registrata dopo quelle standard
pub fn create_test_state_with_source(
    pool: SqlitePool,
    source: Arc<dyn EventSource>,
) -> Arc<AppState> {
    let mut state = AppState::new(pool.clone(), JWT_SECRET.to_string(), FeedSettings::default());
    state.aggregator =
        Aggregator::with_default_sources(pool, state.course.clone(), &state.settings)
            .with_source(source);
    Arc::new(state)
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = coursefeed_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token per testing, valido per 24 ore
pub fn create_test_jwt(user_id: i64, username: &str) -> String {
    coursefeed_server::core::encode_jwt(username.to_string(), user_id, JWT_SECRET)
        .expect("Failed to create JWT token")
}

/// Valore dell'header Authorization per l'utente indicato
pub fn bearer(user_id: i64, username: &str) -> String {
    format!("Bearer {}", create_test_jwt(user_id, username))
}

//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod feed;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/feed", configure_feed_routes(state.clone()))
        .nest("/usersettings", configure_usersettings_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Configura la route del feed (richiede autenticazione)
fn configure_feed_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(get_feed))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per il salvataggio e il reset delle preferenze
fn configure_usersettings_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(get_usersettings))
        .route("/record", post(record_usersettings))
        .route("/reset", post(reset_usersettings))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni sotto-modulo gestisce gli endpoint HTTP di una funzionalita':
//! il feed delle lettere e le preferenze dei filtri.

pub mod feed;
pub mod preference;

// Re-exports per facilitare l'import
pub use feed::get_feed;
pub use preference::{get_usersettings, record_usersettings, reset_usersettings};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

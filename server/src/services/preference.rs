//! Preference services - Salvataggio e reset delle preferenze dei filtri

use crate::core::{AppError, AppState, require_self};
use crate::dtos::{ResetSettingsDTO, UserSettingsDTO};
use crate::entities::User;
use crate::repositories::{Delete, Read, Upsert};
use axum::{
    Extension,
    extract::{Json, State},
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn get_usersettings(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Option<UserSettingsDTO>>, AppError> {
    let preference = state.preference.read(&current_user.id).await?;
    Ok(Json(preference.map(UserSettingsDTO::from)))
}

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, target = %body.userid))]
pub async fn record_usersettings(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UserSettingsDTO>,
) -> Result<Json<bool>, AppError> {
    // 1. Validare i valori (flag in {0,1}, finestre temporali non negative)
    body.validate()?;
    // 2. Solo il proprietario puo' salvare le proprie preferenze
    require_self(&current_user, body.userid)?;
    // 3. Inserire o sovrascrivere l'unica riga dell'utente
    state.preference.upsert(&body).await?;
    info!("Filter preferences recorded");
    Ok(Json(true))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, target = %body.userid))]
pub async fn reset_usersettings(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<ResetSettingsDTO>,
) -> Result<Json<bool>, AppError> {
    require_self(&current_user, body.userid)?;
    state.preference.delete(&body.userid).await?;
    info!("Filter preferences reset");
    Ok(Json(true))
}

//! Feed services - Costruzione del feed delle lettere per l'utente autenticato

use crate::core::{AppError, AppState};
use crate::dtos::{CourseDTO, FeedDTO, UserSettingsDTO};
use crate::entities::User;
use crate::feed::{Aggregation, Letter, LetterBuilder, LetterContext};
use crate::repositories::{Read, ReadMany};
use axum::{
    Extension,
    extract::{Json, State},
};
use axum_macros::debug_handler;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[debug_handler]
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<Json<FeedDTO>, AppError> {
    let now = chrono::Utc::now().timestamp();
    // 1. Corsi iscritti (servono anche al filtro per corso) ed eventi ordinati
    let Aggregation { courses, events } = state.aggregator.aggregate(current_user.id, now).await?;
    debug!("Aggregated {} events", events.len());

    // 2. Autori da risolvere in un'unica query
    let author_ids: Vec<i64> = events
        .iter()
        .filter_map(|event| event.author_id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let authors = state.user.read_many(&author_ids).await?;

    // 3. Lettere + marcatore di orientamento, poi export piatto
    let ctx = LetterContext::new(&state.settings.wwwroot, courses.clone(), authors);
    let letters = LetterBuilder::new(&ctx).build(events, now)?;
    info!("Feed built with {} letters", letters.len());

    let settings = state.preference.read(&current_user.id).await?;

    Ok(Json(FeedDTO {
        now,
        courses: courses.into_iter().map(CourseDTO::from).collect(),
        letters: letters.iter().map(Letter::export).collect(),
        settings: settings.map(UserSettingsDTO::from),
    }))
}

use crate::core::{AppError, AppState};
use crate::entities::User;
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i64,
    pub username: String,
}

#[instrument(skip(secret), fields(username = %username, id = %id))]
pub fn encode_jwt(
    username: String,
    id: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire = Duration::hours(24);
    let claim = Claims {
        iat: now.timestamp() as usize,
        exp: (now + expire).timestamp() as usize,
        username,
        id,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .inspect_err(|e| error!("Failed to encode JWT token: {:?}", e))
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(
    jwt_token: &str,
    secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .inspect(|data| debug!("JWT token decoded for user: {}", data.claims.username))
    .inspect_err(|e| warn!("Failed to decode JWT token: {:?}", e))
}

/// Risolve l'identita' del chiamante dal token Bearer e la inserisce nelle Extension
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden(
                "Please add the JWT token to the header",
            ));
        }
    };

    let token = match auth_header.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => token.trim(),
        _ => {
            warn!("Authorization header is not a Bearer token");
            return Err(AppError::unauthorized("Unable to decode token"));
        }
    };

    let token_data = decode_jwt(token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Unable to decode token"))?;

    // L'identita' deve esistere e non essere cancellata
    let current_user = match state.user.read(&token_data.claims.id).await? {
        Some(user) if !user.is_deleted() => {
            info!("User authenticated: {}", user.username);
            user
        }
        _ => {
            warn!("User not found or deleted: {}", token_data.claims.id);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Verifica che le chiamate remote sulle preferenze riguardino l'identita' del chiamante
pub fn require_self(current_user: &User, userid: i64) -> Result<(), AppError> {
    if current_user.id != userid {
        warn!(
            "User {} attempted to act on preferences of user {}",
            current_user.id, userid
        );
        return Err(AppError::forbidden("Preferences belong to another user"));
    }
    Ok(())
}

use crate::core::{AppError, AppState};
use crate::repositories::UserStore;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Lifetime of an issued token
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

// content of the jwt token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i32,
    pub username: String,
}

#[instrument(skip(secret), fields(username = %username, id = %id))]
pub fn encode_jwt(username: String, id: i32, secret: &str) -> Result<String, JwtError> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let exp = (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        username,
        id,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .inspect_err(|e| error!("Failed to encode JWT token: {:?}", e))
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, JwtError> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .inspect(|data| debug!("JWT token decoded for user: {}", data.claims.username))
}

/// Resolves the bearer token to a user and stores it in the request extensions
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
            return Err(AppError::forbidden("Please add the JWT token to the header"));
        }
    };

    let mut header = auth_header.split_whitespace();
    let token = match (header.next(), header.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => token,
        _ => {
            warn!("Authorization header is not a bearer token");
            return Err(AppError::unauthorized("Unable to decode token"));
        }
    };
    let token_data = decode_jwt(token, &state.jwt_secret).map_err(|_| {
        warn!("Failed to decode JWT token");
        AppError::unauthorized("Unable to decode token")
    })?;

    // Fetch the user details from the database
    let current_user = match state
        .user
        .find_by_username(&token_data.claims.username)
        .await?
    {
        Some(user) if user.enabled => {
            info!("User authenticated: {}", user.username);
            user
        }
        _ => {
            warn!("User not found or disabled: {}", token_data.claims.username);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

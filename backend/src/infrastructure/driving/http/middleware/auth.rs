use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::application::access::Caller;
use crate::application::AppError;
use crate::domain::{Email, UserId, UserRole};
use crate::infrastructure::AppState;

/// Bearer token claims as issued by the identity provider (HS256).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// Rejects the request with 401 unless a valid bearer token is present.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Caller);

/// Anonymous when no Authorization header is sent; a header that is present
/// but invalid is still a 401.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Caller>);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer(parts)? {
            Some(token) => Ok(AuthenticatedUser(verify(token, &state.jwt_secret)?)),
            None => Err(AppError::Unauthorized("Not authorized, no token".to_string())),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer(parts)? {
            Some(token) => Ok(OptionalUser(Some(verify(token, &state.jwt_secret)?))),
            None => Ok(OptionalUser(None)),
        }
    }
}

fn bearer(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|token| Some(token.trim()))
        .ok_or_else(token_failed)
}

fn verify(token: &str, secret: &str) -> Result<Caller, AppError> {
    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            token_failed()
        })?
        .claims;

    Ok(Caller {
        id: UserId::parse(&claims.sub).map_err(|_| token_failed())?,
        email: Email::new(claims.email).map_err(|_| token_failed())?,
        role: UserRole::parse(&claims.role).ok_or_else(token_failed)?,
    })
}

fn token_failed() -> AppError {
    AppError::Unauthorized("Not authorized, token failed".to_string())
}

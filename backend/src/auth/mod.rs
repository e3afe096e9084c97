use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{axum_http::error_responses::ErrorResponse, config::config_model::AdminSecret};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// An authenticated operator of the payment settings.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub subject: String,
}

#[derive(Debug)]
pub enum AuthError {
    /// The caller's credentials were missing or rejected.
    Unauthorized(anyhow::Error),
    /// The server cannot verify tokens at all.
    Misconfigured(anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unauthorized(err)
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthorized(err) | AuthError::Misconfigured(err) => write!(f, "{err}"),
        }
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AuthError::Unauthorized(err) => {
                ErrorResponse::new(StatusCode::UNAUTHORIZED, format!("Unauthorized: {err}"))
                    .into_response()
            }
            AuthError::Misconfigured(err) => {
                error!(error = %err, "auth: cannot verify admin tokens");
                ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .into_response()
            }
        }
    }
}

pub fn validate_admin_jwt(token: &str, secret: &str) -> Result<AdminClaims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<AdminClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    if token_data.claims.role != ADMIN_ROLE {
        return Err(anyhow::anyhow!("role {:?} is not allowed", token_data.claims.role).into());
    }

    Ok(token_data.claims)
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| anyhow::anyhow!("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| anyhow::anyhow!("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| anyhow::anyhow!("Invalid Authorization header format").into())
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let admin_secret = parts
            .extensions
            .get::<Arc<AdminSecret>>()
            .ok_or_else(|| {
                AuthError::Misconfigured(anyhow::anyhow!("admin secret extension is missing"))
            })?;

        let claims = validate_admin_jwt(token, &admin_secret.secret).map_err(|err| {
            warn!(error = %err, "auth: rejected admin token");
            err
        })?;

        Ok(AdminUser { subject: claims.sub })
    }
}

#[cfg(test)]
mod tests;

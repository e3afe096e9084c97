use std::sync::Arc;

use axum::{
    Extension, Router,
    body::Body,
    http::{Request, Response, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use tower::ServiceExt;

use crate::{
    auth::{ADMIN_ROLE, AdminClaims},
    axum_http::error_responses::ErrorResponse,
    config::config_model::AdminSecret,
};

const SECRET: &str = "router-tests-admin-secret";

pub(crate) fn with_admin_secret(router: Router) -> Router {
    router.layer(Extension(Arc::new(AdminSecret {
        secret: SECRET.to_string(),
    })))
}

fn admin_token() -> String {
    let claims = AdminClaims {
        sub: "ops@example.com".to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: 9999999999,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

/// Sends one admin-authenticated request; `json` also sets the JSON content type.
pub(crate) async fn send(
    router: Router,
    method: &str,
    uri: &str,
    json: Option<&str>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()));

    let request = match json {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    router.oneshot(request).await.unwrap()
}

pub(crate) async fn error_body(response: Response<Body>) -> ErrorResponse {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

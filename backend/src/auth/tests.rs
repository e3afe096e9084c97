use super::*;
use axum::http::Request;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretadminsecretforunittesting";

fn token_for(role: &str, exp: usize, secret: &str) -> String {
    let claims = AdminClaims {
        sub: "ops@example.com".to_string(),
        role: role.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn parts_with(authorization: Option<&str>, secret: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri("/api/v1/payment-methods");
    if let Some(value) = authorization {
        builder = builder.header(axum::http::header::AUTHORIZATION, value);
    }
    let mut request = builder.body(()).unwrap();
    if let Some(secret) = secret {
        request.extensions_mut().insert(Arc::new(AdminSecret {
            secret: secret.to_string(),
        }));
    }
    request.into_parts().0
}

#[test]
fn test_validate_admin_jwt_success() {
    let token = token_for(ADMIN_ROLE, 9999999999, SECRET);

    let claims = validate_admin_jwt(&token, SECRET).expect("Valid token should pass");
    assert_eq!(claims.sub, "ops@example.com");
    assert_eq!(claims.role, ADMIN_ROLE);
}

#[test]
fn test_validate_admin_jwt_expired() {
    let token = token_for(ADMIN_ROLE, 1, SECRET);
    assert!(validate_admin_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_admin_jwt_invalid_signature() {
    let token = token_for(ADMIN_ROLE, 9999999999, "wrongsecret");
    assert!(validate_admin_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_admin_jwt_rejects_other_roles() {
    let token = token_for("authenticated", 9999999999, SECRET);

    let err = validate_admin_jwt(&token, SECRET).unwrap_err();
    assert!(err.to_string().contains("not allowed"), "got: {err}");
}

#[tokio::test]
async fn test_extractor_accepts_bearer_token() {
    let header = format!("Bearer {}", token_for(ADMIN_ROLE, 9999999999, SECRET));
    let mut parts = parts_with(Some(&header), Some(SECRET));

    let admin = AdminUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(admin.subject, "ops@example.com");
}

#[tokio::test]
async fn test_extractor_requires_authorization_header() {
    let mut parts = parts_with(None, Some(SECRET));

    let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(err.to_string().contains("Missing Authorization header"));
}

#[tokio::test]
async fn test_extractor_rejects_non_bearer_scheme() {
    let mut parts = parts_with(Some("Basic YWRtaW46YWRtaW4="), Some(SECRET));

    let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(err.to_string().contains("Invalid Authorization header format"));
}

#[tokio::test]
async fn test_extractor_fails_without_configured_secret() {
    let header = format!("Bearer {}", token_for(ADMIN_ROLE, 9999999999, SECRET));
    let mut parts = parts_with(Some(&header), None);

    let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err, AuthError::Misconfigured(_)));

    let response = axum::response::IntoResponse::into_response(err);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_auth_error_renders_unauthorized() {
    let response =
        axum::response::IntoResponse::into_response(AuthError::from(anyhow::anyhow!("nope")));
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

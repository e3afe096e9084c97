use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::usecases::{
    payment_gateways::PaymentGatewayError, payment_method_configs::PaymentMethodConfigError,
    payment_methods::PaymentMethodError,
};

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// Extractor rejections become `{code,message}` bodies instead of axum's plain text.
impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, rejection.body_text())
    }
}

impl From<PathRejection> for ErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

fn render<E>(status: StatusCode, err: &E) -> Response
where
    E: std::error::Error,
{
    if status.is_server_error() {
        // Don't leak internal error detail to client
        error!(error = %err, "http: request failed");
        return ErrorResponse::new(status, INTERNAL_MESSAGE).into_response();
    }
    ErrorResponse::new(status, err.to_string()).into_response()
}

impl IntoResponse for PaymentMethodError {
    fn into_response(self) -> Response {
        render(self.status_code(), &self)
    }
}

impl IntoResponse for PaymentMethodConfigError {
    fn into_response(self) -> Response {
        render(self.status_code(), &self)
    }
}

impl IntoResponse for PaymentGatewayError {
    fn into_response(self) -> Response {
        render(self.status_code(), &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payment_core::domain::value_objects::validation::ValidationError;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn in_use_maps_to_conflict_with_dependents() {
        let response = PaymentMethodError::InUse { dependents: 2 }.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_of(response).await;
        assert_eq!(body.code, 409);
        assert!(body.message.contains('2'), "got: {}", body.message);
    }

    #[tokio::test]
    async fn validation_message_names_the_field() {
        let err: PaymentMethodConfigError =
            ValidationError::new("discount_percentage", "must not be negative").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert!(body.message.contains("discount_percentage"));
    }

    #[tokio::test]
    async fn internal_errors_are_not_leaked() {
        let err = PaymentGatewayError::Internal(anyhow::anyhow!("connection refused on 10.0.0.7"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.message, INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn not_found_keeps_its_status() {
        let response = PaymentGatewayError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await.code, 404);
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use payment_core::{
    domain::{
        repositories::payment_gateways::PaymentGatewayRepository,
        value_objects::payment_gateways::{EditPaymentGatewayModel, InsertPaymentGatewayModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::payment_gateways::PaymentGatewayPostgres,
    },
};
use uuid::Uuid;

use crate::{
    auth::AdminUser, axum_http::error_responses::ErrorResponse,
    usecases::payment_gateways::PaymentGatewayUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let gateway_repository = PaymentGatewayPostgres::new(Arc::clone(&db_pool));
    let gateway_usecase = PaymentGatewayUseCase::new(Arc::new(gateway_repository));

    router(gateway_usecase)
}

pub fn router<G>(gateway_usecase: PaymentGatewayUseCase<G>) -> Router
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/default", get(get_default::<G>))
        .route("/", get(list::<G>).post(create::<G>))
        .route(
            "/:id",
            get(get_by_id::<G>).put(update::<G>).delete(delete::<G>),
        )
        .with_state(Arc::new(gateway_usecase))
}

pub async fn list<G>(
    State(gateway_usecase): State<Arc<PaymentGatewayUseCase<G>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    match gateway_usecase.list().await {
        Ok(gateways) => (StatusCode::OK, Json(gateways)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_default<G>(
    State(gateway_usecase): State<Arc<PaymentGatewayUseCase<G>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    match gateway_usecase.get_default().await {
        Ok(gateway) => (StatusCode::OK, Json(gateway)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_by_id<G>(
    State(gateway_usecase): State<Arc<PaymentGatewayUseCase<G>>>,
    _admin: AdminUser,
    WithRejection(Path(gateway_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> impl IntoResponse
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    match gateway_usecase.get(gateway_id).await {
        Ok(gateway) => (StatusCode::OK, Json(gateway)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create<G>(
    State(gateway_usecase): State<Arc<PaymentGatewayUseCase<G>>>,
    _admin: AdminUser,
    WithRejection(Json(insert_gateway_model), _): WithRejection<
        Json<InsertPaymentGatewayModel>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    match gateway_usecase.create(insert_gateway_model).await {
        Ok(gateway) => (StatusCode::CREATED, Json(gateway)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update<G>(
    State(gateway_usecase): State<Arc<PaymentGatewayUseCase<G>>>,
    _admin: AdminUser,
    WithRejection(Path(gateway_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
    WithRejection(Json(edit_gateway_model), _): WithRejection<
        Json<EditPaymentGatewayModel>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    match gateway_usecase.update(gateway_id, edit_gateway_model).await {
        Ok(gateway) => (StatusCode::OK, Json(gateway)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete<G>(
    State(gateway_usecase): State<Arc<PaymentGatewayUseCase<G>>>,
    _admin: AdminUser,
    WithRejection(Path(gateway_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> impl IntoResponse
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    match gateway_usecase.delete(gateway_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axum_http::routers::test_support::{error_body, send, with_admin_secret};
    use axum::{body::Body, http::Request};
    use chrono::Utc;
    use payment_core::domain::{
        entities::payment_gateways::{
            PagarmeGatewayEntity, PaymentGatewayEntity, PaymentGatewayRecord,
        },
        repositories::payment_gateways::MockPaymentGatewayRepository,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn unknown_provider_kind_is_a_bad_request_body() {
        let mut gateway_repo = MockPaymentGatewayRepository::new();
        gateway_repo.expect_create().never();
        let app = with_admin_secret(router(PaymentGatewayUseCase::new(Arc::new(gateway_repo))));

        let body = r#"{"name":"Main","provider":{"kind":"cielo","api_key":"a","encryption_key":"b"}}"#;
        let response = send(app, "POST", "/", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.code, 400);
    }

    #[tokio::test]
    async fn requests_without_token_are_unauthorized() {
        let mut gateway_repo = MockPaymentGatewayRepository::new();
        gateway_repo.expect_list().never();
        let app = with_admin_secret(router(PaymentGatewayUseCase::new(Arc::new(gateway_repo))));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_body(response).await.code, 401);
    }

    #[tokio::test]
    async fn list_renders_provider_tagged_by_kind() {
        let gateway_id = Uuid::new_v4();
        let mut gateway_repo = MockPaymentGatewayRepository::new();
        gateway_repo.expect_list().returning(move || {
            let now = Utc::now();
            let record = PaymentGatewayRecord {
                gateway: PaymentGatewayEntity {
                    id: gateway_id,
                    kind: "pagarme".to_string(),
                    name: "Main".to_string(),
                    is_default: true,
                    created_at: now,
                    updated_at: now,
                },
                pagarme: Some(PagarmeGatewayEntity {
                    gateway_id,
                    api_key: "ak_live".to_string(),
                    encryption_key: "ek_live".to_string(),
                }),
            };
            Box::pin(async move { Ok(vec![record]) })
        });
        let app = with_admin_secret(router(PaymentGatewayUseCase::new(Arc::new(gateway_repo))));

        let response = send(app, "GET", "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json[0]["provider"]["kind"], "pagarme");
        assert_eq!(json[0]["provider"]["api_key"], "ak_live");
        assert_eq!(json[0]["is_default"], true);
    }
}

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
        repositories::{
            payment_method_configs::PaymentMethodConfigRepository,
            payment_methods::PaymentMethodRepository,
        },
        value_objects::payment_methods::{EditPaymentMethodModel, InsertPaymentMethodModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            payment_method_configs::PaymentMethodConfigPostgres,
            payment_methods::PaymentMethodPostgres,
        },
    },
};
use uuid::Uuid;

use crate::{
    auth::AdminUser, axum_http::error_responses::ErrorResponse,
    usecases::payment_methods::PaymentMethodUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_method_repository = PaymentMethodPostgres::new(Arc::clone(&db_pool));
    let config_repository = PaymentMethodConfigPostgres::new(Arc::clone(&db_pool));
    let payment_method_usecase = PaymentMethodUseCase::new(
        Arc::new(payment_method_repository),
        Arc::new(config_repository),
    );

    router(payment_method_usecase)
}

pub fn router<M, C>(payment_method_usecase: PaymentMethodUseCase<M, C>) -> Router
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/choices", get(choices::<M, C>))
        .route("/", get(list::<M, C>).post(create::<M, C>))
        .route(
            "/:id",
            get(get_by_id::<M, C>)
                .put(update::<M, C>)
                .delete(delete::<M, C>),
        )
        .with_state(Arc::new(payment_method_usecase))
}

pub async fn choices<M, C>(
    State(payment_method_usecase): State<Arc<PaymentMethodUseCase<M, C>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    (StatusCode::OK, Json(payment_method_usecase.choices())).into_response()
}

pub async fn list<M, C>(
    State(payment_method_usecase): State<Arc<PaymentMethodUseCase<M, C>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    match payment_method_usecase.list().await {
        Ok(payment_methods) => (StatusCode::OK, Json(payment_methods)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_by_id<M, C>(
    State(payment_method_usecase): State<Arc<PaymentMethodUseCase<M, C>>>,
    _admin: AdminUser,
    WithRejection(Path(payment_method_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> impl IntoResponse
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    match payment_method_usecase.get(payment_method_id).await {
        Ok(payment_method) => (StatusCode::OK, Json(payment_method)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create<M, C>(
    State(payment_method_usecase): State<Arc<PaymentMethodUseCase<M, C>>>,
    _admin: AdminUser,
    WithRejection(Json(insert_payment_method_model), _): WithRejection<
        Json<InsertPaymentMethodModel>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    match payment_method_usecase
        .create(insert_payment_method_model)
        .await
    {
        Ok(payment_method) => (StatusCode::CREATED, Json(payment_method)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update<M, C>(
    State(payment_method_usecase): State<Arc<PaymentMethodUseCase<M, C>>>,
    _admin: AdminUser,
    WithRejection(Path(payment_method_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
    WithRejection(Json(edit_payment_method_model), _): WithRejection<
        Json<EditPaymentMethodModel>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    match payment_method_usecase
        .update(payment_method_id, edit_payment_method_model)
        .await
    {
        Ok(payment_method) => (StatusCode::OK, Json(payment_method)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete<M, C>(
    State(payment_method_usecase): State<Arc<PaymentMethodUseCase<M, C>>>,
    _admin: AdminUser,
    WithRejection(Path(payment_method_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> impl IntoResponse
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    match payment_method_usecase.delete(payment_method_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

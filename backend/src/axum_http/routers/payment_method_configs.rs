use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
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
        value_objects::payment_method_configs::{
            EditPaymentMethodConfigModel, InsertPaymentMethodConfigModel,
            ListPaymentMethodConfigsFilter,
        },
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
    usecases::payment_method_configs::PaymentMethodConfigUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let config_repository = PaymentMethodConfigPostgres::new(Arc::clone(&db_pool));
    let payment_method_repository = PaymentMethodPostgres::new(Arc::clone(&db_pool));
    let config_usecase = PaymentMethodConfigUseCase::new(
        Arc::new(config_repository),
        Arc::new(payment_method_repository),
    );

    router(config_usecase)
}

pub fn router<C, M>(config_usecase: PaymentMethodConfigUseCase<C, M>) -> Router
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list::<C, M>).post(create::<C, M>))
        .route(
            "/:id",
            get(get_by_id::<C, M>)
                .put(update::<C, M>)
                .delete(delete::<C, M>),
        )
        .with_state(Arc::new(config_usecase))
}

pub async fn list<C, M>(
    State(config_usecase): State<Arc<PaymentMethodConfigUseCase<C, M>>>,
    _admin: AdminUser,
    WithRejection(Query(filter), _): WithRejection<
        Query<ListPaymentMethodConfigsFilter>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    match config_usecase.list(filter).await {
        Ok(configs) => (StatusCode::OK, Json(configs)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_by_id<C, M>(
    State(config_usecase): State<Arc<PaymentMethodConfigUseCase<C, M>>>,
    _admin: AdminUser,
    WithRejection(Path(config_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> impl IntoResponse
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    match config_usecase.get(config_id).await {
        Ok(config) => (StatusCode::OK, Json(config)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create<C, M>(
    State(config_usecase): State<Arc<PaymentMethodConfigUseCase<C, M>>>,
    _admin: AdminUser,
    WithRejection(Json(insert_config_model), _): WithRejection<
        Json<InsertPaymentMethodConfigModel>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    match config_usecase.create(insert_config_model).await {
        Ok(config) => (StatusCode::CREATED, Json(config)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update<C, M>(
    State(config_usecase): State<Arc<PaymentMethodConfigUseCase<C, M>>>,
    _admin: AdminUser,
    WithRejection(Path(config_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
    WithRejection(Json(edit_config_model), _): WithRejection<
        Json<EditPaymentMethodConfigModel>,
        ErrorResponse,
    >,
) -> impl IntoResponse
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    match config_usecase.update(config_id, edit_config_model).await {
        Ok(config) => (StatusCode::OK, Json(config)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete<C, M>(
    State(config_usecase): State<Arc<PaymentMethodConfigUseCase<C, M>>>,
    _admin: AdminUser,
    WithRejection(Path(config_id), _): WithRejection<Path<Uuid>, ErrorResponse>,
) -> impl IntoResponse
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    match config_usecase.delete(config_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

use std::sync::Arc;

use payment_core::domain::{
    entities::payment_gateways::PaymentGatewayRecord,
    repositories::payment_gateways::PaymentGatewayRepository,
    value_objects::{
        payment_gateways::{
            DefaultGatewayConflict, EditPaymentGatewayModel, InsertPaymentGatewayModel,
            PaymentGatewayModel,
        },
        validation::ValidationError,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("payment gateway not found")]
    NotFound,
    #[error("no default payment gateway is configured")]
    NoDefault,
    #[error("another payment gateway became the default concurrently, retry the request")]
    DefaultConflict,
    #[error("invalid payment gateway: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentGatewayError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentGatewayError::NotFound | PaymentGatewayError::NoDefault => {
                StatusCode::NOT_FOUND
            }
            PaymentGatewayError::DefaultConflict => StatusCode::CONFLICT,
            PaymentGatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentGatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentGatewayResult<T> = std::result::Result<T, PaymentGatewayError>;

pub struct PaymentGatewayUseCase<G>
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    gateway_repo: Arc<G>,
}

impl<G> PaymentGatewayUseCase<G>
where
    G: PaymentGatewayRepository + Send + Sync + 'static,
{
    pub fn new(gateway_repo: Arc<G>) -> Self {
        Self { gateway_repo }
    }

    pub async fn list(&self) -> PaymentGatewayResult<Vec<PaymentGatewayModel>> {
        let records = self.gateway_repo.list().await.map_err(|err| {
            error!(db_error = ?err, "payment_gateways: failed to list gateways");
            PaymentGatewayError::Internal(err)
        })?;

        let models = records
            .into_iter()
            .map(resolve)
            .collect::<PaymentGatewayResult<Vec<_>>>()?;
        info!(count = models.len(), "payment_gateways: listed");
        Ok(models)
    }

    pub async fn get(&self, gateway_id: Uuid) -> PaymentGatewayResult<PaymentGatewayModel> {
        let record = self
            .gateway_repo
            .find_by_id(gateway_id)
            .await
            .map_err(|err| {
                error!(%gateway_id, db_error = ?err, "payment_gateways: failed to load gateway");
                PaymentGatewayError::Internal(err)
            })?
            .ok_or(PaymentGatewayError::NotFound)?;

        resolve(record)
    }

    pub async fn get_default(&self) -> PaymentGatewayResult<PaymentGatewayModel> {
        let record = self
            .gateway_repo
            .find_default()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "payment_gateways: failed to load default gateway");
                PaymentGatewayError::Internal(err)
            })?
            .ok_or(PaymentGatewayError::NoDefault)?;

        resolve(record)
    }

    pub async fn create(
        &self,
        model: InsertPaymentGatewayModel,
    ) -> PaymentGatewayResult<PaymentGatewayModel> {
        let (gateway, extension) = model.to_entities().map_err(|err| {
            warn!(error = %err, "payment_gateways: rejected create");
            err
        })?;
        let gateway_id = gateway.id;
        let kind = gateway.kind.clone();
        let is_default = gateway.is_default;

        let record = self
            .gateway_repo
            .create(gateway, extension)
            .await
            .map_err(|err| {
                write_error(gateway_id, err, "payment_gateways: failed to create gateway")
            })?;

        info!(%gateway_id, %kind, is_default, "payment_gateways: created");
        resolve(record)
    }

    pub async fn update(
        &self,
        gateway_id: Uuid,
        model: EditPaymentGatewayModel,
    ) -> PaymentGatewayResult<PaymentGatewayModel> {
        let current = self.get(gateway_id).await?;

        let (gateway, extension) = model.to_entities(current.kind()).map_err(|err| {
            warn!(%gateway_id, error = %err, "payment_gateways: rejected update");
            err
        })?;
        let credentials_replaced = extension.is_some();

        let record = self
            .gateway_repo
            .update(gateway_id, gateway, extension)
            .await
            .map_err(|err| {
                write_error(gateway_id, err, "payment_gateways: failed to update gateway")
            })?
            .ok_or(PaymentGatewayError::NotFound)?;

        info!(%gateway_id, credentials_replaced, "payment_gateways: updated");
        resolve(record)
    }

    pub async fn delete(&self, gateway_id: Uuid) -> PaymentGatewayResult<()> {
        let deleted = self.gateway_repo.delete(gateway_id).await.map_err(|err| {
            error!(%gateway_id, db_error = ?err, "payment_gateways: failed to delete gateway");
            PaymentGatewayError::Internal(err)
        })?;

        if !deleted {
            return Err(PaymentGatewayError::NotFound);
        }

        info!(%gateway_id, "payment_gateways: deleted");
        Ok(())
    }
}

fn write_error(gateway_id: Uuid, err: anyhow::Error, message: &str) -> PaymentGatewayError {
    if err.downcast_ref::<DefaultGatewayConflict>().is_some() {
        warn!(%gateway_id, "payment_gateways: default flag changed concurrently");
        return PaymentGatewayError::DefaultConflict;
    }
    error!(%gateway_id, db_error = ?err, "{message}");
    PaymentGatewayError::Internal(err)
}

fn resolve(record: PaymentGatewayRecord) -> PaymentGatewayResult<PaymentGatewayModel> {
    let gateway_id = record.gateway.id;
    PaymentGatewayModel::try_from(record).map_err(|err| {
        error!(%gateway_id, error = ?err, "payment_gateways: stored gateway cannot be resolved");
        PaymentGatewayError::Internal(err)
    })
}

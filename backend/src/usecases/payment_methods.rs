use std::sync::Arc;

use payment_core::domain::{
    repositories::{
        payment_method_configs::PaymentMethodConfigRepository,
        payment_methods::PaymentMethodRepository,
    },
    value_objects::{
        payment_methods::{
            EditPaymentMethodModel, InsertPaymentMethodModel, PaymentMethodChoice,
            PaymentMethodModel, ProtectedPaymentMethod, payment_method_choices,
        },
        validation::ValidationError,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentMethodError {
    #[error("payment method not found")]
    NotFound,
    #[error("invalid payment method: {0}")]
    Validation(#[from] ValidationError),
    #[error("payment method is still used by {dependents} payment method config(s)")]
    InUse { dependents: i64 },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentMethodError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentMethodError::NotFound => StatusCode::NOT_FOUND,
            PaymentMethodError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentMethodError::InUse { .. } => StatusCode::CONFLICT,
            PaymentMethodError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentMethodResult<T> = std::result::Result<T, PaymentMethodError>;

pub struct PaymentMethodUseCase<M, C>
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    payment_method_repo: Arc<M>,
    config_repo: Arc<C>,
}

impl<M, C> PaymentMethodUseCase<M, C>
where
    M: PaymentMethodRepository + Send + Sync + 'static,
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
{
    pub fn new(payment_method_repo: Arc<M>, config_repo: Arc<C>) -> Self {
        Self {
            payment_method_repo,
            config_repo,
        }
    }

    pub fn choices(&self) -> Vec<PaymentMethodChoice> {
        payment_method_choices()
    }

    pub async fn list(&self) -> PaymentMethodResult<Vec<PaymentMethodModel>> {
        let rows = self.payment_method_repo.list().await.map_err(|err| {
            error!(db_error = ?err, "payment_methods: failed to list payment methods");
            PaymentMethodError::Internal(err)
        })?;

        let models = rows
            .into_iter()
            .map(PaymentMethodModel::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        info!(count = models.len(), "payment_methods: listed");
        Ok(models)
    }

    pub async fn get(&self, payment_method_id: Uuid) -> PaymentMethodResult<PaymentMethodModel> {
        let row = self
            .payment_method_repo
            .find_by_id(payment_method_id)
            .await
            .map_err(|err| {
                error!(
                    %payment_method_id,
                    db_error = ?err,
                    "payment_methods: failed to load payment method"
                );
                PaymentMethodError::Internal(err)
            })?
            .ok_or(PaymentMethodError::NotFound)?;

        Ok(PaymentMethodModel::try_from(row)?)
    }

    pub async fn create(
        &self,
        model: InsertPaymentMethodModel,
    ) -> PaymentMethodResult<PaymentMethodModel> {
        let entity = model.to_entity().map_err(|err| {
            warn!(error = %err, "payment_methods: rejected create");
            err
        })?;
        let payment_method_id = entity.id;

        let row = self.payment_method_repo.create(entity).await.map_err(|err| {
            error!(
                %payment_method_id,
                db_error = ?err,
                "payment_methods: failed to create payment method"
            );
            PaymentMethodError::Internal(err)
        })?;

        info!(%payment_method_id, name = %row.name, "payment_methods: created");
        Ok(PaymentMethodModel::try_from(row)?)
    }

    pub async fn update(
        &self,
        payment_method_id: Uuid,
        model: EditPaymentMethodModel,
    ) -> PaymentMethodResult<PaymentMethodModel> {
        let entity = model.to_entity().map_err(|err| {
            warn!(%payment_method_id, error = %err, "payment_methods: rejected update");
            err
        })?;

        let row = self
            .payment_method_repo
            .update(payment_method_id, entity)
            .await
            .map_err(|err| {
                error!(
                    %payment_method_id,
                    db_error = ?err,
                    "payment_methods: failed to update payment method"
                );
                PaymentMethodError::Internal(err)
            })?
            .ok_or(PaymentMethodError::NotFound)?;

        info!(%payment_method_id, "payment_methods: updated");
        Ok(PaymentMethodModel::try_from(row)?)
    }

    /// Refuses to delete while any payment method config still points at the method.
    pub async fn delete(&self, payment_method_id: Uuid) -> PaymentMethodResult<()> {
        let dependents = self.count_dependents(payment_method_id).await?;
        if dependents > 0 {
            let err = PaymentMethodError::InUse { dependents };
            warn!(
                %payment_method_id,
                dependents,
                status = err.status_code().as_u16(),
                "payment_methods: delete blocked by dependent configs"
            );
            return Err(err);
        }

        let deleted = match self.payment_method_repo.delete(payment_method_id).await {
            Ok(deleted) => deleted,
            // A config was attached between the count and the delete.
            Err(err) if err.downcast_ref::<ProtectedPaymentMethod>().is_some() => {
                let dependents = self.count_dependents(payment_method_id).await?;
                warn!(
                    %payment_method_id,
                    dependents,
                    "payment_methods: delete rejected by foreign key"
                );
                return Err(PaymentMethodError::InUse { dependents });
            }
            Err(err) => {
                error!(
                    %payment_method_id,
                    db_error = ?err,
                    "payment_methods: failed to delete payment method"
                );
                return Err(PaymentMethodError::Internal(err));
            }
        };

        if !deleted {
            return Err(PaymentMethodError::NotFound);
        }

        info!(%payment_method_id, "payment_methods: deleted");
        Ok(())
    }

    async fn count_dependents(&self, payment_method_id: Uuid) -> PaymentMethodResult<i64> {
        self.config_repo
            .count_by_payment_method(payment_method_id)
            .await
            .map_err(|err| {
                error!(
                    %payment_method_id,
                    db_error = ?err,
                    "payment_methods: failed to count dependent configs"
                );
                PaymentMethodError::Internal(err)
            })
    }
}

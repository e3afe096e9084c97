use std::sync::Arc;

use payment_core::domain::{
    entities::payment_methods::PaymentMethodEntity,
    repositories::{
        payment_method_configs::PaymentMethodConfigRepository,
        payment_methods::PaymentMethodRepository,
    },
    value_objects::{
        payment_method_configs::{
            EditPaymentMethodConfigModel, InsertPaymentMethodConfigModel,
            ListPaymentMethodConfigsFilter, PaymentMethodConfigModel,
        },
        validation::ValidationError,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentMethodConfigError {
    #[error("payment method config not found")]
    NotFound,
    #[error("invalid payment method config: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentMethodConfigError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentMethodConfigError::NotFound => StatusCode::NOT_FOUND,
            PaymentMethodConfigError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentMethodConfigError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentMethodConfigResult<T> = std::result::Result<T, PaymentMethodConfigError>;

pub struct PaymentMethodConfigUseCase<C, M>
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    config_repo: Arc<C>,
    payment_method_repo: Arc<M>,
}

impl<C, M> PaymentMethodConfigUseCase<C, M>
where
    C: PaymentMethodConfigRepository + Send + Sync + 'static,
    M: PaymentMethodRepository + Send + Sync + 'static,
{
    pub fn new(config_repo: Arc<C>, payment_method_repo: Arc<M>) -> Self {
        Self {
            config_repo,
            payment_method_repo,
        }
    }

    pub async fn list(
        &self,
        filter: ListPaymentMethodConfigsFilter,
    ) -> PaymentMethodConfigResult<Vec<PaymentMethodConfigModel>> {
        let records = self
            .config_repo
            .list(filter.payment_method_id)
            .await
            .map_err(|err| {
                error!(
                    payment_method_id = ?filter.payment_method_id,
                    db_error = ?err,
                    "payment_method_configs: failed to list configs"
                );
                PaymentMethodConfigError::Internal(err)
            })?;

        let models = records
            .into_iter()
            .map(PaymentMethodConfigModel::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        info!(count = models.len(), "payment_method_configs: listed");
        Ok(models)
    }

    pub async fn get(&self, config_id: Uuid) -> PaymentMethodConfigResult<PaymentMethodConfigModel> {
        let record = self
            .config_repo
            .find_by_id(config_id)
            .await
            .map_err(|err| {
                error!(
                    %config_id,
                    db_error = ?err,
                    "payment_method_configs: failed to load config"
                );
                PaymentMethodConfigError::Internal(err)
            })?
            .ok_or(PaymentMethodConfigError::NotFound)?;

        Ok(PaymentMethodConfigModel::try_from(record)?)
    }

    pub async fn create(
        &self,
        model: InsertPaymentMethodConfigModel,
    ) -> PaymentMethodConfigResult<PaymentMethodConfigModel> {
        let entity = model.to_entity().map_err(|err| {
            warn!(error = %err, "payment_method_configs: rejected create");
            err
        })?;
        let payment_method = self.referenced_payment_method(entity.payment_method_id).await?;
        let config_id = entity.id;

        let row = self.config_repo.create(entity).await.map_err(|err| {
            error!(
                %config_id,
                db_error = ?err,
                "payment_method_configs: failed to create config"
            );
            PaymentMethodConfigError::Internal(err)
        })?;

        info!(
            %config_id,
            payment_method_id = %payment_method.id,
            "payment_method_configs: created"
        );
        Ok(PaymentMethodConfigModel::try_from((row, payment_method))?)
    }

    pub async fn update(
        &self,
        config_id: Uuid,
        model: EditPaymentMethodConfigModel,
    ) -> PaymentMethodConfigResult<PaymentMethodConfigModel> {
        let entity = model.to_entity().map_err(|err| {
            warn!(%config_id, error = %err, "payment_method_configs: rejected update");
            err
        })?;
        let payment_method = self.referenced_payment_method(entity.payment_method_id).await?;

        let row = self
            .config_repo
            .update(config_id, entity)
            .await
            .map_err(|err| {
                error!(
                    %config_id,
                    db_error = ?err,
                    "payment_method_configs: failed to update config"
                );
                PaymentMethodConfigError::Internal(err)
            })?
            .ok_or(PaymentMethodConfigError::NotFound)?;

        info!(%config_id, "payment_method_configs: updated");
        Ok(PaymentMethodConfigModel::try_from((row, payment_method))?)
    }

    pub async fn delete(&self, config_id: Uuid) -> PaymentMethodConfigResult<()> {
        let deleted = self.config_repo.delete(config_id).await.map_err(|err| {
            error!(
                %config_id,
                db_error = ?err,
                "payment_method_configs: failed to delete config"
            );
            PaymentMethodConfigError::Internal(err)
        })?;

        if !deleted {
            return Err(PaymentMethodConfigError::NotFound);
        }

        info!(%config_id, "payment_method_configs: deleted");
        Ok(())
    }

    async fn referenced_payment_method(
        &self,
        payment_method_id: Uuid,
    ) -> PaymentMethodConfigResult<PaymentMethodEntity> {
        let payment_method = self
            .payment_method_repo
            .find_by_id(payment_method_id)
            .await
            .map_err(|err| {
                error!(
                    %payment_method_id,
                    db_error = ?err,
                    "payment_method_configs: failed to load referenced payment method"
                );
                PaymentMethodConfigError::Internal(err)
            })?;

        payment_method.ok_or_else(|| {
            warn!(
                %payment_method_id,
                "payment_method_configs: referenced payment method does not exist"
            );
            ValidationError::new(
                "payment_method_id",
                format!("payment method {payment_method_id} does not exist"),
            )
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;
    use payment_core::domain::{
        entities::payment_method_configs::PaymentMethodConfigEntity,
        repositories::{
            payment_method_configs::MockPaymentMethodConfigRepository,
            payment_methods::MockPaymentMethodRepository,
        },
    };

    fn sample_payment_method(id: Uuid) -> PaymentMethodEntity {
        let now = Utc::now();
        PaymentMethodEntity {
            id,
            name: "CREDIT CARD".to_string(),
            allow_installments: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_config(id: Uuid, payment_method_id: Uuid) -> PaymentMethodConfigEntity {
        let now = Utc::now();
        PaymentMethodConfigEntity {
            id,
            payment_method_id,
            max_installments: Some(12),
            discount_percentage: Some(5),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_links_config_to_existing_method() {
        let payment_method_id = Uuid::new_v4();
        let payment_method = sample_payment_method(payment_method_id);

        let mut config_repo = MockPaymentMethodConfigRepository::new();
        let mut payment_method_repo = MockPaymentMethodRepository::new();

        payment_method_repo
            .expect_find_by_id()
            .with(eq(payment_method_id))
            .returning(move |_| {
                let row = payment_method.clone();
                Box::pin(async move { Ok(Some(row)) })
            });
        config_repo
            .expect_create()
            .times(1)
            .returning(|entity| Box::pin(async move { Ok(entity.into()) }));

        let usecase =
            PaymentMethodConfigUseCase::new(Arc::new(config_repo), Arc::new(payment_method_repo));

        let model = usecase
            .create(InsertPaymentMethodConfigModel {
                payment_method_id,
                max_installments: Some(10),
                discount_percentage: Some(15),
            })
            .await
            .unwrap();

        assert_eq!(model.payment_method_id, payment_method_id);
        assert_eq!(model.discount_percentage, Some(15));
        assert_eq!(model.to_string(), "Credit Card");
    }

    #[tokio::test]
    async fn create_rejects_unknown_payment_method() {
        let mut config_repo = MockPaymentMethodConfigRepository::new();
        let mut payment_method_repo = MockPaymentMethodRepository::new();

        payment_method_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        config_repo.expect_create().never();

        let usecase =
            PaymentMethodConfigUseCase::new(Arc::new(config_repo), Arc::new(payment_method_repo));

        let err = usecase
            .create(InsertPaymentMethodConfigModel {
                payment_method_id: Uuid::new_v4(),
                max_installments: None,
                discount_percentage: None,
            })
            .await
            .unwrap_err();

        match err {
            PaymentMethodConfigError::Validation(validation) => {
                assert_eq!(validation.field, "payment_method_id")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn negative_discount_never_reaches_storage() {
        let mut config_repo = MockPaymentMethodConfigRepository::new();
        let mut payment_method_repo = MockPaymentMethodRepository::new();
        payment_method_repo.expect_find_by_id().never();
        config_repo.expect_create().never();

        let usecase =
            PaymentMethodConfigUseCase::new(Arc::new(config_repo), Arc::new(payment_method_repo));

        let err = usecase
            .create(InsertPaymentMethodConfigModel {
                payment_method_id: Uuid::new_v4(),
                max_installments: Some(3),
                discount_percentage: Some(-5),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_passes_the_payment_method_filter() {
        let payment_method_id = Uuid::new_v4();
        let record = (
            sample_config(Uuid::new_v4(), payment_method_id),
            sample_payment_method(payment_method_id),
        );

        let mut config_repo = MockPaymentMethodConfigRepository::new();
        config_repo
            .expect_list()
            .with(eq(Some(payment_method_id)))
            .returning(move |_| {
                let record = record.clone();
                Box::pin(async move { Ok(vec![record]) })
            });

        let usecase = PaymentMethodConfigUseCase::new(
            Arc::new(config_repo),
            Arc::new(MockPaymentMethodRepository::new()),
        );

        let models = usecase
            .list(ListPaymentMethodConfigsFilter {
                payment_method_id: Some(payment_method_id),
            })
            .await
            .unwrap();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].max_installments, Some(12));
    }

    #[tokio::test]
    async fn update_of_missing_config_is_not_found() {
        let payment_method_id = Uuid::new_v4();
        let payment_method = sample_payment_method(payment_method_id);

        let mut config_repo = MockPaymentMethodConfigRepository::new();
        let mut payment_method_repo = MockPaymentMethodRepository::new();

        payment_method_repo.expect_find_by_id().returning(move |_| {
            let row = payment_method.clone();
            Box::pin(async move { Ok(Some(row)) })
        });
        config_repo
            .expect_update()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase =
            PaymentMethodConfigUseCase::new(Arc::new(config_repo), Arc::new(payment_method_repo));

        let err = usecase
            .update(
                Uuid::new_v4(),
                EditPaymentMethodConfigModel {
                    payment_method_id,
                    max_installments: None,
                    discount_percentage: Some(0),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentMethodConfigError::NotFound));
    }

    #[tokio::test]
    async fn deleting_a_missing_config_is_not_found() {
        let mut config_repo = MockPaymentMethodConfigRepository::new();
        config_repo
            .expect_delete()
            .returning(|_| Box::pin(async { Ok(false) }));

        let usecase = PaymentMethodConfigUseCase::new(
            Arc::new(config_repo),
            Arc::new(MockPaymentMethodRepository::new()),
        );

        let err = usecase.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PaymentMethodConfigError::NotFound));
    }
}

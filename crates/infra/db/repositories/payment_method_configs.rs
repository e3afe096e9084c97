use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{payment_method_configs, payment_methods},
    },
};
use domain::{
    entities::{
        payment_method_configs::{
            EditPaymentMethodConfigEntity, InsertPaymentMethodConfigEntity,
            PaymentMethodConfigEntity, PaymentMethodConfigRecord,
        },
        payment_methods::PaymentMethodEntity,
    },
    repositories::payment_method_configs::PaymentMethodConfigRepository,
};

pub struct PaymentMethodConfigPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentMethodConfigPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentMethodConfigRepository for PaymentMethodConfigPostgres {
    async fn create(
        &self,
        config: InsertPaymentMethodConfigEntity,
    ) -> Result<PaymentMethodConfigEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(payment_method_configs::table)
            .values(&config)
            .returning(PaymentMethodConfigEntity::as_returning())
            .get_result::<PaymentMethodConfigEntity>(&mut conn)?;

        Ok(row)
    }

    async fn find_by_id(&self, config_id: Uuid) -> Result<Option<PaymentMethodConfigRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let record = payment_method_configs::table
            .inner_join(payment_methods::table)
            .filter(payment_method_configs::id.eq(config_id))
            .select((
                PaymentMethodConfigEntity::as_select(),
                PaymentMethodEntity::as_select(),
            ))
            .first::<PaymentMethodConfigRecord>(&mut conn)
            .optional()?;

        Ok(record)
    }

    async fn list(&self, payment_method_id: Option<Uuid>) -> Result<Vec<PaymentMethodConfigRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = payment_method_configs::table
            .inner_join(payment_methods::table)
            .select((
                PaymentMethodConfigEntity::as_select(),
                PaymentMethodEntity::as_select(),
            ))
            .order(payment_method_configs::created_at.asc())
            .into_boxed();

        if let Some(payment_method_id) = payment_method_id {
            query = query.filter(payment_method_configs::payment_method_id.eq(payment_method_id));
        }

        let records = query.load::<PaymentMethodConfigRecord>(&mut conn)?;

        Ok(records)
    }

    async fn update(
        &self,
        config_id: Uuid,
        config: EditPaymentMethodConfigEntity,
    ) -> Result<Option<PaymentMethodConfigEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(payment_method_configs::table.find(config_id))
            .set(&config)
            .returning(PaymentMethodConfigEntity::as_returning())
            .get_result::<PaymentMethodConfigEntity>(&mut conn)
            .optional()?;

        Ok(row)
    }

    async fn delete(&self, config_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(payment_method_configs::table.find(config_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn count_by_payment_method(&self, payment_method_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = payment_method_configs::table
            .filter(payment_method_configs::payment_method_id.eq(payment_method_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            entities::payment_methods::InsertPaymentMethodEntity,
            repositories::payment_methods::PaymentMethodRepository,
        },
        infra::db::{
            postgres::test_pool::database_pool,
            repositories::payment_methods::PaymentMethodPostgres,
        },
    };
    use chrono::Utc;

    #[tokio::test]
    async fn list_filters_by_payment_method_and_clears_nullable_columns() {
        let Some(db_pool) = database_pool() else { return };
        let payment_method_repo = PaymentMethodPostgres::new(Arc::clone(&db_pool));
        let config_repo = PaymentMethodConfigPostgres::new(db_pool);

        let now = Utc::now();
        let payment_method = payment_method_repo
            .create(InsertPaymentMethodEntity {
                id: Uuid::new_v4(),
                name: "CREDIT CARD".to_string(),
                allow_installments: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let config = config_repo
            .create(InsertPaymentMethodConfigEntity {
                id: Uuid::new_v4(),
                payment_method_id: payment_method.id,
                max_installments: Some(12),
                discount_percentage: Some(10),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let records = config_repo.list(Some(payment_method.id)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0.id, config.id);
        assert_eq!(records[0].1.id, payment_method.id);
        assert_eq!(
            config_repo.count_by_payment_method(payment_method.id).await.unwrap(),
            1
        );

        let updated = config_repo
            .update(
                config.id,
                EditPaymentMethodConfigEntity {
                    payment_method_id: payment_method.id,
                    max_installments: None,
                    discount_percentage: Some(0),
                    updated_at: Utc::now(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.max_installments, None);
        assert_eq!(updated.discount_percentage, Some(0));

        assert!(config_repo.delete(config.id).await.unwrap());
        assert!(payment_method_repo.delete(payment_method.id).await.unwrap());
    }
}

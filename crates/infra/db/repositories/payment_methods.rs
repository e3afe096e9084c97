use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl, delete, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::payment_methods},
};
use domain::{
    entities::payment_methods::{
        EditPaymentMethodEntity, InsertPaymentMethodEntity, PaymentMethodEntity,
    },
    repositories::payment_methods::PaymentMethodRepository,
    value_objects::payment_methods::ProtectedPaymentMethod,
};

pub struct PaymentMethodPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentMethodPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentMethodRepository for PaymentMethodPostgres {
    async fn create(&self, payment_method: InsertPaymentMethodEntity) -> Result<PaymentMethodEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(payment_methods::table)
            .values(&payment_method)
            .returning(PaymentMethodEntity::as_returning())
            .get_result::<PaymentMethodEntity>(&mut conn)?;

        Ok(row)
    }

    async fn find_by_id(&self, payment_method_id: Uuid) -> Result<Option<PaymentMethodEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = payment_methods::table
            .find(payment_method_id)
            .select(PaymentMethodEntity::as_select())
            .first::<PaymentMethodEntity>(&mut conn)
            .optional()?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<PaymentMethodEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payment_methods::table
            .order(payment_methods::created_at.asc())
            .select(PaymentMethodEntity::as_select())
            .load::<PaymentMethodEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn update(
        &self,
        payment_method_id: Uuid,
        payment_method: EditPaymentMethodEntity,
    ) -> Result<Option<PaymentMethodEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = update(payment_methods::table.find(payment_method_id))
            .set(&payment_method)
            .returning(PaymentMethodEntity::as_returning())
            .get_result::<PaymentMethodEntity>(&mut conn)
            .optional()?;

        Ok(row)
    }

    async fn delete(&self, payment_method_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // payment_method_configs.payment_method_id is ON DELETE RESTRICT.
        match delete(payment_methods::table.find(payment_method_id)).execute(&mut conn) {
            Ok(deleted) => Ok(deleted > 0),
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                Err(ProtectedPaymentMethod { payment_method_id }.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            entities::payment_method_configs::InsertPaymentMethodConfigEntity,
            repositories::payment_method_configs::PaymentMethodConfigRepository,
        },
        infra::db::{
            postgres::test_pool::database_pool,
            repositories::payment_method_configs::PaymentMethodConfigPostgres,
        },
    };
    use chrono::Utc;

    fn new_payment_method() -> InsertPaymentMethodEntity {
        let now = Utc::now();
        InsertPaymentMethodEntity {
            id: Uuid::new_v4(),
            name: "BANK SLIP".to_string(),
            allow_installments: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_config(payment_method_id: Uuid) -> InsertPaymentMethodConfigEntity {
        let now = Utc::now();
        InsertPaymentMethodConfigEntity {
            id: Uuid::new_v4(),
            payment_method_id,
            max_installments: Some(0),
            discount_percentage: Some(5),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn restrict_key_blocks_deleting_a_referenced_method() {
        let Some(db_pool) = database_pool() else { return };
        let payment_method_repo = PaymentMethodPostgres::new(Arc::clone(&db_pool));
        let config_repo = PaymentMethodConfigPostgres::new(db_pool);

        let payment_method = payment_method_repo
            .create(new_payment_method())
            .await
            .unwrap();
        let config = config_repo
            .create(new_config(payment_method.id))
            .await
            .unwrap();

        let err = payment_method_repo
            .delete(payment_method.id)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProtectedPaymentMethod>(),
            Some(&ProtectedPaymentMethod {
                payment_method_id: payment_method.id
            })
        );
        assert!(payment_method_repo
            .find_by_id(payment_method.id)
            .await
            .unwrap()
            .is_some());

        assert!(config_repo.delete(config.id).await.unwrap());
        assert!(payment_method_repo.delete(payment_method.id).await.unwrap());
        assert!(!payment_method_repo.delete(payment_method.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_moves_updated_at() {
        let Some(db_pool) = database_pool() else { return };
        let repo = PaymentMethodPostgres::new(db_pool);

        let created = repo.create(new_payment_method()).await.unwrap();
        let edit = EditPaymentMethodEntity {
            name: "CREDIT CARD".to_string(),
            allow_installments: true,
            updated_at: Utc::now(),
        };

        let updated = repo.update(created.id, edit).await.unwrap().unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.name, "CREDIT CARD");

        assert!(repo.delete(created.id).await.unwrap());
    }
}

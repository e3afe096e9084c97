use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_method_configs::{
    EditPaymentMethodConfigEntity, InsertPaymentMethodConfigEntity, PaymentMethodConfigEntity,
    PaymentMethodConfigRecord,
};

#[async_trait]
#[automock]
pub trait PaymentMethodConfigRepository {
    async fn create(
        &self,
        config: InsertPaymentMethodConfigEntity,
    ) -> Result<PaymentMethodConfigEntity>;
    async fn find_by_id(&self, config_id: Uuid) -> Result<Option<PaymentMethodConfigRecord>>;
    async fn list(&self, payment_method_id: Option<Uuid>) -> Result<Vec<PaymentMethodConfigRecord>>;
    async fn update(
        &self,
        config_id: Uuid,
        config: EditPaymentMethodConfigEntity,
    ) -> Result<Option<PaymentMethodConfigEntity>>;
    async fn delete(&self, config_id: Uuid) -> Result<bool>;
    async fn count_by_payment_method(&self, payment_method_id: Uuid) -> Result<i64>;
}

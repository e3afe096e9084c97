use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_methods::{
    EditPaymentMethodEntity, InsertPaymentMethodEntity, PaymentMethodEntity,
};

#[async_trait]
#[automock]
pub trait PaymentMethodRepository {
    async fn create(&self, payment_method: InsertPaymentMethodEntity) -> Result<PaymentMethodEntity>;
    async fn find_by_id(&self, payment_method_id: Uuid) -> Result<Option<PaymentMethodEntity>>;
    async fn list(&self) -> Result<Vec<PaymentMethodEntity>>;
    async fn update(
        &self,
        payment_method_id: Uuid,
        payment_method: EditPaymentMethodEntity,
    ) -> Result<Option<PaymentMethodEntity>>;
    /// Returns `false` when no row matched. Fails with `ProtectedPaymentMethod` when configs still reference it.
    async fn delete(&self, payment_method_id: Uuid) -> Result<bool>;
}

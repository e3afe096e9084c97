use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_gateways::{
    EditGatewayExtensionEntity, EditPaymentGatewayEntity, InsertGatewayExtensionEntity,
    InsertPaymentGatewayEntity, PaymentGatewayRecord,
};

/// Storage for the polymorphic gateway collection. Every read returns the base row
/// together with its extension rows so callers can resolve the concrete kind.
#[async_trait]
#[automock]
pub trait PaymentGatewayRepository {
    /// Writes the base and extension rows atomically. When `is_default` is set, clears it on every other gateway.
    async fn create(
        &self,
        gateway: InsertPaymentGatewayEntity,
        extension: InsertGatewayExtensionEntity,
    ) -> Result<PaymentGatewayRecord>;
    async fn find_by_id(&self, gateway_id: Uuid) -> Result<Option<PaymentGatewayRecord>>;
    async fn find_default(&self) -> Result<Option<PaymentGatewayRecord>>;
    async fn list(&self) -> Result<Vec<PaymentGatewayRecord>>;
    async fn update(
        &self,
        gateway_id: Uuid,
        gateway: EditPaymentGatewayEntity,
        extension: Option<EditGatewayExtensionEntity>,
    ) -> Result<Option<PaymentGatewayRecord>>;
    async fn delete(&self, gateway_id: Uuid) -> Result<bool>;
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::{pagarme_gateways, payment_gateways};

/// Base row shared by every gateway kind. `kind` names the extension table holding the rest.
#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_gateways)]
pub struct PaymentGatewayEntity {
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payment_gateways)]
pub struct InsertPaymentGatewayEntity {
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = payment_gateways)]
pub struct EditPaymentGatewayEntity {
    pub name: String,
    pub is_default: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable, Insertable)]
#[diesel(table_name = pagarme_gateways, primary_key(gateway_id))]
pub struct PagarmeGatewayEntity {
    pub gateway_id: Uuid,
    pub api_key: String,
    pub encryption_key: String,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = pagarme_gateways)]
pub struct EditPagarmeGatewayEntity {
    pub api_key: String,
    pub encryption_key: String,
}

/// Extension row written alongside a new base row.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertGatewayExtensionEntity {
    Pagarme(PagarmeGatewayEntity),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditGatewayExtensionEntity {
    Pagarme(EditPagarmeGatewayEntity),
}

/// A base row left-joined with every extension table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentGatewayRecord {
    pub gateway: PaymentGatewayEntity,
    pub pagarme: Option<PagarmeGatewayEntity>,
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::entities::payment_methods::PaymentMethodEntity,
    infra::db::postgres::schema::payment_method_configs,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_method_configs)]
pub struct PaymentMethodConfigEntity {
    pub id: Uuid,
    pub payment_method_id: Uuid,
    pub max_installments: Option<i16>,
    pub discount_percentage: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payment_method_configs)]
pub struct InsertPaymentMethodConfigEntity {
    pub id: Uuid,
    pub payment_method_id: Uuid,
    pub max_installments: Option<i16>,
    pub discount_percentage: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the editable columns; `None` clears a nullable column.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = payment_method_configs, treat_none_as_null = true)]
pub struct EditPaymentMethodConfigEntity {
    pub payment_method_id: Uuid,
    pub max_installments: Option<i16>,
    pub discount_percentage: Option<i16>,
    pub updated_at: DateTime<Utc>,
}

impl From<InsertPaymentMethodConfigEntity> for PaymentMethodConfigEntity {
    fn from(value: InsertPaymentMethodConfigEntity) -> Self {
        Self {
            id: value.id,
            payment_method_id: value.payment_method_id,
            max_installments: value.max_installments,
            discount_percentage: value.discount_percentage,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// A config row joined with the payment method it belongs to.
pub type PaymentMethodConfigRecord = (PaymentMethodConfigEntity, PaymentMethodEntity);

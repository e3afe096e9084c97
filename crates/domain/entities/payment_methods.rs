use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::payment_methods;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_methods)]
pub struct PaymentMethodEntity {
    pub id: Uuid,
    pub name: String,
    pub allow_installments: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payment_methods)]
pub struct InsertPaymentMethodEntity {
    pub id: Uuid,
    pub name: String,
    pub allow_installments: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// No `created_at`: it is written once on insert.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = payment_methods)]
pub struct EditPaymentMethodEntity {
    pub name: String,
    pub allow_installments: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<InsertPaymentMethodEntity> for PaymentMethodEntity {
    fn from(value: InsertPaymentMethodEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            allow_installments: value.allow_installments,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

use std::fmt::Display;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::payment_methods::{
        EditPaymentMethodEntity, InsertPaymentMethodEntity, PaymentMethodEntity,
    },
    value_objects::{enums::payment_methods::PaymentMethodName, validation::ValidationError},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodModel {
    pub id: Uuid,
    pub name: PaymentMethodName,
    pub label: String,
    pub allow_installments: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentMethodEntity> for PaymentMethodModel {
    type Error = anyhow::Error;

    fn try_from(value: PaymentMethodEntity) -> Result<Self, Self::Error> {
        let name = PaymentMethodName::from_str(&value.name).ok_or_else(|| {
            anyhow!(
                "payment method {} has unknown stored name {:?}",
                value.id,
                value.name
            )
        })?;

        Ok(Self {
            id: value.id,
            name,
            label: name.label().to_string(),
            allow_installments: value.allow_installments,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl Display for PaymentMethodModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.label())
    }
}

/// One `(value, label)` pair of the payment method choice list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodChoice {
    pub value: PaymentMethodName,
    pub label: String,
}

pub fn payment_method_choices() -> Vec<PaymentMethodChoice> {
    PaymentMethodName::ALL
        .iter()
        .map(|name| PaymentMethodChoice {
            value: *name,
            label: name.label().to_string(),
        })
        .collect()
}

fn default_allow_installments() -> bool {
    true
}

pub fn parse_payment_method_name(raw: &str) -> Result<PaymentMethodName, ValidationError> {
    PaymentMethodName::from_str(raw.trim()).ok_or_else(|| {
        ValidationError::new(
            "name",
            format!("{raw:?} is not one of CREDIT CARD, BANK SLIP"),
        )
    })
}

/// `name` stays a raw string so unknown values surface as validation errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertPaymentMethodModel {
    pub name: String,
    #[serde(default = "default_allow_installments")]
    pub allow_installments: bool,
}

impl InsertPaymentMethodModel {
    pub fn to_entity(&self) -> Result<InsertPaymentMethodEntity, ValidationError> {
        let name = parse_payment_method_name(&self.name)?;
        let now = Utc::now();

        Ok(InsertPaymentMethodEntity {
            id: Uuid::new_v4(),
            name: name.as_str().to_string(),
            allow_installments: self.allow_installments,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditPaymentMethodModel {
    pub name: String,
    #[serde(default = "default_allow_installments")]
    pub allow_installments: bool,
}

impl EditPaymentMethodModel {
    pub fn to_entity(&self) -> Result<EditPaymentMethodEntity, ValidationError> {
        let name = parse_payment_method_name(&self.name)?;

        Ok(EditPaymentMethodEntity {
            name: name.as_str().to_string(),
            allow_installments: self.allow_installments,
            updated_at: Utc::now(),
        })
    }
}

/// Raised when a delete would orphan payment method configs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("payment method {payment_method_id} is still referenced by payment method configs")]
pub struct ProtectedPaymentMethod {
    pub payment_method_id: Uuid,
}

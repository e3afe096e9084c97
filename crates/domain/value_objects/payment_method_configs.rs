use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::payment_method_configs::{
        EditPaymentMethodConfigEntity, InsertPaymentMethodConfigEntity, PaymentMethodConfigRecord,
    },
    value_objects::{enums::payment_methods::PaymentMethodName, validation::ValidationError},
};

pub const MAX_DISCOUNT_PERCENTAGE: i16 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodConfigModel {
    pub id: Uuid,
    pub payment_method_id: Uuid,
    pub payment_method_name: PaymentMethodName,
    pub max_installments: Option<i16>,
    pub discount_percentage: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentMethodConfigRecord> for PaymentMethodConfigModel {
    type Error = anyhow::Error;

    fn try_from((config, payment_method): PaymentMethodConfigRecord) -> Result<Self, Self::Error> {
        let payment_method_name = PaymentMethodName::from_str(&payment_method.name)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "payment method {} has unknown stored name {:?}",
                    payment_method.id,
                    payment_method.name
                )
            })?;

        Ok(Self {
            id: config.id,
            payment_method_id: config.payment_method_id,
            payment_method_name,
            max_installments: config.max_installments,
            discount_percentage: config.discount_percentage,
            created_at: config.created_at,
            updated_at: config.updated_at,
        })
    }
}

impl Display for PaymentMethodConfigModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.payment_method_name.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ListPaymentMethodConfigsFilter {
    pub payment_method_id: Option<Uuid>,
}

/// Leave at 0 (or unset) when the method does not allow installments.
pub fn validate_max_installments(value: Option<i16>) -> Result<(), ValidationError> {
    match value {
        Some(max) if max < 0 => Err(ValidationError::new(
            "max_installments",
            "must not be negative",
        )),
        _ => Ok(()),
    }
}

pub fn validate_discount_percentage(value: Option<i16>) -> Result<(), ValidationError> {
    match value {
        Some(discount) if discount < 0 => Err(ValidationError::new(
            "discount_percentage",
            "must not be negative",
        )),
        Some(discount) if discount > MAX_DISCOUNT_PERCENTAGE => Err(ValidationError::new(
            "discount_percentage",
            format!("must be at most {MAX_DISCOUNT_PERCENTAGE}"),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertPaymentMethodConfigModel {
    pub payment_method_id: Uuid,
    #[serde(default)]
    pub max_installments: Option<i16>,
    #[serde(default)]
    pub discount_percentage: Option<i16>,
}

impl InsertPaymentMethodConfigModel {
    pub fn to_entity(&self) -> Result<InsertPaymentMethodConfigEntity, ValidationError> {
        validate_max_installments(self.max_installments)?;
        validate_discount_percentage(self.discount_percentage)?;
        let now = Utc::now();

        Ok(InsertPaymentMethodConfigEntity {
            id: Uuid::new_v4(),
            payment_method_id: self.payment_method_id,
            max_installments: self.max_installments,
            discount_percentage: self.discount_percentage,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Replaces every editable field; omitted optional fields are cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditPaymentMethodConfigModel {
    pub payment_method_id: Uuid,
    #[serde(default)]
    pub max_installments: Option<i16>,
    #[serde(default)]
    pub discount_percentage: Option<i16>,
}

impl EditPaymentMethodConfigModel {
    pub fn to_entity(&self) -> Result<EditPaymentMethodConfigEntity, ValidationError> {
        validate_max_installments(self.max_installments)?;
        validate_discount_percentage(self.discount_percentage)?;

        Ok(EditPaymentMethodConfigEntity {
            payment_method_id: self.payment_method_id,
            max_installments: self.max_installments,
            discount_percentage: self.discount_percentage,
            updated_at: Utc::now(),
        })
    }
}

use std::fmt::{Debug, Display};

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    entities::payment_gateways::{
        EditGatewayExtensionEntity, EditPagarmeGatewayEntity, EditPaymentGatewayEntity,
        InsertGatewayExtensionEntity, InsertPaymentGatewayEntity, PagarmeGatewayEntity,
        PaymentGatewayRecord,
    },
    value_objects::{
        enums::gateway_kinds::GatewayKind,
        validation::{ValidationError, require_text},
    },
};

pub const MAX_GATEWAY_TEXT_LENGTH: usize = 255;

/// Name of the partial unique index allowing a single default gateway.
pub const SINGLE_DEFAULT_INDEX: &str = "payment_gateways_single_default";

/// Raised when another gateway became the default while this write was in flight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("payment gateway {gateway_id} cannot become the default: another default was set concurrently")]
pub struct DefaultGatewayConflict {
    pub gateway_id: Uuid,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct PagarmeCredentials {
    pub api_key: String,
    pub encryption_key: String,
}

// Keys must never reach the logs.
impl Debug for PagarmeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagarmeCredentials")
            .field("api_key", &"<redacted>")
            .field("encryption_key", &"<redacted>")
            .finish()
    }
}

/// Kind-specific part of a gateway, tagged by `kind` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GatewayProvider {
    Pagarme(PagarmeCredentials),
}

impl GatewayProvider {
    pub fn kind(&self) -> GatewayKind {
        match self {
            GatewayProvider::Pagarme(_) => GatewayKind::Pagarme,
        }
    }

    /// Returns a copy with trimmed, length-checked fields.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        match self {
            GatewayProvider::Pagarme(credentials) => {
                Ok(GatewayProvider::Pagarme(PagarmeCredentials {
                    api_key: require_text("api_key", &credentials.api_key, MAX_GATEWAY_TEXT_LENGTH)?,
                    encryption_key: require_text(
                        "encryption_key",
                        &credentials.encryption_key,
                        MAX_GATEWAY_TEXT_LENGTH,
                    )?,
                }))
            }
        }
    }

    fn to_insert_entity(&self, gateway_id: Uuid) -> InsertGatewayExtensionEntity {
        match self {
            GatewayProvider::Pagarme(credentials) => {
                InsertGatewayExtensionEntity::Pagarme(PagarmeGatewayEntity {
                    gateway_id,
                    api_key: credentials.api_key.clone(),
                    encryption_key: credentials.encryption_key.clone(),
                })
            }
        }
    }

    fn to_edit_entity(&self) -> EditGatewayExtensionEntity {
        match self {
            GatewayProvider::Pagarme(credentials) => {
                EditGatewayExtensionEntity::Pagarme(EditPagarmeGatewayEntity {
                    api_key: credentials.api_key.clone(),
                    encryption_key: credentials.encryption_key.clone(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentGatewayModel {
    pub id: Uuid,
    pub name: String,
    pub is_default: bool,
    pub provider: GatewayProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentGatewayModel {
    pub fn kind(&self) -> GatewayKind {
        self.provider.kind()
    }
}

/// Resolves a base row to its concrete kind using the `kind` discriminator.
impl TryFrom<PaymentGatewayRecord> for PaymentGatewayModel {
    type Error = anyhow::Error;

    fn try_from(record: PaymentGatewayRecord) -> Result<Self> {
        let PaymentGatewayRecord { gateway, pagarme } = record;

        let kind = gateway
            .kind
            .parse::<GatewayKind>()
            .map_err(|err| anyhow!("payment gateway {}: {}", gateway.id, err))?;

        let provider = match kind {
            GatewayKind::Pagarme => {
                let row = pagarme.ok_or_else(|| {
                    anyhow!("payment gateway {} is missing its pagarme row", gateway.id)
                })?;
                GatewayProvider::Pagarme(PagarmeCredentials {
                    api_key: row.api_key,
                    encryption_key: row.encryption_key,
                })
            }
        };

        Ok(Self {
            id: gateway.id,
            name: gateway.name,
            is_default: gateway.is_default,
            provider,
            created_at: gateway.created_at,
            updated_at: gateway.updated_at,
        })
    }
}

impl Display for PaymentGatewayModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertPaymentGatewayModel {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    pub provider: GatewayProvider,
}

impl InsertPaymentGatewayModel {
    pub fn to_entities(
        &self,
    ) -> Result<(InsertPaymentGatewayEntity, InsertGatewayExtensionEntity), ValidationError> {
        let name = require_text("name", &self.name, MAX_GATEWAY_TEXT_LENGTH)?;
        let provider = self.provider.validated()?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let gateway = InsertPaymentGatewayEntity {
            id,
            kind: provider.kind().to_string(),
            name,
            is_default: self.is_default,
            created_at: now,
            updated_at: now,
        };

        Ok((gateway, provider.to_insert_entity(id)))
    }
}

/// `provider: None` keeps the stored credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditPaymentGatewayModel {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub provider: Option<GatewayProvider>,
}

impl EditPaymentGatewayModel {
    pub fn to_entities(
        &self,
        stored_kind: GatewayKind,
    ) -> Result<(EditPaymentGatewayEntity, Option<EditGatewayExtensionEntity>), ValidationError>
    {
        let name = require_text("name", &self.name, MAX_GATEWAY_TEXT_LENGTH)?;

        let extension = match &self.provider {
            Some(provider) => {
                if provider.kind() != stored_kind {
                    return Err(ValidationError::new(
                        "provider",
                        format!(
                            "gateway kind cannot change from {} to {}",
                            stored_kind,
                            provider.kind()
                        ),
                    ));
                }
                Some(provider.validated()?.to_edit_entity())
            }
            None => None,
        };

        let gateway = EditPaymentGatewayEntity {
            name,
            is_default: self.is_default,
            updated_at: Utc::now(),
        };

        Ok((gateway, extension))
    }
}

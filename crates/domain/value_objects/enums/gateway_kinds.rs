use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Discriminator stored in `payment_gateways.kind`, one per concrete gateway table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
    Pagarme,
}

impl GatewayKind {
    pub fn label(&self) -> &'static str {
        match self {
            GatewayKind::Pagarme => "Pagar.me",
        }
    }
}

impl Display for GatewayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            GatewayKind::Pagarme => "pagarme",
        };
        write!(f, "{}", kind)
    }
}

impl FromStr for GatewayKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "pagarme" => Ok(GatewayKind::Pagarme),
            other => Err(format!("Unsupported gateway kind: {}", other)),
        }
    }
}

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Payment methods a merchant can offer at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethodName {
    #[serde(rename = "CREDIT CARD", alias = "CREDIT_CARD")]
    CreditCard,
    #[serde(rename = "BANK SLIP", alias = "BANK_SLIP")]
    BankSlip,
}

impl PaymentMethodName {
    pub const ALL: [PaymentMethodName; 2] = [PaymentMethodName::CreditCard, PaymentMethodName::BankSlip];

    /// Code stored in `payment_methods.name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodName::CreditCard => "CREDIT CARD",
            PaymentMethodName::BankSlip => "BANK SLIP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethodName::CreditCard => "Credit Card",
            PaymentMethodName::BankSlip => "Bank Slip",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "CREDIT CARD" | "CREDIT_CARD" => Some(PaymentMethodName::CreditCard),
            "BANK SLIP" | "BANK_SLIP" => Some(PaymentMethodName::BankSlip),
            _ => None,
        }
    }
}

impl Display for PaymentMethodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

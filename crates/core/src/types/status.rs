//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a placed order.
///
/// Serialized in `PascalCase` to match the order records already held by the
/// REST backend (`"Placed"`, `"Shipped"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Placed,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placed => write!(f, "Placed"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// How the shopper chose to pay at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    #[serde(rename = "card")]
    Card,
    /// UPI virtual payment address.
    #[serde(rename = "upi")]
    Upi,
    /// Net banking through a selected bank.
    #[serde(rename = "netbanking")]
    NetBanking,
    /// Pay the courier on delivery.
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Upi => write!(f, "upi"),
            Self::NetBanking => write!(f, "netbanking"),
            Self::CashOnDelivery => write!(f, "cod"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "netbanking" => Ok(Self::NetBanking),
            "cod" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

//! Order records.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storecart_core::{
    CartLine, CartState, OrderStatus, PaymentMethod, Price, Product, ProductId, Quantity, UserId,
};

use super::address::Address;

/// Unique order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// A fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One purchased product, copied from a cart line at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Price,
    pub quantity: Quantity,
    #[serde(default)]
    pub is_returned: bool,
}

impl OrderItem {
    /// Product-shaped view used to put the item back in a cart.
    #[must_use]
    pub fn as_product(&self) -> Product {
        Product::new(self.id.clone(), &self.name, &self.image, self.price)
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            image: line.image.clone(),
            price: line.price,
            quantity: line.quantity,
            is_returned: false,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub address: Address,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Build an order from the cart's lines and total.
    #[must_use]
    pub fn from_cart(
        cart: &CartState,
        user_id: UserId,
        address: Address,
        payment_method: PaymentMethod,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            user_id,
            date: placed_at,
            total: cart.total(),
            status: OrderStatus::Placed,
            address,
            payment_method,
            items: cart.lines().iter().map(OrderItem::from).collect(),
        }
    }

    /// Total units ordered.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// This order restricted to the items shown on `tab`, or `None` if no
    /// item belongs there.
    #[must_use]
    pub fn view(&self, tab: OrderTab) -> Option<Self> {
        let items: Vec<OrderItem> = self
            .items
            .iter()
            .filter(|item| tab.shows(item))
            .cloned()
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items,
            ..self.clone()
        })
    }
}

/// Order history tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderTab {
    /// Items still kept by the shopper.
    #[default]
    Orders,
    /// Items sent back.
    Returns,
}

impl OrderTab {
    const fn shows(self, item: &OrderItem) -> bool {
        match self {
            Self::Orders => !item.is_returned,
            Self::Returns => item.is_returned,
        }
    }
}

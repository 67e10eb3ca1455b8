//! Order placement and history.
//!
//! [`OrderSink`] is the seam checkout submits orders through.
//! [`StoredOrders`] implements it on top of a [`KeyValueStore`], keeping all
//! orders as one JSON array under [`keys::ORDERS`].
//!
//! Unlike the cart, order history is never silently discarded: an
//! unparseable record is reported as [`OrderError::Corrupt`].

use thiserror::Error;
use tracing::{info, instrument};

use storecart_core::{ProductId, UserId};

use crate::models::{Order, OrderId};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors from order storage.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored order list could not be parsed or written.
    #[error("order records are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("order not found: {0}")]
    NotFound(OrderId),

    #[error("product {product_id} is not part of order {order_id}")]
    ItemNotFound {
        order_id: OrderId,
        product_id: ProductId,
    },
}

/// Receives placed orders.
pub trait OrderSink {
    /// Record `order`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the order could not be recorded.
    fn submit(&mut self, order: &Order) -> Result<(), OrderError>;
}

/// Order history kept in a key-value store.
#[derive(Debug)]
pub struct StoredOrders<S> {
    store: S,
}

impl<S: KeyValueStore> StoredOrders<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Every stored order, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the store cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<Order>, OrderError> {
        match self.store.get(keys::ORDERS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, orders: &[Order]) -> Result<(), OrderError> {
        let json = serde_json::to_string(orders)?;
        self.store.set(keys::ORDERS, &json)?;
        Ok(())
    }

    /// Orders placed by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the store cannot be read or parsed.
    pub fn for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .load()?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    /// The `limit` most recent orders of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the store cannot be read or parsed.
    pub fn recent(&self, user_id: UserId, limit: usize) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.for_user(user_id)?;
        orders.truncate(limit);
        Ok(orders)
    }

    /// Look up one order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    pub fn find(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.load()?
            .into_iter()
            .find(|o| o.id == order_id)
            .ok_or(OrderError::NotFound(order_id))
    }

    /// Flag one item of an order as returned and persist the change.
    ///
    /// Marking an already returned item again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] or [`OrderError::ItemNotFound`] if the
    /// order or item does not exist.
    #[instrument(skip_all, fields(order_id = %order_id, product_id = %product_id))]
    pub fn mark_returned(
        &mut self,
        order_id: OrderId,
        product_id: &ProductId,
    ) -> Result<Order, OrderError> {
        let mut orders = self.load()?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(OrderError::NotFound(order_id))?;
        let item = order
            .items
            .iter_mut()
            .find(|i| &i.id == product_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                order_id,
                product_id: product_id.clone(),
            })?;
        item.is_returned = true;
        let updated = order.clone();

        self.save(&orders)?;
        info!("Item marked as returned");
        Ok(updated)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> OrderSink for StoredOrders<S> {
    #[instrument(skip_all, fields(order_id = %order.id))]
    fn submit(&mut self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.load()?;
        orders.push(order.clone());
        self.save(&orders)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};
    use storecart_core::{AddressId, CartState, PaymentMethod, Price, Product, Quantity};

    use super::*;
    use crate::models::{Address, OrderTab};
    use crate::storage::MemoryStore;

    fn address(user: i64) -> Address {
        Address {
            id: AddressId::new(1),
            user_id: UserId::new(user),
            full_name: "Ravi Kumar".into(),
            phone: "9811111111".into(),
            address: "4 Park Street".into(),
            locality: String::new(),
            city: "Kolkata".into(),
            state: "West Bengal".into(),
            pincode: "700016".into(),
            address_type: "Work".into(),
            is_default: true,
        }
    }

    fn order(user: i64, minutes_ago: i64) -> Order {
        let p = Product::new(ProductId::parse("A").unwrap(), "A", "", Price::from_units(10));
        let cart = CartState::new().add_line(&p, Quantity::ONE).unwrap();
        Order::from_cart(
            &cart,
            UserId::new(user),
            address(user),
            PaymentMethod::CashOnDelivery,
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[test]
    fn test_empty_history() {
        let orders = StoredOrders::new(MemoryStore::new());
        assert!(orders.load().unwrap().is_empty());
    }

    #[test]
    fn test_for_user_newest_first() {
        let mut orders = StoredOrders::new(MemoryStore::new());
        let old = order(1, 60);
        let new = order(1, 5);
        let other = order(2, 1);
        orders.submit(&old).unwrap();
        orders.submit(&new).unwrap();
        orders.submit(&other).unwrap();

        let mine = orders.for_user(UserId::new(1)).unwrap();
        assert_eq!(mine.iter().map(|o| o.id).collect::<Vec<_>>(), [new.id, old.id]);
        assert_eq!(orders.recent(UserId::new(1), 1).unwrap()[0].id, new.id);
    }

    #[test]
    fn test_mark_returned() {
        let mut orders = StoredOrders::new(MemoryStore::new());
        let placed = order(1, 0);
        orders.submit(&placed).unwrap();

        let id = ProductId::parse("A").unwrap();
        let updated = orders.mark_returned(placed.id, &id).unwrap();
        assert!(updated.items[0].is_returned);

        let reloaded = orders.find(placed.id).unwrap();
        assert!(reloaded.view(OrderTab::Orders).is_none());
        assert!(reloaded.view(OrderTab::Returns).is_some());
    }

    #[test]
    fn test_mark_returned_unknown() {
        let mut orders = StoredOrders::new(MemoryStore::new());
        let placed = order(1, 0);
        orders.submit(&placed).unwrap();

        assert!(matches!(
            orders.mark_returned(OrderId::generate(), &ProductId::parse("A").unwrap()),
            Err(OrderError::NotFound(_))
        ));
        assert!(matches!(
            orders.mark_returned(placed.id, &ProductId::parse("Z").unwrap()),
            Err(OrderError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_corrupt_history_is_reported() {
        let mut store = MemoryStore::new();
        store.set(keys::ORDERS, "oops").unwrap();
        let orders = StoredOrders::new(store);
        assert!(matches!(orders.load(), Err(OrderError::Corrupt(_))));
    }
}

//! Cart session with write-through persistence.
//!
//! [`CartSession`] is the single owner of the shopper's [`CartState`]. Every
//! mutation computes a new state with the pure operations from
//! `storecart_core::cart`, swaps it in, and writes it to the injected
//! [`KeyValueStore`] before returning.
//!
//! Persistence is fire-and-forget from the caller's point of view: a failed
//! write is logged and the in-memory state stays authoritative.

use rust_decimal::Decimal;
use storecart_core::{CartError, CartLine, CartState, Product, ProductId, Quantity};
use tracing::{debug, instrument, warn};

use crate::storage::{KeyValueStore, keys};

/// Read the persisted cart.
///
/// Never fails: a missing record, a storage error or an unparseable document
/// all yield an empty cart.
pub fn restore_cart<S: KeyValueStore + ?Sized>(store: &S) -> CartState {
    let raw = match store.get(keys::CART_ITEMS) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read persisted cart, starting empty");
            return CartState::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding unparseable persisted cart");
        CartState::new()
    })
}

/// The shopper's cart plus the store it persists to.
#[derive(Debug)]
pub struct CartSession<S> {
    state: CartState,
    store: S,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Open a session, restoring any persisted cart.
    #[instrument(skip(store))]
    pub fn restore(store: S) -> Self {
        let state = restore_cart(&store);
        debug!(lines = state.len(), "Cart restored");
        Self { state, store }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.state.count()
    }

    /// Sum of line subtotals at captured prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.state.total()
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the merged quantity does not
    /// fit. Nothing is changed or persisted in that case.
    #[instrument(skip_all, fields(product_id = %product.id, quantity = %quantity))]
    pub fn add(&mut self, product: &Product, quantity: Quantity) -> Result<&CartState, CartError> {
        let next = self.state.add_line(product, quantity)?;
        self.commit(next);
        Ok(&self.state)
    }

    /// Remove the line for `id`. Unknown ids leave the cart unchanged.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> &CartState {
        let next = self.state.remove_line(id);
        self.commit(next);
        &self.state
    }

    /// Replace the quantity of the line for `id`.
    #[instrument(skip_all, fields(product_id = %id, quantity = %quantity))]
    pub fn set_quantity(&mut self, id: &ProductId, quantity: Quantity) -> &CartState {
        let next = self.state.set_quantity(id, quantity);
        self.commit(next);
        &self.state
    }

    /// Empty the cart and erase the persisted record.
    ///
    /// If the record cannot be removed it is overwritten with an empty list,
    /// so a later restore still sees an empty cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.state = CartState::new();
        if let Err(e) = self.store.remove(keys::CART_ITEMS) {
            warn!(error = %e, "Failed to erase persisted cart, writing an empty one");
            if let Err(e) = self.store.set(keys::CART_ITEMS, "[]") {
                warn!(error = %e, "Failed to persist empty cart");
            }
        }
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Close the session, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn commit(&mut self, next: CartState) {
        self.state = next;
        match serde_json::to_string(&self.state) {
            Ok(json) => {
                if let Err(e) = self.store.set(keys::CART_ITEMS, &json) {
                    warn!(error = %e, "Failed to persist cart");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize cart"),
        }
    }
}

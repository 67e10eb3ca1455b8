//! Saved-for-later products.
//!
//! Every shopper's entries live in one JSON array under
//! [`keys::WISHLIST`]. A product appears at most once per shopper; adding it
//! again is a no-op. Like order history, an unparseable record is reported
//! rather than discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use storecart_core::{Price, Product, ProductId, UserId};

use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors from wishlist storage.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("wishlist storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("wishlist records are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One saved product, with the details shown at the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Product-shaped view used to move the item into the cart.
    #[must_use]
    pub fn as_product(&self) -> Product {
        Product::new(self.product_id.clone(), &self.name, &self.image, self.price)
    }
}

/// Wishlists kept in a key-value store.
#[derive(Debug)]
pub struct Wishlist<S> {
    store: S,
}

impl<S: KeyValueStore> Wishlist<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<WishlistItem>, WishlistError> {
        match self.store.get(keys::WISHLIST)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, items: &[WishlistItem]) -> Result<(), WishlistError> {
        self.store.set(keys::WISHLIST, &serde_json::to_string(items)?)?;
        Ok(())
    }

    /// Items saved by `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` if the store cannot be read or parsed.
    pub fn for_user(&self, user_id: UserId) -> Result<Vec<WishlistItem>, WishlistError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|item| item.user_id == user_id)
            .collect())
    }

    /// Whether `product_id` is on the shopper's list.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` if the store cannot be read or parsed.
    pub fn contains(&self, user_id: UserId, product_id: &ProductId) -> Result<bool, WishlistError> {
        Ok(self
            .load()?
            .iter()
            .any(|item| item.user_id == user_id && &item.product_id == product_id))
    }

    /// Save `product` for `user_id`. Returns `false` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` if the store cannot be read or written.
    #[instrument(skip_all, fields(user_id = %user_id, product_id = %product.id))]
    pub fn add(
        &mut self,
        user_id: UserId,
        product: &Product,
        added_at: DateTime<Utc>,
    ) -> Result<bool, WishlistError> {
        let mut items = self.load()?;
        if items
            .iter()
            .any(|item| item.user_id == user_id && item.product_id == product.id)
        {
            debug!("Already on wishlist");
            return Ok(false);
        }

        items.push(WishlistItem {
            user_id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            added_at,
        });
        self.save(&items)?;
        info!("Saved to wishlist");
        Ok(true)
    }

    /// Drop `product_id` from the shopper's list. Returns `false` if it was
    /// not there.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` if the store cannot be read or written.
    #[instrument(skip_all, fields(user_id = %user_id, product_id = %product_id))]
    pub fn remove(&mut self, user_id: UserId, product_id: &ProductId) -> Result<bool, WishlistError> {
        let mut items = self.load()?;
        let before = items.len();
        items.retain(|item| !(item.user_id == user_id && &item.product_id == product_id));
        if items.len() == before {
            return Ok(false);
        }
        self.save(&items)?;
        info!("Removed from wishlist");
        Ok(true)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

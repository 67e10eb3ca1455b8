//! Command implementations.
//!
//! Each command writes its human-readable result to the given writer; logs
//! go through `tracing`.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod wishlist;

use std::io::Write;

use storecart_core::{CartState, CurrencyCode};
use storecart_storefront::FileStore;
use storecart_storefront::config::StorefrontConfig;
use storecart_storefront::data::StoreData;

use crate::error::CliError;

/// Shared command state.
pub struct Context {
    config: StorefrontConfig,
    store: FileStore,
}

impl Context {
    pub fn new(config: StorefrontConfig) -> Self {
        let store = FileStore::new(&config.data_dir);
        Self { config, store }
    }

    /// A handle on the profile directory.
    pub fn store(&self) -> FileStore {
        self.store.clone()
    }

    pub const fn currency(&self) -> CurrencyCode {
        self.config.currency
    }

    /// Load the store data file.
    pub fn data(&self) -> Result<StoreData, CliError> {
        Ok(StoreData::load(&self.config.catalog_path)?)
    }
}

/// Print cart lines followed by the item count and subtotal.
pub fn write_cart(
    out: &mut impl Write,
    cart: &CartState,
    currency: CurrencyCode,
) -> Result<(), CliError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    for line in cart {
        writeln!(
            out,
            "{:<8} {:<32} {:>4} x {:>12} = {:>12}",
            line.id,
            line.name,
            line.quantity,
            currency.format(line.price.amount()),
            currency.format(line.subtotal()),
        )?;
    }
    writeln!(
        out,
        "Subtotal ({} items): {}",
        cart.count(),
        currency.format(cart.total())
    )?;
    Ok(())
}

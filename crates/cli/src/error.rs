//! CLI error type.

use thiserror::Error;

use storecart_core::{CartError, ProductId};
use storecart_storefront::auth::AuthError;
use storecart_storefront::checkout::CheckoutError;
use storecart_storefront::config::ConfigError;
use storecart_storefront::data::DataError;
use storecart_storefront::orders::OrderError;
use storecart_storefront::wishlist::WishlistError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store data error: {0}")]
    Data(#[from] DataError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Wishlist error: {0}")]
    Wishlist(#[from] WishlistError),

    /// The product is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The command needs a signed-in shopper.
    #[error("Not signed in. Run `storecart login <email>` first")]
    NotSignedIn,

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

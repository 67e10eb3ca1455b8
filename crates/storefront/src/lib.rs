//! Storecart Storefront library.
//!
//! Everything around the pure cart model that touches the outside world:
//! the persisted key-value store, the cart session that writes through to it,
//! accounts and sign-in, wishlists, checkout, order history, the read-only
//! catalog data and configuration.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod checkout;
pub mod config;
pub mod data;
pub mod models;
pub mod orders;
pub mod session;
pub mod storage;
pub mod wishlist;

pub use session::CartSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

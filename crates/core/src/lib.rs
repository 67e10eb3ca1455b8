//! Storecart Core - Shared types and the cart aggregation model.
//!
//! This crate provides the domain types used across all Storecart components:
//! - `storefront` - Persistence, cart session, checkout and order history
//! - `cli` - Command-line shopper front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no clocks. Every cart operation takes a state value and
//! returns a new one, so it can be tested without any storage backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, quantities, emails, and statuses
//! - [`product`] - Catalog product records
//! - [`cart`] - Cart lines, cart state, and the aggregation rules
//! - [`catalog`] - Naive product search and filtering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod product;
pub mod types;

pub use cart::{CartError, CartLine, CartState};
pub use product::Product;
pub use types::*;

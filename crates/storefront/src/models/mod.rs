//! Domain models for the storefront.
//!
//! Record shapes follow the REST backend's JSON (`camelCase` field names).

pub mod address;
pub mod order;
pub mod user;

pub use address::{Address, select_delivery_address};
pub use order::{Order, OrderId, OrderItem, OrderTab};
pub use user::User;

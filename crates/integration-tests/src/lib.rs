//! Integration tests for Storecart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storecart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart aggregation and persistence across restores
//! - `checkout_flow` - Sign-in, checkout, order history and buy-again
//!
//! This crate only holds shared fixtures.

use storecart_core::{Price, Product, ProductId};
use storecart_storefront::data::StoreData;

/// Store data with two products, one shopper and their saved addresses.
pub const STORE_DATA: &str = r#"{
    "products": [
        {"id": "A", "name": "Braided Cable", "price": 200, "brand": "boAt"},
        {"id": "B", "name": "Airdopes 141", "price": 500, "brand": "boAt",
         "formFactor": "Earbuds", "about": ["42H playback"]}
    ],
    "users": [
        {"id": 1, "name": "Asha", "email": "asha@shop.in"},
        {"id": 2, "name": "Ravi", "email": "ravi@shop.in"}
    ],
    "addresses": [
        {"id": 10, "userId": 1, "fullName": "Asha Rao", "phone": "9800000000",
         "address": "12 MG Road", "city": "Bengaluru", "state": "KA", "pincode": "560038"},
        {"id": 11, "userId": 1, "fullName": "Asha Rao", "phone": "9800000000",
         "address": "3 Lake View", "city": "Mysuru", "state": "KA", "pincode": "570001",
         "isDefault": true},
        {"id": 20, "userId": 2, "fullName": "Ravi Sen", "phone": "9700000000",
         "address": "4 Park St", "city": "Kolkata", "state": "WB", "pincode": "700016"}
    ]
}"#;

/// Parse [`STORE_DATA`].
///
/// # Panics
///
/// Panics if the fixture stops parsing.
#[must_use]
pub fn store_data() -> StoreData {
    StoreData::from_json_str(STORE_DATA).expect("fixture store data parses")
}

/// A bare product with the given id and whole-unit price.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn product(id: &str, price: u64) -> Product {
    let id = ProductId::parse(id).expect("fixture product id");
    let name = format!("Product {id}");
    Product::new(id, name, "", Price::from_units(price))
}

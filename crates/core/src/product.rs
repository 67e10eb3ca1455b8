//! Catalog product records.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as supplied by the catalog.
///
/// Only `id`, `name`, `image` and `price` matter to the cart. The remaining
/// fields feed search and product listings and default when absent.
/// Deserialization rejects records with a missing or empty `id` and a missing,
/// negative or non-numeric `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Price,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub rating: Option<f32>,
    /// Number of ratings received.
    #[serde(default)]
    pub reviews: Option<u32>,
    /// Feature bullets shown on the product page.
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ear_placement: Option<String>,
}

impl Product {
    /// Create a product with only the fields the cart needs.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, image: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            price,
            brand: String::new(),
            rating: None,
            reviews: None,
            about: Vec::new(),
            form_factor: None,
            ear_placement: None,
        }
    }
}

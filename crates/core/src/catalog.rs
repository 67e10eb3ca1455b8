//! Naive product search.
//!
//! Single pass over an in-memory product list. Results keep catalog order.

use std::str::FromStr;

use crate::product::Product;

/// Category filter for product search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// No filtering.
    All,
    /// Every catalog product is electronics.
    Electronics,
    /// Over-ear or foldable form factors.
    Headphones,
    /// True wireless or in-ear products.
    Earbuds,
    Neckbands,
    /// Case-insensitive brand match.
    Brand(String),
    /// Exact form factor or ear placement match.
    Other(String),
}

impl Category {
    /// Whether `product` belongs to this category.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let form_factor = product.form_factor.as_deref();
        let ear_placement = product.ear_placement.as_deref();
        match self {
            Self::All | Self::Electronics => true,
            Self::Headphones => {
                matches!(form_factor, Some("Over Ear" | "Foldable"))
                    || ear_placement == Some("Over Ear")
            }
            Self::Earbuds => form_factor == Some("TWS") || ear_placement == Some("In Ear"),
            Self::Neckbands => form_factor == Some("Neckband"),
            Self::Brand(brand) => product.brand.eq_ignore_ascii_case(brand),
            Self::Other(value) => {
                form_factor == Some(value.as_str()) || ear_placement == Some(value.as_str())
            }
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "All" => Self::All,
            "Electronics" => Self::Electronics,
            "Headphones" => Self::Headphones,
            "Earbuds" => Self::Earbuds,
            "Neckbands" => Self::Neckbands,
            "boAt" | "boult" => Self::Brand(s.to_owned()),
            other => Self::Other(other.to_owned()),
        })
    }
}

/// Search parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Free text matched against name, brand and feature bullets.
    pub text: Option<String>,
    pub category: Option<Category>,
}

impl SearchQuery {
    /// Whether `product` satisfies both the text and the category filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let text_ok = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .is_none_or(|text| matches_text(product, &text.to_lowercase()));
        let category_ok = self.category.as_ref().is_none_or(|c| c.matches(product));
        text_ok && category_ok
    }
}

fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.brand.to_lowercase().contains(needle)
        || product
            .about
            .iter()
            .any(|feature| feature.to_lowercase().contains(needle))
}

/// Products matching `query`, in catalog order.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &SearchQuery) -> Vec<&'a Product> {
    products.iter().filter(|p| query.matches(p)).collect()
}

/// Products of one brand, compared case-insensitively.
#[must_use]
pub fn by_brand<'a>(products: &'a [Product], brand: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.brand.eq_ignore_ascii_case(brand))
        .collect()
}

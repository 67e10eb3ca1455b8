//! Newtype IDs for type-safe entity references.
//!
//! Numeric records coming from the REST backend (users, addresses) use the
//! `define_id!` macro. Products use [`ProductId`], an opaque string key,
//! because catalogs hand out both numeric and string identifiers.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Declares an `i64` record id newtype.
///
/// The generated type is `Copy`, ordered and hashable, serializes as the bare
/// integer, parses from a decimal string and converts to and from `i64`.
/// Ids of different records are distinct types:
///
/// ```rust
/// # use storecart_core::define_id;
/// define_id!(WishlistId);
/// define_id!(ReviewId);
///
/// let wishlist = WishlistId::new(3);
/// assert_eq!(wishlist.as_i64(), 3);
/// assert_eq!("3".parse::<WishlistId>(), Ok(wishlist));
/// // let _: ReviewId = wishlist; // mismatched types
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw database id.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(AddressId);

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The identifier is empty or whitespace.
    #[error("product id cannot be empty")]
    Empty,
}

/// Opaque product identifier.
///
/// Equality of `ProductId` defines "same cart line". Accepts JSON strings and
/// integers on input; always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parse a `ProductId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ProductIdError::Empty`] if nothing remains after trimming.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductIdRepr {
    Integer(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ProductIdRepr::deserialize(deserializer)? {
            ProductIdRepr::Integer(id) => Ok(Self::from(id)),
            ProductIdRepr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_roundtrip_display() {
        let id = UserId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<UserId>().unwrap(), id);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn test_product_id_rejects_blank() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse("   "), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_product_id_trims() {
        assert_eq!(ProductId::parse(" A1 ").unwrap().as_str(), "A1");
    }

    #[test]
    fn test_product_id_from_json_integer_and_string() {
        let from_int: ProductId = serde_json::from_str("7").unwrap();
        let from_str: ProductId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "\"7\"");
    }

    #[test]
    fn test_product_id_from_json_empty_string_fails() {
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }
}

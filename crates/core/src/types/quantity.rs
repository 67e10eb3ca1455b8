//! Positive item quantities.

use core::fmt;
use core::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    Zero,
    /// The input is not a non-negative integer.
    #[error("quantity is not a whole number: {0}")]
    NotANumber(String),
    /// Summing two quantities exceeded `u32::MAX`.
    #[error("quantity overflow: {current} + {added}")]
    Overflow {
        /// Quantity already held.
        current: u32,
        /// Quantity being added.
        added: u32,
    },
}

/// A count of units, always at least one.
///
/// Zero and negative quantities are unrepresentable, so a cart line can never
/// hold an empty or negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] if `n` is zero.
    pub const fn new(n: u32) -> Result<Self, QuantityError> {
        match NonZeroU32::new(n) {
            Some(n) => Ok(Self(n)),
            None => Err(QuantityError::Zero),
        }
    }

    /// The count as a plain integer.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// Sum of two quantities.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Overflow`] if the sum exceeds `u32::MAX`.
    pub const fn checked_add(self, other: Self) -> Result<Self, QuantityError> {
        match self.0.checked_add(other.0.get()) {
            Some(n) => Ok(Self(n)),
            None => Err(QuantityError::Overflow {
                current: self.0.get(),
                added: other.0.get(),
            }),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<u32>()
            .map_err(|_| QuantityError::NotANumber(s.to_owned()))?;
        Self::new(n)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.get()
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u32::deserialize(deserializer)?;
        Self::new(n).map_err(serde::de::Error::custom)
    }
}

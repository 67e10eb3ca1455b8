//! Shopper email addresses.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Why a string was not accepted as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("no email address given")]
    Empty,
    #[error("email address is longer than {max} bytes")]
    TooLong { max: usize },
    /// No `@`, or more than one.
    #[error("email address needs exactly one '@'")]
    AtSymbol,
    #[error("nothing before the '@' in the email address")]
    EmptyLocalPart,
    #[error("nothing after the '@' in the email address")]
    EmptyDomain,
}

/// An email address, used to look up the signed-in shopper.
///
/// Surrounding whitespace is trimmed and the domain is lowercased, so two
/// spellings of the same mailbox compare equal.
///
/// ```
/// use storecart_core::Email;
///
/// let email = Email::parse(" Asha@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "Asha@example.com");
/// assert!(Email::parse("a@b@c").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LEN: usize = 254;

    /// Validate and normalise an address.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the trimmed input is blank, over
    /// [`Self::MAX_LEN`] bytes, or not of the form `local@domain`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(EmailError::TooLong { max: Self::MAX_LEN });
        }

        match trimmed.split_once('@') {
            None => Err(EmailError::AtSymbol),
            Some((_, domain)) if domain.contains('@') => Err(EmailError::AtSymbol),
            Some(("", _)) => Err(EmailError::EmptyLocalPart),
            Some((_, "")) => Err(EmailError::EmptyDomain),
            Some((local, domain)) => Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase()))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

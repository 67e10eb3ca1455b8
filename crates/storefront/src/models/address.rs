//! Delivery addresses.

use serde::{Deserialize, Serialize};

use storecart_core::{AddressId, UserId};

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub full_name: String,
    pub phone: String,
    /// House number and street.
    pub address: String,
    #[serde(default)]
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    /// Free-form label such as `Home` or `Work`.
    #[serde(default)]
    pub address_type: String,
    #[serde(default)]
    pub is_default: bool,
}

/// The address checkout should preselect: the default one, else the first.
#[must_use]
pub fn select_delivery_address(addresses: &[Address]) -> Option<&Address> {
    addresses
        .iter()
        .find(|a| a.is_default)
        .or_else(|| addresses.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: i64, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            user_id: UserId::new(1),
            full_name: "Asha Rao".into(),
            phone: "9800000000".into(),
            address: "12 MG Road".into(),
            locality: "Indiranagar".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            pincode: "560038".into(),
            address_type: "Home".into(),
            is_default,
        }
    }

    #[test]
    fn test_prefers_default() {
        let addresses = [address(1, false), address(2, true)];
        assert_eq!(
            select_delivery_address(&addresses).map(|a| a.id),
            Some(AddressId::new(2))
        );
    }

    #[test]
    fn test_falls_back_to_first() {
        let addresses = [address(5, false), address(6, false)];
        assert_eq!(
            select_delivery_address(&addresses).map(|a| a.id),
            Some(AddressId::new(5))
        );
    }

    #[test]
    fn test_none_when_empty() {
        assert!(select_delivery_address(&[]).is_none());
    }
}

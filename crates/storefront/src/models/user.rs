//! User domain types.

use serde::{Deserialize, Serialize};

use storecart_core::{Email, UserId};

/// A shopper account as served by the backend.
///
/// Also the value stored for the signed-in shopper. Extra backend fields
/// (passwords included) are ignored on input and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_field_dropped() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "name": "Asha", "email": "asha@shop.in", "password": "hunter2"}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("phone"));
    }
}

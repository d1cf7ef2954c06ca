//! Account profile.

use serde::{Deserialize, Serialize};

use tabcart_core::Secret;

/// A registered account, keyed by its [`tabcart_core::AccountId`] in the
/// account directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Password, stored as typed.
    #[serde(rename = "password")]
    pub secret: Secret,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Phone number; empty when not given.
    #[serde(default)]
    pub phone: String,
}

impl Account {
    /// Phone number, if one was given.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        Some(self.phone.as_str()).filter(|p| !p.is_empty())
    }

    /// `First Last`, `First`, or `None` when there is no first name.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        if self.first_name.is_empty() {
            return None;
        }
        if self.last_name.is_empty() {
            return Some(self.first_name.clone());
        }
        Some(format!("{} {}", self.first_name, self.last_name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn account(first: &str, last: &str, phone: &str) -> Account {
        Account {
            secret: Secret::new("secret1").unwrap(),
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            phone: phone.to_owned(),
        }
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(account("Ada", "Lovelace", "")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "password": "secret1",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "phone": ""
            })
        );
    }

    #[test]
    fn test_reads_record_without_optional_fields() {
        let parsed: Account = serde_json::from_str(r#"{"password":"secret1"}"#).unwrap();
        assert_eq!(parsed, account("", "", ""));
    }

    #[test]
    fn test_phone_empty_is_none() {
        assert_eq!(account("A", "B", "").phone(), None);
        assert_eq!(account("A", "B", "+234 800").phone(), Some("+234 800"));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(account("Ada", "Lovelace", "").full_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(account("Ada", "", "").full_name().as_deref(), Some("Ada"));
        assert_eq!(account("", "Lovelace", "").full_name(), None);
    }
}

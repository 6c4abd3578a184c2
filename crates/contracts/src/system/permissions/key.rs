use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::normalize::raw::{to_camel_case, to_snake_case};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionKeyError {
    #[error("permission key `{0}` must look like `resource.action`")]
    Malformed(String),

    #[error("permission key `{0}` contains invalid characters")]
    InvalidCharacters(String),
}

/// `resource.action` pair, e.g. `invoices.read`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionKey {
    resource: String,
    action: String,
}

impl PermissionKey {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn parse(key: &str) -> Result<Self, PermissionKeyError> {
        let malformed = || PermissionKeyError::Malformed(key.to_string());

        let (resource, action) = key.split_once('.').ok_or_else(malformed)?;
        if resource.is_empty() || action.is_empty() || action.contains('.') {
            return Err(malformed());
        }

        let valid = |part: &str| part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid(resource) || !valid(action) {
            return Err(PermissionKeyError::InvalidCharacters(key.to_string()));
        }

        Ok(Self::new(resource, action))
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Lowercase snake_case form used by the role table (`purchaseOrders.create` -> `purchase_orders.create`)
    pub fn canonical(&self) -> Self {
        Self::new(
            to_snake_case(&self.resource).to_ascii_lowercase(),
            self.action.to_ascii_lowercase(),
        )
    }

    pub fn is_canonical(&self) -> bool {
        let lower = |part: &str| {
            part.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        };
        lower(&self.resource) && lower(&self.action)
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

impl FromStr for PermissionKey {
    type Err = PermissionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PermissionKey {
    type Error = PermissionKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PermissionKey> for String {
    fn from(key: PermissionKey) -> Self {
        key.to_string()
    }
}

/// Keys to look up for a check, in order: as given, then the snake_case and
/// camelCase spellings of the resource. Empty when either part is empty.
pub fn key_candidates(resource: &str, action: &str) -> Vec<String> {
    if resource.is_empty() || action.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![format!("{}.{}", resource, action)];
    for alternative in [to_snake_case(resource), to_camel_case(resource)] {
        let key = format!("{}.{}", alternative, action);
        if !candidates.contains(&key) {
            candidates.push(key);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let key = PermissionKey::parse("invoices.read").unwrap();
        assert_eq!(key.resource(), "invoices");
        assert_eq!(key.action(), "read");
        assert_eq!(key.to_string(), "invoices.read");
        assert_eq!("payables.approve".parse::<PermissionKey>().unwrap().action(), "approve");
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for key in ["", "invoices", ".read", "invoices.", "a.b.c"] {
            assert_eq!(
                PermissionKey::parse(key),
                Err(PermissionKeyError::Malformed(key.to_string())),
                "{}",
                key
            );
        }
        assert_eq!(
            PermissionKey::parse("invoices.re ad"),
            Err(PermissionKeyError::InvalidCharacters("invoices.re ad".to_string()))
        );
    }

    #[test]
    fn test_canonical_form() {
        let key = PermissionKey::parse("purchaseOrders.create").unwrap();
        assert!(!key.is_canonical());
        assert_eq!(key.canonical().to_string(), "purchase_orders.create");
        assert!(key.canonical().is_canonical());
    }

    #[test]
    fn test_serde_as_string() {
        let key: PermissionKey = serde_json::from_str("\"stock_movements.create\"").unwrap();
        assert_eq!(key, PermissionKey::new("stock_movements", "create"));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"stock_movements.create\"");
        assert!(serde_json::from_str::<PermissionKey>("\"nodot\"").is_err());
    }

    #[test]
    fn test_key_candidates() {
        assert_eq!(key_candidates("invoices", "read"), vec!["invoices.read"]);
        assert_eq!(
            key_candidates("purchaseOrders", "create"),
            vec!["purchaseOrders.create", "purchase_orders.create"]
        );
        assert_eq!(
            key_candidates("purchase_orders", "create"),
            vec!["purchase_orders.create", "purchaseOrders.create"]
        );
        assert!(key_candidates("", "read").is_empty());
        assert!(key_candidates("invoices", "").is_empty());
    }
}

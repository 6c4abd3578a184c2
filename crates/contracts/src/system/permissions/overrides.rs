use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideAction {
    Grant,
    Deny,
}

/// Per-user decision for a single `resource.action` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPermission {
    pub action: OverrideAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, alias = "granted_by_name", skip_serializing_if = "Option::is_none")]
    pub granted_by_name: Option<String>,
}

impl CustomPermission {
    pub fn grant(reason: Option<String>) -> Self {
        Self {
            action: OverrideAction::Grant,
            reason,
            granted_by_name: None,
        }
    }

    pub fn deny(reason: Option<String>) -> Self {
        Self {
            action: OverrideAction::Deny,
            reason,
            granted_by_name: None,
        }
    }

    pub fn with_granted_by(mut self, name: impl Into<String>) -> Self {
        self.granted_by_name = Some(name.into());
        self
    }

    pub fn is_grant(&self) -> bool {
        self.action == OverrideAction::Grant
    }
}

/// Keyed by `resource.action`
pub type CustomPermissions = BTreeMap<String, CustomPermission>;

/// First override matching any of `candidates`, in order.
pub fn find_override<'a>(
    overrides: &'a CustomPermissions,
    candidates: &[String],
) -> Option<&'a CustomPermission> {
    candidates.iter().find_map(|key| overrides.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::permissions::key::key_candidates;
    use serde_json::json;

    #[test]
    fn test_deserialize_overrides() {
        let overrides: CustomPermissions = serde_json::from_value(json!({
            "invoices.create": { "action": "grant", "reason": "Month-end backlog", "grantedByName": "Fatima" },
            "payments.delete": { "action": "deny", "granted_by_name": "Omar" }
        }))
        .unwrap();

        let grant = &overrides["invoices.create"];
        assert!(grant.is_grant());
        assert_eq!(grant.reason.as_deref(), Some("Month-end backlog"));
        assert_eq!(grant.granted_by_name.as_deref(), Some("Fatima"));

        let deny = &overrides["payments.delete"];
        assert_eq!(deny.action, OverrideAction::Deny);
        assert_eq!(deny.granted_by_name.as_deref(), Some("Omar"));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_value::<CustomPermission>(json!({ "action": "maybe" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_find_override_with_case_fallback() {
        let mut overrides = CustomPermissions::new();
        overrides.insert("purchase_orders.approve".to_string(), CustomPermission::deny(None));

        let found = find_override(&overrides, &key_candidates("purchaseOrders", "approve"));
        assert_eq!(found.map(|o| o.action), Some(OverrideAction::Deny));
        assert!(find_override(&overrides, &key_candidates("invoices", "approve")).is_none());
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let value = serde_json::to_value(CustomPermission::grant(None)).unwrap();
        assert_eq!(value, json!({ "action": "grant" }));
    }
}

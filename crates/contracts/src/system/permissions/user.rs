use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::key::{key_candidates, PermissionKey};
use super::overrides::find_override;
use super::resolver::role_grants;
use crate::shared::normalize::raw::parse_bool;
use crate::system::auth::UserInfo;

/// Server-resolved grants of one user, keyed by `resource.action`.
///
/// Accepts the flat form (`{"invoices.read": true}`) and the nested form
/// (`{"invoices": {"read": true}}`) on input; always serializes flat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct UserPermissions(BTreeMap<String, bool>);

impl UserPermissions {
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self(keys.into_iter().map(|key| (key.to_string(), true)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Explicit `false` entries count as not granted
    pub fn allows(&self, resource: &str, action: &str) -> bool {
        key_candidates(resource, action)
            .iter()
            .any(|key| self.get(key) == Some(true))
    }

    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(key, _)| key.as_str())
    }

    /// resource → action → granted
    pub fn nested(&self) -> BTreeMap<String, BTreeMap<String, bool>> {
        let mut nested: BTreeMap<String, BTreeMap<String, bool>> = BTreeMap::new();
        for (key, granted) in &self.0 {
            if let Ok(parsed) = PermissionKey::parse(key) {
                nested
                    .entry(parsed.resource().to_string())
                    .or_default()
                    .insert(parsed.action().to_string(), *granted);
            }
        }
        nested
    }
}

impl From<BTreeMap<String, Value>> for UserPermissions {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut flat = BTreeMap::new();
        for (key, value) in raw {
            match value {
                Value::Object(actions) => {
                    for (action, granted) in actions {
                        if let Some(granted) = parse_bool(&granted) {
                            flat.insert(format!("{}.{}", key, action), granted);
                        }
                    }
                }
                other => {
                    if let Some(granted) = parse_bool(&other) {
                        flat.insert(key, granted);
                    } else {
                        log::warn!("ignoring permission `{}` with value {}", key, other);
                    }
                }
            }
        }
        Self(flat)
    }
}

/// Decision for a signed-in user.
///
/// Admin sentinel first, then the user's custom overrides, then the
/// server-resolved grants when the profile carries any, else the static
/// role table.
pub fn resolve_user(user: &UserInfo, resource: &str, action: &str) -> bool {
    if user.has_admin_access() {
        return true;
    }

    let candidates = key_candidates(resource, action);
    if candidates.is_empty() {
        return false;
    }

    if let Some(custom) = find_override(&user.custom_permissions, &candidates) {
        return custom.is_grant();
    }

    if user.permissions.is_empty() {
        role_grants(&user.role, &candidates)
    } else {
        user.permissions.allows(resource, action)
    }
}

/// JWT role or any role assigned in the database.
pub fn has_any_role(user: &UserInfo, roles: &[&str]) -> bool {
    std::iter::once(user.role.as_str())
        .chain(user.role_names.iter().map(String::as_str))
        .any(|role| roles.contains(&role))
}

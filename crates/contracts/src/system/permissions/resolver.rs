use super::key::key_candidates;
use super::overrides::{find_override, CustomPermissions};
use super::role_table::{role_permissions, ADMIN};

/// Role-table check with no per-user overrides.
pub fn resolve_for_role(role: &str, resource: &str, action: &str) -> bool {
    resolve(role, resource, action, None)
}

/// Grant decision for `role` on `resource.action`.
///
/// `admin` always passes. A custom override for the key replaces the role
/// default in both directions. Anything else falls back to the role table
/// and fails closed.
pub fn resolve(
    role: &str,
    resource: &str,
    action: &str,
    overrides: Option<&CustomPermissions>,
) -> bool {
    if role == ADMIN {
        return true;
    }

    let candidates = key_candidates(resource, action);
    if candidates.is_empty() {
        return false;
    }

    if let Some(custom) = overrides.and_then(|o| find_override(o, &candidates)) {
        return custom.is_grant();
    }

    role_grants(role, &candidates)
}

pub(crate) fn role_grants(role: &str, candidates: &[String]) -> bool {
    let granted = role_permissions(role);
    candidates.iter().any(|key| granted.contains(key.as_str()))
}

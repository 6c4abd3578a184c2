//! Admin permission matrix: users × permission keys.
//!
//! Cell classification, tooltips, and the optimistic local edit applied
//! before the backend confirms a grant/deny/remove.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::overrides::{CustomPermission, CustomPermissions};

// ============================================================================
// Payload
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixPermission {
    #[serde(alias = "permission_key")]
    pub permission_key: String,
    #[serde(default)]
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MatrixPermission {
    /// Declared module, or the resource part of the key
    pub fn module(&self) -> &str {
        if self.module.is_empty() {
            self.permission_key
                .split('.')
                .next()
                .unwrap_or_default()
        } else {
            &self.module
        }
    }

    pub fn header_title(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => {
                format!("{} ({})", self.permission_key, description)
            }
            _ => self.permission_key.clone(),
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixUser {
    pub id: i64,
    #[serde(default, alias = "full_name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "is_director")]
    pub is_director: bool,
    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
    /// key → names of the roles that grant it
    #[serde(default, alias = "role_grants")]
    pub role_grants: BTreeMap<String, Vec<String>>,
    #[serde(default, alias = "custom_permissions")]
    pub custom_permissions: CustomPermissions,
}

impl MatrixUser {
    pub fn has_custom_overrides(&self) -> bool {
        !self.custom_permissions.is_empty()
    }

    fn granting_roles(&self, key: &str) -> &[String] {
        self.role_grants.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMatrix {
    #[serde(default)]
    pub permissions: Vec<MatrixPermission>,
    #[serde(default)]
    pub users: Vec<MatrixUser>,
}

// ============================================================================
// Cells
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Director,
    CustomGrant,
    CustomDeny,
    RoleGranted,
    NoAccess,
}

pub fn cell_state(user: &MatrixUser, key: &str) -> CellState {
    if user.is_director {
        return CellState::Director;
    }
    if let Some(custom) = user.custom_permissions.get(key) {
        return if custom.is_grant() {
            CellState::CustomGrant
        } else {
            CellState::CustomDeny
        };
    }
    if !user.granting_roles(key).is_empty() {
        return CellState::RoleGranted;
    }
    CellState::NoAccess
}

pub fn is_granted(state: CellState) -> bool {
    matches!(
        state,
        CellState::Director | CellState::CustomGrant | CellState::RoleGranted
    )
}

/// Granted cells of `user` among `keys`.
pub fn granted_count<'a>(user: &MatrixUser, keys: impl IntoIterator<Item = &'a str>) -> usize {
    keys.into_iter()
        .filter(|key| is_granted(cell_state(user, key)))
        .count()
}

pub fn tooltip(user: &MatrixUser, key: &str) -> String {
    if user.is_director {
        return "Director: Full Access".to_string();
    }

    if let Some(custom) = user.custom_permissions.get(key) {
        let mut text = if custom.is_grant() {
            "Custom grant".to_string()
        } else {
            "Custom deny".to_string()
        };
        if let Some(by) = custom.granted_by_name.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!(" by {}", by));
        }
        if let Some(reason) = custom.reason.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("\nReason: {}", reason));
        }
        return text;
    }

    let roles = user.granting_roles(key);
    if roles.is_empty() {
        "Not granted".to_string()
    } else {
        format!("Granted by: {}", roles.join(", "))
    }
}

/// Number of users carrying at least one custom override
pub fn custom_override_count(users: &[MatrixUser]) -> usize {
    users.iter().filter(|u| u.has_custom_overrides()).count()
}

// ============================================================================
// Edits
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixEdit {
    Grant,
    Deny,
    Remove,
}

/// What a click on a cell in `state` does; directors are read-only.
pub fn next_edit(state: CellState) -> Option<MatrixEdit> {
    match state {
        CellState::Director => None,
        CellState::NoAccess => Some(MatrixEdit::Grant),
        CellState::RoleGranted => Some(MatrixEdit::Deny),
        CellState::CustomGrant | CellState::CustomDeny => Some(MatrixEdit::Remove),
    }
}

pub const LOCAL_EDITOR_NAME: &str = "You";

/// Optimistic local update, mirrored later by the backend response.
pub fn apply_edit(user: &mut MatrixUser, key: &str, edit: MatrixEdit, reason: Option<String>) {
    if user.is_director {
        return;
    }

    let reason = reason.filter(|r| !r.trim().is_empty());
    match edit {
        MatrixEdit::Grant => {
            user.custom_permissions.insert(
                key.to_string(),
                CustomPermission::grant(reason).with_granted_by(LOCAL_EDITOR_NAME),
            );
        }
        MatrixEdit::Deny => {
            user.custom_permissions.insert(
                key.to_string(),
                CustomPermission::deny(reason).with_granted_by(LOCAL_EDITOR_NAME),
            );
        }
        MatrixEdit::Remove => {
            user.custom_permissions.remove(key);
        }
    }
}

/// Put one cell back to `previous` after a rejected edit.
///
/// Only `key` of this user is touched, so concurrent edits on other cells
/// keep their local state.
pub fn restore_override(user: &mut MatrixUser, key: &str, previous: Option<CustomPermission>) {
    match previous {
        Some(custom) => {
            user.custom_permissions.insert(key.to_string(), custom);
        }
        None => {
            user.custom_permissions.remove(key);
        }
    }
}

// ============================================================================
// Filters / presets
// ============================================================================

pub const MODULE_PRESETS: &[(&str, &[&str])] = &[
    (
        "Sales",
        &[
            "invoices",
            "quotations",
            "deliveryNotes",
            "creditNotes",
            "customers",
            "pricelists",
            "pricing",
            "deliveryVariance",
            "customerCredit",
        ],
    ),
    (
        "Purchase",
        &[
            "purchaseOrders",
            "suppliers",
            "supplierBills",
            "debitNotes",
            "supplierQuotations",
        ],
    ),
    (
        "Inventory",
        &[
            "inventory",
            "warehouses",
            "stockMovements",
            "stockBatches",
            "batchReservations",
            "grns",
            "products",
            "materialCertificates",
            "pinnedProducts",
            "unitConversions",
            "cogs",
        ],
    ),
    (
        "Finance",
        &[
            "payments",
            "payables",
            "receivables",
            "advancePayments",
            "commissions",
            "operatingExpenses",
            "accountStatements",
            "accountingPeriods",
            "bankReconciliation",
            "exchangeRates",
            "financialReports",
            "journalEntries",
            "reconciliations",
            "trn",
            "vatRates",
            "vatReturn",
        ],
    ),
    (
        "Trade",
        &[
            "importOrders",
            "exportOrders",
            "importContainers",
            "customsDocuments",
            "shippingDocuments",
            "tradeFinance",
            "countries",
        ],
    ),
    (
        "Admin",
        &[
            "users",
            "roles",
            "companySettings",
            "auditLogs",
            "auditHub",
            "activities",
            "analytics",
            "categoryPolicies",
            "dashboard",
            "documentLinks",
            "integrations",
            "notifications",
            "policySnapshots",
            "reports",
            "templates",
        ],
    ),
];

/// `None` means "all modules"
pub fn preset(name: &str) -> Option<&'static [&'static str]> {
    MODULE_PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, modules)| *modules)
}

/// `accountStatements` → `account statements`
pub fn to_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            label.push(' ');
            label.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            label.push(' ');
        } else {
            label.push(ch.to_ascii_lowercase());
        }
    }
    label.trim().to_string()
}

impl PermissionMatrix {
    /// Permission columns limited to `modules` (all when `None`), source order kept.
    pub fn filtered_permissions(&self, modules: Option<&[&str]>) -> Vec<&MatrixPermission> {
        self.permissions
            .iter()
            .filter(|p| modules.map_or(true, |m| m.contains(&p.module())))
            .collect()
    }

    /// Consecutive runs of permissions sharing a module.
    pub fn module_groups<'a>(
        permissions: &[&'a MatrixPermission],
    ) -> Vec<(&'a str, Vec<&'a MatrixPermission>)> {
        let mut groups: Vec<(&'a str, Vec<&'a MatrixPermission>)> = Vec::new();
        for &permission in permissions {
            match groups.last_mut() {
                Some((module, members)) if *module == permission.module() => {
                    members.push(permission)
                }
                _ => groups.push((permission.module(), vec![permission])),
            }
        }
        groups
    }

    /// Sorted, distinct module names.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.permissions.iter().map(|p| p.module()).collect();
        modules.sort_unstable();
        modules.dedup();
        modules
    }

    pub fn filtered_users(&self, hide_inactive: bool, custom_only: bool, search: &str) -> Vec<&MatrixUser> {
        let query = search.trim().to_lowercase();
        self.users
            .iter()
            .filter(|u| !hide_inactive || u.is_active)
            .filter(|u| !custom_only || u.has_custom_overrides())
            .filter(|u| {
                query.is_empty()
                    || u.full_name.to_lowercase().contains(&query)
                    || u.email.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn user_mut(&mut self, id: i64) -> Option<&mut MatrixUser> {
        self.users.iter_mut().find(|u| u.id == id)
    }
}

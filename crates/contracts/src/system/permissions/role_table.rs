//! Static role → permission table.
//!
//! Built once on first use and never mutated. `admin` is not listed: it is
//! a sentinel with implicit full access, handled by the resolver.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;

pub const ADMIN: &str = "admin";
pub const SALES: &str = "sales";
pub const VIEWER: &str = "viewer";
pub const OPERATOR: &str = "operator";
pub const ACCOUNTANT: &str = "accountant";
pub const SENIOR_ACCOUNTANT: &str = "senior_accountant";
pub const FINANCE_MANAGER: &str = "finance_manager";

const VIEWER_PERMISSIONS: &[&str] = &[
    "invoices.read",
    "quotations.read",
    "customers.read",
    "products.read",
    "inventory.read",
    "purchase_orders.read",
    "suppliers.read",
    "payments.read",
    "reports.read",
];

const SALES_PERMISSIONS: &[&str] = &[
    "invoices.read",
    "invoices.create",
    "invoices.update",
    "quotations.read",
    "quotations.create",
    "quotations.update",
    "delivery_notes.read",
    "delivery_notes.create",
    "customers.read",
    "customers.create",
    "customers.update",
    "products.read",
    "inventory.read",
    "payments.read",
    "reports.read",
];

const OPERATOR_PERMISSIONS: &[&str] = &[
    "products.read",
    "products.create",
    "products.update",
    "inventory.read",
    "inventory.create",
    "inventory.update",
    "stock_movements.read",
    "stock_movements.create",
    "purchase_orders.read",
    "purchase_orders.create",
    "purchase_orders.update",
    "suppliers.read",
    "delivery_notes.read",
    "delivery_notes.create",
    "delivery_notes.update",
    "invoices.read",
    "customers.read",
];

const ACCOUNTANT_PERMISSIONS: &[&str] = &[
    "invoices.read",
    "invoices.create",
    "invoices.update",
    "credit_notes.read",
    "credit_notes.create",
    "payments.read",
    "payments.create",
    "payments.update",
    "payables.read",
    "payables.create",
    "receivables.read",
    "receivables.create",
    "customers.read",
    "suppliers.read",
    "purchase_orders.read",
    "reports.read",
];

/// On top of the accountant set
const SENIOR_ACCOUNTANT_PERMISSIONS: &[&str] = &[
    "invoices.approve",
    "credit_notes.approve",
    "payments.approve",
    "payables.approve",
    "payables.update",
    "receivables.update",
    "reports.export",
    "audit_logs.read",
];

/// On top of the senior accountant set
const FINANCE_MANAGER_PERMISSIONS: &[&str] = &[
    "invoices.delete",
    "credit_notes.delete",
    "payments.delete",
    "payables.delete",
    "receivables.delete",
    "purchase_orders.approve",
    "suppliers.update",
    "customers.update",
    "audit_logs.export",
    "users.read",
];

fn permission_set(groups: &[&[&'static str]]) -> BTreeSet<&'static str> {
    groups.iter().flat_map(|group| group.iter().copied()).collect()
}

static ROLE_PERMISSIONS: Lazy<BTreeMap<&'static str, BTreeSet<&'static str>>> = Lazy::new(|| {
    BTreeMap::from([
        (VIEWER, permission_set(&[VIEWER_PERMISSIONS])),
        (SALES, permission_set(&[SALES_PERMISSIONS])),
        (OPERATOR, permission_set(&[OPERATOR_PERMISSIONS])),
        (ACCOUNTANT, permission_set(&[ACCOUNTANT_PERMISSIONS])),
        (
            SENIOR_ACCOUNTANT,
            permission_set(&[ACCOUNTANT_PERMISSIONS, SENIOR_ACCOUNTANT_PERMISSIONS]),
        ),
        (
            FINANCE_MANAGER,
            permission_set(&[
                ACCOUNTANT_PERMISSIONS,
                SENIOR_ACCOUNTANT_PERMISSIONS,
                FINANCE_MANAGER_PERMISSIONS,
            ]),
        ),
    ])
});

static NO_PERMISSIONS: BTreeSet<&'static str> = BTreeSet::new();

/// Enumerated keys of `role`; empty for `admin` and for unknown roles.
pub fn role_permissions(role: &str) -> &'static BTreeSet<&'static str> {
    ROLE_PERMISSIONS.get(role).unwrap_or(&NO_PERMISSIONS)
}

/// All roles, `admin` first.
pub fn known_roles() -> Vec<&'static str> {
    std::iter::once(ADMIN)
        .chain(ROLE_PERMISSIONS.keys().copied())
        .collect()
}

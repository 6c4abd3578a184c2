use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_ROLE_NAME_LEN: usize = 3;
pub const MAX_ROLE_NAME_LEN: usize = 50;

const RESERVED_ROLE_NAMES: &[&str] = &["admin", "superuser", "root", "super_user"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleValidationError {
    #[error("Display name must be at least 3 characters")]
    TooShort,

    #[error("Display name must be less than 50 characters")]
    TooLong,

    #[error("\"{0}\" is a reserved name and cannot be used")]
    Reserved(String),

    #[error("A role with this name already exists")]
    Duplicate,
}

/// Role create/edit form as sent to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_director: bool,
}

/// Existing role as listed by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default, alias = "is_system_role")]
    pub is_system_role: bool,
    #[serde(default, alias = "is_director")]
    pub is_director: bool,
}

/// `Super-User` → `super_user`; non `[a-z0-9_]` characters become `_`
fn normalize_role_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn is_reserved_role_name(name: &str) -> bool {
    let normalized = normalize_role_name(name.trim());
    let compact = normalized.replace('_', "");
    RESERVED_ROLE_NAMES
        .iter()
        .any(|reserved| *reserved == normalized || *reserved == compact)
}

fn check_length(name: &str) -> Result<(), RoleValidationError> {
    let len = name.trim().chars().count();
    if len < MIN_ROLE_NAME_LEN {
        Err(RoleValidationError::TooShort)
    } else if len > MAX_ROLE_NAME_LEN {
        Err(RoleValidationError::TooLong)
    } else {
        Ok(())
    }
}

fn name_taken<'a>(
    name: &str,
    mut roles: impl Iterator<Item = &'a RoleSummary>,
) -> bool {
    let wanted = name.trim().to_lowercase();
    roles.any(|role| role.name.trim().to_lowercase() == wanted)
}

/// Checks a role form before submit.
///
/// `editing` is the role being edited, `None` when creating. When several
/// rules fail the most specific one is reported: duplicate, then reserved,
/// then length. Renaming an existing role skips the reserved-name rule, and
/// system roles also skip the duplicate rule.
pub fn validate_role_form(
    form: &RoleForm,
    existing: &[RoleSummary],
    editing: Option<&RoleSummary>,
) -> Result<(), RoleValidationError> {
    let name = form.display_name.as_str();

    match editing {
        None => {
            if name_taken(name, existing.iter()) {
                return Err(RoleValidationError::Duplicate);
            }
            if is_reserved_role_name(name) {
                return Err(RoleValidationError::Reserved(name.to_string()));
            }
            check_length(name)
        }
        Some(current) => {
            if !current.is_system_role
                && name_taken(name, existing.iter().filter(|role| role.id != current.id))
            {
                return Err(RoleValidationError::Duplicate);
            }
            check_length(name)
        }
    }
}

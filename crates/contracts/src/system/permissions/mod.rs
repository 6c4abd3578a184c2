//! Role-based access control shared by the client.
//!
//! Permission keys are `resource.action` pairs. Roles map to fixed key sets
//! (`role_table`); per-user overrides (`overrides`) replace the role default
//! for a single key; `admin` passes every check.

pub mod key;
pub mod matrix;
pub mod overrides;
pub mod resolver;
pub mod role_table;
pub mod user;
pub mod validation;

pub use key::{key_candidates, PermissionKey, PermissionKeyError};
pub use overrides::{CustomPermission, CustomPermissions, OverrideAction};
pub use resolver::{resolve, resolve_for_role};
pub use role_table::{known_roles, role_permissions, ADMIN};
pub use user::{has_any_role, resolve_user, UserPermissions};
pub use validation::{validate_role_form, RoleForm, RoleSummary, RoleValidationError};

pub mod api;
pub mod context;
pub mod guard;
pub mod storage;

pub use context::{has_permission, has_role, is_authenticated, use_auth, AuthProvider, AuthState};
pub use guard::{RequireAuth, RequirePermission, RequireRole};

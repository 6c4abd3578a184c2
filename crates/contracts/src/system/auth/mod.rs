use serde::{Deserialize, Serialize};

use crate::system::permissions::{
    has_any_role, resolve_user, CustomPermissions, UserPermissions, ADMIN,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Backend answers in either case style
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

/// Профиль текущего пользователя
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "full_name", alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Role from the JWT
    #[serde(default)]
    pub role: String,
    /// Roles assigned in the database
    #[serde(default, alias = "role_names")]
    pub role_names: Vec<String>,
    #[serde(default, alias = "is_admin")]
    pub is_admin: bool,
    #[serde(default)]
    pub permissions: UserPermissions,
    #[serde(default, alias = "custom_permissions")]
    pub custom_permissions: CustomPermissions,
}

impl UserInfo {
    pub fn has_admin_access(&self) -> bool {
        self.is_admin || self.role == ADMIN
    }

    pub fn can(&self, resource: &str, action: &str) -> bool {
        resolve_user(self, resource, action)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        has_any_role(self, roles)
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_snake_case_profile() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": 17,
            "username": "n.patel",
            "full_name": "Nisha Patel",
            "email": "nisha@steel.ae",
            "role": "accountant",
            "role_names": ["Credit Control"],
            "permissions": {},
            "custom_permissions": {
                "reports.export": { "action": "grant", "reason": "Quarter close" }
            }
        }))
        .unwrap();

        assert_eq!(user.display_name(), "Nisha Patel");
        assert_eq!(user.role_names, vec!["Credit Control"]);
        assert!(user.can("reports", "export"));
        assert!(user.can("invoices", "create"));
        assert!(!user.can("invoices", "delete"));
        assert!(user.has_any_role(&["Credit Control"]));
    }

    #[test]
    fn test_minimal_profile() {
        let user: UserInfo = serde_json::from_value(json!({ "id": 1, "role": "admin" })).unwrap();
        assert!(user.has_admin_access());
        assert!(user.can("users", "delete"));
        assert_eq!(user.display_name(), "");
    }

    #[test]
    fn test_login_response_aliases() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "jwt-abc",
            "refresh_token": "refresh-xyz",
            "user": { "id": 3, "username": "ops", "role": "operator" }
        }))
        .unwrap();

        assert_eq!(response.access_token, "jwt-abc");
        assert_eq!(response.refresh_token.as_deref(), Some("refresh-xyz"));
        assert!(response.user.can("products", "create"));
    }
}

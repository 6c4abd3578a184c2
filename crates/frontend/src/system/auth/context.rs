use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Fails closed while the profile is not loaded
    pub fn can(&self, resource: &str, action: &str) -> bool {
        self.user_info
            .as_ref()
            .map(|user| user.can(resource, action))
            .unwrap_or(false)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.user_info
            .as_ref()
            .map(|user| user.has_any_role(roles))
            .unwrap_or(false)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    // Восстанавливаем сессию из localStorage при монтировании
    create_effect(move |_| {
        spawn_local(async move {
            let Some(access_token) = storage::get_access_token() else {
                return;
            };

            match api::get_current_user(&access_token).await {
                Ok(user_info) => {
                    set_auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                    });
                }
                Err(e) => {
                    log::warn!("Stored session rejected, trying refresh: {}", e);
                    match restore_with_refresh().await {
                        Some(state) => set_auth_state.set(state),
                        None => storage::clear_tokens(),
                    }
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

async fn restore_with_refresh() -> Option<AuthState> {
    let refresh_token = storage::get_refresh_token()?;
    let response = match api::refresh_token(refresh_token).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Token refresh failed: {}", e);
            return None;
        }
    };

    storage::save_access_token(&response.access_token);
    if response.refresh_token.is_some() {
        storage::save_refresh_token(response.refresh_token.as_deref());
    }

    let user_info = api::get_current_user(&response.access_token).await.ok()?;
    Some(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(user_info),
    })
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub fn is_authenticated() -> bool {
    let (auth_state, _) = use_auth();
    auth_state.get().is_authenticated()
}

/// Permission check for the signed-in user
pub fn has_permission(resource: &str, action: &str) -> bool {
    let (auth_state, _) = use_auth();
    auth_state.with(|state| state.can(resource, action))
}

/// JWT role or any database-assigned role is in `roles`
pub fn has_role(roles: &[&str]) -> bool {
    let (auth_state, _) = use_auth();
    auth_state.with(|state| state.has_any_role(roles))
}

pub async fn do_login(email: String, password: String) -> Result<(), String> {
    let (_, set_auth_state) = use_auth();
    let response = api::login(email, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(response.refresh_token.as_deref());

    log::info!("Signed in as {}", response.user.display_name());
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });

    Ok(())
}

pub async fn do_logout() -> Result<(), String> {
    let (_, set_auth_state) = use_auth();

    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("Logout API call failed: {}", e);
        }
    }

    // Сессию очищаем в любом случае
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::permissions::{CustomPermission, UserPermissions};

    fn state(role: &str) -> AuthState {
        AuthState {
            access_token: Some("jwt".to_string()),
            user_info: Some(UserInfo {
                id: 5,
                username: "k.ali".to_string(),
                role: role.to_string(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_anonymous_state_fails_closed() {
        let anonymous = AuthState::default();
        assert!(!anonymous.is_authenticated());
        assert!(!anonymous.can("invoices", "read"));
        assert!(!anonymous.has_any_role(&["admin"]));
    }

    #[test]
    fn test_state_delegates_to_resolver() {
        let viewer = state("viewer");
        assert!(viewer.is_authenticated());
        assert!(viewer.can("invoices", "read"));
        assert!(!viewer.can("invoices", "delete"));
        assert!(viewer.has_any_role(&["viewer", "sales"]));
        assert!(state("admin").can("users", "delete"));
    }

    #[test]
    fn test_state_uses_server_grants_and_overrides() {
        let mut sales = state("sales");
        if let Some(user) = sales.user_info.as_mut() {
            user.permissions = UserPermissions::from_keys(["quotations.read"]);
            user.custom_permissions
                .insert("reports.export".to_string(), CustomPermission::grant(None));
        }

        assert!(sales.can("quotations", "read"));
        assert!(!sales.can("invoices", "create"));
        assert!(sales.can("reports", "export"));
    }
}

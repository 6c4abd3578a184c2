use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires authentication
/// Shows fallback if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <div>"Not authenticated. Please login."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders children only when the user holds `resource.action`
#[component]
pub fn RequirePermission(
    #[prop(into)] resource: String,
    #[prop(into)] action: String,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|state| state.is_authenticated() && state.can(&resource, &action))
            fallback=|| view! { <div>"Access denied. You do not have permission to view this page."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders children only for one of `roles` (JWT or database-assigned)
#[component]
pub fn RequireRole(roles: Vec<&'static str>, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|state| state.is_authenticated() && state.has_any_role(&roles))
            fallback=|| view! { <div>"Access denied. Required role missing."</div> }
        >
            {children()}
        </Show>
    }
}

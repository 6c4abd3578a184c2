use contracts::system::permissions::matrix::{
    apply_edit, restore_override, MatrixEdit, PermissionMatrix,
};
use leptos::prelude::*;

use super::api;

/// Apply an edit to the matrix locally, then persist it.
///
/// When the backend rejects it only this user's cell is rolled back.
pub async fn commit_edit(
    matrix: RwSignal<PermissionMatrix>,
    user_id: i64,
    permission_key: String,
    edit: MatrixEdit,
    reason: Option<String>,
) -> Result<(), String> {
    let previous = matrix.with_untracked(|m| {
        m.users
            .iter()
            .find(|u| u.id == user_id)
            .and_then(|u| u.custom_permissions.get(&permission_key).cloned())
    });

    matrix.update(|m| {
        if let Some(user) = m.user_mut(user_id) {
            apply_edit(user, &permission_key, edit, reason.clone());
        }
    });

    let result = match edit {
        MatrixEdit::Remove => api::remove_custom_permission(user_id, &permission_key).await,
        MatrixEdit::Grant | MatrixEdit::Deny => {
            api::set_custom_permission(user_id, &permission_key, edit, reason.as_deref()).await
        }
    };

    if let Err(e) = &result {
        log::error!("Permission edit {:?} on {} for user {} failed: {}", edit, permission_key, user_id, e);
        matrix.update(|m| {
            if let Some(user) = m.user_mut(user_id) {
                restore_override(user, &permission_key, previous);
            }
        });
    }

    result
}

use contracts::system::permissions::matrix::{MatrixEdit, PermissionMatrix};
use gloo_net::http::Request;
use serde::Serialize;

use crate::shared::api_utils::{api_url, auth_header, error_message, get_json};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomPermissionRequest<'a> {
    permission_key: &'a str,
    action: MatrixEdit,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// Users × permission keys for the admin matrix
pub async fn fetch_matrix() -> Result<PermissionMatrix, String> {
    let payload = get_json("/api/permissions/matrix", "Failed to load permissions matrix").await?;

    // Either the matrix itself or `{ "data": matrix }`
    let matrix = match payload.get("data") {
        Some(data) if data.is_object() => data.clone(),
        _ => payload,
    };

    serde_json::from_value(matrix).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Store a grant/deny override for one user and key
pub async fn set_custom_permission(
    user_id: i64,
    permission_key: &str,
    action: MatrixEdit,
    reason: Option<&str>,
) -> Result<(), String> {
    if action == MatrixEdit::Remove {
        return remove_custom_permission(user_id, permission_key).await;
    }

    let auth_header = auth_header()?;
    let body = CustomPermissionRequest {
        permission_key,
        action,
        reason: reason.filter(|r| !r.trim().is_empty()),
    };

    let response = Request::post(&api_url(&format!(
        "/api/permissions/users/{}/custom",
        user_id
    )))
    .header("Authorization", &auth_header)
    .json(&body)
    .map_err(|e| format!("Failed to serialize request: {}", e))?
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to update permission").await);
    }

    Ok(())
}

/// Drop the override so the role default applies again
pub async fn remove_custom_permission(user_id: i64, permission_key: &str) -> Result<(), String> {
    let auth_header = auth_header()?;

    let response = Request::delete(&api_url(&format!(
        "/api/permissions/users/{}/custom/{}",
        user_id,
        urlencoding::encode(permission_key)
    )))
    .header("Authorization", &auth_header)
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Failed to remove custom override").await);
    }

    Ok(())
}

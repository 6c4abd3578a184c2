//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use contracts::shared::normalize::{list_payload, normalize_list, Normalize};
use gloo_net::http::{Request, Response};
use serde_json::Value;

use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// `Bearer <token>` from localStorage
pub fn auth_header() -> Result<String, String> {
    storage::get_access_token()
        .map(|token| format!("Bearer {}", token))
        .ok_or_else(|| "Not authenticated".to_string())
}

/// Server-provided message (`message` / `error`), or the status code.
pub async fn error_message(response: Response, action: &str) -> String {
    let status = response.status();
    let body: Option<Value> = response.json().await.ok();
    let detail = body.as_ref().and_then(|b| {
        b.get("message")
            .or_else(|| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match detail {
        Some(detail) => format!("{}: {}", action, detail),
        None => format!("{}: {}", action, status),
    }
}

/// Authorized GET returning the raw JSON body
pub async fn get_json(path: &str, action: &str) -> Result<Value, String> {
    let auth_header = auth_header()?;

    let response = Request::get(&api_url(path))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, action).await);
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Fetch a list endpoint and run every record through the entity normalizer.
///
/// Records that cannot be normalized are dropped (and logged); the call only
/// fails on transport or HTTP errors.
pub async fn fetch_normalized<T: Normalize>(path: &str, source: &str) -> Result<Vec<T>, String> {
    let payload = get_json(path, &format!("Failed to fetch {}", T::ENTITY)).await?;
    let records = normalize_list::<T>(list_payload(&payload, T::ENTITY), source);
    log::debug!("[{}] loaded {} {}", source, records.len(), T::ENTITY);
    Ok(records)
}

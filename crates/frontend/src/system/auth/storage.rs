use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "steelerp_access_token";
const REFRESH_TOKEN_KEY: &str = "steelerp_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

/// Some backends keep the refresh token in an HttpOnly cookie and send none
pub fn save_refresh_token(token: Option<&str>) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    let _ = match token {
        Some(token) => storage.set_item(REFRESH_TOKEN_KEY, token),
        None => storage.remove_item(REFRESH_TOKEN_KEY),
    };
}

pub fn get_refresh_token() -> Option<String> {
    get_local_storage()?
        .get_item(REFRESH_TOKEN_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}

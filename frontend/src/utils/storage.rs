use web_sys::{Storage, Window};

pub const TOKEN_KEY: &str = "scpm.auth.token";
pub const USER_KEY: &str = "scpm.auth.user";

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn session_storage() -> Result<Storage, String> {
    window()?
        .session_storage()
        .map_err(|_| "No sessionStorage".to_string())?
        .ok_or_else(|| "No sessionStorage".to_string())
}

pub fn read_session_item(key: &str) -> Option<String> {
    session_storage()
        .ok()
        .and_then(|storage| storage.get_item(key).ok().flatten())
}

//! Support for library configuration options

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The environment variable that tells where the API lives
pub const BACKEND_URL_VAR: &str = "LIFEBOARD_BACKEND_URL";
/// The API base URL used when nothing is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// The environment variable that tells where the local data (e.g. the session) is stored
pub const DATA_DIR_VAR: &str = "LIFEBOARD_DATA_DIR";
/// The data folder used when nothing is configured
pub const DEFAULT_DATA_DIR: &str = ".lifeboard";

/// The storage key that holds the signed-in user
pub const SESSION_KEY: &str = "user";

/// Base URL of the API, resolved from the environment at first use.
/// Feel free to override it when initing this library.
pub static BACKEND_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    Arc::new(Mutex::new(resolve_backend_url(std::env::var(BACKEND_URL_VAR).ok())))
});

/// Pick the configured URL if there is a non-blank one, the default otherwise. Trailing slashes are removed.
pub fn resolve_backend_url(configured: Option<String>) -> String {
    let url = match configured {
        Some(url) if url.trim().is_empty() == false => url.trim().to_string(),
        _ => DEFAULT_BACKEND_URL.to_string(),
    };
    url.trim_end_matches('/').to_string()
}

/// The current API base URL
pub fn backend_url() -> String {
    match BACKEND_URL.lock() {
        Ok(url) => url.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override the API base URL for the rest of the program
pub fn set_backend_url(url: &str) {
    let resolved = resolve_backend_url(Some(url.to_string()));
    match BACKEND_URL.lock() {
        Ok(mut current) => *current = resolved,
        Err(poisoned) => *poisoned.into_inner() = resolved,
    }
}

/// Get the folder where local data is stored
pub fn data_dir() -> PathBuf {
    match std::env::var(DATA_DIR_VAR) {
        Ok(dir) if dir.trim().is_empty() == false => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use std::sync::atomic::{AtomicBool, Ordering};

/// Backend base URL baked in at build time, e.g. `http://127.0.0.1:8000`
const CONFIGURED_API_BASE: Option<&str> = option_env!("SUPPLIER_API_BASE");

static FALLBACK_WARNED: AtomicBool = AtomicBool::new(false);

/// Get the base URL for API requests
///
/// Uses `SUPPLIER_API_BASE` when the bundle was built with it, otherwise
/// the origin the page was served from.
pub fn api_base() -> String {
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    if CONFIGURED_API_BASE.is_none() && !FALLBACK_WARNED.swap(true, Ordering::Relaxed) {
        log::warn!(
            "SUPPLIER_API_BASE was not set at build time, using page origin {}",
            origin.as_deref().unwrap_or("<unknown>")
        );
    }
    resolve_base(CONFIGURED_API_BASE, origin)
}

fn resolve_base(configured: Option<&str>, origin: Option<String>) -> String {
    match configured.map(str::trim).filter(|v| !v.is_empty()) {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => origin.unwrap_or_default(),
    }
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/sales");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_base_wins_and_loses_trailing_slash() {
        assert_eq!(
            resolve_base(Some("http://api.local:8000/"), Some("http://page".into())),
            "http://api.local:8000"
        );
    }

    #[test]
    fn falls_back_to_origin() {
        assert_eq!(resolve_base(None, Some("http://page:8080".into())), "http://page:8080");
        assert_eq!(resolve_base(Some("  "), Some("http://page".into())), "http://page");
        assert_eq!(resolve_base(None, None), "");
    }
}

//! Shared credential and session-cookie state.

use arc_swap::ArcSwapOption;
use axum::http::HeaderValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::sync::Arc;

/// Holds the static Basic-auth header and the currently known upstream
/// session cookie.
///
/// Explicitly owned and passed around as `Arc<CredentialStore>` so tests can
/// substitute their own instance; nothing in the crate keeps global state.
/// The cookie is an atomic pointer swap: concurrent exchanges read and write
/// it without locking, and a reader sees either the old or the new value in
/// full.
pub struct CredentialStore {
    auth_header: HeaderValue,
    cookie: ArcSwapOption<String>,
}

impl CredentialStore {
    /// Build a store from the configured credentials. The Basic token is
    /// computed once and reused for the process lifetime.
    pub fn new(username: &str, password: &str) -> Self {
        let token = STANDARD.encode(format!("{}:{}", username, password));
        // Base64 output is plain ASCII, always a valid header value.
        let mut auth_header = HeaderValue::from_str(&format!("Basic {}", token))
            .expect("base64 token is a valid header value");
        auth_header.set_sensitive(true);
        Self {
            auth_header,
            cookie: ArcSwapOption::empty(),
        }
    }

    /// The `Authorization` value sent on every upstream request.
    pub fn auth_header(&self) -> HeaderValue {
        self.auth_header.clone()
    }

    /// The currently held session cookie, if any. Non-blocking.
    pub fn cookie(&self) -> Option<Arc<String>> {
        self.cookie.load_full()
    }

    /// Overwrite the session cookie. Last write wins.
    pub fn set_cookie(&self, value: String) {
        self.cookie.store(Some(Arc::new(value)));
    }
}

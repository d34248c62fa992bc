//! Outbound request enrichment.
//!
//! # Responsibilities
//! - Set `Authorization` to the configured Basic token, unconditionally
//! - Replace the `Cookie` header with the shared session cookie when one
//!   is held; otherwise leave the client's cookie untouched
//!
//! Pure header mutation, no side effects, never blocks.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::session::CredentialStore;

/// Enrich the headers of a request about to be forwarded upstream.
pub fn enrich_request_headers(headers: &mut HeaderMap, store: &CredentialStore) {
    // Client-supplied credentials never reach the upstream.
    headers.insert(header::AUTHORIZATION, store.auth_header());

    if let Some(cookie) = store.cookie() {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.insert(header::COOKIE, value);
        }
    }
}

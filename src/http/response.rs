//! Upstream response interception.
//!
//! # Responsibilities
//! - Capture the upstream session cookie and strip `Set-Cookie` from the
//!   client-facing response
//! - Rewrite `Location` headers pointing at the upstream so redirects stay
//!   routed through the proxy
//! - Downgrade the upstream's 500-with-Location pattern to a real 302
//! - Synthesize CORS headers for browser clients
//!
//! # Design Decisions
//! - Stage order is fixed and tested: cookie capture runs first,
//!   unconditionally, before rewriting or CORS
//! - Each stage is conditional on its header being present; absence is
//!   never an error

use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

use crate::session::{cookie_pair, CredentialStore};

/// Rewrites upstream response status and headers before they are relayed.
///
/// Holds the shared credential store plus the two base URLs involved in
/// redirect rewriting. One instance serves all exchanges.
pub struct ResponseInterceptor {
    store: Arc<CredentialStore>,
    upstream_url: String,
    external_url: String,
}

impl ResponseInterceptor {
    pub fn new(store: Arc<CredentialStore>, upstream_url: String, external_url: String) -> Self {
        Self {
            store,
            upstream_url,
            external_url,
        }
    }

    /// Apply all interception stages to an upstream response's status and
    /// headers. `client_headers` are the headers of the originating client
    /// request (CORS mirrors them). Returns the client-facing status.
    pub fn apply(
        &self,
        client_headers: &HeaderMap,
        status: StatusCode,
        headers: &mut HeaderMap,
    ) -> StatusCode {
        self.capture_session_cookie(headers);
        let status = self.rewrite_redirect(status, headers);
        synthesize_cors(client_headers, headers);
        status
    }

    /// Store the first `Set-Cookie` entry's name=value pair and remove the
    /// header entirely. Clients never see or manage the upstream session.
    fn capture_session_cookie(&self, headers: &mut HeaderMap) {
        if !headers.contains_key(header::SET_COOKIE) {
            return;
        }
        let captured = headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(cookie_pair)
            .map(str::to_owned);
        if let Some(pair) = captured {
            tracing::debug!("Upstream issued a new session cookie");
            self.store.set_cookie(pair);
        }
        headers.remove(header::SET_COOKIE);
    }

    /// Rewrite a `Location` pointing at the upstream to point at the proxy,
    /// and turn the upstream's 500-with-Location into a 302.
    ///
    /// The upstream signals "needs a fresh redirect" as a 500 carrying a
    /// Location header; strict HTTP clients would treat that as a hard
    /// failure, so the status is downgraded whenever a Location is present.
    fn rewrite_redirect(&self, status: StatusCode, headers: &mut HeaderMap) -> StatusCode {
        let rewritten = headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|location| location.strip_prefix(self.upstream_url.as_str()))
            .map(|rest| format!("{}{}", self.external_url, rest));

        if let Some(location) = rewritten {
            if let Ok(value) = HeaderValue::from_str(&location) {
                headers.insert(header::LOCATION, value);
            }
        }

        if status == StatusCode::INTERNAL_SERVER_ERROR && headers.contains_key(header::LOCATION) {
            StatusCode::FOUND
        } else {
            status
        }
    }
}

/// Mirror CORS request headers into the response.
///
/// Wildcard origin together with allow-credentials is the deployed
/// behavior, kept literally even though browsers enforcing the CORS spec
/// reject the pair.
pub fn synthesize_cors(client_headers: &HeaderMap, headers: &mut HeaderMap) {
    if let Some(method) = client_headers.get(header::ACCESS_CONTROL_REQUEST_METHOD) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, method.clone());
    }
    if let Some(requested) = client_headers.get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }
    if client_headers.contains_key(header::ORIGIN) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

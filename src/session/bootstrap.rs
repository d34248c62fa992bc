//! Initial session acquisition.
//!
//! # Responsibilities
//! - Issue one authenticated GET against a known-accessible upstream
//!   resource before traffic arrives
//! - Follow the upstream's session-establishing redirect chain
//! - Store the issued cookie in the credential store
//!
//! Running this is optional: the response interceptor backfills the cookie
//! from the first upstream response that sets one, so a failed bootstrap is
//! logged and tolerated.

use std::time::Duration;

use axum::http::header;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::session::store::CredentialStore;
use crate::session::cookie_pair;

/// Failure modes of the bootstrap operation.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("bootstrap request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream answered but issued no cookie. This is a precondition
    /// violation for bootstrap, not a tolerated absence.
    #[error("upstream response carried no usable Set-Cookie header (status {0})")]
    MissingSetCookie(reqwest::StatusCode),
}

/// Fetch `upstream_url + bootstrap_path` with the configured credentials,
/// store the issued session cookie, and return it.
pub async fn bootstrap(
    config: &ProxyConfig,
    store: &CredentialStore,
) -> Result<String, BootstrapError> {
    // The proxy talks to the upstream directly; system proxy settings do
    // not apply to this hop.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .timeout(Duration::from_secs(config.timeouts.bootstrap_secs))
        .no_proxy()
        .build()?;

    let url = format!("{}{}", config.upstream_url, config.bootstrap_path);
    tracing::debug!(url = %url, "Requesting initial session cookie");

    let mut request = client.get(&url).header(header::AUTHORIZATION, store.auth_header());
    if let Some(cookie) = store.cookie() {
        request = request.header(header::COOKIE, cookie.as_str());
    }

    let response = request.send().await?;
    let status = response.status();

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_pair)
        .map(str::to_owned)
        .ok_or(BootstrapError::MissingSetCookie(status))?;

    store.set_cookie(cookie.clone());
    tracing::info!(status = %status, "Session cookie acquired");
    Ok(cookie)
}

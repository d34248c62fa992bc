//! Environment variable overrides.
//!
//! # Responsibilities
//! - Inject the upstream secret (`UPSTREAM_PASSWORD`) into the config
//! - Allow the deployment to override URLs and bind address without a file
//!
//! Environment always wins over the config file.

use crate::config::schema::ProxyConfig;

/// Secret presented to the upstream as the Basic-auth password.
pub const UPSTREAM_PASSWORD: &str = "UPSTREAM_PASSWORD";
/// Base URL of the upstream service.
pub const UPSTREAM_URL: &str = "UPSTREAM_URL";
/// Externally advertised base URL of this proxy.
pub const PROXY_EXTERNAL_URL: &str = "PROXY_EXTERNAL_URL";
/// Bind address for the listener.
pub const PROXY_LISTEN_ADDRESS: &str = "PROXY_LISTEN_ADDRESS";
/// Basic-auth username.
pub const UPSTREAM_USERNAME: &str = "UPSTREAM_USERNAME";

/// Apply environment overrides on top of a loaded configuration.
pub fn apply_env_overrides(config: &mut ProxyConfig) {
    if let Ok(password) = std::env::var(UPSTREAM_PASSWORD) {
        config.password = password;
    }
    if let Ok(url) = std::env::var(UPSTREAM_URL) {
        config.upstream_url = url;
    }
    if let Ok(url) = std::env::var(PROXY_EXTERNAL_URL) {
        config.external_url = url;
    }
    if let Ok(addr) = std::env::var(PROXY_LISTEN_ADDRESS) {
        config.listen_address = addr;
    }
    if let Ok(username) = std::env::var(UPSTREAM_USERNAME) {
        config.username = username;
    }
}

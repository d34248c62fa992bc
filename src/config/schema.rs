//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! The upstream secret is deliberately absent from the file schema; it is
//! injected from the environment by `config::env`.

use serde::{Deserialize, Serialize};

/// Root configuration for the session proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Bind address for the HTTP listener (e.g., "0.0.0.0:8089").
    pub listen_address: String,

    /// Base URL of the upstream service being proxied.
    /// Normalized to end with a trailing slash.
    pub upstream_url: String,

    /// Externally advertised base URL of this proxy. Upstream `Location`
    /// headers pointing at `upstream_url` are rewritten to this prefix.
    /// Normalized to end with a trailing slash.
    pub external_url: String,

    /// Basic-auth username presented to the upstream.
    pub username: String,

    /// Basic-auth secret presented to the upstream. Never read from the
    /// config file; populated from `UPSTREAM_PASSWORD`.
    #[serde(skip)]
    pub password: String,

    /// Upstream path fetched by the session bootstrapper to obtain an
    /// initial session cookie. Relative to `upstream_url`.
    pub bootstrap_path: String,

    /// Upstream paths considered sensitive. Informational only: no access
    /// check consults this list in the current behavior.
    pub restricted_paths: Vec<String>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8089".to_string(),
            upstream_url: "https://thredds.arpa.veneto.it/".to_string(),
            external_url: "http://localhost:8089/".to_string(),
            username: "inkode".to_string(),
            password: String::new(),
            bootstrap_path: "thredds/dodsC/ens14ym/pr_anom_pp_ts_rcp26_DJF.nc.html".to_string(),
            restricted_paths: vec![
                "/thredds/wms/".to_string(),
                "/thredds/catalog/ens14ym/catalog.html".to_string(),
                "/thredds/dodsC/ens14ym/pr_anom_pp_ts_rcp26_DJF.nc.html".to_string(),
                "/thredds/restrictedAccess/dati_accordo".to_string(),
            ],
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Ensure the base URLs end with a trailing slash so prefix rewriting
    /// and path joining behave consistently.
    pub fn normalize(&mut self) {
        if !self.upstream_url.ends_with('/') {
            self.upstream_url.push('/');
        }
        if !self.external_url.ends_with('/') {
            self.external_url.push('/');
        }
    }
}

/// Timeout configuration for upstream operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total request timeout (client-facing) in seconds.
    pub request_secs: u64,

    /// Timeout for the bootstrap request in seconds.
    pub bootstrap_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 300,
            bootstrap_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_normalized() {
        let config = ProxyConfig::default();
        assert!(config.upstream_url.ends_with('/'));
        assert!(config.external_url.ends_with('/'));
        assert!(config.password.is_empty());
    }

    #[test]
    fn test_normalize_appends_slash() {
        let mut config = ProxyConfig {
            upstream_url: "https://data.example.org".to_string(),
            external_url: "http://proxy.example.org".to_string(),
            ..Default::default()
        };
        config.normalize();
        assert_eq!(config.upstream_url, "https://data.example.org/");
        assert_eq!(config.external_url, "http://proxy.example.org/");
    }

    #[test]
    fn test_password_not_deserialized_from_file() {
        let config: ProxyConfig = toml::from_str(
            r#"
            listen_address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen_address, "127.0.0.1:9000");
        assert!(config.password.is_empty());
    }
}

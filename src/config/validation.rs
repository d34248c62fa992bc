//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - URLs must parse and carry http/https schemes
//! - Bind address must parse as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listen_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listen_address",
            message: format!("not a valid socket address: {:?}", config.listen_address),
        });
    }

    check_base_url("upstream_url", &config.upstream_url, &mut errors);
    check_base_url("external_url", &config.external_url, &mut errors);

    if config.username.is_empty() {
        errors.push(ValidationError {
            field: "username",
            message: "must not be empty".to_string(),
        });
    }

    if config.bootstrap_path.starts_with('/') {
        errors.push(ValidationError {
            field: "bootstrap_path",
            message: "must be relative to upstream_url (no leading slash)".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field,
            message: format!("unsupported scheme {:?}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("not a valid URL: {}", e),
        }),
    }
}

//! Upstream session management subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     bootstrap.rs (authenticated GET, follows redirect chain)
//!         → store.rs (cookie stored)
//!
//! per exchange:
//!     request interceptor reads store.rs (auth header + cookie)
//!     response interceptor writes store.rs (Set-Cookie capture)
//! ```
//!
//! # Design Decisions
//! - One shared upstream session for all clients; the upstream treats the
//!   proxy as a single logical user. There is deliberately no per-client
//!   isolation.
//! - Cookie updates are last-write-wins atomic swaps; readers never block
//!   and never observe a torn value.
//! - No expiry tracking: a stale cookie is replaced only when the upstream
//!   issues a new one.

pub mod bootstrap;
pub mod store;

pub use bootstrap::{bootstrap, BootstrapError};
pub use store::CredentialStore;

/// First `name=value` segment of a `Set-Cookie` value, attributes
/// (`Path`, `Expires`, ...) dropped.
pub fn cookie_pair(set_cookie: &str) -> Option<&str> {
    let pair = set_cookie.split(';').next()?.trim();
    if pair.is_empty() {
        None
    } else {
        Some(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_pair_strips_attributes() {
        assert_eq!(cookie_pair("sid=abc123; Path=/; HttpOnly"), Some("sid=abc123"));
    }

    #[test]
    fn test_cookie_pair_without_attributes() {
        assert_eq!(cookie_pair("sid=abc123"), Some("sid=abc123"));
    }

    #[test]
    fn test_cookie_pair_empty() {
        assert_eq!(cookie_pair(""), None);
        assert_eq!(cookie_pair("   ; Path=/"), None);
    }
}

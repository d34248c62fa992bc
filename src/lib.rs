//! Shared-session authenticating proxy.
//!
//! Sits between anonymous clients and a single upstream that requires HTTP
//! Basic credentials plus a server-issued session cookie. The proxy injects
//! the credential into every forwarded request, owns the upstream session
//! cookie on behalf of all clients, rewrites upstream redirects to point back
//! at itself, and synthesizes CORS headers for browser clients.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod session;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use session::CredentialStore;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! serde defaults
//!     → loader.rs (optional TOML file, parse & deserialize)
//!     → env.rs (environment overrides: secret, URLs, bind address)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the binary runs with nothing but
//!   `UPSTREAM_PASSWORD` set
//! - The upstream secret is only ever read from the environment, never
//!   from the config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ProxyConfig;

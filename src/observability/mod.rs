//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; filtering through `RUST_LOG`
//! - No metrics endpoint: operator visibility for this proxy is log-based

pub mod logging;

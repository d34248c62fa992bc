//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! client request
//!     → server.rs (Axum catch-all, builds upstream request)
//!     → request.rs (inject Authorization + session cookie)
//!     → pooled hyper client (forward, body streamed)
//!     → response.rs (capture Set-Cookie, rewrite Location, CORS)
//!     → relay status/headers, stream body to client
//! ```
//!
//! # Design Decisions
//! - Interceptors are explicit functions over header maps invoked by the
//!   dispatcher at fixed pipeline stages; ordering is a tested contract
//! - Only status and headers are rewritten; bodies are never buffered

pub mod request;
pub mod response;
pub mod server;

pub use response::ResponseInterceptor;
pub use server::HttpServer;

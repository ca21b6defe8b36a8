//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add request ID)
//!     → engine::decide (bypass / preflight / redirect / forward)
//!     → server.rs (act on decision, forward to upstream)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{HttpServer, X_RESOLVED_LOCALE, X_ROUTE_PARAMS};

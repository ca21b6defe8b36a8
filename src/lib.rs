//! Locale-Aware Route Canonicalization Gateway Library

pub mod config;
pub mod engine;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use engine::{Decision, RoutingEngine};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured log events, request-id correlated)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; subscriber initialized at startup
//! - Request ID flows through all log events in the handler
//! - Metrics are cheap (atomic increments) and optional (no-op without
//!   an installed exporter)

pub mod metrics;

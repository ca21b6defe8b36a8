//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks: locale set, dictionary
//!       invariants, origin patterns, cache bounds)
//!     → GatewayConfig (validated, immutable)
//!     → compiled into the routing engine at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable for the process lifetime; changes require restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Dictionary invariants are load-time errors so the engine's reverse
//!   lookups stay unambiguous at runtime

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::LocaleConfig;
pub use schema::UpstreamConfig;

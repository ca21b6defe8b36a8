//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::locale::Locale;

/// Root configuration for the canonicalization gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream page-resolution service to forward pass-through traffic to.
    pub upstream: UpstreamConfig,

    /// Supported locales, default locale, and per-locale route dictionaries.
    pub locales: LocaleConfig,

    /// CORS allow-list and static method/header lists.
    pub cors: CorsConfig,

    /// Reserved bypass prefixes and section alias sets.
    pub routing: RoutingConfig,

    /// Parse cache bounds.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream page-resolution service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Locale set and route dictionaries.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locales, in declaration order. Order decides which
    /// foreign dictionary wins when translating a segment.
    pub supported: Vec<Locale>,

    /// Locale injected when a path carries none.
    pub default: Locale,

    /// Per-locale semantic-key → path-segment tables.
    pub dictionaries: BTreeMap<Locale, BTreeMap<String, String>>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec![Locale::En, Locale::Vi, Locale::Zh],
            default: Locale::En,
            dictionaries: BTreeMap::new(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins: exact strings or single-`*` patterns.
    pub allowed_origins: Vec<String>,

    /// Methods advertised on every response.
    pub allow_methods: Vec<String>,

    /// Headers advertised on every response.
    pub allow_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allow_headers: ["Content-Type", "Authorization"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Bypass prefixes and section alias sets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Path prefixes exempt from all canonicalization.
    pub bypass_prefixes: Vec<String>,

    /// Parent slugs, across locales, naming a news section.
    pub news_aliases: Vec<String>,

    /// Parent slugs, across locales, naming a careers section.
    pub career_aliases: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            bypass_prefixes: ["/_build", "/static", "/api", "/admin", "/monitoring"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            news_aliases: ["news", "tin_tuc", "xin_wen"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            career_aliases: ["careers", "tuyen_dung", "zhao_pin"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Parse cache bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,

    /// Maximum number of live entries.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            max_entries: 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

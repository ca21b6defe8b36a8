//! Locale-aware route canonicalization engine.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, query, Origin)
//!     → classifier.rs (reserved prefix / dotted path → bypass)
//!     → cors.rs (negotiate response headers; OPTIONS → preflight)
//!     → canonical.rs (strip trailing slashes)
//!     → locale.rs (validate or inject the leading locale segment)
//!     → translate.rs (rewrite foreign-locale segments)
//!     → changed? → one permanent redirect to the canonical path
//!     → parser.rs (+ cache.rs) → RouteMatch for page resolution
//!
//! Engine Compilation (at startup):
//!     GatewayConfig
//!     → compile origin patterns, dictionaries, alias sets
//!     → Freeze as immutable RoutingEngine
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, no await points, no per-request state
//!   beyond the bounded parse cache
//! - All corrections fold into a single redirect hop
//! - Fail-open at the boundary: an internal error forwards the request
//!   unmodified, never a 5xx attributable to this layer

pub mod cache;
pub mod canonical;
pub mod classifier;
pub mod cors;
pub mod locale;
pub mod parser;
pub mod translate;

use std::collections::HashSet;
use std::time::Duration;

use axum::http::Method;
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::engine::cache::ParseCache;
use crate::engine::classifier::RequestClassifier;
use crate::engine::cors::{CorsHeaders, CorsNegotiator};
use crate::engine::locale::{Locale, LocaleResolution, LocaleResolver};
use crate::engine::parser::{RouteMatch, RouteParser};
use crate::engine::translate::{RouteDictionary, SlugTranslator};
use crate::observability::metrics;

/// Internal pipeline failures, all absorbed at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request path is not in origin-form (must start with `/`).
    #[error("malformed request path: {0:?}")]
    MalformedPath(String),
}

/// What the gateway should do with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Forward unchanged: reserved path, malformed input, or fail-open.
    Bypass,
    /// Answer an OPTIONS preflight immediately.
    Preflight {
        /// Negotiated response headers.
        cors: CorsHeaders,
    },
    /// Permanent redirect to the canonical URL.
    Redirect {
        /// Canonical path plus the original query string.
        location: String,
        /// Negotiated response headers.
        cors: CorsHeaders,
    },
    /// Annotated pass-through to page resolution.
    Forward {
        /// Negotiated response headers.
        cors: CorsHeaders,
        /// Locale resolved from the leading segment.
        locale: Locale,
        /// Parsed routing parameters.
        route: RouteMatch,
    },
}

/// The compiled, immutable canonicalization engine.
pub struct RoutingEngine {
    classifier: RequestClassifier,
    cors: CorsNegotiator,
    locales: LocaleResolver,
    translator: SlugTranslator,
    parser: RouteParser,
}

impl RoutingEngine {
    /// Compile an engine from validated configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let classifier = RequestClassifier::new(config.routing.bypass_prefixes.clone());
        let cors = CorsNegotiator::new(
            &config.cors.allowed_origins,
            &config.cors.allow_methods,
            &config.cors.allow_headers,
        );
        let locales = LocaleResolver::new(
            config.locales.supported.clone(),
            config.locales.default,
        );
        let empty = Default::default();
        let dictionaries = config
            .locales
            .supported
            .iter()
            .map(|&locale| {
                let table = config.locales.dictionaries.get(&locale).unwrap_or(&empty);
                RouteDictionary::new(locale, table)
            })
            .collect();
        let translator = SlugTranslator::new(dictionaries);
        let cache = ParseCache::new(
            Duration::from_secs(config.cache.ttl_secs),
            config.cache.max_entries,
        );
        let parser = RouteParser::new(
            config.routing.news_aliases.iter().cloned().collect::<HashSet<_>>(),
            config.routing.career_aliases.iter().cloned().collect::<HashSet<_>>(),
            cache,
        );
        Self { classifier, cors, locales, translator, parser }
    }

    /// Decide what to do with one request. Never fails: internal errors
    /// are logged, counted, and degrade to `Bypass`.
    pub fn decide(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        origin: Option<&str>,
    ) -> Decision {
        match self.run(method, path, query, origin) {
            Ok(decision) => decision,
            Err(error) => {
                tracing::error!(%error, path, "canonicalization failed, forwarding unmodified");
                metrics::record_fail_open();
                Decision::Bypass
            }
        }
    }

    fn run(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        origin: Option<&str>,
    ) -> Result<Decision, EngineError> {
        if self.classifier.is_bypass(path) {
            return Ok(Decision::Bypass);
        }

        let cors = self.cors.negotiate(origin);

        if *method == Method::OPTIONS {
            return Ok(Decision::Preflight { cors });
        }

        if !path.starts_with('/') {
            return Err(EngineError::MalformedPath(path.to_string()));
        }

        let stripped = canonical::strip_trailing_slashes(path);
        let slash_stripped = stripped != path;
        let mut segments = canonical::split_segments(stripped);

        let resolution = self.locales.resolve(segments.first().copied());
        let locale = match resolution {
            LocaleResolution::Supported(locale) => {
                segments.remove(0);
                locale
            }
            LocaleResolution::Unsupported => {
                segments.remove(0);
                self.locales.default_locale()
            }
            LocaleResolution::Missing => self.locales.default_locale(),
        };

        let mut tail: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        let slugs_corrected = self.translator.translate(locale, &mut tail);

        let canonical_path = Self::join(locale, &tail);
        if canonical_path != path {
            if slash_stripped {
                metrics::record_redirect("trailing_slash");
            }
            if !matches!(resolution, LocaleResolution::Supported(_)) {
                metrics::record_redirect("locale");
            }
            if slugs_corrected {
                metrics::record_redirect("slug_translation");
            }
            let location = match query {
                Some(q) if !q.is_empty() => format!("{canonical_path}?{q}"),
                _ => canonical_path,
            };
            return Ok(Decision::Redirect { location, cors });
        }

        let route = self.parser.parse(&tail);
        Ok(Decision::Forward { cors, locale, route })
    }

    fn join(locale: Locale, segments: &[String]) -> String {
        let mut path = String::with_capacity(1 + 2 + segments.iter().map(|s| s.len() + 1).sum::<usize>());
        path.push('/');
        path.push_str(locale.as_str());
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

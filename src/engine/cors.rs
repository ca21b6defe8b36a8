//! CORS header negotiation.
//!
//! # Responsibilities
//! - Match the request Origin against the configured allow-list
//! - Produce the response header set (origin, credentials, methods, headers)
//!
//! # Design Decisions
//! - Patterns compile at startup: exact strings, or one `*` split into an
//!   anchored prefix/suffix pair. Plain string containment, no regex, so
//!   there are no metacharacters to escape.
//! - A matched, present Origin is echoed literally with credentials; every
//!   other request gets the `*` origin and no credentials flag.

/// A compiled allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    /// Requires exact string equality.
    Exact(String),
    /// Single-wildcard entry, anchored at both ends.
    Wildcard {
        /// Text before the `*`.
        prefix: String,
        /// Text after the `*`.
        suffix: String,
    },
}

impl OriginPattern {
    /// Compile a config entry. Entries with more than one `*` are
    /// rejected at config validation, before this runs.
    pub fn compile(entry: &str) -> Self {
        match entry.split_once('*') {
            Some((prefix, suffix)) => OriginPattern::Wildcard {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            None => OriginPattern::Exact(entry.to_string()),
        }
    }

    /// Test an Origin value against this pattern.
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginPattern::Exact(expected) => origin == expected,
            OriginPattern::Wildcard { prefix, suffix } => {
                origin.len() >= prefix.len() + suffix.len()
                    && origin.starts_with(prefix.as_str())
                    && origin.ends_with(suffix.as_str())
            }
        }
    }
}

/// The CORS response header set for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    /// `Access-Control-Allow-Origin` value.
    pub allow_origin: String,
    /// Whether to attach `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
    /// `Access-Control-Allow-Methods` value.
    pub allow_methods: String,
    /// `Access-Control-Allow-Headers` value.
    pub allow_headers: String,
}

/// Computes CORS response headers from the static allow-list.
#[derive(Debug, Clone)]
pub struct CorsNegotiator {
    patterns: Vec<OriginPattern>,
    allow_methods: String,
    allow_headers: String,
}

impl CorsNegotiator {
    /// Compile the configured allow-list and static method/header lists.
    pub fn new(origins: &[String], methods: &[String], headers: &[String]) -> Self {
        Self {
            patterns: origins.iter().map(|o| OriginPattern::compile(o)).collect(),
            allow_methods: methods.join(", "),
            allow_headers: headers.join(", "),
        }
    }

    /// Negotiate headers for a request's Origin, if it sent one.
    pub fn negotiate(&self, origin: Option<&str>) -> CorsHeaders {
        let matched = origin
            .filter(|o| self.patterns.iter().any(|p| p.matches(o)));

        match matched {
            Some(origin) => CorsHeaders {
                allow_origin: origin.to_string(),
                allow_credentials: true,
                allow_methods: self.allow_methods.clone(),
                allow_headers: self.allow_headers.clone(),
            },
            None => CorsHeaders {
                allow_origin: "*".to_string(),
                allow_credentials: false,
                allow_methods: self.allow_methods.clone(),
                allow_headers: self.allow_headers.clone(),
            },
        }
    }
}

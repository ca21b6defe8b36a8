//! Reserved-path bypass gate.
//!
//! # Responsibilities
//! - Exempt reserved prefixes (assets, APIs, admin, monitoring) from canonicalization
//! - Exempt file-like paths (any path containing a dot)
//!
//! # Design Decisions
//! - Prefix matching only, no regex in the hot path
//! - Runs before every other stage; a bypassed request is never touched

/// Decides whether a request path is exempt from the canonicalization pipeline.
#[derive(Debug, Clone)]
pub struct RequestClassifier {
    bypass_prefixes: Vec<String>,
}

impl RequestClassifier {
    /// Create a classifier from the configured reserved prefixes.
    pub fn new(bypass_prefixes: Vec<String>) -> Self {
        Self { bypass_prefixes }
    }

    /// Returns true if the path must be forwarded untouched.
    ///
    /// A dot anywhere in the path is treated as a file extension
    /// (`/favicon.ico`, `/fonts/inter.woff2`) and bypassed.
    pub fn is_bypass(&self, path: &str) -> bool {
        if path.contains('.') {
            return true;
        }
        self.bypass_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

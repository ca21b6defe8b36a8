//! Path canonicalization helpers.
//!
//! # Responsibilities
//! - Strip trailing slashes from non-root paths
//! - Split a path into its non-empty segments
//!
//! # Design Decisions
//! - All trailing slashes go in one pass, so sloppy inputs like
//!   `/en/about//` still canonicalize in a single redirect hop
//! - The root path `/` is left alone

/// Remove trailing slashes from a non-root path.
///
/// Returns the input unchanged when there is nothing to strip.
pub fn strip_trailing_slashes(path: &str) -> &str {
    if path.len() > 1 && path.ends_with('/') {
        let stripped = path.trim_end_matches('/');
        if stripped.is_empty() { "/" } else { stripped }
    } else {
        path
    }
}

/// Split a path into non-empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

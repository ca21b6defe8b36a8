//! Arity-driven route parameter extraction.
//!
//! # Data Flow
//! ```text
//! Locale-stripped segments
//!     → cache lookup (joined key)
//!     → on miss: arity match (0/1/2/3 segments)
//!     → RouteMatch: Page(params) or explicit NotFound
//! ```
//!
//! # Design Decisions
//! - Pure function of the segment array; safe to memoize
//! - Arities above three are an explicit NotFound rather than a silent
//!   empty record; downstream decides how that renders
//! - News/career detection is an alias-set membership test so localized
//!   parent slugs flag correctly without re-translation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::cache::ParseCache;

/// Slug reported for the zero-segment (root) route.
pub const HOME_SLUG: &str = "home";

/// Structured routing parameters handed to page resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteParams {
    /// Top-level page slug (single-segment routes and home).
    pub page_slug: String,
    /// First segment of multi-segment routes.
    pub parent_slug: String,
    /// Final segment of multi-segment routes.
    pub child_slug: String,
    /// Middle segment of three-segment routes.
    pub extra_path: String,
    /// Parent slug named a news section.
    pub is_news: bool,
    /// Parent slug named a careers section.
    pub is_career: bool,
    /// Route used the three-segment nested shape.
    pub is_special_nested_route: bool,
}

/// Outcome of parsing a segment array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteMatch {
    /// A modelled route shape with its parameters.
    Page(RouteParams),
    /// Deeper nesting than any modelled shape.
    NotFound,
}

/// Maps locale-stripped segment arrays to route parameters, memoized.
pub struct RouteParser {
    news_aliases: HashSet<String>,
    career_aliases: HashSet<String>,
    cache: ParseCache,
}

impl RouteParser {
    /// Create a parser over the configured alias sets and cache.
    pub fn new(
        news_aliases: HashSet<String>,
        career_aliases: HashSet<String>,
        cache: ParseCache,
    ) -> Self {
        Self { news_aliases, career_aliases, cache }
    }

    /// Parse a segment array, consulting the cache first.
    pub fn parse(&self, segments: &[String]) -> RouteMatch {
        let key = segments.join("/");
        self.cache.get_or_insert_with(&key, || self.compute(segments))
    }

    fn compute(&self, segments: &[String]) -> RouteMatch {
        match segments {
            [] => RouteMatch::Page(RouteParams {
                page_slug: HOME_SLUG.to_string(),
                ..RouteParams::default()
            }),
            [page] => RouteMatch::Page(RouteParams {
                page_slug: page.clone(),
                ..RouteParams::default()
            }),
            [parent, child] => RouteMatch::Page(RouteParams {
                parent_slug: parent.clone(),
                child_slug: child.clone(),
                is_news: self.news_aliases.contains(parent),
                is_career: self.career_aliases.contains(parent),
                ..RouteParams::default()
            }),
            [parent, extra, child] => RouteMatch::Page(RouteParams {
                parent_slug: parent.clone(),
                extra_path: extra.clone(),
                child_slug: child.clone(),
                is_career: self.career_aliases.contains(parent),
                is_special_nested_route: true,
                ..RouteParams::default()
            }),
            _ => RouteMatch::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parser() -> RouteParser {
        let news = ["news", "tin_tuc", "xin_wen"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let careers = ["careers", "tuyen_dung", "zhao_pin"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        RouteParser::new(news, careers, ParseCache::new(Duration::from_secs(300), 64))
    }

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_segments_is_home() {
        let expected = RouteMatch::Page(RouteParams {
            page_slug: HOME_SLUG.to_string(),
            ..RouteParams::default()
        });
        assert_eq!(parser().parse(&[]), expected);
    }

    #[test]
    fn test_one_segment_is_page_slug() {
        let expected = RouteMatch::Page(RouteParams {
            page_slug: "about".to_string(),
            ..RouteParams::default()
        });
        assert_eq!(parser().parse(&segs(&["about"])), expected);
    }

    #[test]
    fn test_two_segments_flag_sections() {
        let expected = RouteMatch::Page(RouteParams {
            parent_slug: "careers".to_string(),
            child_slug: "123".to_string(),
            is_career: true,
            ..RouteParams::default()
        });
        assert_eq!(parser().parse(&segs(&["careers", "123"])), expected);

        let news = parser().parse(&segs(&["news", "some-article"]));
        let RouteMatch::Page(params) = news else {
            panic!("expected a page match");
        };
        assert!(params.is_news);
        assert!(!params.is_career);
    }

    #[test]
    fn test_localized_parent_aliases_flag() {
        let RouteMatch::Page(params) = parser().parse(&segs(&["tin_tuc", "bai-viet"])) else {
            panic!("expected a page match");
        };
        assert!(params.is_news);
    }

    #[test]
    fn test_three_segments_is_nested() {
        let expected = RouteMatch::Page(RouteParams {
            parent_slug: "careers".to_string(),
            extra_path: "apply".to_string(),
            child_slug: "999".to_string(),
            is_career: true,
            is_special_nested_route: true,
            ..RouteParams::default()
        });
        assert_eq!(parser().parse(&segs(&["careers", "apply", "999"])), expected);
    }

    #[test]
    fn test_deep_nesting_is_not_found() {
        assert_eq!(
            parser().parse(&segs(&["a", "b", "c", "d"])),
            RouteMatch::NotFound
        );
    }

    #[test]
    fn test_parse_is_cached() {
        let p = parser();
        let first = p.parse(&segs(&["careers", "123"]));
        let second = p.parse(&segs(&["careers", "123"]));
        assert_eq!(first, second);
    }
}

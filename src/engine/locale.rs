//! Locale vocabulary and leading-segment resolution.
//!
//! # Responsibilities
//! - Define the supported locale codes
//! - Validate the leading path segment against the supported set
//! - Report when the default locale must be injected
//!
//! # Design Decisions
//! - Closed enum: the segment vocabulary is fixed at compile time,
//!   the configured subset narrows it at startup
//! - Resolution never fails; an unknown leading segment means
//!   "inject the default", not an error

use serde::{Deserialize, Serialize};

/// Supported language/region codes driving URL segment vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    En,
    /// Vietnamese.
    Vi,
    /// Chinese.
    Zh,
}

impl Locale {
    /// Every locale the gateway knows how to speak.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Vi, Locale::Zh];

    /// The URL segment form of this locale.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Vi => "vi",
            Locale::Zh => "zh",
        }
    }

    /// Parse a path segment into a locale, if it names one.
    pub fn from_segment(segment: &str) -> Option<Locale> {
        match segment {
            "en" => Some(Locale::En),
            "vi" => Some(Locale::Vi),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_segment(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Error for strings that name no known locale.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown locale: {0}")]
pub struct UnknownLocale(pub String);

/// How the leading path segment relates to the supported locale set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleResolution {
    /// Names a supported locale; consume it and continue.
    Supported(Locale),
    /// Looks like a locale tag (two ASCII letters) but is not supported;
    /// replace it with the default.
    Unsupported,
    /// No locale tag present (content segment or root); inject the
    /// default in front of the whole path.
    Missing,
}

/// Validates the leading path segment against the configured locale set.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: Vec<Locale>,
    default: Locale,
}

impl LocaleResolver {
    /// Create a resolver over the configured supported set and default.
    pub fn new(supported: Vec<Locale>, default: Locale) -> Self {
        Self { supported, default }
    }

    /// The locale injected when a path carries none.
    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// The supported set, in configured declaration order.
    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// Resolve the leading segment.
    ///
    /// A two-letter segment that is not a supported locale is read as a
    /// foreign locale tag and dropped in favor of the default, so
    /// `/fr/about` canonicalizes to `/en/about` rather than
    /// `/en/fr/about`. Longer segments are content and kept.
    pub fn resolve(&self, first_segment: Option<&str>) -> LocaleResolution {
        let Some(segment) = first_segment else {
            return LocaleResolution::Missing;
        };
        if let Some(locale) = Locale::from_segment(segment) {
            if self.supported.contains(&locale) {
                return LocaleResolution::Supported(locale);
            }
            return LocaleResolution::Unsupported;
        }
        if segment.len() == 2 && segment.bytes().all(|b| b.is_ascii_alphabetic()) {
            return LocaleResolution::Unsupported;
        }
        LocaleResolution::Missing
    }
}

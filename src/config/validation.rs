//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce dictionary invariants: key parity across locales, value
//!   uniqueness within a locale
//! - Check origin patterns and cache bounds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the running engine
//!   relies on these invariants instead of re-checking per request

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::engine::locale::Locale;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The supported locale list is empty.
    #[error("locales.supported must not be empty")]
    NoSupportedLocales,

    /// The default locale is not in the supported list.
    #[error("default locale {0} is not in locales.supported")]
    DefaultNotSupported(Locale),

    /// A locale's dictionary is missing a key other locales define.
    #[error("dictionary for {locale} is missing key {key:?} defined for {other}")]
    DictionaryKeyMismatch {
        /// Locale whose table lacks the key.
        locale: Locale,
        /// The missing semantic key.
        key: String,
        /// A locale whose table has it.
        other: Locale,
    },

    /// Two semantic keys map to the same segment within one locale.
    #[error("dictionary for {locale} maps both {first:?} and {second:?} to segment {segment:?}")]
    DuplicateDictionaryValue {
        /// Locale with the collision.
        locale: Locale,
        /// First key using the segment.
        first: String,
        /// Second key using the segment.
        second: String,
        /// The ambiguous segment.
        segment: String,
    },

    /// An origin entry carries more than one wildcard token.
    #[error("allowed origin {0:?} has more than one wildcard")]
    MultipleWildcards(String),

    /// A plain origin entry is not an absolute http(s) URL.
    #[error("allowed origin {0:?} is not an absolute http(s) origin")]
    InvalidOrigin(String),

    /// Cache TTL or capacity is zero.
    #[error("cache.{0} must be greater than zero")]
    ZeroCacheBound(&'static str),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_locales(config, &mut errors);
    validate_dictionaries(config, &mut errors);
    validate_origins(config, &mut errors);
    validate_cache(config, &mut errors);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_locales(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    if config.locales.supported.is_empty() {
        errors.push(ValidationError::NoSupportedLocales);
    } else if !config.locales.supported.contains(&config.locales.default) {
        errors.push(ValidationError::DefaultNotSupported(config.locales.default));
    }
}

fn validate_dictionaries(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    let empty = BTreeMap::new();
    let table_for = |locale: Locale| {
        config.locales.dictionaries.get(&locale).unwrap_or(&empty)
    };

    // Key parity: every key defined anywhere must exist for every
    // supported locale. One error per missing (locale, key) pair.
    let mut union: BTreeMap<&String, Locale> = BTreeMap::new();
    for &owner in &config.locales.supported {
        for key in table_for(owner).keys() {
            union.entry(key).or_insert(owner);
        }
    }
    for (key, &owner) in &union {
        for &locale in &config.locales.supported {
            if locale != owner && !table_for(locale).contains_key(*key) {
                errors.push(ValidationError::DictionaryKeyMismatch {
                    locale,
                    key: (*key).clone(),
                    other: owner,
                });
            }
        }
    }

    // Value uniqueness within each locale: reverse lookup must be
    // unambiguous.
    for &locale in &config.locales.supported {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (key, segment) in table_for(locale) {
            if let Some(first) = seen.insert(segment.as_str(), key.as_str()) {
                errors.push(ValidationError::DuplicateDictionaryValue {
                    locale,
                    first: first.to_string(),
                    second: key.clone(),
                    segment: segment.clone(),
                });
            }
        }
    }
}

fn validate_origins(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    for origin in &config.cors.allowed_origins {
        let wildcards = origin.matches('*').count();
        if wildcards > 1 {
            errors.push(ValidationError::MultipleWildcards(origin.clone()));
        } else if wildcards == 0 {
            let valid = Url::parse(origin)
                .map(|u| matches!(u.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                errors.push(ValidationError::InvalidOrigin(origin.clone()));
            }
        }
    }
}

fn validate_cache(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError::ZeroCacheBound("ttl_secs"));
    }
    if config.cache.max_entries == 0 {
        errors.push(ValidationError::ZeroCacheBound("max_entries"));
    }
}

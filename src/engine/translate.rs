//! Cross-locale slug translation.
//!
//! # Data Flow
//! ```text
//! Per-locale dictionaries (semantic key → localized segment)
//!     → compiled at startup into ordered entries + forward/reverse maps
//!     → translate(): for each segment, reverse-lookup in the OTHER
//!       locales (declaration order), then forward-lookup the semantic
//!       key in the resolved locale
//!     → Replaced segment, or unchanged on miss
//! ```
//!
//! # Design Decisions
//! - Iteration is over an explicit ordered list: locales in configured
//!   declaration order, entries key-sorted. Same input, same output.
//! - First applied correction wins; a lookup miss is not an error.
//! - Value uniqueness within a locale is enforced at config load, so
//!   reverse lookup is unambiguous here.

use std::collections::{BTreeMap, HashMap};

use crate::engine::locale::Locale;

/// One locale's routing vocabulary, compiled for both lookup directions.
#[derive(Debug, Clone)]
pub struct RouteDictionary {
    locale: Locale,
    /// Key-sorted (semantic key, localized segment) pairs.
    entries: Vec<(String, String)>,
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl RouteDictionary {
    /// Compile a dictionary from the configured key → segment table.
    pub fn new(locale: Locale, table: &BTreeMap<String, String>) -> Self {
        let entries: Vec<(String, String)> = table
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let forward = entries.iter().cloned().collect();
        let reverse = entries.iter().map(|(k, v)| (v.clone(), k.clone())).collect();
        Self { locale, entries, forward, reverse }
    }

    /// The locale this dictionary belongs to.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Localized segment for a semantic key.
    pub fn segment_for(&self, key: &str) -> Option<&str> {
        self.forward.get(key).map(String::as_str)
    }

    /// Semantic key for a localized segment.
    pub fn key_for(&self, segment: &str) -> Option<&str> {
        self.reverse.get(segment).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rewrites path segments into the resolved locale's canonical vocabulary.
#[derive(Debug, Clone)]
pub struct SlugTranslator {
    /// Dictionaries in configured locale declaration order.
    dictionaries: Vec<RouteDictionary>,
}

impl SlugTranslator {
    /// Build a translator from compiled dictionaries, one per supported
    /// locale, in declaration order.
    pub fn new(dictionaries: Vec<RouteDictionary>) -> Self {
        Self { dictionaries }
    }

    fn dictionary(&self, locale: Locale) -> Option<&RouteDictionary> {
        self.dictionaries.iter().find(|d| d.locale() == locale)
    }

    /// Translate a single segment into `locale`'s canonical form.
    ///
    /// Returns `Some(corrected)` only when a foreign dictionary knows the
    /// segment and the resolved locale spells it differently.
    pub fn translate_segment(&self, locale: Locale, segment: &str) -> Option<String> {
        let current = self.dictionary(locale)?;
        for foreign in self.dictionaries.iter().filter(|d| d.locale() != locale) {
            let Some(key) = foreign.key_for(segment) else {
                continue;
            };
            if let Some(value) = current.segment_for(key) {
                if value != segment {
                    return Some(value.to_string());
                }
            }
        }
        None
    }

    /// Translate all segments in place. Returns true if any changed.
    pub fn translate(&self, locale: Locale, segments: &mut [String]) -> bool {
        let mut changed = false;
        for segment in segments.iter_mut() {
            if let Some(corrected) = self.translate_segment(locale, segment) {
                *segment = corrected;
                changed = true;
            }
        }
        changed
    }
}

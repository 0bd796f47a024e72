//! Generic term filtering.
//!
//! Adjectives that carry no information about a brand (and brand names
//! themselves, which would otherwise pollute a brand's own adjective list)
//! are excluded before counting.

use super::normalize::normalize;
use std::collections::HashSet;

/// Generic adjectives excluded by default.
pub const DEFAULT_GENERIC_ADJECTIVES: &[&str] = &[
    "new", "old", "high", "young", "big", "good", "bad", "great", "free", "little", "more",
    "less", "second", "best", "first", "last", "next",
];

/// Brand names excluded by default, even before the catalog is known.
pub const DEFAULT_BRAND_TERMS: &[&str] = &[
    "nike",
    "adidas",
    "asics",
    "hoka",
    "lululemon",
    "new balance",
    "puma",
    "reebok",
    "under armour",
];

/// Case-insensitive set of excluded terms.
#[derive(Debug, Clone, Default)]
pub struct GenericTermFilter {
    terms: HashSet<String>,
}

impl GenericTermFilter {
    /// Build a filter from raw terms; they are normalized on the way in.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms.into_iter().map(|t| normalize(t.as_ref())).collect(),
        }
    }

    /// Extend the set with brand names, typically the corpus catalog.
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms
            .extend(brands.into_iter().map(|b| normalize(b.as_ref())));
        self
    }

    /// Whether `term` is a generic term.
    pub fn is_excluded(&self, term: &str) -> bool {
        self.terms.contains(&normalize(term))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

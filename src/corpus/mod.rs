//! Corpus store access.
//!
//! The engine reads articles only through [`CorpusQuery`], so the backing
//! store can be swapped (an in-memory corpus loaded from JSON files here, a
//! fake in tests). Predicates are conjunctions of field-membership and
//! field-existence conditions.

pub mod loader;
pub mod memory;

pub use loader::load_corpus;
pub use memory::MemoryCorpus;

use crate::analysis::normalize::normalize;
use crate::error::QueryResult;
use crate::models::{Document, Field};

/// Lazy sequence of matching documents.
pub type DocumentStream<'a> = Box<dyn Iterator<Item = Document> + Send + 'a>;

/// A single predicate over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The array field holds an entry equal to `value` after normalization.
    Contains { field: Field, value: String },
    /// The field is present and not null.
    Exists(Field),
}

impl Condition {
    /// Evaluate the condition against a document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Condition::Contains { field, value } => {
                let wanted = normalize(value);
                match field {
                    Field::Adjectives => doc.adjectives().any(|a| normalize(a) == wanted),
                    Field::BrandsMentioned => doc.brands().any(|b| normalize(b) == wanted),
                    Field::Title => doc.title().is_some_and(|t| normalize(t) == wanted),
                    Field::Year => doc.year().is_some_and(|y| y.to_string() == wanted),
                }
            }
            Condition::Exists(field) => doc.has_field(*field),
        }
    }
}

/// Conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to contain `value`.
    pub fn contains(mut self, field: Field, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Contains {
            field,
            value: value.into(),
        });
        self
    }

    /// Require `field` to be present.
    pub fn exists(mut self, field: Field) -> Self {
        self.conditions.push(Condition::Exists(field));
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}

/// Key a store-side aggregation groups documents by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Year,
}

/// Read-only query surface of a corpus store.
pub trait CorpusQuery: Send + Sync {
    /// Documents matching `filter`, carrying only the `projection` fields.
    fn find(&self, filter: &Filter, projection: &[Field]) -> QueryResult<DocumentStream<'_>>;

    /// Count matching documents per group key, ascending by key.
    ///
    /// Documents whose key field is missing or malformed are not counted.
    fn aggregate(&self, group_key: GroupKey, filter: &Filter) -> QueryResult<Vec<(i64, u64)>>;

    /// Total number of documents in the store.
    fn document_count(&self) -> QueryResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        serde_json::from_value(json!({
            "title": "Spring Lineup",
            "year": 2021,
            "adjectives": ["Innovative", 7],
            "brands_mentioned": ["Nike", "ASICS"]
        }))
        .unwrap()
    }

    #[test]
    fn test_contains_uses_normalized_equality() {
        let d = doc();
        assert!(Filter::new().contains(Field::BrandsMentioned, "nike").matches(&d));
        assert!(Filter::new().contains(Field::BrandsMentioned, "asics").matches(&d));
        assert!(Filter::new().contains(Field::Adjectives, "INNOVATIVE").matches(&d));
        assert!(!Filter::new().contains(Field::Adjectives, "7").matches(&d));
        assert!(Filter::new().contains(Field::Year, "2021").matches(&d));
    }

    #[test]
    fn test_filter_is_a_conjunction() {
        let d = doc();
        let filter = Filter::new()
            .contains(Field::BrandsMentioned, "nike")
            .exists(Field::Year);
        assert!(filter.matches(&d));

        let filter = filter.contains(Field::Adjectives, "bold");
        assert!(!filter.matches(&d));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches(&Document::default()));
    }
}

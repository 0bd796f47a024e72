//! Corpus-wide brand catalog.
//!
//! Built once from a full scan of the store and immutable afterwards.
//! Rebuilding is the only way to pick up corpus changes.

use super::normalize::normalize;
use crate::corpus::{CorpusQuery, Filter};
use crate::error::QueryResult;
use crate::models::Field;
use std::collections::BTreeSet;
use tracing::info;

/// Sorted, deduplicated set of every brand name in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusCatalog {
    brands: Vec<String>,
}

impl CorpusCatalog {
    /// Scan every document's `brands_mentioned` field once.
    pub fn build(store: &dyn CorpusQuery) -> QueryResult<Self> {
        let filter = Filter::new().exists(Field::BrandsMentioned);

        let brands: BTreeSet<String> = store
            .find(&filter, &[Field::BrandsMentioned])?
            .flat_map(|doc| doc.brands().map(normalize).collect::<Vec<_>>())
            .collect();

        info!("Brand catalog built: {} distinct brands", brands.len());
        Ok(Self {
            brands: brands.into_iter().collect(),
        })
    }

    /// All brand names in lexicographic order.
    pub fn all_brand_names(&self) -> &[String] {
        &self.brands
    }

    /// Whether `brand` occurs in the corpus (case-insensitive).
    pub fn contains(&self, brand: &str) -> bool {
        self.brands.binary_search(&normalize(brand)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// The configured featured brands that actually occur in the corpus,
    /// normalized, in their configured order.
    pub fn featured(&self, candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| normalize(c))
            .filter(|c| self.contains(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;
    use crate::models::Document;
    use serde_json::json;

    fn store() -> MemoryCorpus {
        [
            json!({ "brands_mentioned": ["Puma", "nike"] }),
            json!({ "brands_mentioned": [123, "NIKE", "Under Armour"] }),
            json!({ "adjectives": ["fast"] }),
            json!({ "brands_mentioned": [] }),
            json!({ "brands_mentioned": ["asics"] }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value::<Document>(v).unwrap())
        .collect()
    }

    #[test]
    fn test_catalog_is_sorted_and_deduplicated() {
        let catalog = CorpusCatalog::build(&store()).unwrap();
        assert_eq!(
            catalog.all_brand_names(),
            &["asics", "nike", "puma", "under armour"]
        );
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let catalog = CorpusCatalog::build(&store()).unwrap();
        assert!(catalog.contains("Nike"));
        assert!(catalog.contains("UNDER ARMOUR"));
        assert!(!catalog.contains("reebok"));
    }

    #[test]
    fn test_featured_keeps_only_present_brands() {
        let catalog = CorpusCatalog::build(&store()).unwrap();
        let featured = vec!["Nike".to_string(), "Hoka".to_string(), "puma".to_string()];
        assert_eq!(catalog.featured(&featured), vec!["nike", "puma"]);
    }

    #[test]
    fn test_empty_corpus() {
        let catalog = CorpusCatalog::build(&MemoryCorpus::default()).unwrap();
        assert!(catalog.is_empty());
    }
}

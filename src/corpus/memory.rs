//! In-memory corpus store.

use super::{CorpusQuery, DocumentStream, Filter, GroupKey};
use crate::error::QueryResult;
use crate::models::{Document, Field};
use std::collections::BTreeMap;
use tracing::trace;

/// Corpus held entirely in memory, in load order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    documents: Vec<Document>,
}

impl MemoryCorpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for MemoryCorpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CorpusQuery for MemoryCorpus {
    fn find(&self, filter: &Filter, projection: &[Field]) -> QueryResult<DocumentStream<'_>> {
        let filter = filter.clone();
        let projection = projection.to_vec();
        Ok(Box::new(
            self.documents
                .iter()
                .filter(move |doc| filter.matches(doc))
                .map(move |doc| doc.project(&projection)),
        ))
    }

    fn aggregate(&self, group_key: GroupKey, filter: &Filter) -> QueryResult<Vec<(i64, u64)>> {
        let mut groups: BTreeMap<i64, u64> = BTreeMap::new();

        for doc in self.documents.iter().filter(|doc| filter.matches(doc)) {
            let key = match group_key {
                GroupKey::Year => doc.year(),
            };
            match key {
                Some(key) => *groups.entry(key).or_default() += 1,
                None => trace!("Skipping document without a usable {:?} key", group_key),
            }
        }

        Ok(groups.into_iter().collect())
    }

    fn document_count(&self) -> QueryResult<usize> {
        Ok(self.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corpus() -> MemoryCorpus {
        [
            json!({ "title": "A", "year": 2020, "adjectives": ["fast"], "brands_mentioned": ["nike"] }),
            json!({ "title": "B", "year": 2019, "adjectives": ["light"], "brands_mentioned": ["Nike", "puma"] }),
            json!({ "title": "C", "year": 2020, "brands_mentioned": ["nike"] }),
            json!({ "title": "D", "brands_mentioned": ["nike"] }),
            json!({ "title": "E", "year": "unknown", "brands_mentioned": ["nike"] }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
    }

    #[test]
    fn test_find_filters_and_projects() {
        let corpus = corpus();
        let filter = Filter::new()
            .contains(Field::BrandsMentioned, "nike")
            .exists(Field::Adjectives);

        let docs: Vec<Document> = corpus.find(&filter, &[Field::Adjectives]).unwrap().collect();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.title.is_none() && d.brands_mentioned.is_none()));
        assert_eq!(docs[0].adjectives().collect::<Vec<_>>(), vec!["fast"]);
    }

    #[test]
    fn test_aggregate_groups_by_year_ascending() {
        let corpus = corpus();
        let filter = Filter::new()
            .contains(Field::BrandsMentioned, "nike")
            .exists(Field::Year);

        let groups = corpus.aggregate(GroupKey::Year, &filter).unwrap();
        assert_eq!(groups, vec![(2019, 1), (2020, 2)]);
    }

    #[test]
    fn test_document_count() {
        assert_eq!(corpus().document_count().unwrap(), 5);
        assert!(MemoryCorpus::default().is_empty());
    }
}

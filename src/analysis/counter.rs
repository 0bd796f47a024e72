//! Insertion-ordered frequency counting.
//!
//! Ranking must be deterministic: among equal counts, the term seen first
//! during the scan ranks higher. A plain hash map loses that order, so the
//! table keeps its entries in a vector and uses the map only as an index.

use crate::models::{RankedEntry, RankedList};
use std::collections::HashMap;

/// Term counts that remember first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<RankedEntry>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of an already-normalized term.
    pub fn add(&mut self, term: &str) {
        match self.index.get(term) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push(RankedEntry {
                    term: term.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every term ranked by count descending, ties in first-seen order.
    pub fn into_ranked(self) -> RankedList {
        RankedList::from_ranked(self.sorted_entries())
    }

    /// The `n` highest-ranked terms.
    pub fn most_common(self, n: usize) -> RankedList {
        let mut entries = self.sorted_entries();
        entries.truncate(n);
        RankedList::from_ranked(entries)
    }

    fn sorted_entries(self) -> Vec<RankedEntry> {
        let mut entries = self.entries;
        // sort_by is stable, so ties stay in first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

#[cfg(test)]
impl FrequencyTable {
    pub fn extend<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            self.add(term);
        }
    }

    pub fn count(&self, term: &str) -> u64 {
        self.index
            .get(term)
            .map(|&slot| self.entries[slot].count)
            .unwrap_or(0)
    }
}

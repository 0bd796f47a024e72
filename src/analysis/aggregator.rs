//! Brand and adjective aggregation.
//!
//! Each operation issues exactly one read against the corpus store, then
//! normalizes, filters, and ranks what comes back. Nothing is cached between
//! calls, so independent queries can run in parallel against a shared store.

use super::counter::FrequencyTable;
use super::filter::GenericTermFilter;
use super::normalize::normalize;
use crate::corpus::{CorpusQuery, Filter, GroupKey};
use crate::error::QueryResult;
use crate::models::{Field, RankedList, TimeSeries, TopAdjectives};
use std::sync::Arc;
use tracing::debug;

/// Default adjective list length.
pub const DEFAULT_TOP_N: usize = 10;

/// Default number of titles returned by a title search.
pub const DEFAULT_TITLE_LIMIT: usize = 25;

/// Query engine over a shared corpus store.
#[derive(Clone)]
pub struct InsightEngine {
    store: Arc<dyn CorpusQuery>,
    filter: GenericTermFilter,
}

impl InsightEngine {
    /// Create an engine over `store`, excluding `filter` terms from adjective counts.
    pub fn new(store: Arc<dyn CorpusQuery>, filter: GenericTermFilter) -> Self {
        Self { store, filter }
    }

    /// Rank the adjectives that co-occur with `brand`, generic terms excluded.
    ///
    /// Returns at most `top_n` entries. A brand with no matching documents
    /// yields an empty result rather than an error.
    pub fn top_adjectives(&self, brand: &str, top_n: usize) -> QueryResult<TopAdjectives> {
        let brand = normalize(brand);
        let filter = Filter::new()
            .contains(Field::BrandsMentioned, brand.as_str())
            .exists(Field::Adjectives);

        let mut table = FrequencyTable::new();
        let mut matched = 0usize;

        for doc in self.store.find(&filter, &[Field::Adjectives])? {
            matched += 1;
            for adjective in doc.adjectives().map(normalize) {
                if !self.filter.is_excluded(&adjective) {
                    table.add(&adjective);
                }
            }
        }

        debug!(
            "top_adjectives: brand={}, documents={}, distinct={}",
            brand,
            matched,
            table.len()
        );

        let ranked = table.most_common(top_n);
        let terms = ranked.terms();
        Ok(TopAdjectives { ranked, terms })
    }

    /// Rank every brand mentioned alongside `adjective`.
    ///
    /// No generic-term filtering is applied, and the ranking is not capped.
    pub fn brands_for_adjective(&self, adjective: &str) -> QueryResult<RankedList> {
        let adjective = normalize(adjective);
        let filter = Filter::new()
            .contains(Field::Adjectives, adjective.as_str())
            .exists(Field::BrandsMentioned);

        let mut table = FrequencyTable::new();
        for doc in self.store.find(&filter, &[Field::BrandsMentioned])? {
            for brand in doc.brands().map(normalize) {
                table.add(&brand);
            }
        }

        debug!(
            "brands_for_adjective: adjective={}, distinct={}",
            adjective,
            table.len()
        );

        Ok(table.into_ranked())
    }

    /// Count documents mentioning `brand` per year, ascending by year.
    ///
    /// The grouping runs inside the store.
    pub fn mentions_by_year(&self, brand: &str) -> QueryResult<TimeSeries> {
        let brand = normalize(brand);
        let filter = Filter::new()
            .contains(Field::BrandsMentioned, brand.as_str())
            .exists(Field::Year);

        let groups = self.store.aggregate(GroupKey::Year, &filter)?;
        debug!("mentions_by_year: brand={}, years={}", brand, groups.len());

        Ok(TimeSeries::from_groups(groups))
    }

    /// Titles of up to `limit` documents carrying `adjective`, in store order.
    pub fn titles_for_adjective(&self, adjective: &str, limit: usize) -> QueryResult<Vec<String>> {
        let adjective = normalize(adjective);
        let filter = Filter::new()
            .contains(Field::Adjectives, adjective.as_str())
            .exists(Field::Title);

        let titles: Vec<String> = self
            .store
            .find(&filter, &[Field::Title])?
            .filter_map(|doc| doc.title().map(str::to_string))
            .take(limit)
            .collect();

        debug!(
            "titles_for_adjective: adjective={}, titles={}",
            adjective,
            titles.len()
        );

        Ok(titles)
    }
}

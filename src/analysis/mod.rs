//! Aggregation engine.
//!
//! Normalization and generic-term filtering feed an insertion-ordered
//! counter; the aggregators on [`InsightEngine`] turn corpus reads into
//! ranked lists and time series.

pub mod aggregator;
pub mod catalog;
pub mod counter;
pub mod filter;
pub mod normalize;

pub use aggregator::{InsightEngine, DEFAULT_TITLE_LIMIT, DEFAULT_TOP_N};
pub use catalog::CorpusCatalog;
pub use filter::GenericTermFilter;
pub use normalize::normalize_query;

//! Data models for the brand analytics engine.
//!
//! This module contains the article document as read from the corpus and
//! the ranked and time-ordered result shapes the aggregators produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document field the corpus store can filter on or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Year,
    Adjectives,
    BrandsMentioned,
}

/// One annotated article.
///
/// Fields keep their raw JSON values so that malformed entries (numbers in
/// `brands_mentioned`, a scalar where a list belongs, a non-numeric `year`)
/// survive loading and can be skipped at read time instead of rejecting the
/// whole article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjectives: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands_mentioned: Option<Value>,
}

impl Document {
    /// String entries of the `adjectives` field, malformed entries skipped.
    pub fn adjectives(&self) -> impl Iterator<Item = &str> + '_ {
        string_entries(&self.adjectives)
    }

    /// String entries of the `brands_mentioned` field, malformed entries skipped.
    pub fn brands(&self) -> impl Iterator<Item = &str> + '_ {
        string_entries(&self.brands_mentioned)
    }

    /// Publication year, if present and integral.
    ///
    /// Numeric strings such as `"2021"` and integral floats such as `2021.0`
    /// are accepted.
    pub fn year(&self) -> Option<i64> {
        match self.year.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    /// Whether the field is present (and not null).
    pub fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title.as_ref().is_some_and(|v| !v.is_null()),
            Field::Year => self.year.as_ref().is_some_and(|v| !v.is_null()),
            Field::Adjectives => self.adjectives.as_ref().is_some_and(|v| !v.is_null()),
            Field::BrandsMentioned => self.brands_mentioned.as_ref().is_some_and(|v| !v.is_null()),
        }
    }

    /// Copy of this document carrying only the requested fields.
    pub fn project(&self, fields: &[Field]) -> Document {
        let keep = |field: Field| fields.contains(&field);
        Document {
            title: self.title.clone().filter(|_| keep(Field::Title)),
            year: self.year.clone().filter(|_| keep(Field::Year)),
            adjectives: self.adjectives.clone().filter(|_| keep(Field::Adjectives)),
            brands_mentioned: self
                .brands_mentioned
                .clone()
                .filter(|_| keep(Field::BrandsMentioned)),
        }
    }
}

/// Strings held by a list field. A bare string counts as a one-entry list;
/// anything else yields nothing.
fn string_entries(value: &Option<Value>) -> impl Iterator<Item = &str> + '_ {
    let (items, single) = match value {
        Some(Value::Array(items)) => (items.as_slice(), None),
        Some(Value::String(s)) => (&[][..], Some(s.as_str())),
        _ => (&[][..], None),
    };
    items.iter().filter_map(Value::as_str).chain(single)
}

/// A single term with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub term: String,
    pub count: u64,
}

/// Terms ordered by count descending, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
}

impl RankedList {
    /// Wrap entries that are already in rank order.
    pub(crate) fn from_ranked(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The ranked terms without their counts.
    pub fn terms(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.term.clone()).collect()
    }

    /// `(term, count)` pairs, mostly handy for assertions and display.
    pub fn as_pairs(&self) -> Vec<(&str, u64)> {
        self.entries
            .iter()
            .map(|e| (e.term.as_str(), e.count))
            .collect()
    }
}

/// Result of an adjective lookup for a brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAdjectives {
    pub ranked: RankedList,
    /// The same terms as `ranked`, without counts.
    pub terms: Vec<String>,
}

/// Mention count for a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i64,
    pub count: u64,
}

/// Per-year counts in ascending year order. Years without mentions are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<YearCount>,
}

impl TimeSeries {
    /// Build a series from `(year, count)` groups, sorting by year.
    pub fn from_groups(groups: Vec<(i64, u64)>) -> Self {
        let mut points: Vec<YearCount> = groups
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect();
        points.sort_by_key(|p| p.year);
        Self { points }
    }

    pub fn points(&self) -> &[YearCount] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total mentions across all years.
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

#[cfg(test)]
impl TimeSeries {
    pub fn years(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.count).collect()
    }
}

/// Everything reported for one brand query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandReport {
    pub brand: String,
    /// Whether the brand occurs anywhere in the corpus catalog.
    pub in_catalog: bool,
    pub top_adjectives: TopAdjectives,
    pub mentions_by_year: TimeSeries,
}

/// Everything reported for one adjective query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjectiveReport {
    pub adjective: String,
    pub brands: RankedList,
    /// Titles of a bounded sample of articles carrying the adjective.
    pub titles: Vec<String>,
}

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path the corpus was loaded from.
    pub corpus_path: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of documents in the corpus.
    pub documents: usize,
    /// Number of distinct brands in the catalog.
    pub distinct_brands: usize,
    /// Adjective list length requested per brand.
    pub top_n: usize,
    /// Duration of the queries in seconds.
    pub duration_seconds: f64,
}

/// The complete analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub brands: Vec<BrandReport>,
    pub adjectives: Vec<AdjectiveReport>,
    /// Full brand catalog, included when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<String>>,
    /// Configured featured brands that occur in the corpus.
    pub featured_brands: Vec<String>,
}

//! Query execution for the command-line caller.
//!
//! Brand queries are independent of each other, so several run at once on
//! tokio's blocking pool. Results come back in the order the brands were
//! requested.

use crate::analysis::{normalize_query, CorpusCatalog, InsightEngine};
use crate::error::QueryResult;
use crate::models::{AdjectiveReport, BrandReport};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info};

/// Build the report for a single brand.
pub fn build_brand_report(
    engine: &InsightEngine,
    catalog: &CorpusCatalog,
    brand: &str,
    top_n: usize,
) -> QueryResult<BrandReport> {
    let brand = normalize_query(brand);
    let top_adjectives = engine.top_adjectives(&brand, top_n)?;
    let mentions_by_year = engine.mentions_by_year(&brand)?;

    Ok(BrandReport {
        in_catalog: catalog.contains(&brand),
        brand,
        top_adjectives,
        mentions_by_year,
    })
}

/// Build the report for a single adjective.
pub fn build_adjective_report(
    engine: &InsightEngine,
    adjective: &str,
    title_limit: usize,
) -> QueryResult<AdjectiveReport> {
    let adjective = normalize_query(adjective);
    let brands = engine.brands_for_adjective(&adjective)?;
    let titles = engine.titles_for_adjective(&adjective, title_limit)?;

    Ok(AdjectiveReport {
        adjective,
        brands,
        titles,
    })
}

/// Run brand reports concurrently, at most `concurrency` at a time.
///
/// The first store failure aborts the run and is returned as-is, so
/// callers can still downcast it to [`crate::error::QueryError`].
pub async fn run_brand_reports(
    engine: InsightEngine,
    catalog: Arc<CorpusCatalog>,
    brands: Vec<String>,
    top_n: usize,
    concurrency: usize,
    show_progress: bool,
) -> Result<Vec<BrandReport>> {
    info!(
        "Running {} brand queries (concurrency={})",
        brands.len(),
        concurrency
    );

    let progress = if show_progress && brands.len() > 1 {
        Some(progress_bar(brands.len() as u64))
    } else {
        None
    };

    let mut tasks = stream::iter(brands)
        .map(|brand| {
            let engine = engine.clone();
            let catalog = Arc::clone(&catalog);
            tokio::task::spawn_blocking(move || {
                build_brand_report(&engine, &catalog, &brand, top_n)
            })
        })
        .buffered(concurrency.max(1));

    let mut reports = Vec::new();
    while let Some(joined) = tasks.next().await {
        let report = joined.context("Brand query task failed")??;
        debug!(
            "Brand {} done: {} adjectives, {} years",
            report.brand,
            report.top_adjectives.ranked.len(),
            report.mentions_by_year.points().len()
        );
        if let Some(ref pb) = progress {
            pb.set_message(report.brand.clone());
            pb.inc(1);
        }
        reports.push(report);
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(reports)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

//! Markdown and JSON report generation.
//!
//! Display concerns live here and nowhere else: adjective tables are padded
//! to a fixed row count with blank zero-count rows so reports line up, while
//! the JSON report carries the engine's results untouched.

use crate::models::{AdjectiveReport, BrandReport, RankedList, Report, ReportMetadata, TimeSeries};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, table_rows: usize) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# BrandLens Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));
    output.push_str(&generate_featured_section(&report.featured_brands));

    if !report.brands.is_empty() {
        output.push_str("## Brands\n\n");
        for brand in &report.brands {
            output.push_str(&generate_brand_section(brand, table_rows));
        }
    }

    if !report.adjectives.is_empty() {
        output.push_str("## Adjectives\n\n");
        for adjective in &report.adjectives {
            output.push_str(&generate_adjective_section(adjective));
        }
    }

    if let Some(ref catalog) = report.catalog {
        output.push_str(&generate_catalog_section(catalog));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Corpus:** `{}`\n", metadata.corpus_path));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Documents:** {}\n", metadata.documents));
    section.push_str(&format!(
        "- **Distinct Brands:** {}\n",
        metadata.distinct_brands
    ));
    section.push_str(&format!("- **Top N:** {}\n", metadata.top_n));
    section.push_str(&format!(
        "- **Query Duration:** {:.2}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &Report) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");

    if !report.featured_brands.is_empty() {
        toc.push_str("- [Featured Brands](#featured-brands)\n");
    }

    if !report.brands.is_empty() {
        toc.push_str("- [Brands](#brands)\n");
        for brand in &report.brands {
            toc.push_str(&format!("  - [{}](#{})\n", brand.brand, anchor(&brand.brand)));
        }
    }

    if !report.adjectives.is_empty() {
        toc.push_str("- [Adjectives](#adjectives)\n");
        for adjective in &report.adjectives {
            toc.push_str(&format!(
                "  - [{}](#{})\n",
                adjective.adjective,
                anchor(&adjective.adjective)
            ));
        }
    }

    if report.catalog.is_some() {
        toc.push_str("- [Brand Catalog](#brand-catalog)\n");
    }

    toc.push('\n');

    toc
}

fn anchor(name: &str) -> String {
    name.replace(['/', '.', ' '], "-").to_lowercase()
}

fn generate_featured_section(featured: &[String]) -> String {
    if featured.is_empty() {
        return String::new();
    }

    let names: Vec<String> = featured.iter().map(|b| format!("`{}`", b)).collect();
    format!("## Featured Brands\n\n{}\n\n", names.join(" · "))
}

/// Generate the section for one brand.
fn generate_brand_section(brand: &BrandReport, table_rows: usize) -> String {
    let mut section = String::new();

    section.push_str(&format!("### {}\n\n", brand.brand));

    if !brand.in_catalog {
        section.push_str("*This brand does not occur in the corpus.*\n\n");
    }

    section.push_str("#### Top Adjectives\n\n");
    section.push_str(&generate_adjective_table(&brand.top_adjectives.ranked, table_rows));

    if !brand.top_adjectives.terms.is_empty() {
        section.push_str(&format!(
            "**Cloud terms:** {}\n\n",
            brand.top_adjectives.terms.join(", ")
        ));
    }

    section.push_str("#### Mentions by Year\n\n");
    section.push_str(&generate_year_table(&brand.mentions_by_year));

    section
}

/// Adjective table padded to `rows` with blank zero-count rows.
fn generate_adjective_table(ranked: &RankedList, rows: usize) -> String {
    let mut table = String::new();

    table.push_str("| # | Adjective | Frequency |\n");
    table.push_str("|:---:|:---|:---:|\n");

    for (i, (term, count)) in padded_rows(ranked, rows).into_iter().enumerate() {
        table.push_str(&format!("| {} | {} | {} |\n", i + 1, term, count));
    }
    table.push('\n');

    table
}

/// Ranked pairs extended to at least `rows` entries with `("", 0)` placeholders.
fn padded_rows(ranked: &RankedList, rows: usize) -> Vec<(&str, u64)> {
    let mut pairs = ranked.as_pairs();
    if pairs.len() < rows {
        pairs.resize(rows, ("", 0));
    }
    pairs
}

fn generate_year_table(series: &TimeSeries) -> String {
    if series.is_empty() {
        return "No dated mentions.\n\n".to_string();
    }

    let mut table = String::new();
    table.push_str("| Year | Mentions |\n");
    table.push_str("|:---|:---:|\n");
    for point in series.points() {
        table.push_str(&format!("| {} | {} |\n", point.year, point.count));
    }
    table.push_str(&format!("| **Total** | **{}** |\n\n", series.total()));

    table
}

/// Generate the section for one adjective.
fn generate_adjective_section(adjective: &AdjectiveReport) -> String {
    let mut section = String::new();

    section.push_str(&format!("### {}\n\n", adjective.adjective));

    section.push_str("#### Brands\n\n");
    if adjective.brands.is_empty() {
        section.push_str("No brands co-occur with this adjective.\n\n");
    } else {
        section.push_str("| Brand | Articles |\n");
        section.push_str("|:---|:---:|\n");
        for entry in adjective.brands.entries() {
            section.push_str(&format!("| {} | {} |\n", entry.term, entry.count));
        }
        section.push('\n');
    }

    section.push_str("#### Articles\n\n");
    if adjective.titles.is_empty() {
        section.push_str("No articles found.\n\n");
    } else {
        for title in &adjective.titles {
            section.push_str(&format!("- {}\n", title));
        }
        section.push('\n');
    }

    section
}

fn generate_catalog_section(catalog: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## Brand Catalog\n\n");
    section.push_str(&format!("{} brands:\n\n", catalog.len()));
    for brand in catalog {
        section.push_str(&format!("- {}\n", brand));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by BrandLens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

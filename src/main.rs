//! BrandLens - brand and adjective analytics over annotated articles
//!
//! A CLI tool that loads a corpus of articles annotated with brand mentions
//! and adjectives, and reports ranked adjective frequencies per brand,
//! brands per adjective, and yearly mention counts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, unreadable corpus, write failure, etc.)
//!   2 - Corpus store unavailable (results would be incomplete)

mod analysis;
mod cli;
mod config;
mod corpus;
mod error;
mod models;
mod report;
mod runner;

use analysis::{CorpusCatalog, InsightEngine};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use corpus::CorpusQuery;
use error::QueryError;
use models::{Report, ReportMetadata};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const EXIT_RUNTIME_ERROR: i32 = 1;
const EXIT_STORE_UNAVAILABLE: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("BrandLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        match e.downcast_ref::<QueryError>() {
            Some(QueryError::StoreUnavailable(reason)) => {
                error!("Corpus store unavailable: {}", reason);
                eprintln!("\n⚠️  Service degraded: the corpus store is unavailable ({}).", reason);
            }
            None => {
                error!("Query failed: {:#}", e);
                eprintln!("\n❌ Error: {:#}", e);
            }
        }
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

/// Process exit code for a failed run.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<QueryError>() {
        Some(QueryError::StoreUnavailable(_)) => EXIT_STORE_UNAVAILABLE,
        None => EXIT_RUNTIME_ERROR,
    }
}

/// Handle --init-config: generate a default .brandlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  .brandlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .brandlens.toml")?;

    println!("✅ Created .brandlens.toml with default settings.");
    println!("   Edit it to customize generic adjectives, featured brands, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report printed to stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the corpus, run the requested queries, and emit the report.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let corpus_path = args
        .corpus
        .clone()
        .context("A corpus path is required (--corpus)")?;

    let store = {
        let path = corpus_path.clone();
        tokio::task::spawn_blocking(move || corpus::load_corpus(&path))
            .await
            .context("Corpus loading task failed")??
    };
    let store: Arc<dyn CorpusQuery> = Arc::new(store);

    // The catalog is built once and shared read-only with every query
    let catalog = Arc::new(CorpusCatalog::build(store.as_ref())?);
    let filter = config.filter.build_filter(catalog.all_brand_names());
    debug!("Generic term filter holds {} terms", filter.len());

    let engine = InsightEngine::new(Arc::clone(&store), filter);
    let start_time = Instant::now();

    let brands = if args.has_query() {
        args.brand.clone()
    } else {
        info!(
            "No query given, reporting default brand: {}",
            config.general.default_brand
        );
        vec![config.general.default_brand.clone()]
    };

    let brand_reports = runner::run_brand_reports(
        engine.clone(),
        Arc::clone(&catalog),
        brands,
        config.query.top_n,
        config.general.concurrency,
        !args.quiet,
    )
    .await?;

    let mut adjective_reports = Vec::new();
    for adjective in &args.adjective {
        adjective_reports.push(runner::build_adjective_report(
            &engine,
            adjective,
            config.query.title_limit,
        )?);
    }

    for report in brand_reports.iter().filter(|r| !r.in_catalog) {
        warn!("Brand '{}' does not occur in the corpus", report.brand);
    }

    let metadata = ReportMetadata {
        corpus_path: corpus_path.display().to_string(),
        generated_at: Utc::now(),
        documents: store.document_count()?,
        distinct_brands: catalog.len(),
        top_n: config.query.top_n,
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };

    let report = Report {
        metadata,
        brands: brand_reports,
        adjectives: adjective_reports,
        catalog: config
            .report
            .include_catalog
            .then(|| catalog.all_brand_names().to_vec()),
        featured_brands: catalog.featured(&config.general.featured_brands),
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, config.report.table_rows),
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                println!("✅ Report saved to: {}", path.display());
            }
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .brandlens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_maps_to_degraded_exit_code() {
        let err = anyhow::Error::new(QueryError::StoreUnavailable("timed out".to_string()))
            .context("Brand query task failed");
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_other_failures_map_to_runtime_exit_code() {
        let err = anyhow::anyhow!("Failed to read corpus file");
        assert_eq!(exit_code(&err), 1);
    }
}

//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// BrandLens - brand and adjective analytics over annotated articles
///
/// Ranks the adjectives written about a brand, the brands described by an
/// adjective, and how often a brand is mentioned each year.
///
/// Examples:
///   brandlens --corpus ./articles --brand nike
///   brandlens --corpus ./articles --brand nike,adidas --top-n 5
///   brandlens --corpus ./articles --adjective innovative --format json
///   brandlens --corpus ./articles --list-brands
///   brandlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Corpus file or directory of annotated articles
    ///
    /// Accepts .json (one document or an array) and .jsonl files.
    /// Directories are searched recursively.
    #[arg(
        long,
        value_name = "PATH",
        env = "BRANDLENS_CORPUS",
        required_unless_present = "init_config"
    )]
    pub corpus: Option<PathBuf>,

    /// Brands to report on (comma-separated)
    ///
    /// Example: --brand nike,adidas
    #[arg(short, long, value_name = "BRANDS", value_delimiter = ',')]
    pub brand: Vec<String>,

    /// Adjectives to look up brands and articles for (comma-separated)
    #[arg(short, long, value_name = "ADJECTIVES", value_delimiter = ',')]
    pub adjective: Vec<String>,

    /// Include the full brand catalog in the report
    #[arg(long)]
    pub list_brands: bool,

    /// Number of adjectives to rank per brand
    ///
    /// Default: from config or 10.
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub top_n: Option<usize>,

    /// Maximum article titles listed per adjective
    ///
    /// Default: from config or 25.
    #[arg(long, value_name = "COUNT")]
    pub title_limit: Option<usize>,

    /// Output file path for the report (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .brandlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of brand queries run concurrently
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Do not exclude corpus brand names from adjective rankings
    ///
    /// The configured generic adjective list still applies.
    #[arg(long)]
    pub keep_brand_adjectives: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .brandlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.corpus {
            Some(ref path) if !path.exists() => {
                return Err(format!("Corpus path does not exist: {}", path.display()));
            }
            None => return Err("A corpus path is required (--corpus)".to_string()),
            _ => {}
        }

        if self.brand.iter().any(|b| b.trim().is_empty()) {
            return Err("Brand names must not be empty".to_string());
        }

        if self.adjective.iter().any(|a| a.trim().is_empty()) {
            return Err("Adjectives must not be empty".to_string());
        }

        // Validate concurrency
        if self.concurrency == Some(0) {
            return Err("Concurrency must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Whether the user asked for anything specific.
    pub fn has_query(&self) -> bool {
        !self.brand.is_empty() || !self.adjective.is_empty() || self.list_brands
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            corpus: Some(PathBuf::from(".")),
            brand: vec!["nike".to_string()],
            adjective: Vec::new(),
            list_brands: false,
            top_n: None,
            title_limit: None,
            output: None,
            format: OutputFormat::Markdown,
            config: None,
            concurrency: None,
            keep_brand_adjectives: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_comma_separated_terms() {
        let args = Args::try_parse_from([
            "brandlens",
            "--corpus",
            "data",
            "--brand",
            "nike,New Balance",
            "-a",
            "bold",
        ])
        .unwrap();

        assert_eq!(args.brand, vec!["nike", "New Balance"]);
        assert_eq!(args.adjective, vec!["bold"]);
        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.has_query());
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_corpus() {
        let mut args = make_args();
        args.corpus = Some(PathBuf::from("/definitely/not/here"));
        assert!(args.validate().is_err());

        args.corpus = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_blank_terms() {
        let mut args = make_args();
        args.brand = vec!["  ".to_string()];
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_concurrency() {
        let mut args = make_args();
        args.concurrency = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}

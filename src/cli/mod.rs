//! Command-line interface for gradespan.
//!
//! Provides commands for resolving quotes against a document, annotating a
//! grading model's reply, and inspecting normalization and configuration.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::grading::{annotate, parse_response};
use crate::span::{extract_context, normalize, offset_to_line_col, Document, ResolvedSpan, Resolver};

/// Characters of context shown around a resolved span
const CONTEXT_WINDOW: usize = 80;

/// gradespan - Locate model-quoted passages in graded documents
#[derive(Parser, Debug)]
#[command(name = "gradespan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one or more quotes against a document
    Resolve {
        /// Document text file
        #[arg(short, long)]
        document: PathBuf,

        /// Quotes to locate
        #[arg(required = true)]
        quotes: Vec<String>,

        /// Fuzzy acceptance threshold (0-100), overrides config
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Print spans as JSON
        #[arg(long)]
        json: bool,
    },

    /// Annotate a grading model reply with highlight offsets
    Annotate {
        /// Document text file the reply refers to
        #[arg(short, long)]
        document: PathBuf,

        /// Model reply file (reads from stdin if not provided)
        #[arg(short, long)]
        response: Option<PathBuf>,

        /// Fuzzy acceptance threshold (0-100), overrides config
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Print the whitespace-normalized form of a text
    Normalize {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Resolve {
                document,
                quotes,
                threshold,
                json,
            } => resolve_quotes(&document, quotes, threshold, json).await,
            Commands::Annotate {
                document,
                response,
                threshold,
            } => annotate_response(&document, response, threshold).await,
            Commands::Normalize { input } => normalize_input(input).await,
            Commands::Config => show_config(),
        }
    }
}

/// Build a resolver from config, applying a command-line threshold
fn build_resolver(threshold: Option<f64>) -> Result<Resolver> {
    let mut config = crate::config::resolver_config()?;
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    Resolver::new(config).context("Invalid resolver settings")
}

/// Read and validate a document file
async fn load_document(path: &Path) -> Result<Document> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read document: {}", path.display()))?;

    Document::new(text).with_context(|| format!("Cannot resolve against {}", path.display()))
}

/// Read a file, or stdin when no file is given and stdin is piped
async fn read_input(path: Option<PathBuf>) -> Result<String> {
    if let Some(path) = path {
        return tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    if io::stdin().is_terminal() {
        anyhow::bail!("No input provided. Use --input/--response <file> or pipe to stdin");
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Execute the `resolve` command
async fn resolve_quotes(
    document_path: &Path,
    quotes: Vec<String>,
    threshold: Option<f64>,
    json: bool,
) -> Result<()> {
    let resolver = Arc::new(build_resolver(threshold)?);
    let document = Arc::new(load_document(document_path).await?);

    let spans = {
        let resolver = Arc::clone(&resolver);
        let document = Arc::clone(&document);
        let quotes = quotes.clone();
        tokio::task::spawn_blocking(move || resolver.resolve_all(&document, &quotes))
            .await
            .context("Resolution task failed")?
    };

    if json {
        let output = serde_json::to_string_pretty(&spans).context("Failed to serialize spans")?;
        println!("{}", output);
        return Ok(());
    }

    for (index, (quote, span)) in quotes.iter().zip(&spans).enumerate() {
        print_span(index + 1, quote, span, &document);
    }

    let unresolved = spans.iter().filter(|s| !s.is_resolved()).count();
    if unresolved > 0 {
        eprintln!("\n[{} of {} quotes unresolved]", unresolved, spans.len());
    }

    Ok(())
}

/// Display one resolved span
fn print_span(number: usize, quote: &str, span: &ResolvedSpan, document: &Document) {
    match span.range() {
        Some(range) => {
            let position = offset_to_line_col(document, range.start);
            println!(
                "[{}] {} {}-{} (line {}, col {}), score {:.1}",
                number,
                span.method.as_str(),
                range.start,
                range.end,
                position.line,
                position.col,
                span.score.unwrap_or(0.0)
            );
            println!("    Quote:   \"{}\"", quote);
            println!("    Matched: \"{}\"", span.text);
            println!(
                "    Context: {}",
                extract_context(document, range.start, range.end, CONTEXT_WINDOW)
            );
        }
        None => {
            println!("[{}] not found", number);
            println!("    Quote: \"{}\"", quote);
            if let Some(note) = &span.note {
                println!("    Note:  {}", note);
            }
        }
    }
}

/// Execute the `annotate` command
async fn annotate_response(
    document_path: &Path,
    response_path: Option<PathBuf>,
    threshold: Option<f64>,
) -> Result<()> {
    let resolver = build_resolver(threshold)?;
    let document = load_document(document_path).await?;
    let raw = read_input(response_path).await?;
    let response = parse_response(&raw).context("Invalid grading reply")?;

    let report = tokio::task::spawn_blocking(move || annotate(response, &document, &resolver))
        .await
        .context("Annotation task failed")?;

    let output = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", output);

    if report.unresolved_count > 0 {
        eprintln!(
            "\n[{} of {} highlights unresolved]",
            report.unresolved_count,
            report.resolved_count + report.unresolved_count
        );
    }

    Ok(())
}

/// Execute the `normalize` command
async fn normalize_input(input: Option<PathBuf>) -> Result<()> {
    let text = read_input(input).await?;
    println!("{}", normalize(&text));
    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = crate::config::config()?;

    println!("gradespan Configuration");
    println!("=======================");
    println!();
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }
    println!();
    println!("Resolver:");
    println!("  threshold:          {}", config.resolver.threshold);
    println!("  short_window_ratio: {}", config.resolver.short_window_ratio);
    println!("  long_window_ratio:  {}", config.resolver.long_window_ratio);
    println!("  step_divisor:       {}", config.resolver.step_divisor);
    println!("  refine_boundaries:  {}", config.resolver.refine_boundaries);

    if let Ok(value) = std::env::var(crate::config::THRESHOLD_ENV) {
        println!();
        println!("Environment override: {}={}", crate::config::THRESHOLD_ENV, value);
    }

    Ok(())
}

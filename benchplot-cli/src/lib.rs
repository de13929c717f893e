#![warn(missing_docs)]
//! Benchplot CLI Library
//!
//! Hosts the reporter that a test runner drives through its lifecycle
//! callbacks, the output sinks it writes to, and a command line that replays
//! a recorded run through the same reporter.
//!
//! # Example
//!
//! ```ignore
//! use benchplot_cli::{Reporter, ReporterConfig, ReporterHooks};
//!
//! let mut reporter = Reporter::new(ReporterConfig::default(), std::io::stdout(), ReporterHooks::default())?;
//! reporter.on_spec_complete("Chrome 90", sample)?;
//! reporter.on_run_complete(&["Chrome 90".to_string()])?;
//! reporter.on_exit(|| println!("done")).await?;
//! ```

mod config;
mod events;
mod reporter;
mod sink;

pub use config::*;
pub use events::{RunEvent, browsers, read_events};
pub use reporter::{Reporter, ReporterError, ReporterHooks};
pub use sink::{
    ChartService, ChartSubmission, PlotlyClient, SinkError, SubmissionError, submit_bounded,
    write_json_file,
};

use anyhow::Context;
use benchplot_core::DuplicatePolicy;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::BufReader;
use std::path::PathBuf;

/// Benchplot CLI arguments
#[derive(Parser, Debug)]
#[command(name = "benchplot")]
#[command(author, version, about = "Benchplot - benchmark result reporter")]
pub struct Cli {
    /// Optional subcommand (Report, Init); defaults to Report
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Recorded run as JSON lines ("-" for stdin)
    #[arg(default_value = "-")]
    pub input: String,

    /// Only report benchmarks whose name matches this regex
    #[arg(long, default_value = ".*")]
    pub filter: String,

    /// Configuration file (discovered from benchplot.toml if not given)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the JSON results document to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Plotly account name
    #[arg(long, env = "PLOTLY_USERNAME")]
    pub username: Option<String>,

    /// Plotly API key
    #[arg(long, env = "PLOTLY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chart title / plotly filename
    #[arg(long)]
    pub filename: Option<String>,

    /// Plotly write mode
    #[arg(long)]
    pub fileopt: Option<String>,

    /// Upper bound for each chart upload (e.g., "30s")
    #[arg(long)]
    pub timeout: Option<String>,

    /// Keep the first of duplicate benchmark reports instead of aborting
    #[arg(long)]
    pub skip_duplicates: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded run through the reporter (default)
    Report,
    /// Print a default benchplot.toml
    Init,
}

/// Run the Benchplot CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Benchplot CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report itself
    let filter = if cli.verbose {
        "benchplot=debug"
    } else {
        "benchplot=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Init) => {
            print!("{}", ReporterConfig::default_toml());
            Ok(())
        }
        Some(Commands::Report) | None => {
            let config = build_config(&cli)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(report(&cli, config))
        }
    }
}

/// Layer configuration: benchplot.toml (explicit or discovered) → CLI overrides.
fn build_config(cli: &Cli) -> anyhow::Result<ReporterConfig> {
    let mut config = match &cli.config {
        Some(path) => ReporterConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReporterConfig::discover().unwrap_or_default(),
    };
    apply_overrides(cli, &mut config);
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut ReporterConfig) {
    if let Some(path) = &cli.json {
        config.path_to_json = Some(path.clone());
    }
    if let Some(username) = &cli.username {
        config.username = Some(username.clone());
    }
    if let Some(api_key) = &cli.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(filename) = &cli.filename {
        config.filename = filename.clone();
    }
    if let Some(fileopt) = &cli.fileopt {
        config.fileopt = fileopt.clone();
    }
    if let Some(timeout) = &cli.timeout {
        config.submit_timeout = Some(timeout.clone());
    }
    if cli.skip_duplicates {
        config.on_duplicate = DuplicatePolicy::Skip;
    }
}

fn load_events(input: &str) -> anyhow::Result<Vec<RunEvent>> {
    if input == "-" {
        return read_events(std::io::stdin().lock());
    }
    let file = std::fs::File::open(input).with_context(|| format!("Failed to open {}", input))?;
    read_events(BufReader::new(file))
}

async fn report(cli: &Cli, config: ReporterConfig) -> anyhow::Result<()> {
    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("Invalid filter pattern: {}", cli.filter))?;

    let events: Vec<RunEvent> = load_events(&cli.input)?
        .into_iter()
        .filter(|e| filter.is_match(&e.result.name))
        .collect();
    let browsers = browsers(&events);

    let mut reporter = Reporter::new(config, std::io::stdout(), ReporterHooks::default())?;
    for event in events {
        reporter.on_spec_complete(&event.browser, event.result)?;
    }
    reporter.on_run_complete(&browsers)?;
    reporter
        .on_exit(|| tracing::debug!("All chart submissions settled"))
        .await?;

    Ok(())
}

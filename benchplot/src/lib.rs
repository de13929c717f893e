#![warn(missing_docs)]
//! # Benchplot
//!
//! Collects benchmark results reported by a browser test run, aggregates them
//! per browser, suite and benchmark, and produces:
//! - **JSON export**: `{ meta, runs }` with every run sorted fastest-first
//! - **Text summary**: how much faster the best benchmark of each group is
//! - **Plotly chart**: one horizontal bar per run with rate error bars
//!
//! Throughput spread is computed in the ops/sec domain from the raw timing
//! samples, so error bars reflect the rate distribution rather than the
//! time-domain deviation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use benchplot::{Reporter, ReporterConfig, ReporterHooks};
//!
//! let config = ReporterConfig {
//!     path_to_json: Some("target/benchplot/results.json".into()),
//!     ..Default::default()
//! };
//! let mut reporter = Reporter::new(config, std::io::stdout(), ReporterHooks::default())?;
//! reporter.on_spec_complete("Chrome 90", sample)?;
//! reporter.on_run_complete(&["Chrome 90".to_string()])?;
//! reporter.on_exit(|| {}).await?;
//! ```

// Re-export core types
pub use benchplot_core::{
    AggregateError, BenchmarkSample, DuplicatePolicy, ResultSet, RunRecord, SampleStats, flatten,
    identity_key, remove_duplicates,
};

// Re-export stats
pub use benchplot_stats::{
    StatsError, Throughput, compare_fastest, compute_rate_deviation, rank_by_hz,
    round_half_away_from_zero,
};

// Re-export rendering
pub use benchplot_report::{
    ChartOptions, Figure, FigureMaker, JsonFormatter, ResultsDocument, build_chart_spec,
    generate_json_report, longest_label_len, parse_json_report, render_text_summary,
};

// Re-export the reporter and sinks
pub use benchplot_cli::{
    ChartService, ChartSubmission, PlotlyClient, Reporter, ReporterConfig, ReporterError,
    ReporterHooks, SubmissionError,
};

/// Run the Benchplot CLI.
///
/// ```ignore
/// fn main() {
///     benchplot::run().unwrap();
/// }
/// ```
pub use benchplot_cli::run;

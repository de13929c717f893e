//! Reporter Lifecycle
//!
//! Drives one run from the host runner's callbacks to its outputs:
//!
//! ```text
//! on_spec_complete  (per benchmark)   ingest + progress marker
//!        │
//!        ▼
//! on_run_complete   (once)            flatten → JSON file → text summary
//!        │                            → figures → spawn uploads
//!        ▼
//! on_exit           (once)            join uploads → done()
//! ```
//!
//! The reporter owns its `ResultSet`, so concurrent runs never share state.
//! Chart uploads are tracked in a `JoinSet`; `on_exit` waits for every one of
//! them before signaling completion.

use crate::config::ReporterConfig;
use crate::sink::{
    ChartService, ChartSubmission, PlotlyClient, SinkError, SubmissionError, submit_bounded,
    write_json_file,
};
use benchplot_core::{AggregateError, BenchmarkSample, ResultSet, flatten, remove_duplicates};
use benchplot_report::{
    ChartOptions, FigureMaker, JsonFormatter, ResultsDocument, default_figure_maker,
    default_json_formatter, render_text_summary,
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors from the reporter lifecycle
#[derive(Debug, Error)]
pub enum ReporterError {
    /// Flattening the run failed
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The JSON export could not be produced
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A chart upload failed
    #[error("Chart submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// A chart upload task panicked or was cancelled
    #[error("Chart submission task failed: {0}")]
    Task(String),

    /// Writing to the output stream failed
    #[error("Failed to write report output: {0}")]
    Output(#[from] std::io::Error),

    /// The reporter configuration is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Charts were due for upload outside a Tokio runtime
    #[error("Chart submission requires a Tokio runtime")]
    NoRuntime,
}

/// Optional replacements for the default JSON shape and chart generation
#[derive(Clone, Default)]
pub struct ReporterHooks {
    /// Replaces the JSON export shape
    pub format_json: Option<JsonFormatter>,
    /// Replaces chart generation
    pub figure_maker: Option<FigureMaker>,
}

/// Collects results for one run and renders them when the run completes
pub struct Reporter<W: Write, S: ChartService = PlotlyClient> {
    config: ReporterConfig,
    output: W,
    results: ResultSet,
    format_json: JsonFormatter,
    figure_maker: FigureMaker,
    chart_service: Option<Arc<S>>,
    submit_timeout: Option<Duration>,
    pending: JoinSet<Result<String, SubmissionError>>,
}

impl<W: Write> Reporter<W, PlotlyClient> {
    /// Create a reporter that uploads to plotly when credentials are configured
    pub fn new(
        config: ReporterConfig,
        output: W,
        hooks: ReporterHooks,
    ) -> Result<Self, ReporterError> {
        let client = PlotlyClient::from_config(&config)?;
        Self::build(config, output, hooks, client)
    }
}

impl<W: Write, S: ChartService> Reporter<W, S> {
    /// Create a reporter with a custom chart service.
    ///
    /// The service is only used when plotly credentials are configured.
    pub fn with_chart_service(
        config: ReporterConfig,
        output: W,
        hooks: ReporterHooks,
        service: S,
    ) -> Result<Self, ReporterError> {
        let service = config.chart_credentials().map(|_| service);
        Self::build(config, output, hooks, service)
    }

    fn build(
        config: ReporterConfig,
        output: W,
        hooks: ReporterHooks,
        service: Option<S>,
    ) -> Result<Self, ReporterError> {
        let submit_timeout = config
            .submit_timeout()
            .map_err(|e| ReporterError::Config(e.to_string()))?;

        Ok(Self {
            config,
            output,
            results: ResultSet::new(),
            format_json: hooks.format_json.unwrap_or_else(default_json_formatter),
            figure_maker: hooks.figure_maker.unwrap_or_else(default_figure_maker),
            chart_service: service.map(Arc::new),
            submit_timeout,
            pending: JoinSet::new(),
        })
    }

    /// Results ingested so far
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Number of chart submissions not yet joined
    pub fn pending_submissions(&self) -> usize {
        self.pending.len()
    }

    /// Output stream
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Record one completed benchmark
    pub fn on_spec_complete(
        &mut self,
        browser: &str,
        sample: BenchmarkSample,
    ) -> Result<(), ReporterError> {
        debug!(
            browser,
            suite = %sample.suite,
            name = %sample.name,
            hz = sample.hz,
            "Benchmark complete"
        );
        self.results.ingest(browser, sample);
        self.output.write_all(self.config.progress_marker.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Render every output for the finished run.
    ///
    /// Chart uploads are started here but not awaited; call [`Reporter::on_exit`]
    /// to wait for them.
    pub fn on_run_complete(
        &mut self,
        browsers: &[String],
    ) -> Result<ResultsDocument, ReporterError> {
        let mut results = std::mem::take(&mut self.results);
        let skipped = remove_duplicates(&mut results, self.config.on_duplicate)?;
        if skipped > 0 {
            warn!(skipped, "Duplicate benchmark runs dropped");
        }
        let records = flatten(&results, self.config.on_duplicate)?;
        info!(browsers = browsers.len(), runs = records.len(), "Run complete");
        let doc = ResultsDocument::new(records);

        self.write_json(&doc)?;

        self.output.write_all(b"\n")?;
        for line in render_text_summary(&results) {
            writeln!(self.output, "{line}")?;
        }
        self.output.flush()?;

        self.submit_charts(&doc)?;
        Ok(doc)
    }

    fn write_json(&self, doc: &ResultsDocument) -> Result<(), ReporterError> {
        let Some(path) = &self.config.path_to_json else {
            debug!("JSON export skipped: no path_to_json configured");
            return Ok(());
        };

        let value = (self.format_json)(doc).map_err(SinkError::from)?;
        write_json_file(path, &value)?;
        info!(path = %path.display(), "Results written");
        Ok(())
    }

    fn submit_charts(&mut self, doc: &ResultsDocument) -> Result<(), ReporterError> {
        let Some(service) = &self.chart_service else {
            debug!("Chart submission skipped: plotly credentials not configured");
            return Ok(());
        };
        let runtime = Handle::try_current().map_err(|_| ReporterError::NoRuntime)?;

        let options = ChartOptions {
            title: self.config.filename.clone(),
        };
        let figures = (self.figure_maker)(doc, &options);

        for (idx, figure) in figures.into_iter().enumerate() {
            let filename = if idx == 0 {
                self.config.filename.clone()
            } else {
                format!("{}-{}", self.config.filename, idx)
            };
            debug!(%filename, bars = figure.data.len(), "Submitting chart");

            let submission = ChartSubmission {
                filename,
                fileopt: self.config.fileopt.clone(),
                world_readable: self.config.world_readable,
                figure,
            };
            let service = Arc::clone(service);
            let timeout = self.submit_timeout;
            self.pending.spawn_on(
                async move { submit_bounded(service.as_ref(), submission, timeout).await },
                &runtime,
            );
        }
        Ok(())
    }

    /// Wait for every pending chart submission, then call `done` exactly once.
    ///
    /// With nothing pending, `done` runs before the first suspension point.
    /// Each resolved URL is written to the output stream. Failures do not stop
    /// the remaining submissions from being joined; the first one is returned.
    pub async fn on_exit<F: FnOnce()>(&mut self, done: F) -> Result<(), ReporterError> {
        let mut first_error = None;

        while let Some(joined) = self.pending.join_next().await {
            let outcome = match joined {
                Ok(Ok(url)) => {
                    info!(%url, "Chart uploaded");
                    writeln!(self.output, "plotly: {url}").map_err(ReporterError::from)
                }
                Ok(Err(e)) => Err(ReporterError::from(e)),
                Err(e) => Err(ReporterError::Task(e.to_string())),
            };
            if let Err(e) = outcome {
                warn!(error = %e, "Chart submission failed");
                first_error.get_or_insert(e);
            }
        }

        done();
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

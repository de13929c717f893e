//! Plotly chart sink
//!
//! Uploads figures through the legacy plotly `clientresp` endpoint, which
//! takes a form-encoded request and answers with `{url, error, message, warning}`.

use crate::config::ReporterConfig;
use benchplot_report::Figure;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors from uploading a chart
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Transport or HTTP status failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The figure could not be serialized
    #[error("Failed to encode figure: {0}")]
    Encode(#[from] serde_json::Error),

    /// Plotly answered with an error message
    #[error("Plotly rejected {filename}: {message}")]
    Rejected {
        /// Remote filename
        filename: String,
        /// Error text returned by plotly
        message: String,
    },

    /// Plotly answered without a chart URL
    #[error("Plotly returned no URL for {0}")]
    MissingUrl(String),

    /// The upload did not finish within the configured timeout
    #[error("Submission of {filename} timed out after {timeout:?}")]
    Timeout {
        /// Remote filename
        filename: String,
        /// Configured bound
        timeout: Duration,
    },
}

/// One figure queued for upload
#[derive(Debug, Clone)]
pub struct ChartSubmission {
    /// Remote filename
    pub filename: String,
    /// Write mode
    pub fileopt: String,
    /// Public visibility
    pub world_readable: bool,
    /// Chart to upload
    pub figure: Figure,
}

/// Remote chart service
pub trait ChartService: Send + Sync + 'static {
    /// Upload a chart, returning its URL
    fn submit(
        &self,
        submission: ChartSubmission,
    ) -> impl Future<Output = Result<String, SubmissionError>> + Send;
}

/// Submit with an optional upper bound on the call's duration
pub async fn submit_bounded<S: ChartService>(
    service: &S,
    submission: ChartSubmission,
    timeout: Option<Duration>,
) -> Result<String, SubmissionError> {
    let Some(timeout) = timeout else {
        return service.submit(submission).await;
    };

    let filename = submission.filename.clone();
    tokio::time::timeout(timeout, service.submit(submission))
        .await
        .map_err(|_| SubmissionError::Timeout { filename, timeout })?
}

#[derive(Debug, Default, Deserialize)]
struct PlotlyResponse {
    #[serde(default)]
    url: String,
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    warning: String,
}

/// `reqwest` client for the plotly upload API
#[derive(Debug, Clone)]
pub struct PlotlyClient {
    http: reqwest::Client,
    endpoint: String,
    username: String,
    api_key: String,
}

impl PlotlyClient {
    /// Create a client for the given account
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("benchplot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            username: username.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from configured credentials, if any
    pub fn from_config(config: &ReporterConfig) -> Result<Option<Self>, SubmissionError> {
        config
            .chart_credentials()
            .map(|(user, key)| Self::new(config.endpoint.as_str(), user, key))
            .transpose()
    }
}

impl ChartService for PlotlyClient {
    async fn submit(&self, submission: ChartSubmission) -> Result<String, SubmissionError> {
        let args = serde_json::to_string(&submission.figure.data)?;
        let kwargs = serde_json::to_string(&serde_json::json!({
            "filename": submission.filename,
            "fileopt": submission.fileopt,
            "layout": submission.figure.layout,
            "world_readable": submission.world_readable,
        }))?;

        let form = [
            ("un", self.username.as_str()),
            ("key", self.api_key.as_str()),
            ("origin", "plot"),
            ("platform", "rust"),
            ("args", args.as_str()),
            ("kwargs", kwargs.as_str()),
        ];

        let response: PlotlyResponse = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.warning.is_empty() {
            tracing::warn!(filename = %submission.filename, "Plotly: {}", response.warning);
        }
        if !response.message.is_empty() {
            tracing::debug!(filename = %submission.filename, "Plotly: {}", response.message);
        }
        if !response.error.is_empty() {
            return Err(SubmissionError::Rejected {
                filename: submission.filename,
                message: response.error,
            });
        }
        if response.url.is_empty() {
            return Err(SubmissionError::MissingUrl(submission.filename));
        }

        Ok(response.url)
    }
}

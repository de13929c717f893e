//! Configuration loading from benchplot.toml
//!
//! Reporter configuration can be specified in a `benchplot.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory. Every key is optional; a missing JSON path or missing plotly
//! credentials simply disable that output.

use benchplot_core::DuplicatePolicy;
use benchplot_report::DEFAULT_CHART_TITLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "benchplot.toml";

/// Legacy plotly upload endpoint
pub const DEFAULT_ENDPOINT: &str = "https://plot.ly/clientresp";

/// Reporter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Write the JSON results document here (disabled when unset)
    #[serde(default, alias = "pathToJson")]
    pub path_to_json: Option<PathBuf>,
    /// Plotly account name
    #[serde(default)]
    pub username: Option<String>,
    /// Plotly API key
    #[serde(default, alias = "apiKey")]
    pub api_key: Option<String>,
    /// Chart title and plotly filename
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Plotly write mode ("new", "overwrite", ...; empty = service default)
    #[serde(default)]
    pub fileopt: String,
    /// Whether uploaded charts are public
    #[serde(default = "default_world_readable")]
    pub world_readable: bool,
    /// Upload endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound for a single chart submission (e.g., "30s"); unbounded when unset
    #[serde(default)]
    pub submit_timeout: Option<String>,
    /// Behavior when a benchmark is reported twice for the same browser
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
    /// Written to the output stream for every ingested benchmark
    #[serde(default = "default_progress_marker")]
    pub progress_marker: String,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            path_to_json: None,
            username: None,
            api_key: None,
            filename: default_filename(),
            fileopt: String::new(),
            world_readable: default_world_readable(),
            endpoint: default_endpoint(),
            submit_timeout: None,
            on_duplicate: DuplicatePolicy::default(),
            progress_marker: default_progress_marker(),
        }
    }
}

fn default_filename() -> String {
    DEFAULT_CHART_TITLE.to_string()
}
fn default_world_readable() -> bool {
    true
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_progress_marker() -> String {
    ".".to_string()
}

impl ReporterConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Plotly credentials, if both are configured and non-empty
    pub fn chart_credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.api_key.as_deref()) {
            (Some(user), Some(key)) if !user.is_empty() && !key.is_empty() => Some((user, key)),
            _ => None,
        }
    }

    /// Parsed submission timeout
    pub fn submit_timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.submit_timeout
            .as_deref()
            .map(Self::parse_duration)
            .transpose()
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Benchplot Configuration

# Write the JSON results document (uncomment to enable)
# path_to_json = "target/benchplot/results.json"

# Plotly credentials; chart upload is skipped unless both are set
# username = "me"
# api_key = "secret"

# Chart title / plotly filename
filename = "karma-plotly-reporter"
# Plotly write mode, empty for the service default
fileopt = ""
# Whether uploaded charts are public
world_readable = true
# Upload endpoint
endpoint = "https://plot.ly/clientresp"
# Bound each chart upload (uncomment to enable)
# submit_timeout = "30s"

# Duplicate benchmark reports: "abort" or "skip"
on_duplicate = "abort"
# Progress marker written per completed benchmark
progress_marker = "."
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Invalid duration number: {}", num_part));
        }

        let nanos_per_unit: f64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1.0,
            "us" | "µs" => 1_000.0,
            "ms" => 1_000_000.0,
            "s" | "" => 1_000_000_000.0,
            "m" | "min" => 60_000_000_000.0,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok(Duration::from_nanos((value * nanos_per_unit) as u64))
    }
}

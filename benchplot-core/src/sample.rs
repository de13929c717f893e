//! Benchmark Samples
//!
//! Raw results as reported by the in-browser benchmark runner. Statistics are
//! already computed by the runner and arrive in the seconds domain.

use benchplot_stats::Throughput;
use serde::{Deserialize, Serialize};

/// One completed benchmark as reported by the host runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSample {
    /// Suite the benchmark belongs to
    pub suite: String,
    /// Benchmark name within the suite
    pub name: String,
    /// Test description from the runner, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operations per second
    pub hz: f64,
    /// Iterations per cycle
    pub count: u64,
    /// Number of measurement cycles
    pub cycles: u64,
    /// Runner-computed statistics
    pub stats: SampleStats,
}

/// Time-domain statistics attached to a sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Mean iteration time (seconds)
    pub mean: f64,
    /// Standard deviation of iteration time (seconds)
    pub deviation: f64,
    /// Variance of iteration time
    pub variance: f64,
    /// Margin of error
    pub moe: f64,
    /// Relative margin of error (percent)
    pub rme: f64,
    /// Standard error of the mean
    pub sem: f64,
    /// Per-iteration timing observations (seconds)
    pub sample: Vec<f64>,
}

impl BenchmarkSample {
    /// Description used in "no peers" report lines.
    ///
    /// Falls back to the benchmark name when the runner gave no description.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

impl Throughput for BenchmarkSample {
    fn hz(&self) -> f64 {
        self.hz
    }
}

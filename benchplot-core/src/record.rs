//! Run Records
//!
//! Flattens a [`ResultSet`] into one enriched record per benchmark run.
//!
//! ## Pipeline
//!
//! ```text
//! ResultSet (browser → suite → samples)
//!        │
//!        ▼
//! ┌──────────────┐
//! │ identity key │  (suite, name, browser), duplicates rejected
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  enrichment  │  rate deviation per run (parallel)
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   ranking    │  stable sort, fastest first
//! └──────────────┘
//! ```

use crate::result_set::ResultSet;
use crate::sample::BenchmarkSample;
use benchplot_stats::{StatsError, Throughput, compute_rate_deviation, rank_by_hz};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Separator placed between the parts of an identity key
const KEY_SEPARATOR: &str = "-";

/// Replacement for whitespace runs inside a key part
const WHITESPACE_REPLACEMENT: &str = "_";

/// Errors from flattening a result set
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// The same run was ingested more than once
    #[error("Benchmark reported twice in one run: {key}")]
    DuplicateRun {
        /// Identity key of the repeated run
        key: String,
    },

    /// A run's timing samples could not be enriched
    #[error("Cannot enrich {key}: {source}")]
    Stats {
        /// Identity key of the run
        key: String,
        /// Statistics failure
        #[source]
        source: StatsError,
    },
}

/// What to do when the same identity key shows up twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the whole aggregation (default)
    #[default]
    Abort,
    /// Keep the first occurrence and drop later ones
    Skip,
}

/// Normalized, enriched view of one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    /// Identity key, unique within a run
    pub full_name: String,
    /// Browser that ran the benchmark
    pub browser: String,
    /// Suite name
    pub suite: String,
    /// Benchmark name
    pub name: String,
    /// Iterations per timing sample
    pub count: u64,
    /// Calibration cycles
    pub cycles: u64,
    /// Operations per second
    pub hz: f64,
    /// Standard deviation of the rate distribution (ops/sec)
    pub hz_deviation: f64,
    /// Mean duration (seconds)
    pub mean: f64,
    /// Standard deviation of durations
    pub deviation: f64,
    /// Variance of durations
    pub variance: f64,
    /// Margin of error
    pub moe: f64,
    /// Relative margin of error (percent)
    pub rme: f64,
    /// Standard error of the mean
    pub sem: f64,
    /// Raw timing samples (seconds)
    pub sample: Vec<f64>,
}

impl Throughput for RunRecord {
    fn hz(&self) -> f64 {
        self.hz
    }
}

impl RunRecord {
    /// Build an enriched record from a sample.
    pub fn from_sample(
        full_name: String,
        browser: &str,
        sample: &BenchmarkSample,
    ) -> Result<Self, AggregateError> {
        let hz_deviation =
            compute_rate_deviation(&sample.stats.sample).map_err(|source| {
                AggregateError::Stats {
                    key: full_name.clone(),
                    source,
                }
            })?;

        Ok(Self {
            full_name,
            browser: browser.to_string(),
            suite: sample.suite.clone(),
            name: sample.name.clone(),
            count: sample.count,
            cycles: sample.cycles,
            hz: sample.hz,
            hz_deviation,
            mean: sample.stats.mean,
            deviation: sample.stats.deviation,
            variance: sample.stats.variance,
            moe: sample.stats.moe,
            rme: sample.stats.rme,
            sem: sample.stats.sem,
            sample: sample.stats.sample.clone(),
        })
    }

    /// Longest of the suite, name and browser strings, in characters
    pub fn longest_label_len(&self) -> usize {
        [&self.suite, &self.name, &self.browser]
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Normalized `(suite, name, browser)` triple identifying a run.
///
/// Duplicate detection compares these parts directly, so separators inside a
/// part never make two distinct runs collide.
type RunIdentity = [String; 3];

fn normalize_part(part: &str) -> String {
    part.split_whitespace()
        .collect::<Vec<_>>()
        .join(WHITESPACE_REPLACEMENT)
}

fn run_identity(suite: &str, name: &str, browser: &str) -> RunIdentity {
    [suite, name, browser].map(normalize_part)
}

/// Identity key for a run: `suite-name-browser`, whitespace runs replaced by `_`.
pub fn identity_key(suite: &str, name: &str, browser: &str) -> String {
    run_identity(suite, name, browser).join(KEY_SEPARATOR)
}

/// Tracks identities already seen and applies the duplicate policy.
struct DuplicateFilter {
    seen: HashSet<RunIdentity>,
    policy: DuplicatePolicy,
}

impl DuplicateFilter {
    fn new(policy: DuplicatePolicy, capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            policy,
        }
    }

    /// `Ok(true)` for a first occurrence, `Ok(false)` for a skipped duplicate.
    fn admit(&mut self, browser: &str, sample: &BenchmarkSample) -> Result<bool, AggregateError> {
        let identity = run_identity(&sample.suite, &sample.name, browser);
        if self.seen.contains(&identity) {
            let key = identity.join(KEY_SEPARATOR);
            return match self.policy {
                DuplicatePolicy::Abort => Err(AggregateError::DuplicateRun { key }),
                DuplicatePolicy::Skip => {
                    tracing::warn!(%key, "Skipping duplicate benchmark run");
                    Ok(false)
                }
            };
        }
        self.seen.insert(identity);
        Ok(true)
    }
}

/// Remove repeated runs from a result set according to `policy`.
///
/// Under [`DuplicatePolicy::Skip`] the first occurrence of each run is kept
/// and later ones are dropped, so every view rendered from the set agrees
/// with [`flatten`]. Under [`DuplicatePolicy::Abort`] the first repeat is
/// returned as [`AggregateError::DuplicateRun`] and the set is left unchanged.
/// Returns the number of removed samples.
pub fn remove_duplicates(
    results: &mut ResultSet,
    policy: DuplicatePolicy,
) -> Result<usize, AggregateError> {
    let mut filter = DuplicateFilter::new(policy, results.len());
    let mut first_error = None;
    let before = results.len();

    results.retain(|browser, sample| {
        if first_error.is_some() {
            return true;
        }
        match filter.admit(browser, sample) {
            Ok(keep) => keep,
            Err(e) => {
                first_error = Some(e);
                true
            }
        }
    });

    match first_error {
        Some(e) => Err(e),
        None => Ok(before - results.len()),
    }
}

/// Flatten a result set into records sorted fastest-first.
///
/// Fails with [`AggregateError::DuplicateRun`] when an identity key repeats
/// under [`DuplicatePolicy::Abort`], and with [`AggregateError::Stats`] when a
/// run's timing samples cannot produce a rate deviation.
pub fn flatten(
    results: &ResultSet,
    policy: DuplicatePolicy,
) -> Result<Vec<RunRecord>, AggregateError> {
    let mut filter = DuplicateFilter::new(policy, results.len());
    let mut pending = Vec::with_capacity(results.len());

    for group in results.groups() {
        for sample in group.samples {
            if filter.admit(group.browser, sample)? {
                let key = identity_key(group.suite, &sample.name, group.browser);
                pending.push((key, group.browser, sample));
            }
        }
    }

    // Collect preserves input order, so the stable sort below keeps ties in
    // ingestion order.
    let mut records: Vec<RunRecord> = pending
        .into_par_iter()
        .map(|(key, browser, sample)| RunRecord::from_sample(key, browser, sample))
        .collect::<Result<_, _>>()?;

    rank_by_hz(&mut records);
    Ok(records)
}

#![warn(missing_docs)]
//! Benchplot Core - Result Aggregation
//!
//! This crate owns the data flowing from a host test runner into reports:
//! - `BenchmarkSample` as delivered for each completed benchmark
//! - `ResultSet`, the per-run accumulator grouped by browser and suite
//! - `RunRecord`, the flattened and enriched view used by every output
//! - `flatten`, which detects duplicate runs and ranks records fastest-first
//! - `remove_duplicates`, which applies the duplicate policy to a `ResultSet`

mod record;
mod result_set;
mod sample;

pub use record::{
    AggregateError, DuplicatePolicy, RunRecord, flatten, identity_key, remove_duplicates,
};
pub use result_set::{BrowserResults, Group, ResultSet, SuiteResults};
pub use sample::{BenchmarkSample, SampleStats};

#![warn(missing_docs)]
//! Benchplot Statistical Engine
//!
//! Pure functions over already-measured benchmark data:
//! - Rate (ops/sec) standard deviation derived from per-iteration timing samples
//! - Fastest-first ranking of runs by throughput
//! - Pairwise "times faster" comparison with display rounding

mod deviation;
mod ranking;

pub use deviation::{MIN_SAMPLES, StatsError, compute_rate_deviation};
pub use ranking::{
    GroupComparison, Throughput, compare_fastest, rank_by_hz, round_half_away_from_zero,
};

/// Number of decimal digits kept for the displayed speed ratio
pub const RATIO_DECIMALS: u32 = 2;

//! Ranking and Comparison
//!
//! Orders runs fastest-first and summarizes the lead of the fastest run over
//! the runner-up.

use std::cmp::Ordering;

/// Anything carrying a throughput in operations per second
pub trait Throughput {
    /// Operations per second
    fn hz(&self) -> f64;
}

impl Throughput for f64 {
    fn hz(&self) -> f64 {
        *self
    }
}

impl<T: Throughput + ?Sized> Throughput for &T {
    fn hz(&self) -> f64 {
        (**self).hz()
    }
}

fn by_hz_descending<T: Throughput>(a: &T, b: &T) -> Ordering {
    b.hz().total_cmp(&a.hz())
}

/// Sort runs descending by `hz`.
///
/// The sort is stable: runs with equal throughput keep their insertion order.
pub fn rank_by_hz<T: Throughput>(runs: &mut [T]) {
    runs.sort_by(by_hz_descending);
}

/// Fastest and second-fastest runs of a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupComparison<'a, T> {
    /// Highest-throughput run
    pub fastest: &'a T,
    /// Runner-up
    pub second: &'a T,
    /// `fastest.hz / second.hz`, rounded to two decimals
    pub times_faster: f64,
}

/// Compare the two fastest runs of a group.
///
/// Returns `None` when the group has fewer than two runs. The input does not
/// need to be sorted; ties resolve to the earlier run.
pub fn compare_fastest<T: Throughput>(runs: &[T]) -> Option<GroupComparison<'_, T>> {
    let mut ranked: Vec<&T> = runs.iter().collect();
    ranked.sort_by(|a, b| by_hz_descending(*a, *b));

    match ranked.as_slice() {
        [fastest, second, ..] => Some(GroupComparison {
            fastest: *fastest,
            second: *second,
            times_faster: round_half_away_from_zero(
                fastest.hz() / second.hz(),
                crate::RATIO_DECIMALS,
            ),
        }),
        _ => None,
    }
}

/// Round to `decimals` digits, with halves rounded away from zero.
pub fn round_half_away_from_zero(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

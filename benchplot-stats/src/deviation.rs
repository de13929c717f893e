//! Rate Deviation
//!
//! Timing samples are per-iteration durations in seconds. Throughput for a
//! single observation is its reciprocal, so the spread of the rate
//! distribution has to be computed in the ops/sec domain rather than derived
//! from the time-domain deviation.
//!
//! Both the mean and the variance divide by `N - 1`. The mean keeps that
//! divisor to stay compatible with previously exported results.

/// Minimum number of timing samples needed for a rate deviation
pub const MIN_SAMPLES: usize = 2;

/// Errors from statistics computation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Fewer than [`MIN_SAMPLES`] timing samples
    #[error("Rate deviation needs at least 2 samples, got {len}")]
    InsufficientSamples {
        /// Number of samples given
        len: usize,
    },

    /// A timing sample that is not a positive, finite duration
    #[error("Timing sample {index} is not a positive finite duration: {value}")]
    InvalidDuration {
        /// Position of the offending sample
        index: usize,
        /// The rejected duration
        value: f64,
    },

    /// Rates too large to be represented, e.g. from subnormal durations
    #[error("Rate deviation overflowed")]
    Overflow,
}

/// Compute the standard deviation of throughput from timing samples.
///
/// Each sample is converted to a rate (`1 / duration`), then:
///
/// ```text
/// mean     = sum(rates) / (N - 1)
/// variance = sum((rate - mean)^2) / (N - 1)
/// result   = sqrt(variance)
/// ```
///
/// Returns [`StatsError::InsufficientSamples`] when fewer than two samples are
/// given and [`StatsError::InvalidDuration`] for a zero, negative or non-finite
/// duration. The result is always finite.
pub fn compute_rate_deviation(samples: &[f64]) -> Result<f64, StatsError> {
    if samples.len() < MIN_SAMPLES {
        return Err(StatsError::InsufficientSamples { len: samples.len() });
    }

    let bessel = (samples.len() - 1) as f64;
    let rates = samples
        .iter()
        .enumerate()
        .map(|(index, &duration)| {
            let rate = 1.0 / duration;
            if duration > 0.0 && duration.is_finite() && rate.is_finite() {
                Ok(rate)
            } else {
                Err(StatsError::InvalidDuration {
                    index,
                    value: duration,
                })
            }
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let mean = rates.iter().sum::<f64>() / bessel;
    let variance = rates.iter().map(|rate| (rate - mean).powi(2)).sum::<f64>() / bessel;

    let deviation = variance.sqrt();
    if !deviation.is_finite() {
        return Err(StatsError::Overflow);
    }
    Ok(deviation)
}

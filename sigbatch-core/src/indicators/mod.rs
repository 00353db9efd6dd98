//! Series indicators.
//!
//! An indicator maps a series to a same-length output series, with NaN in
//! every position it cannot define (the first `lookback()` entries at least).

pub mod rolling_mean;

pub use rolling_mean::RollingMean;

/// A single-series indicator computed over a whole column at once.
pub trait Indicator: Send + Sync {
    fn name(&self) -> &str;

    /// Number of leading positions that are always undefined.
    fn lookback(&self) -> usize;

    /// Output has the same length as `series`; undefined positions are NaN.
    fn compute(&self, series: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

//! Trailing rolling mean.
//!
//! `out[i] = mean(series[i+1-window ..= i])` for `i >= window-1`, NaN before.
//! A NaN anywhere in the window makes that output NaN.
//!
//! The running sum is Kahan-compensated, and a window holding one repeated
//! value returns that value exactly, so a flat window never lands an ulp away
//! from its own close.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    name: String,
}

impl RollingMean {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "rolling window must be >= 1");
        Self {
            window,
            name: format!("rolling_mean_{window}"),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for RollingMean {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let w = self.window;
        let mut result = vec![f64::NAN; n];

        let mut sum = KahanSum::default();
        let mut nan_count = 0usize;
        // Length of the trailing run of identical values ending at `i`.
        let mut run = 0usize;

        for i in 0..n {
            let entering = series[i];
            run = if i > 0 && entering == series[i - 1] { run + 1 } else { 1 };
            if entering.is_nan() {
                nan_count += 1;
            } else {
                sum.add(entering);
            }

            if i >= w {
                let leaving = series[i - w];
                if leaving.is_nan() {
                    nan_count -= 1;
                } else {
                    sum.remove(leaving);
                }
            }

            if i + 1 < w || nan_count > 0 {
                continue;
            }

            if run >= w {
                result[i] = entering;
                continue;
            }

            // inf - inf poisons the running sum once an infinity leaves.
            if !sum.value().is_finite() {
                sum = KahanSum::from_slice(&series[i + 1 - w..=i]);
            }
            result[i] = sum.value() / w as f64;
        }

        result
    }
}

/// Compensated summation that also supports removing a value.
#[derive(Debug, Default, Clone, Copy)]
struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// Plain sum with no carried compensation, which is NaN once an infinity
    /// has passed through it.
    fn from_slice(values: &[f64]) -> Self {
        Self {
            sum: values.iter().sum(),
            compensation: 0.0,
        }
    }

    fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    fn remove(&mut self, value: f64) {
        self.add(-value);
    }

    fn value(&self) -> f64 {
        self.sum
    }
}

//! Signal engine: rolling mean of `close` and the binary signal derived from it.
//!
//! `signal[i] = 1` when `close[i] > rolling_mean[i]`, else 0. Where the rolling
//! mean is undefined (the first `window - 1` rows, or any window holding a
//! missing close) the comparison is false, so the signal is 0. There is no
//! separate "undefined" signal state.

use crate::config::RunConfig;
use crate::data::Dataset;
use crate::indicators::{Indicator, RollingMean};

/// Computes the derived columns for a dataset.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    mean: RollingMean,
}

impl SignalEngine {
    /// Panics if `window` is 0; a validated [`RunConfig`] never holds one.
    pub fn new(window: usize) -> Self {
        Self {
            mean: RollingMean::new(window),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.window())
    }

    pub fn window(&self) -> usize {
        self.mean.window()
    }

    /// Trailing rolling mean of `closes`; NaN where undefined.
    pub fn rolling_mean(&self, closes: &[f64]) -> Vec<f64> {
        self.mean.compute(closes)
    }

    /// Rolling mean and signal in one pass over the dataset.
    pub fn compute(&self, dataset: &Dataset) -> SignalFrame {
        let closes = dataset.closes();
        let rolling_mean = self.rolling_mean(&closes);
        SignalFrame::new(self.window(), closes, rolling_mean)
    }
}

/// `1` where `close > rolling_mean`, else `0`. A NaN on either side yields 0.
pub fn derive_signals(closes: &[f64], rolling_mean: &[f64]) -> Vec<u8> {
    closes
        .iter()
        .zip(rolling_mean)
        .map(|(close, mean)| u8::from(close > mean))
        .collect()
}

/// The input closes augmented with `rolling_mean` and `signal` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalFrame {
    window: usize,
    close: Vec<f64>,
    rolling_mean: Vec<f64>,
    signal: Vec<u8>,
}

/// One row of a [`SignalFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRow {
    pub index: usize,
    pub close: f64,
    pub rolling_mean: Option<f64>,
    pub signal: u8,
}

impl SignalFrame {
    /// Build a frame from closes and their rolling mean, deriving the signal.
    pub fn new(window: usize, close: Vec<f64>, rolling_mean: Vec<f64>) -> Self {
        assert_eq!(
            close.len(),
            rolling_mean.len(),
            "rolling mean must cover every close"
        );
        let signal = derive_signals(&close, &rolling_mean);
        Self {
            window,
            close,
            rolling_mean,
            signal,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// Raw rolling-mean column; NaN marks undefined entries.
    pub fn rolling_mean(&self) -> &[f64] {
        &self.rolling_mean
    }

    pub fn signal(&self) -> &[u8] {
        &self.signal
    }

    pub fn rolling_mean_at(&self, index: usize) -> Option<f64> {
        self.rolling_mean
            .get(index)
            .copied()
            .filter(|mean| !mean.is_nan())
    }

    /// Rows that can never have a defined rolling mean.
    pub fn warmup_rows(&self) -> usize {
        self.window.saturating_sub(1).min(self.len())
    }

    /// Mean of the signal column over every row, warm-up zeros included.
    /// An empty frame has rate 0.
    pub fn signal_rate(&self) -> f64 {
        if self.signal.is_empty() {
            return 0.0;
        }
        let ones: usize = self.signal.iter().map(|&s| usize::from(s)).sum();
        ones as f64 / self.signal.len() as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = SignalRow> + '_ {
        (0..self.len()).map(move |index| SignalRow {
            index,
            close: self.close[index],
            rolling_mean: self.rolling_mean_at(index),
            signal: self.signal[index],
        })
    }
}

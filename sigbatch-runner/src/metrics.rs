//! Metrics record: the single terminal output of a run.
//!
//! Two shapes, serialized with a fixed key order:
//! - success: `version, rows_processed, metric, value, latency_ms, seed, status`
//! - error: `version, status, error_message`

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sigbatch_core::{RunConfig, SignalFrame};

/// Name reported in the `metric` field.
pub const METRIC_NAME: &str = "signal_rate";

/// Version reported when a run fails before `version` is known.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Decimal places kept in `value`.
pub const VALUE_DECIMALS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetrics {
    pub version: String,
    pub rows_processed: usize,
    pub metric: String,
    pub value: f64,
    pub latency_ms: u64,
    pub seed: u32,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub version: String,
    pub status: RecordStatus,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricsRecord {
    Success(SuccessMetrics),
    Error(ErrorMetrics),
}

impl MetricsRecord {
    pub fn status(&self) -> RecordStatus {
        match self {
            Self::Success(m) => m.status,
            Self::Error(m) => m.status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn version(&self) -> &str {
        match self {
            Self::Success(m) => &m.version,
            Self::Error(m) => &m.version,
        }
    }
}

/// Compact single-line JSON, as written to the log.
impl fmt::Display for MetricsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Assembles the record for a run that started at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct MetricsReporter {
    started: Instant,
}

impl MetricsReporter {
    pub fn new(started: Instant) -> Self {
        Self { started }
    }

    /// Whole milliseconds since the job started.
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn success(&self, config: &RunConfig, frame: &SignalFrame) -> MetricsRecord {
        MetricsRecord::Success(SuccessMetrics {
            version: config.version().to_string(),
            rows_processed: frame.len(),
            metric: METRIC_NAME.to_string(),
            value: round_to(frame.signal_rate(), VALUE_DECIMALS),
            latency_ms: self.latency_ms(),
            seed: config.seed(),
            status: RecordStatus::Success,
        })
    }

    pub fn error(&self, version: &str, message: impl fmt::Display) -> MetricsRecord {
        MetricsRecord::Error(ErrorMetrics {
            version: version.to_string(),
            status: RecordStatus::Error,
            error_message: message.to_string(),
        })
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

//! sigbatch runner: job orchestration, metrics record, persistence.
//!
//! This crate builds on `sigbatch-core` to provide:
//! - The job state machine with first-error short-circuiting
//! - The success/error metrics record and its reporter
//! - JSON record rendering and writing
//! - Optional CSV export of the augmented signal table

pub mod export;
pub mod job;
pub mod metrics;
pub mod report;

pub use export::{export_signals_csv, write_signals_csv};
pub use job::{run_job, JobArtifacts, JobError, JobInputs, JobOutcome, JobState};
pub use metrics::{
    round_to, ErrorMetrics, MetricsRecord, MetricsReporter, RecordStatus, SuccessMetrics,
    METRIC_NAME, UNKNOWN_VERSION,
};
pub use report::{render_record, write_record};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn metrics_record_is_send_sync() {
        assert_send::<MetricsRecord>();
        assert_sync::<MetricsRecord>();
    }

    #[test]
    fn job_outcome_is_send_sync() {
        assert_send::<JobOutcome>();
        assert_sync::<JobOutcome>();
    }

    #[test]
    fn job_error_is_send_sync() {
        assert_send::<JobError>();
        assert_sync::<JobError>();
    }
}

//! Job runner: config → dataset → signal → metrics, strictly in that order.
//!
//! States advance `Started → ConfigValidated → DatasetValidated → Computed →
//! Reported(Success)`. The first error from any stage ends the run in
//! `Reported(Error)`; nothing is retried and no partial metrics are produced.
//! `run_job` never fails: every error becomes the error record.

use std::path::PathBuf;
use std::time::Instant;

use sigbatch_core::{
    load_dataset, ConfigDraft, ConfigError, Dataset, LoadError, RngHierarchy, RunConfig,
    SignalEngine, SignalFrame,
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::metrics::{MetricsRecord, MetricsReporter, RecordStatus, UNKNOWN_VERSION};

/// Any failure that ends a run. Displays as the failing stage's message.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Started,
    ConfigValidated,
    DatasetValidated,
    Computed,
    Reported(RecordStatus),
}

/// Paths the job reads.
#[derive(Debug, Clone)]
pub struct JobInputs {
    pub config_path: PathBuf,
    pub input_path: PathBuf,
}

impl JobInputs {
    pub fn new(config_path: impl Into<PathBuf>, input_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            input_path: input_path.into(),
        }
    }
}

/// What a successful run leaves behind besides the record.
#[derive(Debug, Clone)]
pub struct JobArtifacts {
    pub config: RunConfig,
    pub dataset: Dataset,
    pub frame: SignalFrame,
    /// Generator seeded from the config, for any randomized consumer of the run.
    pub rng: RngHierarchy,
}

#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub record: MetricsRecord,
    /// Always `Reported(..)` once `run_job` returns.
    pub state: JobState,
    /// Last state reached before reporting.
    pub reached: JobState,
    /// `Some` only on success.
    pub artifacts: Option<JobArtifacts>,
}

/// Run the whole job. `started` is the instant latency is measured from.
pub fn run_job(inputs: &JobInputs, started: Instant) -> JobOutcome {
    info!("Job started");
    let reporter = MetricsReporter::new(started);
    let mut run = Run::default();

    match run.execute(inputs) {
        Ok(artifacts) => {
            let record = reporter.success(&artifacts.config, &artifacts.frame);
            info!("Metrics summary: {record}");
            info!("Job ended successfully");
            JobOutcome {
                record,
                state: JobState::Reported(RecordStatus::Success),
                reached: run.state,
                artifacts: Some(artifacts),
            }
        }
        Err(err) => {
            error!("Validation/Execution error: {err}");
            JobOutcome {
                record: reporter.error(&run.version, &err),
                state: JobState::Reported(RecordStatus::Error),
                reached: run.state,
                artifacts: None,
            }
        }
    }
}

/// Progress of one run: the current state and the best-known version.
#[derive(Debug)]
struct Run {
    state: JobState,
    version: String,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            state: JobState::Started,
            version: UNKNOWN_VERSION.to_string(),
        }
    }
}

impl Run {
    fn execute(&mut self, inputs: &JobInputs) -> Result<JobArtifacts, JobError> {
        // 1. Config
        let draft = ConfigDraft::from_file(&inputs.config_path)?;
        self.version = draft.version().to_string();
        let config = draft.validate()?;
        info!(
            "Config loaded and validated. version={}, seed={}, window={}",
            config.version(),
            config.seed(),
            config.window()
        );
        let rng = RngHierarchy::new(u64::from(config.seed()));
        self.state = JobState::ConfigValidated;

        // 2. Dataset
        let loaded = load_dataset(&inputs.input_path)?;
        info!("Rows loaded: {}", loaded.rows);
        debug!(fingerprint = %loaded.fingerprint, "dataset fingerprint");
        self.state = JobState::DatasetValidated;

        // 3. Rolling mean + signal
        let engine = SignalEngine::from_config(&config);
        let closes = loaded.dataset.closes();
        info!("Computing rolling mean...");
        let rolling_mean = engine.rolling_mean(&closes);
        info!("Generating signals...");
        let frame = SignalFrame::new(engine.window(), closes, rolling_mean);
        self.state = JobState::Computed;

        Ok(JobArtifacts {
            config,
            dataset: loaded.dataset,
            frame,
            rng,
        })
    }
}

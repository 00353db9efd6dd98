//! sigbatch core: config validation, dataset loading, rolling mean, signal engine.
//!
//! This crate holds every piece of the job that has semantics of its own:
//! - Run configuration parsing with a fixed key order for missing-key errors
//! - CSV dataset loading into a typed table with a required `close` column
//! - Trailing rolling mean over `close`
//! - Binary signal derivation with the warm-up-resolves-to-zero policy
//! - A seeded RNG hierarchy owned by the job instead of global state
//!
//! Orchestration, the metrics record and persistence live in `sigbatch-runner`.

pub mod config;
pub mod data;
pub mod indicators;
pub mod rng;
pub mod signal;

pub use config::{ConfigDraft, ConfigError, ConfigFormat, RunConfig, REQUIRED_KEYS};
pub use data::{load_dataset, read_dataset, Dataset, LoadError, LoadedDataset, Row, CLOSE_COLUMN};
pub use indicators::{Indicator, RollingMean};
pub use rng::RngHierarchy;
pub use signal::{derive_signals, SignalEngine, SignalFrame, SignalRow};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a job hands across stage boundaries is
    /// Send + Sync, so a caller can move a finished run to another thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<RunConfig>();
        require_sync::<RunConfig>();
        require_send::<ConfigDraft>();
        require_sync::<ConfigDraft>();
        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<SignalFrame>();
        require_sync::<SignalFrame>();
        require_send::<RngHierarchy>();
        require_sync::<RngHierarchy>();
        require_send::<ConfigError>();
        require_sync::<ConfigError>();
        require_send::<LoadError>();
        require_sync::<LoadError>();
    }

    /// The signal engine only sees closes: other columns change nothing and
    /// recomputing gives the same frame.
    #[test]
    fn signal_engine_depends_only_on_closes() {
        let loaded =
            read_dataset("date,close,volume\nd1,1.5,10\nd2,2.5,20\nd3,2.0,30\n".as_bytes())
                .unwrap();
        let bare = Dataset::from_closes(&[1.5, 2.5, 2.0]);
        let engine = SignalEngine::new(1);

        let frame = engine.compute(&bare);
        assert_eq!(engine.compute(&loaded.dataset), frame);
        assert_eq!(engine.compute(&bare), frame);
    }
}

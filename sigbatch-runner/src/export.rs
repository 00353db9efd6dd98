//! Signal table export (CSV).
//!
//! Columns: every input column in header order, then `rolling_mean` and
//! `signal`. An undefined rolling mean is written as an empty cell.

use std::path::Path;

use anyhow::{bail, Context, Result};
use sigbatch_core::{Dataset, SignalFrame};

/// Render the augmented table as CSV.
pub fn export_signals_csv(dataset: &Dataset, frame: &SignalFrame) -> Result<String> {
    if dataset.len() != frame.len() {
        bail!(
            "signal frame has {} rows but dataset has {}",
            frame.len(),
            dataset.len()
        );
    }

    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = dataset.columns().iter().map(String::as_str).collect();
    header.extend(["rolling_mean", "signal"]);
    wtr.write_record(&header)?;

    for (row, signal_row) in dataset.rows().iter().zip(frame.iter()) {
        let mut record: Vec<String> = row.values().to_vec();
        record.push(
            signal_row
                .rolling_mean
                .map(|m| m.to_string())
                .unwrap_or_default(),
        );
        record.push(signal_row.signal.to_string());
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write the augmented table to `path`.
pub fn write_signals_csv(path: &Path, dataset: &Dataset, frame: &SignalFrame) -> Result<()> {
    let csv = export_signals_csv(dataset, frame)?;
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write signals CSV {}", path.display()))?;
    Ok(())
}

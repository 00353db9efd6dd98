//! Metrics record persistence.
//!
//! The record is rendered as JSON with four-space indentation and written to
//! the output path with no trailing newline; the CLI echoes the same text.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::metrics::MetricsRecord;

/// Render a record as indented JSON.
pub fn render_record(record: &MetricsRecord) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut ser)
        .context("failed to serialize metrics record")?;
    String::from_utf8(buf).context("metrics JSON is not valid UTF-8")
}

/// Write the rendered record to `path`, creating parent directories.
pub fn write_record(path: &Path, record: &MetricsRecord) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    let text = render_record(record)?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write metrics {}", path.display()))?;
    Ok(())
}

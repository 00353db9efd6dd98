//! CSV loading and validation for the input dataset.
//!
//! Checks run in a fixed order so the first failure is predictable:
//! 1. Path exists, else `MissingFile`
//! 2. File reads and parses as CSV, else `Malformed`
//! 3. At least one data row, else `Empty`
//! 4. A `close` column exists, else `MissingColumn`
//!
//! Records shorter than the header are padded with blanks; longer ones are
//! malformed. Blank or NA-like closes load as NaN.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use thiserror::Error;

use super::schema::{Dataset, Row, CLOSE_COLUMN};

/// Cell values read as a missing close.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Errors from the dataset loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing input file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid CSV format: {0}")]
    Malformed(String),

    #[error("Empty file: dataset contains no rows")]
    Empty,

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// A validated dataset plus what the job logs about it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// Number of data rows (header excluded).
    pub rows: usize,
    /// BLAKE3 hex digest over the header and every record.
    pub fingerprint: String,
}

/// Load and validate the dataset at `path`.
pub fn load_dataset(path: &Path) -> Result<LoadedDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| LoadError::Malformed(e.to_string()))?;
    let loaded = read_dataset(file)?;
    tracing::debug!(
        path = %path.display(),
        rows = loaded.rows,
        fingerprint = %loaded.fingerprint,
        "dataset loaded"
    );
    Ok(loaded)
}

/// Parse and validate CSV from any reader.
pub fn read_dataset<R: Read>(source: R) -> Result<LoadedDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(source);

    let headers = reader.headers().map_err(malformed)?.clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    let mut hasher = blake3::Hasher::new();
    hash_record(&mut hasher, &headers);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        if record.len() > columns.len() {
            return Err(LoadError::Malformed(format!(
                "expected {} fields in line {}, saw {}",
                columns.len(),
                line_of(&record),
                record.len()
            )));
        }
        hash_record(&mut hasher, &record);
        records.push(record);
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let close_index = columns
        .iter()
        .position(|c| c == CLOSE_COLUMN)
        .ok_or(LoadError::MissingColumn(CLOSE_COLUMN))?;

    let rows = records
        .iter()
        .map(|record| -> Result<Row, LoadError> {
            let mut values: Vec<String> = record.iter().map(str::to_string).collect();
            values.resize(columns.len(), String::new());
            let close = parse_close(&values[close_index], line_of(record))?;
            Ok(Row::new(values, close))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = rows.len();
    Ok(LoadedDataset {
        dataset: Dataset::new(columns, close_index, rows),
        rows: count,
        fingerprint: hasher.finalize().to_hex().to_string(),
    })
}

fn malformed(err: csv::Error) -> LoadError {
    LoadError::Malformed(err.to_string())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn parse_close(raw: &str, line: u64) -> Result<f64, LoadError> {
    if NA_VALUES.contains(&raw) {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| {
        LoadError::Malformed(format!(
            "could not convert '{raw}' to float in column '{CLOSE_COLUMN}' at line {line}"
        ))
    })
}

fn hash_record(hasher: &mut blake3::Hasher, record: &StringRecord) {
    for field in record.iter() {
        hasher.update(field.as_bytes());
        hasher.update(&[0x1f]);
    }
    hasher.update(&[0x1e]);
}

//! Column-typed table for the input dataset.
//!
//! Every row has the same shape: one raw value per column, in header order.
//! The `close` column is additionally parsed to `f64`; a missing close is NaN.

/// The one column the job requires.
pub const CLOSE_COLUMN: &str = "close";

/// One input sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<String>,
    close: f64,
}

impl Row {
    pub(crate) fn new(values: Vec<String>, close: f64) -> Self {
        Self { values, close }
    }

    /// Raw field values, one per column.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Parsed close; NaN when the cell was blank or NA-like.
    pub fn close(&self) -> f64 {
        self.close
    }
}

/// Ordered, non-empty sequence of rows with a `close` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    close_index: usize,
    rows: Vec<Row>,
}

impl Dataset {
    pub(crate) fn new(columns: Vec<String>, close_index: usize, rows: Vec<Row>) -> Self {
        Self {
            columns,
            close_index,
            rows,
        }
    }

    /// Single-column dataset built from close prices.
    pub fn from_closes(closes: &[f64]) -> Self {
        let rows = closes
            .iter()
            .map(|&close| {
                let raw = if close.is_nan() {
                    String::new()
                } else {
                    close.to_string()
                };
                Row::new(vec![raw], close)
            })
            .collect();
        Self::new(vec![CLOSE_COLUMN.to_string()], 0, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn close_index(&self) -> usize {
        self.close_index
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `close` column in row order.
    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(Row::close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_closes_builds_single_column_table() {
        let ds = Dataset::from_closes(&[1.0, 2.5, f64::NAN]);
        assert_eq!(ds.columns(), ["close"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows()[1].values(), ["2.5"]);
        assert_eq!(ds.rows()[2].values(), [""]);
        assert!(ds.closes()[2].is_nan());
    }

    #[test]
    fn empty_from_closes() {
        let ds = Dataset::from_closes(&[]);
        assert!(ds.is_empty());
        assert!(ds.closes().is_empty());
    }
}

//! Columnar result table, derived throughput and grouped statistics.

use std::collections::BTreeMap;

use membench_core::stats::Summary;
use membench_core::units::throughput_gbps;
use thiserror::Error;

use crate::record::{Record, COLUMN_NAMES};

/// Name of the derived throughput column.
pub const THROUGHPUT_COLUMN: &str = "GB/s";

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("row {row} has {found} fields, expected 5")]
    ArityMismatch { row: usize, found: usize },
    #[error("row {row}: column `{column}` is not numeric: {value:?}")]
    NotNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Raw records as named columns plus the derived throughput.
///
/// The byte-count and duration columns are kept both as captured text (what
/// gets persisted) and as numbers (what throughput is computed from).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub method: Vec<String>,
    pub advise: Vec<String>,
    pub bytes_text: Vec<String>,
    pub duration_text: Vec<String>,
    pub unit: Vec<String>,
    pub bytes: Vec<f64>,
    pub duration: Vec<f64>,
    pub throughput: Vec<f64>,
}

impl ResultTable {
    /// Materialize records, coercing the numeric columns.
    ///
    /// Fails on the first row whose shape or numbers are wrong; no partial
    /// table is returned.
    pub fn from_records(records: &[Record]) -> Result<Self, AggregateError> {
        let mut table = ResultTable::with_capacity(records.len());

        for (row, record) in records.iter().enumerate() {
            let cells = record.to_cells();
            let [method, advise, bytes_text, duration_text, unit]: [String; 5] = cells
                .try_into()
                .map_err(|cells: Vec<String>| AggregateError::ArityMismatch {
                    row,
                    found: cells.len(),
                })?;

            let bytes = coerce(row, COLUMN_NAMES[2], &bytes_text)?;
            let duration = coerce(row, COLUMN_NAMES[3], &duration_text)?;

            table.method.push(method);
            table.advise.push(advise);
            table.bytes_text.push(bytes_text);
            table.duration_text.push(duration_text);
            table.unit.push(unit);
            table.bytes.push(bytes);
            table.duration.push(duration);
            table.throughput.push(throughput_gbps(bytes, duration));
        }

        Ok(table)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            method: Vec::with_capacity(capacity),
            advise: Vec::with_capacity(capacity),
            bytes_text: Vec::with_capacity(capacity),
            duration_text: Vec::with_capacity(capacity),
            unit: Vec::with_capacity(capacity),
            bytes: Vec::with_capacity(capacity),
            duration: Vec::with_capacity(capacity),
            throughput: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.method.len()
    }

    pub fn is_empty(&self) -> bool {
        self.method.is_empty()
    }

    /// Group throughput by (method, advise) and summarize each group.
    pub fn statistics(&self) -> StatisticsTable {
        let mut groups: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
        for row in 0..self.len() {
            groups
                .entry((self.method[row].as_str(), self.advise[row].as_str()))
                .or_default()
                .push(self.throughput[row]);
        }

        let rows = groups
            .into_iter()
            .map(|((method, advise), samples)| GroupStatistics {
                method: method.to_string(),
                advise: advise.to_string(),
                summary: Summary::from_samples(&samples),
            })
            .collect();

        StatisticsTable { rows }
    }
}

/// Parse a numeric cell the way a float column cast would: surrounding
/// whitespace is ignored, anything else non-numeric is an error.
fn coerce(row: usize, column: &'static str, value: &str) -> Result<f64, AggregateError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| AggregateError::NotNumeric {
            row,
            column,
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupStatistics {
    pub method: String,
    pub advise: String,
    pub summary: Summary,
}

/// One row per distinct (method, advise) pair, sorted by that key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsTable {
    pub rows: Vec<GroupStatistics>,
}

impl StatisticsTable {
    pub fn get(&self, method: &str, advise: &str) -> Option<&GroupStatistics> {
        self.rows
            .iter()
            .find(|g| g.method == method && g.advise == advise)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Materialize the records and compute grouped statistics in one go.
pub fn aggregate(records: &[Record]) -> Result<(ResultTable, StatisticsTable), AggregateError> {
    let table = ResultTable::from_records(records)?;
    let stats = table.statistics();
    Ok((table, stats))
}

//! Loading and aggregation of externally produced timing results.
//!
//! The results file is the harness's output, consumed but never produced
//! here. Columns are resolved by semantic role rather than literal header
//! spelling: the reference harness writes
//! `TreeType,DataType,Size,InsertTime(ns),SearchTime(ns),DeleteTime(ns)`,
//! and snake_case spellings resolve to the same roles.

use std::fmt;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{BenchError, Result};

/// One timed operation; also the unit the per-operation charts iterate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Key insertion.
    Insert,
    /// Key lookup.
    Search,
    /// Key removal.
    Delete,
}

impl Operation {
    /// All operations, in chart order.
    pub const ALL: [Operation; 3] = [Operation::Insert, Operation::Search, Operation::Delete];

    /// Human-readable label used in chart captions.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Insert => "Insert",
            Operation::Search => "Search",
            Operation::Delete => "Delete",
        }
    }

    /// Lower-cased token used in artifact file names.
    pub fn slug(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Search => "search",
            Operation::Delete => "delete",
        }
    }

    fn index(self) -> usize {
        match self {
            Operation::Insert => 0,
            Operation::Search => 1,
            Operation::Delete => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observation from the results file.
#[derive(Debug, Clone)]
pub struct ResultRow {
    /// Which benchmarked data structure produced the row.
    pub variant: String,
    /// Shape label of the input dataset (`random`, `sorted`, ...).
    pub shape: String,
    /// Dataset size the observation was taken at.
    pub size: u64,
    /// Timing values in nanoseconds, indexed by [`Operation`].
    pub times_ns: [f64; 3],
}

impl ResultRow {
    /// Timing value for one operation.
    pub fn time_ns(&self, operation: Operation) -> f64 {
        self.times_ns[operation.index()]
    }
}

/// Row-oriented results table.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    rows: Vec<ResultRow>,
}

impl ResultsTable {
    /// Builds a table directly from rows; used by tests and stub producers.
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// True when the table holds no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct shape labels, in first-seen order.
    pub fn shapes(&self) -> Vec<String> {
        let mut shapes: Vec<String> = Vec::new();
        for row in &self.rows {
            if !shapes.contains(&row.shape) {
                shapes.push(row.shape.clone());
            }
        }
        shapes
    }

    /// Distinct structure variants, in first-seen order. Drives hue order,
    /// so it must be stable across charts.
    pub fn variants(&self) -> Vec<String> {
        let mut variants: Vec<String> = Vec::new();
        for row in &self.rows {
            if !variants.contains(&row.variant) {
                variants.push(row.variant.clone());
            }
        }
        variants
    }

    /// Distinct sizes, ascending; the category axis of every chart.
    pub fn sizes(&self) -> Vec<u64> {
        let mut sizes: Vec<u64> = Vec::new();
        for row in &self.rows {
            if !sizes.contains(&row.size) {
                sizes.push(row.size);
            }
        }
        sizes.sort_unstable();
        sizes
    }

    /// Rows matching one shape label.
    pub fn filter_shape(&self, shape: &str) -> Vec<&ResultRow> {
        self.rows.iter().filter(|r| r.shape == shape).collect()
    }
}

/// Mean timing for one `(size, variant)` group within `rows`, or `None` when
/// no row matches. Multiple observations collapse to the arithmetic mean.
pub fn mean_time_ns(
    rows: &[&ResultRow],
    size: u64,
    variant: &str,
    operation: Operation,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in rows {
        if row.size == size && row.variant == variant {
            sum += row.time_ns(operation);
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

const VARIANT_ALIASES: &[&str] = &["treetype", "structurevariant", "structure", "variant"];
const SHAPE_ALIASES: &[&str] = &["datatype", "datashape", "shape"];
const SIZE_ALIASES: &[&str] = &["size", "datasize"];
const INSERT_ALIASES: &[&str] = &["inserttimens", "inserttime", "insert"];
const SEARCH_ALIASES: &[&str] = &["searchtimens", "searchtime", "search"];
const DELETE_ALIASES: &[&str] = &["deletetimens", "deletetime", "delete"];

fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn find_column(headers: &StringRecord, aliases: &[&str], role: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&normalize(h).as_str()))
        .ok_or_else(|| BenchError::Parse(format!("missing required column for {role}")))
}

fn numeric_cell(record: &StringRecord, idx: usize, role: &str, line: u64) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>()
        .map_err(|_| BenchError::Parse(format!("line {line}: non-numeric {role} value '{raw}'")))
}

/// Reads a results file into a [`ResultsTable`].
///
/// A missing file surfaces as [`BenchError::Io`]; a missing required column
/// or a non-numeric cell in a numeric column surfaces as
/// [`BenchError::Parse`]. A file with headers but no rows loads as an empty
/// table; emptiness only fails later, at render time.
pub fn load_results(path: &Path) -> Result<ResultsTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(map_open_error)?;
    let headers = reader.headers()?.clone();

    let variant_idx = find_column(&headers, VARIANT_ALIASES, "structure variant")?;
    let shape_idx = find_column(&headers, SHAPE_ALIASES, "data shape")?;
    let size_idx = find_column(&headers, SIZE_ALIASES, "size")?;
    let time_idx = [
        find_column(&headers, INSERT_ALIASES, "insert time")?,
        find_column(&headers, SEARCH_ALIASES, "search time")?,
        find_column(&headers, DELETE_ALIASES, "delete time")?,
    ];

    let mut rows = Vec::new();
    for (offset, result) in reader.records().enumerate() {
        let record = result?;
        let line = offset as u64 + 2;
        let variant = record
            .get(variant_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BenchError::Parse(format!("line {line}: empty structure variant")))?
            .to_string();
        let shape = record
            .get(shape_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BenchError::Parse(format!("line {line}: empty data shape")))?
            .to_string();
        let size = record
            .get(size_idx)
            .unwrap_or("")
            .trim()
            .parse::<u64>()
            .map_err(|_| BenchError::Parse(format!("line {line}: non-numeric size")))?;
        let times_ns = [
            numeric_cell(&record, time_idx[0], "insert time", line)?,
            numeric_cell(&record, time_idx[1], "search time", line)?,
            numeric_cell(&record, time_idx[2], "delete time", line)?,
        ];
        rows.push(ResultRow {
            variant,
            shape,
            size,
            times_ns,
        });
    }
    Ok(ResultsTable { rows })
}

fn map_open_error(err: csv::Error) -> BenchError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => BenchError::Io(io_err),
            _ => BenchError::Parse("unreadable results file".into()),
        }
    } else {
        BenchError::Csv(err)
    }
}

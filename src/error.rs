//! Error taxonomy shared across the generation and visualization pipelines.

use std::io;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors produced by dataset generation and results visualization.
#[derive(Debug, Error)]
pub enum BenchError {
    /// I/O failure opening or writing a dataset, results, or image file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// CSV-level read or write failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Caller violated a precondition (non-positive size, empty size list).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Results file is malformed: missing columns or non-numeric cells.
    #[error("parse error: {0}")]
    Parse(String),
    /// A chart's scope matched no rows.
    #[error("no data: {0}")]
    EmptyData(String),
    /// Chart backend failed to draw or flush an image.
    #[error("render error: {0}")]
    Render(String),
}

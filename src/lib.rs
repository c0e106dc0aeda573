//! Dataset generation and results visualization for tree benchmarks.
//!
//! Two independent one-shot pipelines: [`generator`] synthesizes integer
//! workloads and serializes them to CSV; [`results`] and [`charts`] load an
//! externally produced timing table and render comparative grouped bar
//! charts. The benchmarked structures and the timing harness itself live
//! elsewhere; the only contract with them is the two CSV formats.

pub mod charts;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod results;

pub use charts::{render_all, RenderSummary};
pub use config::{BenchConfig, ChartStyle};
pub use error::{BenchError, Result};
pub use generator::{build_dataset_catalog, serialize_catalog, DatasetRecord, Shape};
pub use results::{load_results, Operation, ResultRow, ResultsTable};

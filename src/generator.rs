//! Synthetic dataset generation and serialization.
//!
//! Produces the integer workloads the benchmark harness consumes: for every
//! requested size, one uniformly random sequence and its sorted counterpart,
//! written to a CSV file with the values space-joined into a single cell.
//!
//! The RNG is injected by the caller, so seeded runs (ChaCha8) and tests are
//! reproducible while unseeded runs stay independent between invocations.

use std::fmt;
use std::path::Path;

use csv::WriterBuilder;
use rand::Rng;
use tracing::info;

use crate::error::{BenchError, Result};

/// Qualitative category of a generated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Uniform random draws in `[0, 10 * size]`.
    Random,
    /// The same draws, sorted ascending.
    Sorted,
}

impl Shape {
    /// Stable label used in the serialized `data_type` column.
    pub fn label(self) -> &'static str {
        match self {
            Shape::Random => "random",
            Shape::Sorted => "sorted",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated dataset prior to serialization.
#[derive(Debug, Clone)]
pub struct DatasetRecord {
    /// Shape of the sequence.
    pub shape: Shape,
    /// Number of values; always equals `values.len()`.
    pub size: u64,
    /// The generated sequence.
    pub values: Vec<u64>,
}

/// Draws `size` values uniformly from `[0, 10 * size]` inclusive.
pub fn generate_random_sequence<R: Rng>(rng: &mut R, size: u64) -> Result<Vec<u64>> {
    if size == 0 {
        return Err(BenchError::InvalidArgument(
            "sequence size must be positive".into(),
        ));
    }
    let upper = size * 10;
    Ok((0..size).map(|_| rng.gen_range(0..=upper)).collect())
}

/// Draws a random sequence and sorts it ascending.
pub fn generate_sorted_sequence<R: Rng>(rng: &mut R, size: u64) -> Result<Vec<u64>> {
    let mut values = generate_random_sequence(rng, size)?;
    values.sort_unstable();
    Ok(values)
}

/// Builds the full catalog: for each size in input order, a `random` record
/// immediately followed by a `sorted` record. Output order drives row order
/// in the serialized file.
pub fn build_dataset_catalog<R: Rng>(rng: &mut R, sizes: &[u64]) -> Result<Vec<DatasetRecord>> {
    let mut catalog = Vec::with_capacity(sizes.len() * 2);
    for &size in sizes {
        catalog.push(DatasetRecord {
            shape: Shape::Random,
            size,
            values: generate_random_sequence(rng, size)?,
        });
        catalog.push(DatasetRecord {
            shape: Shape::Sorted,
            size,
            values: generate_sorted_sequence(rng, size)?,
        });
    }
    Ok(catalog)
}

/// Writes the catalog as CSV: header `data_type,size,data`, one row per
/// record with the values space-joined into the `data` cell. Overwrites any
/// existing file; a failure partway through leaves whatever was flushed.
pub fn serialize_catalog(catalog: &[DatasetRecord], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(["data_type", "size", "data"])?;
    for record in catalog {
        let size = record.size.to_string();
        let joined = record
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writer.write_record([record.shape.label(), size.as_str(), joined.as_str()])?;
    }
    writer.flush()?;
    info!(
        rows = catalog.len(),
        path = %path.display(),
        "dataset catalog written"
    );
    Ok(())
}

/// Parses a space-joined `data` cell back into values; inverse of
/// [`serialize_catalog`]'s cell encoding.
pub fn parse_values(cell: &str) -> Result<Vec<u64>> {
    cell.split_whitespace()
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|_| BenchError::Parse(format!("non-numeric value token '{token}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_sequence_respects_size_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let values = generate_random_sequence(&mut rng, 500).unwrap();
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|&v| v <= 5_000));
    }

    #[test]
    fn zero_size_fails_fast() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(matches!(
            generate_random_sequence(&mut rng, 0),
            Err(BenchError::InvalidArgument(_))
        ));
        assert!(matches!(
            generate_sorted_sequence(&mut rng, 0),
            Err(BenchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn sorted_sequence_is_the_random_draw_reordered() {
        let seed = 42;
        let mut random = generate_random_sequence(&mut ChaCha8Rng::seed_from_u64(seed), 200).unwrap();
        let sorted = generate_sorted_sequence(&mut ChaCha8Rng::seed_from_u64(seed), 200).unwrap();
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        random.sort_unstable();
        assert_eq!(random, sorted);
    }

    #[test]
    fn catalog_order_is_random_then_sorted_per_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let catalog = build_dataset_catalog(&mut rng, &[1_000, 10_000, 100_000]).unwrap();
        assert_eq!(catalog.len(), 6);
        let keys: Vec<(Shape, u64)> = catalog.iter().map(|r| (r.shape, r.size)).collect();
        assert_eq!(
            keys,
            vec![
                (Shape::Random, 1_000),
                (Shape::Sorted, 1_000),
                (Shape::Random, 10_000),
                (Shape::Sorted, 10_000),
                (Shape::Random, 100_000),
                (Shape::Sorted, 100_000),
            ]
        );
        for record in &catalog {
            assert_eq!(record.values.len() as u64, record.size);
        }
    }

    #[test]
    fn serialize_then_parse_recovers_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let catalog = build_dataset_catalog(&mut rng, &[50]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_data.csv");
        serialize_catalog(&catalog, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["data_type", "size", "data"])
        );
        for (record, row) in catalog.iter().zip(reader.records()) {
            let row = row.unwrap();
            assert_eq!(row.get(0).unwrap(), record.shape.label());
            assert_eq!(row.get(1).unwrap(), record.size.to_string());
            assert_eq!(parse_values(row.get(2).unwrap()).unwrap(), record.values);
        }
    }

    #[test]
    fn parse_values_rejects_garbage() {
        assert!(matches!(
            parse_values("1 2 three"),
            Err(BenchError::Parse(_))
        ));
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let catalog = vec![DatasetRecord {
            shape: Shape::Random,
            size: 1,
            values: vec![0],
        }];
        let err = serialize_catalog(&catalog, Path::new("/nonexistent/dir/out.csv")).unwrap_err();
        assert!(matches!(err, BenchError::Csv(_) | BenchError::Io(_)));
    }
}

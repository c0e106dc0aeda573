//! Dataset generation pipeline: synthesize the benchmark workloads and write
//! them to a CSV file the timing harness consumes.
#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use treebench::{
    build_dataset_catalog, generator::serialize_catalog, logging::init_logging, BenchConfig,
    Result,
};

#[derive(Parser, Debug)]
#[command(
    name = "datagen",
    version,
    about = "Generate random and sorted integer datasets for tree benchmarks"
)]
struct Args {
    /// Dataset sizes to generate, in emission order.
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u64>>,

    /// Destination CSV file.
    #[arg(long, default_value = "test_data.csv")]
    out: PathBuf,

    /// RNG seed for repeatable datasets; unseeded runs differ every time.
    #[arg(long)]
    seed: Option<u64>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive.
    #[arg(long, default_value = "info", env = "TREEBENCH_LOG")]
    log: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = try_main(args) {
        eprintln!("datagen failed: {err}");
        process::exit(1);
    }
}

fn try_main(args: Args) -> Result<()> {
    init_logging(&args.log)?;

    let mut config = match &args.config {
        Some(path) => BenchConfig::from_path(path)?,
        None => BenchConfig::default(),
    };
    if let Some(sizes) = args.sizes {
        config.sizes = sizes;
    }
    config.validate()?;

    let catalog = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded RNG");
            build_dataset_catalog(&mut ChaCha8Rng::seed_from_u64(seed), &config.sizes)?
        }
        None => build_dataset_catalog(&mut rand::thread_rng(), &config.sizes)?,
    };
    serialize_catalog(&catalog, &args.out)?;

    println!(
        "Generated {} datasets ({} sizes) into {}",
        catalog.len(),
        config.sizes.len(),
        args.out.display()
    );
    Ok(())
}

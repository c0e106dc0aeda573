//! Results visualization pipeline: load a timing results table and render the
//! full battery of comparison charts.
#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use treebench::{load_results, logging::init_logging, render_all, BenchConfig, ChartStyle, Result};

#[derive(Parser, Debug)]
#[command(
    name = "plot-results",
    version,
    about = "Render comparison charts from benchmark timing results"
)]
struct Args {
    /// Results CSV produced by the timing harness.
    #[arg(long, default_value = "performance_results.csv")]
    results: PathBuf,

    /// Directory chart images are written into.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Figure styling.
    #[arg(long, value_enum)]
    style: Option<ChartStyle>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive.
    #[arg(long, default_value = "info", env = "TREEBENCH_LOG")]
    log: String,
}

fn main() {
    let args = Args::parse();
    match try_main(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("plot-results failed: {err}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when every attempted chart failed.
fn try_main(args: Args) -> Result<bool> {
    init_logging(&args.log)?;

    let mut config = match &args.config {
        Some(path) => BenchConfig::from_path(path)?,
        None => BenchConfig::default(),
    };
    if let Some(out_dir) = args.out_dir {
        config.output_dir = out_dir;
    }
    if let Some(style) = args.style {
        config.chart_style = style;
    }

    let table = load_results(&args.results)?;
    let summary = render_all(&table, &config)?;

    for path in &summary.rendered {
        println!("wrote {}", path.display());
    }
    for (chart, err) in &summary.failed {
        eprintln!("skipped {chart}: {err}");
    }
    println!(
        "{} charts written, {} skipped",
        summary.rendered.len(),
        summary.failed.len()
    );
    Ok(!summary.all_failed())
}

//! Chart rendering and the render-all orchestration.
//!
//! Every chart is the same drawing: grouped bars with dataset size on the
//! category axis, structure variant as the hue dimension, and mean time in
//! nanoseconds on a logarithmic vertical axis. The three chart kinds differ
//! only in scope (one operation, one shape across all operations, or
//! everything) and panel layout, so a single panel routine serves them all
//! and the orchestration iterates a descriptor list.

use std::fs;
use std::path::PathBuf;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::config::{BenchConfig, ChartStyle};
use crate::error::{BenchError, Result};
use crate::results::{mean_time_ns, Operation, ResultRow, ResultsTable};

/// Log axis floor; timing means below this are clamped so the axis always
/// has a positive range.
const FLOOR_NS: f64 = 1.0;

/// Outcome of a [`render_all`] run: which artifacts were written and which
/// charts failed, in attempt order.
#[derive(Debug, Default)]
pub struct RenderSummary {
    /// Paths of successfully written artifacts.
    pub rendered: Vec<PathBuf>,
    /// Description and error for each chart that failed.
    pub failed: Vec<(String, BenchError)>,
}

impl RenderSummary {
    /// True when at least one chart was attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.rendered.is_empty() && !self.failed.is_empty()
    }
}

enum ChartSpec {
    PerOperation(Operation),
    ShapeComparison(String),
    Overview,
}

impl ChartSpec {
    fn describe(&self) -> String {
        match self {
            ChartSpec::PerOperation(op) => format!("{} time chart", op.label()),
            ChartSpec::ShapeComparison(shape) => format!("{shape} comparison chart"),
            ChartSpec::Overview => "combined overview chart".to_string(),
        }
    }

    fn render(&self, table: &ResultsTable, config: &BenchConfig) -> Result<PathBuf> {
        match self {
            ChartSpec::PerOperation(op) => render_operation_chart(table, *op, config),
            ChartSpec::ShapeComparison(shape) => {
                render_shape_comparison_chart(table, shape, config)
            }
            ChartSpec::Overview => render_combined_overview(table, config),
        }
    }
}

/// Renders the full battery: one chart per operation, one comparison per
/// distinct shape observed in the table, then the combined overview.
///
/// Per-chart failures are isolated: each is logged at `warn` and recorded in
/// the summary while the remaining charts still render. Only a failure to
/// create the output directory aborts the run.
pub fn render_all(table: &ResultsTable, config: &BenchConfig) -> Result<RenderSummary> {
    fs::create_dir_all(&config.output_dir)?;

    let mut specs: Vec<ChartSpec> = Operation::ALL
        .iter()
        .map(|op| ChartSpec::PerOperation(*op))
        .collect();
    specs.extend(table.shapes().into_iter().map(ChartSpec::ShapeComparison));
    specs.push(ChartSpec::Overview);

    let mut summary = RenderSummary::default();
    for spec in &specs {
        match spec.render(table, config) {
            Ok(path) => {
                info!(path = %path.display(), "chart written");
                summary.rendered.push(path);
            }
            Err(err) => {
                warn!(chart = %spec.describe(), error = %err, "chart skipped");
                summary.failed.push((spec.describe(), err));
            }
        }
    }
    Ok(summary)
}

/// One single-panel figure for one operation across all shapes and sizes;
/// written as `{operation}_time.svg`.
pub fn render_operation_chart(
    table: &ResultsTable,
    operation: Operation,
    config: &BenchConfig,
) -> Result<PathBuf> {
    let rows: Vec<&ResultRow> = table.rows().iter().collect();
    if rows.is_empty() {
        return Err(BenchError::EmptyData("results table has no rows".into()));
    }
    let variants = table.variants();
    let path = config
        .output_dir
        .join(format!("{}_time.svg", operation.slug()));

    {
        let root = SVGBackend::new(&path, (900, 540)).into_drawing_area();
        fill_background(&root, config.chart_style)?;
        draw_panel(
            &root,
            &rows,
            &variants,
            operation,
            &format!("{} Time by Data Size and Structure", operation.label()),
            config.chart_style,
        )?;
        root.present().map_err(render_err)?;
    }
    Ok(path)
}

/// One composite figure for one shape: three side-by-side panels, one per
/// operation, filtered to that shape's rows; written as
/// `{shape}_comparison.svg`.
pub fn render_shape_comparison_chart(
    table: &ResultsTable,
    shape: &str,
    config: &BenchConfig,
) -> Result<PathBuf> {
    let rows = table.filter_shape(shape);
    if rows.is_empty() {
        return Err(BenchError::EmptyData(format!("no rows for shape '{shape}'")));
    }
    let variants = table.variants();
    let path = config.output_dir.join(format!("{shape}_comparison.svg"));

    {
        let root = SVGBackend::new(&path, (1500, 500)).into_drawing_area();
        fill_background(&root, config.chart_style)?;
        let panels = root.split_evenly((1, 3));
        for (panel, operation) in panels.iter().zip(Operation::ALL) {
            draw_panel(
                panel,
                &rows,
                &variants,
                operation,
                &format!("{} - {shape}", operation.label()),
                config.chart_style,
            )?;
        }
        root.present().map_err(render_err)?;
    }
    Ok(path)
}

/// One 2x2 figure summarizing all operations across every shape and size;
/// the fourth panel stays blank. Written as `all_operations.svg`.
pub fn render_combined_overview(table: &ResultsTable, config: &BenchConfig) -> Result<PathBuf> {
    let rows: Vec<&ResultRow> = table.rows().iter().collect();
    if rows.is_empty() {
        return Err(BenchError::EmptyData("results table has no rows".into()));
    }
    let variants = table.variants();
    let path = config.output_dir.join("all_operations.svg");

    {
        let root = SVGBackend::new(&path, (1400, 1000)).into_drawing_area();
        fill_background(&root, config.chart_style)?;
        let panels = root.split_evenly((2, 2));
        for (panel, operation) in panels.iter().zip(Operation::ALL) {
            draw_panel(
                panel,
                &rows,
                &variants,
                operation,
                &format!("{} Time", operation.label()),
                config.chart_style,
            )?;
        }
        root.present().map_err(render_err)?;
    }
    Ok(path)
}

fn style_colors(style: ChartStyle) -> (RGBColor, RGBColor) {
    match style {
        ChartStyle::Light => (WHITE, BLACK),
        ChartStyle::Dark => (RGBColor(24, 26, 32), RGBColor(230, 230, 230)),
    }
}

fn variant_color(idx: usize) -> RGBAColor {
    Palette99::pick(idx).to_rgba()
}

fn render_err<E: std::error::Error>(err: E) -> BenchError {
    BenchError::Render(err.to_string())
}

fn fill_background(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    style: ChartStyle,
) -> Result<()> {
    let (bg, _) = style_colors(style);
    area.fill(&bg).map_err(render_err)
}

/// Draws one grouped-bar panel for `operation` over `rows`.
///
/// `variants` is the table-wide variant list so a variant keeps its color
/// across panels and charts; variants absent from `rows` get no bar slot.
fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    rows: &[&ResultRow],
    variants: &[String],
    operation: Operation,
    caption: &str,
    style: ChartStyle,
) -> Result<()> {
    let (bg, fg) = style_colors(style);

    let mut sizes: Vec<u64> = Vec::new();
    for row in rows {
        if !sizes.contains(&row.size) {
            sizes.push(row.size);
        }
    }
    sizes.sort_unstable();

    let present: Vec<(usize, &String)> = variants
        .iter()
        .enumerate()
        .filter(|(_, v)| rows.iter().any(|r| &r.variant == *v))
        .collect();
    if sizes.is_empty() || present.is_empty() {
        return Err(BenchError::EmptyData(format!(
            "nothing to plot for {}",
            operation.label()
        )));
    }

    // (group index, slot index, mean) triples, clamped to the log floor.
    let mut bars: Vec<(usize, usize, f64)> = Vec::new();
    let mut y_max = FLOOR_NS;
    for (gi, &size) in sizes.iter().enumerate() {
        for (slot, (_, variant)) in present.iter().enumerate() {
            if let Some(mean) = mean_time_ns(rows, size, variant, operation) {
                let value = mean.max(FLOOR_NS);
                y_max = y_max.max(value);
                bars.push((gi, slot, value));
            }
        }
    }
    let y_max = (y_max * 2.0).max(10.0);

    let groups = sizes.len();
    let size_labels: Vec<String> = sizes.iter().map(|s| s.to_string()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18).into_font().color(&fg))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(64)
        .build_cartesian_2d(-0.6f64..groups as f64 - 0.4, (FLOOR_NS..y_max).log_scale())
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&fg.mix(0.12))
        .axis_style(&fg)
        .x_labels(groups)
        .x_label_formatter(&|x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 0.25 && idx >= 0.0 && (idx as usize) < size_labels.len() {
                size_labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .x_desc("Data Size")
        .y_desc("Time (ns)")
        .label_style(("sans-serif", 13).into_font().color(&fg))
        .draw()
        .map_err(render_err)?;

    let slot_width = 0.8 / present.len() as f64;
    for (slot, (vi, variant)) in present.iter().enumerate() {
        let color = variant_color(*vi);
        let series = bars
            .iter()
            .filter(|(_, s, _)| *s == slot)
            .map(|(gi, _, value)| {
                let x0 = *gi as f64 - 0.4 + slot as f64 * slot_width;
                let x1 = x0 + slot_width * 0.92;
                Rectangle::new([(x0, FLOOR_NS), (x1, *value)], color.filled())
            })
            .collect::<Vec<_>>();
        chart
            .draw_series(series)
            .map_err(render_err)?
            .label(variant.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(&bg.mix(0.85))
        .border_style(&fg)
        .label_font(("sans-serif", 12).into_font().color(&fg))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultRow;

    fn sample_table() -> ResultsTable {
        let mut rows = Vec::new();
        for shape in ["random", "sorted"] {
            for size in [100u64, 1_000, 10_000] {
                for (i, variant) in ["AVL", "RedBlack"].iter().enumerate() {
                    rows.push(ResultRow {
                        variant: variant.to_string(),
                        shape: shape.to_string(),
                        size,
                        times_ns: [
                            (size * (i as u64 + 1)) as f64,
                            (size / 2 + 1) as f64,
                            (size * 3) as f64,
                        ],
                    });
                }
            }
        }
        ResultsTable::from_rows(rows)
    }

    fn config_in(dir: &std::path::Path) -> BenchConfig {
        BenchConfig {
            output_dir: dir.to_path_buf(),
            ..BenchConfig::default()
        }
    }

    fn assert_non_empty(path: &std::path::Path) {
        let meta = std::fs::metadata(path).unwrap();
        assert!(meta.len() > 0, "{} is empty", path.display());
    }

    #[test]
    fn operation_chart_is_written_and_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            render_operation_chart(&sample_table(), Operation::Insert, &config_in(dir.path()))
                .unwrap();
        assert_eq!(path.file_name().unwrap(), "insert_time.svg");
        assert_non_empty(&path);
    }

    #[test]
    fn shape_comparison_only_renders_observed_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let table = ResultsTable::from_rows(
            sample_table()
                .rows()
                .iter()
                .filter(|r| r.shape == "random")
                .cloned()
                .collect(),
        );
        let summary = render_all(&table, &config_in(dir.path())).unwrap();
        // 3 per-operation + 1 shape + 1 overview
        assert_eq!(summary.rendered.len(), 5);
        assert!(summary.failed.is_empty());
        let comparisons: Vec<_> = summary
            .rendered
            .iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with("_comparison.svg"))
            })
            .collect();
        assert_eq!(comparisons.len(), 1);
        assert_eq!(
            comparisons[0].file_name().unwrap(),
            "random_comparison.svg"
        );
    }

    #[test]
    fn full_battery_for_two_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let summary = render_all(&sample_table(), &config_in(dir.path())).unwrap();
        assert_eq!(summary.rendered.len(), 6);
        for path in &summary.rendered {
            assert_non_empty(path);
        }
        assert!(dir.path().join("all_operations.svg").exists());
        assert!(dir.path().join("sorted_comparison.svg").exists());
    }

    #[test]
    fn empty_table_fails_every_chart_but_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let summary = render_all(&ResultsTable::default(), &config_in(dir.path())).unwrap();
        assert!(summary.rendered.is_empty());
        // 3 per-operation + 0 shapes + 1 overview were attempted
        assert_eq!(summary.failed.len(), 4);
        assert!(summary.all_failed());
        assert!(summary
            .failed
            .iter()
            .all(|(_, err)| matches!(err, BenchError::EmptyData(_))));
    }

    #[test]
    fn missing_shape_is_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            render_shape_comparison_chart(&sample_table(), "spiral", &config_in(dir.path())),
            Err(BenchError::EmptyData(_))
        ));
    }

    #[test]
    fn dark_style_renders() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig {
            chart_style: ChartStyle::Dark,
            ..config_in(dir.path())
        };
        let path = render_combined_overview(&sample_table(), &config).unwrap();
        assert_non_empty(&path);
    }
}

//! Command-line front end
//!
//! The headline report always describes the whole program. A layer selection
//! scopes the CSV export, the colour scale and the axis series, the same way
//! a layer slider scopes the plots of an interactive viewer.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use gcodelens_core::{format_length_mm, format_volume_m3, Axis, ColorBy, SeriesMode};
use gcodelens_metrics::{
    write_csv_file, AnalysisReport, LayerFilter, SeriesRow, ToolpathMetrics,
};
use gcodelens_parser::ToolpathFileReader;
use gcodelens_settings::{AnalyzerConfig, ReportSettings};
use tracing::info;

/// Inclusive layer range written as `LOW..HIGH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSpan {
    pub low: u64,
    pub high: u64,
}

impl FromStr for LayerSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once("..")
            .ok_or_else(|| format!("Expected LOW..HIGH, got '{}'", s))?;
        let parse_bound = |bound: &str| {
            bound
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid layer '{}': {}", bound.trim(), e))
        };
        let span = Self {
            low: parse_bound(low)?,
            high: parse_bound(high)?,
        };
        if span.low > span.high {
            return Err(format!("Empty layer range {}..{}", span.low, span.high));
        }
        Ok(span)
    }
}

/// Analyze a G-code / MPF toolpath program
#[derive(Debug, Parser)]
#[command(name = "gcodelens", version, about)]
pub struct Cli {
    /// Toolpath program to analyze (.gcode, .mpf, .txt)
    pub file: PathBuf,

    /// Restrict the selection to layers LOW..HIGH (inclusive)
    #[arg(long, value_name = "LOW..HIGH", conflicts_with = "layer_set")]
    pub layers: Option<LayerSpan>,

    /// Restrict the selection to the listed layers
    #[arg(long, value_name = "N,N,...", value_delimiter = ',')]
    pub layer_set: Option<Vec<u64>>,

    /// Write the selected samples as CSV; defaults to the configured file name
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export_csv: Option<Option<PathBuf>>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Scalar for the toolpath colour scale (layer, time-step, avg-layer-speed, extrusion)
    #[arg(long, value_name = "MODE")]
    pub color_by: Option<ColorBy>,

    /// Print the primary and secondary axis series of the selection
    #[arg(long, conflicts_with = "json")]
    pub series: bool,

    /// Series layout (raw, layer-average); defaults to the configured mode
    #[arg(long, value_name = "MODE", requires = "series")]
    pub series_mode: Option<SeriesMode>,

    /// Configuration file (.json or .toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Layer filter described by `--layers` / `--layer-set`
    pub fn layer_filter(&self) -> LayerFilter {
        match (&self.layers, &self.layer_set) {
            (Some(span), _) => LayerFilter::range(span.low, span.high),
            (None, Some(layers)) => LayerFilter::set(layers.iter().copied()),
            (None, None) => LayerFilter::All,
        }
    }
}

/// Colour scale of the selected toolpath points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub mode: ColorBy,
    pub points: usize,
    /// `(min, max)` over the points with a defined value
    pub range: Option<(f64, f64)>,
}

impl ColorScale {
    pub fn from_metrics(metrics: &ToolpathMetrics<'_>, mode: ColorBy) -> Self {
        let points = metrics.color_series(mode);
        let range = points
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            });
        Self {
            mode,
            points: points.len(),
            range,
        }
    }
}

/// Write the text report
pub fn render_report(
    report: &AnalysisReport,
    settings: &ReportSettings,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "Total Time Steps: {}", report.summary.total_steps)?;
    writeln!(out, "Total Layers: {}", report.summary.total_layers)?;
    writeln!(
        out,
        "Layer Markers Found: {}",
        report.summary.layer_markers_found
    )?;

    match report.layer_range {
        Some((low, high)) => writeln!(out, "Layer Range: {} - {}", low, high)?,
        None => writeln!(out, "Layer Range: undefined")?,
    }

    writeln!(out, "Bounding Box:")?;
    for (axis, length) in Axis::LINEAR.iter().zip([
        report.lengths_mm.x,
        report.lengths_mm.y,
        report.lengths_mm.z,
    ]) {
        writeln!(
            out,
            "  {} length: {}",
            axis,
            format_length_mm(length, settings.length_precision)
        )?;
    }
    writeln!(
        out,
        "Volume: {}",
        format_volume_m3(report.volume_m3, settings.volume_precision)
    )?;

    writeln!(out, "Layer Height Anomalies: {}", report.anomaly_count)?;
    for height in report.anomalies() {
        writeln!(
            out,
            "  Layer {} -> {}: {:.3} mm",
            height.from_layer, height.to_layer, height.rounded_height
        )?;
    }
    Ok(())
}

fn render_selection(
    filter: &LayerFilter,
    metrics: &ToolpathMetrics<'_>,
    scale: &ColorScale,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if *filter != LayerFilter::All {
        writeln!(out, "Selected Time Steps: {}", metrics.samples().len())?;
    }
    match scale.range {
        Some((lo, hi)) => writeln!(
            out,
            "Color Scale ({}): {} to {} over {} points",
            scale.mode, lo, hi, scale.points
        ),
        None => writeln!(
            out,
            "Color Scale ({}): undefined over {} points",
            scale.mode, scale.points
        ),
    }
}

fn format_series_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// Write one axis series as a whitespace-separated table
pub fn render_series(
    axes: &[Axis],
    mode: SeriesMode,
    rows: &[SeriesRow],
    precision: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let letters: Vec<String> = axes.iter().map(|axis| axis.to_string()).collect();
    writeln!(out, "Series ({}): {}", mode, letters.join(" "))?;

    let key = match mode {
        SeriesMode::Raw => "Time Step",
        SeriesMode::LayerAverage => "Layer",
    };
    for row in rows {
        let values: Vec<String> = row
            .values
            .iter()
            .map(|&v| format_series_value(v, precision))
            .collect();
        writeln!(out, "  {} {}: {}", key, row.key, values.join(" "))?;
    }
    Ok(())
}

/// Parse the program, print the report, and run any requested export
pub fn run(cli: &Cli, config: &AnalyzerConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let reader = ToolpathFileReader::new(&cli.file)?;
    let (dataset, stats) = reader.parse()?;
    info!(
        "Parsed {} ({} lines, {} motion samples)",
        reader.path().display(),
        stats.lines_read,
        dataset.len()
    );

    let metrics = ToolpathMetrics::new(&dataset);
    let report = metrics.report();

    let filter = cli.layer_filter();
    let selected = metrics.filtered(&filter);
    let selection = ToolpathMetrics::from_samples(&selected, dataset.layer_markers_found());

    if let Some(target) = &cli.export_csv {
        let path = config.export.resolve(target.as_deref());
        write_csv_file(selection.samples(), &path)
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
        info!(
            "Exported {} samples to {}",
            selection.samples().len(),
            path.display()
        );
    }

    if cli.json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        render_report(&report, &config.report, out)?;
        let mode = cli.color_by.unwrap_or(config.visualization.color_by);
        let scale = ColorScale::from_metrics(&selection, mode);
        render_selection(&filter, &selection, &scale, out)?;

        if cli.series {
            let visualization = &config.visualization;
            let mode = cli.series_mode.unwrap_or(visualization.series_mode);
            for axes in [&visualization.primary_axes, &visualization.secondary_axes] {
                let rows = selection.axis_series(axes, mode);
                render_series(axes, mode, &rows, config.report.length_precision, out)?;
            }
        }
    }
    Ok(())
}

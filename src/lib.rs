//! # GCodeLens
//!
//! A toolpath analyzer for G-code and MPF programs:
//! - Layer-aware parsing of linear motion commands into a typed dataset
//! - Bounding box, enclosing volume, and per-move displacement
//! - Per-layer aggregates and layer-height anomaly detection
//! - Layer filters, plot-ready series, CSV and JSON export
//!
//! ## Architecture
//!
//! GCodeLens is organized as a workspace with multiple crates:
//!
//! 1. **gcodelens-core** - Shared types, error definitions, unit helpers
//! 2. **gcodelens-parser** - Line grammar, parse fold, file reader
//! 3. **gcodelens-metrics** - Derived metrics, filters, series, export
//! 4. **gcodelens-settings** - Configuration model and persistence
//! 5. **gcodelens** - Command-line front end that integrates all crates

pub mod cli;

pub use gcodelens_core::{
    format_length_mm, format_volume_m3, mm_to_m, Axis, AxisValues, ColorBy, ConfigError, Error,
    ExportError, InputError, Result, SeriesMode,
};

pub use gcodelens_parser::{
    parse, parse_str, FileReadStats, MotionSample, ParsedDataset, ToolpathFileReader,
    ToolpathParser,
};

pub use gcodelens_metrics::{
    write_csv, write_csv_file, AnalysisReport, BoundingBox, LayerFilter, LayerHeight, Summary,
    ToolpathMetrics,
};

pub use gcodelens_settings::AnalyzerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - RUST_LOG environment variable support, falling back to `level`
/// - Pretty formatting, or one JSON object per event when `json` is set
///
/// Stdout is left to the report itself.
pub fn init_logging(level: &str, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

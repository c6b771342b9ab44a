//! GCodeLens Settings Crate
//!
//! Handles analyzer configuration, validation, and JSON/TOML persistence.

pub mod config;

pub use config::{
    AnalyzerConfig, ExportSettings, LoggingSettings, ReportSettings, VisualizationSettings,
    LOG_LEVELS, MAX_PRECISION,
};

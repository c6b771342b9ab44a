//! Analyzer configuration
//!
//! Configuration is organized into logical sections:
//! - Report formatting (decimal places for lengths and volumes)
//! - Export defaults (output directory and CSV file name)
//! - Visualization defaults (colour mode, series mode, axis groups)
//! - Logging (level and output format)
//!
//! Files are JSON or TOML, chosen by extension. Missing sections and fields
//! fall back to their defaults.

use std::path::{Path, PathBuf};

use gcodelens_core::{Axis, ColorBy, ConfigError, ExportError, InputError, Result, SeriesMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest accepted number of decimal places in printed figures
pub const MAX_PRECISION: usize = 12;

/// Log levels accepted by [`LoggingSettings::level`]
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Report formatting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Decimal places for bounding-box lengths (mm)
    pub length_precision: usize,
    /// Decimal places for the enclosing volume (m³)
    pub volume_precision: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            length_precision: 2,
            volume_precision: 6,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory relative CSV paths are resolved against; current directory when unset
    pub output_directory: Option<PathBuf>,
    /// File name used when a CSV export is requested without a name
    pub csv_file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_directory: None,
            csv_file_name: "motion_data.csv".to_string(),
        }
    }
}

impl ExportSettings {
    /// Resolve an export path against the configured output directory
    pub fn resolve(&self, path: Option<&Path>) -> PathBuf {
        let path = path.unwrap_or_else(|| Path::new(&self.csv_file_name));
        match &self.output_directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Visualization defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationSettings {
    /// Scalar used to colour the 3D toolpath
    pub color_by: ColorBy,
    /// Per-sample or per-layer axis series
    pub series_mode: SeriesMode,
    /// Axes plotted in the primary chart
    pub primary_axes: Vec<Axis>,
    /// Axes plotted in the secondary chart
    pub secondary_axes: Vec<Axis>,
}

impl Default for VisualizationSettings {
    fn default() -> Self {
        Self {
            color_by: ColorBy::default(),
            series_mode: SeriesMode::default(),
            primary_axes: Axis::LINEAR.to_vec(),
            secondary_axes: Axis::ROTARY.to_vec(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter level when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete analyzer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub report: ReportSettings,
    pub export: ExportSettings,
    pub visualization: VisualizationSettings,
    pub logging: LoggingSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(Format::Json)
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(Format::Toml)
    } else {
        Err(ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        }
        .into())
    }
}

fn invalid(setting: &str, reason: impl Into<String>) -> gcodelens_core::Error {
    ConfigError::InvalidValue {
        setting: setting.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl AnalyzerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/gcodelens/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gcodelens").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| InputError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let parse_error = |reason: String| ConfigError::Parse {
            path: path.display().to_string(),
            reason,
        };
        let config: Self = match format {
            Format::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, else from [`Self::default_path`] when that
    /// file exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => Self::load_from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let serialize_error = |reason: String| ConfigError::Serialize { reason };
        let content = match format_of(path)? {
            Format::Json => {
                serde_json::to_string_pretty(self).map_err(|e| serialize_error(e.to_string()))?
            }
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| serialize_error(e.to_string()))?
            }
        };

        let write_error = |e: std::io::Error| ExportError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, content).map_err(write_error)?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.report.length_precision > MAX_PRECISION {
            return Err(invalid(
                "report.length_precision",
                format!("must be <= {}", MAX_PRECISION),
            ));
        }
        if self.report.volume_precision > MAX_PRECISION {
            return Err(invalid(
                "report.volume_precision",
                format!("must be <= {}", MAX_PRECISION),
            ));
        }

        if self.export.csv_file_name.trim().is_empty() {
            return Err(invalid("export.csv_file_name", "must not be empty"));
        }

        if self.visualization.primary_axes.is_empty() {
            return Err(invalid("visualization.primary_axes", "must name at least one axis"));
        }
        if self.visualization.secondary_axes.is_empty() {
            return Err(invalid(
                "visualization.secondary_axes",
                "must name at least one axis",
            ));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(invalid(
                "logging.level",
                format!("must be one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        Ok(())
    }
}

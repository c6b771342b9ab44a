//! Error handling for GCodeLens
//!
//! Parsing and metric computation never fail: malformed fields become unset
//! values and undefined aggregates are reported as `None`. The error types
//! here cover the boundary around that core:
//! - Input errors (locating and reading toolpath files)
//! - Export errors (CSV and JSON output)
//! - Configuration errors (loading, saving, validating settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Input error type
///
/// Represents failures to locate or read a toolpath program.
#[derive(Error, Debug, Clone)]
pub enum InputError {
    /// File does not exist
    #[error("File does not exist: {path}")]
    FileNotFound {
        /// The path that was requested.
        path: String,
    },

    /// Path exists but is not a regular file
    #[error("Path is not a file: {path}")]
    NotAFile {
        /// The path that was requested.
        path: String,
    },

    /// Reading the file failed part way through
    #[error("Failed to read {path}: {reason}")]
    ReadFailed {
        /// The path being read.
        path: String,
        /// The underlying failure.
        reason: String,
    },
}

/// Export error type
///
/// Represents failures while writing sample tables or reports.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    /// CSV writer failure
    #[error("CSV export failed: {reason}")]
    Csv {
        /// The reason the CSV write failed.
        reason: String,
    },

    /// Report serialization failure
    #[error("Report serialization failed: {reason}")]
    Serialization {
        /// The reason serialization failed.
        reason: String,
    },

    /// Destination could not be written
    #[error("Failed to write {path}: {reason}")]
    WriteFailed {
        /// The destination path.
        path: String,
        /// The underlying failure.
        reason: String,
    },
}

/// Configuration error type
///
/// Represents errors loading, saving, or validating settings.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// A setting holds a value outside its allowed range
    #[error("Invalid value for {setting}: {reason}")]
    InvalidValue {
        /// The offending setting.
        setting: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// File extension is neither `.json` nor `.toml`
    #[error("Config file must be .json or .toml: {path}")]
    UnsupportedFormat {
        /// The config path.
        path: String,
    },

    /// File content could not be parsed
    #[error("Invalid config in {path}: {reason}")]
    Parse {
        /// The config path.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {reason}")]
    Serialize {
        /// Serializer message.
        reason: String,
    },
}

/// Main error type for GCodeLens
///
/// A unified error type that can represent any boundary error.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is an input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

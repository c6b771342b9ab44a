//! # GCodeLens Core
//!
//! Core types, error definitions, and unit helpers shared by the GCodeLens
//! parser, metrics engine, settings, and command-line front end.

pub mod error;
pub mod types;
pub mod units;

pub use error::{ConfigError, Error, ExportError, InputError, Result};

pub use types::{Axis, AxisValues, ColorBy, SeriesMode};

pub use units::{format_length_mm, format_volume_m3, mm_to_m};

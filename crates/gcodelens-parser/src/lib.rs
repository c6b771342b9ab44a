//! # GCodeLens Parser
//!
//! Converts the lines of a G-code / MPF program into an ordered motion
//! dataset. Each `G1` line becomes one [`MotionSample`] tagged with the most
//! recent layer marker; everything else is skipped.
//!
//! Parsing is best-effort field extraction and never fails.

pub mod dataset;
pub mod file_io;
pub mod grammar;
pub mod parser;

pub use dataset::{MotionSample, ParsedDataset};
pub use file_io::{FileReadStats, ToolpathFileReader, SUPPORTED_EXTENSIONS};
pub use grammar::{LAYER_MARKER, MOTION_COMMAND};
pub use parser::{parse, parse_str, ToolpathParser};

//! Toolpath file reading
//!
//! Streams a program file line by line into a [`ToolpathParser`], so large
//! files never need to be held as a line vector.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gcodelens_core::{InputError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dataset::ParsedDataset;
use crate::parser::ToolpathParser;

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Byte order mark that some CAM exporters prepend
const UTF8_BOM: &str = "\u{feff}";

/// Extensions a toolpath program is expected to carry
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["gcode", "mpf", "txt"];

/// File read statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReadStats {
    /// Total bytes read
    pub bytes_read: u64,
    /// Total lines read
    pub lines_read: u64,
    /// Lines containing bytes that were not valid UTF-8
    pub lossy_lines: u64,
    /// File size in bytes
    pub file_size: u64,
    /// Time taken to read and parse (milliseconds)
    pub read_time_ms: u64,
}

impl FileReadStats {
    /// Get progress percentage
    pub fn progress_percent(&self) -> f64 {
        if self.file_size == 0 {
            0.0
        } else {
            (self.bytes_read as f64 / self.file_size as f64) * 100.0
        }
    }
}

/// Reader for G-code / MPF programs
pub struct ToolpathFileReader {
    path: PathBuf,
    file_size: u64,
}

impl ToolpathFileReader {
    /// Create a new reader
    ///
    /// # Errors
    /// Returns an input error if the path does not exist or is not a file
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        if !path.is_file() {
            return Err(InputError::NotAFile {
                path: path.display().to_string(),
            }
            .into());
        }

        if !Self::has_supported_extension(&path) {
            warn!(
                "{} does not have a .gcode/.mpf/.txt extension, reading anyway",
                path.display()
            );
        }

        let file_size = fs::metadata(&path)?.len();

        Ok(Self { path, file_size })
    }

    /// True when the extension is one of [`SUPPORTED_EXTENSIONS`] (case-insensitive)
    pub fn has_supported_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file
    ///
    /// # Errors
    /// Returns an input error if the file cannot be read
    pub fn parse(&self) -> Result<(ParsedDataset, FileReadStats)> {
        let start = Instant::now();
        let file = File::open(&self.path)?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let mut parser = ToolpathParser::new();
        let mut buf = Vec::new();
        let mut bytes_read = 0u64;
        let mut lines_read = 0u64;
        let mut lossy_lines = 0u64;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| InputError::ReadFailed {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })?;
            if n == 0 {
                break;
            }
            bytes_read += n as u64;

            let decoded = String::from_utf8_lossy(&buf);
            if matches!(decoded, Cow::Owned(_)) {
                lossy_lines += 1;
            }

            let mut line: &str = &decoded;
            if lines_read == 0 {
                line = line.strip_prefix(UTF8_BOM).unwrap_or(line);
            }

            // A lone '\r' also separates lines
            for part in line.split(['\n', '\r']) {
                parser.feed(part);
            }
            lines_read += 1;
        }

        if lossy_lines > 0 {
            warn!(
                "{} line(s) in {} were not valid UTF-8 and were decoded lossily",
                lossy_lines,
                self.path.display()
            );
        }

        let stats = FileReadStats {
            bytes_read,
            lines_read,
            lossy_lines,
            file_size: self.file_size,
            read_time_ms: start.elapsed().as_millis() as u64,
        };
        debug!(
            "Read {} lines ({} bytes) from {} in {}ms",
            stats.lines_read,
            stats.bytes_read,
            self.path.display(),
            stats.read_time_ms
        );

        Ok((parser.finish(), stats))
    }
}

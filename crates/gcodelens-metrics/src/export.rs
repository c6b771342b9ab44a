//! CSV export of sample sequences

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gcodelens_core::{Axis, ExportError, Result};
use gcodelens_parser::MotionSample;
use tracing::debug;

/// Column headers, one row per sample follows
pub const CSV_HEADER: [&str; 9] = ["Time Step", "X", "Y", "Z", "A", "B", "C", "E", "Layer"];

fn csv_error(e: csv::Error) -> gcodelens_core::Error {
    ExportError::Csv {
        reason: e.to_string(),
    }
    .into()
}

// Debug keeps the trailing ".0" on integral values, so 0 exports as "0.0"
fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:?}", v)).unwrap_or_default()
}

fn record(sample: &MotionSample) -> Vec<String> {
    let mut row = Vec::with_capacity(CSV_HEADER.len());
    row.push(sample.time_step.to_string());
    row.extend(Axis::ALL.iter().map(|&axis| format_value(sample.get(axis))));
    row.push(sample.layer.map(|l| l.to_string()).unwrap_or_default());
    row
}

/// Write samples as CSV; unset values become empty fields
pub fn write_csv<W: Write>(samples: &[MotionSample], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for sample in samples {
        csv_writer.write_record(record(sample)).map_err(csv_error)?;
    }
    csv_writer.flush()?;
    debug!("Exported {} samples as CSV", samples.len());
    Ok(())
}

/// Write samples as CSV to a file, replacing any existing content
pub fn write_csv_file(samples: &[MotionSample], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ExportError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    write_csv(samples, file)
}

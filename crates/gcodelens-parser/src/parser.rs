//! Single-pass toolpath parser
//!
//! The running state (next time step, current layer, marker count) lives in
//! [`ToolpathParser`], which is folded over the input lines. Each line's
//! interpretation depends on the markers before it, so parsing is strictly
//! sequential.

use gcodelens_core::{Axis, AxisValues};
use tracing::{debug, trace, warn};

use crate::dataset::{MotionSample, ParsedDataset};
use crate::grammar;

/// Accumulator for one parse pass
#[derive(Debug, Clone, Default)]
pub struct ToolpathParser {
    time_step: usize,
    current_layer: Option<u64>,
    layer_markers_found: usize,
    samples: Vec<MotionSample>,
}

impl ToolpathParser {
    /// Create a parser with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer that the next motion sample would be tagged with
    pub fn current_layer(&self) -> Option<u64> {
        self.current_layer
    }

    /// Number of samples produced so far
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Process one line
    ///
    /// A marker on the line is applied before a motion sample is built from
    /// the same line, so `;-----------------------LAYER 2 G1 X1` yields a
    /// sample on layer 2.
    pub fn feed(&mut self, line: &str) {
        if grammar::is_layer_marker(line) {
            self.layer_markers_found += 1;
            match grammar::layer_id_digits(line).map(|digits| (digits, digits.parse::<u64>())) {
                Some((_, Ok(layer))) => {
                    trace!("Layer marker {} -> layer {}", self.layer_markers_found, layer);
                    self.current_layer = Some(layer);
                }
                Some((digits, Err(_))) => {
                    warn!(
                        "Layer marker {} id {} is out of range, keeping layer {:?}",
                        self.layer_markers_found, digits, self.current_layer
                    );
                }
                None => {
                    trace!(
                        "Layer marker {} without numeric id, keeping layer {:?}",
                        self.layer_markers_found,
                        self.current_layer
                    );
                }
            }
        }

        if grammar::is_motion_command(line) {
            let mut axes = AxisValues::new();
            for axis in Axis::ALL {
                axes.set(axis, grammar::extract_axis(line, axis));
            }
            trace!("Step {}: {:?}", self.time_step, axes);
            self.samples
                .push(MotionSample::new(self.time_step, self.current_layer, axes));
            self.time_step += 1;
        }
    }

    /// Fold step used by [`parse`]
    pub fn step(mut self, line: &str) -> Self {
        self.feed(line);
        self
    }

    /// Finish the pass and hand over the dataset
    pub fn finish(self) -> ParsedDataset {
        debug!(
            "Parse complete: {} motion samples, {} layer markers",
            self.samples.len(),
            self.layer_markers_found
        );
        ParsedDataset::new(self.samples, self.layer_markers_found)
    }
}

/// Parse an ordered sequence of lines
pub fn parse<I, S>(lines: I) -> ParsedDataset
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .fold(ToolpathParser::new(), |parser, line| parser.step(line.as_ref()))
        .finish()
}

/// Parse a whole program held in memory
///
/// Splits on both `\n` and `\r`; the empty line left between a `\r\n` pair
/// has no effect on the result.
pub fn parse_str(text: &str) -> ParsedDataset {
    debug!("Starting toolpath parse, input size: {} bytes", text.len());
    parse(text.split(['\n', '\r']))
}

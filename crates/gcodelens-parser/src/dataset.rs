//! Parsed motion dataset

use gcodelens_core::{Axis, AxisValues};
use serde::{Deserialize, Serialize};

/// One parsed motion command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Dense zero-based index in encounter order
    pub time_step: usize,
    /// Most recent layer marker value, `None` before the first marker
    pub layer: Option<u64>,
    /// Axis values present on the line
    pub axes: AxisValues,
}

impl MotionSample {
    /// Create a new sample
    pub fn new(time_step: usize, layer: Option<u64>, axes: AxisValues) -> Self {
        Self {
            time_step,
            layer,
            axes,
        }
    }

    /// Value of one axis
    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.axes.get(axis)
    }

    /// XYZ position, only when all three linear axes are defined
    pub fn position(&self) -> Option<[f64; 3]> {
        self.axes.position()
    }
}

/// Ordered samples plus the number of layer markers encountered
///
/// Built once per input and never mutated afterwards; every derived view is
/// computed from it on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDataset {
    samples: Vec<MotionSample>,
    layer_markers_found: usize,
}

impl ParsedDataset {
    pub(crate) fn new(samples: Vec<MotionSample>, layer_markers_found: usize) -> Self {
        Self {
            samples,
            layer_markers_found,
        }
    }

    /// Samples in parse order
    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    /// Number of layer marker lines seen, whether or not an id was extracted
    pub fn layer_markers_found(&self) -> usize {
        self.layer_markers_found
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no motion line was recognised
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over samples in parse order
    pub fn iter(&self) -> std::slice::Iter<'_, MotionSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a ParsedDataset {
    type Item = &'a MotionSample;
    type IntoIter = std::slice::Iter<'a, MotionSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

//! Summary counts

use std::collections::BTreeSet;

use gcodelens_parser::MotionSample;
use serde::{Deserialize, Serialize};

/// Headline counts for a sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of samples
    pub total_steps: usize,
    /// Number of distinct defined layer ids
    pub total_layers: usize,
    /// Marker lines seen by the parser, passed through unchanged
    pub layer_markers_found: usize,
}

impl Summary {
    /// Summarize a sample sequence
    pub fn from_samples(samples: &[MotionSample], layer_markers_found: usize) -> Self {
        Self {
            total_steps: samples.len(),
            total_layers: distinct_layers(samples).len(),
            layer_markers_found,
        }
    }
}

/// Sorted distinct layer ids, unset layers excluded
pub fn distinct_layers(samples: &[MotionSample]) -> Vec<u64> {
    samples
        .iter()
        .filter_map(|s| s.layer)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lowest and highest defined layer, `None` when no sample has a layer
///
/// This is the default span offered for layer-range selection.
pub fn layer_range(samples: &[MotionSample]) -> Option<(u64, u64)> {
    let mut layers = samples.iter().filter_map(|s| s.layer);
    let first = layers.next()?;
    Some(layers.fold((first, first), |(lo, hi), l| (lo.min(l), hi.max(l))))
}

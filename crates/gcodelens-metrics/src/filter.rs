//! Layer-bounded sample selection
//!
//! Filters copy the matching samples into a new vector and leave the source
//! untouched. A sample with an unset layer never matches a layer bound or a
//! layer set.

use std::collections::BTreeSet;

use gcodelens_parser::MotionSample;
use serde::{Deserialize, Serialize};

/// Which layers to keep
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerFilter {
    /// Keep every sample, including those without a layer
    #[default]
    All,
    /// Keep layers in `low..=high`
    Range { low: u64, high: u64 },
    /// Keep layers listed in the set
    Set(BTreeSet<u64>),
}

impl LayerFilter {
    /// Inclusive layer range
    pub fn range(low: u64, high: u64) -> Self {
        Self::Range { low, high }
    }

    /// Explicit layer set
    pub fn set(layers: impl IntoIterator<Item = u64>) -> Self {
        Self::Set(layers.into_iter().collect())
    }

    /// True when a sample on `layer` passes the filter
    pub fn matches(&self, layer: Option<u64>) -> bool {
        match self {
            Self::All => true,
            Self::Range { low, high } => layer.is_some_and(|l| (*low..=*high).contains(&l)),
            Self::Set(layers) => layer.is_some_and(|l| layers.contains(&l)),
        }
    }

    /// Copy out the matching samples, preserving order
    pub fn apply(&self, samples: &[MotionSample]) -> Vec<MotionSample> {
        samples
            .iter()
            .filter(|s| self.matches(s.layer))
            .copied()
            .collect()
    }
}

/// Samples whose layer lies in `low..=high`
pub fn select_layer_range(samples: &[MotionSample], low: u64, high: u64) -> Vec<MotionSample> {
    LayerFilter::range(low, high).apply(samples)
}

/// Samples whose layer is one of `layers`
pub fn select_layers(samples: &[MotionSample], layers: &BTreeSet<u64>) -> Vec<MotionSample> {
    LayerFilter::Set(layers.clone()).apply(samples)
}

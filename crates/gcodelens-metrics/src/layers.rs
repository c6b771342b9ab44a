//! Per-layer aggregation and layer-height anomaly detection
//!
//! Samples with an unset layer never take part in per-layer results.

use std::collections::BTreeMap;

use gcodelens_core::Axis;
use gcodelens_parser::MotionSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::kinematics::in_time_order;

/// Number of nominal layer heights: 0.0 to 4.0 mm in 0.1 mm steps
pub const NOMINAL_STEP_COUNT: usize = 41;

/// Nominal heights expressed in thousandths of a millimeter
const NOMINAL_STEP_THOUSANDTHS: f64 = 100.0;
const NOMINAL_MAX_THOUSANDTHS: f64 = NOMINAL_STEP_THOUSANDTHS * (NOMINAL_STEP_COUNT - 1) as f64;

/// Mean of some quantity within one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerMean {
    pub layer: u64,
    /// `None` when the layer has no value for the quantity
    pub mean: Option<f64>,
}

/// Z step between two consecutive layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerHeight {
    pub from_layer: u64,
    pub to_layer: u64,
    /// `first_z(to_layer) - first_z(from_layer)`
    pub height: f64,
    /// Height rounded to 3 decimals, the value the anomaly test uses
    pub rounded_height: f64,
    pub anomalous: bool,
}

fn round_thousandths(value: f64) -> f64 {
    (value * 1000.0).round_ties_even()
}

/// True when `height`, rounded to 3 decimals, is one of 0.0, 0.1, ... 4.0
pub fn is_nominal_layer_height(height: f64) -> bool {
    let thousandths = round_thousandths(height);
    thousandths.is_finite()
        && (0.0..=NOMINAL_MAX_THOUSANDTHS).contains(&thousandths)
        && thousandths % NOMINAL_STEP_THOUSANDTHS == 0.0
}

fn layer_means<F>(samples: &[MotionSample], value: F) -> Vec<LayerMean>
where
    F: Fn(&MotionSample) -> Option<f64>,
{
    let mut groups: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for sample in samples {
        let Some(layer) = sample.layer else {
            continue;
        };
        let entry = groups.entry(layer).or_insert((0.0, 0));
        if let Some(v) = value(sample) {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(layer, (sum, count))| LayerMean {
            layer,
            mean: (count > 0).then(|| sum / count as f64),
        })
        .collect()
}

/// Per-layer mean of one axis, sorted by layer id
pub fn layer_axis_means(samples: &[MotionSample], axis: Axis) -> Vec<LayerMean> {
    layer_means(samples, |s| s.get(axis))
}

/// Per-layer mean time step, a proxy for when each layer was printed
pub fn layer_mean_time_steps(samples: &[MotionSample]) -> Vec<LayerMean> {
    layer_means(samples, |s| Some(s.time_step as f64))
}

/// First defined Z of each layer, sorted by layer id
///
/// Layers where no sample carries Z are left out.
pub fn first_z_per_layer(samples: &[MotionSample]) -> BTreeMap<u64, f64> {
    let mut first_z = BTreeMap::new();
    for sample in in_time_order(samples) {
        if let (Some(layer), Some(z)) = (sample.layer, sample.get(Axis::Z)) {
            first_z.entry(layer).or_insert(z);
        }
    }
    first_z
}

/// Z steps between consecutive layers, each flagged against the nominal set
pub fn layer_heights(samples: &[MotionSample]) -> Vec<LayerHeight> {
    let first_z: Vec<(u64, f64)> = first_z_per_layer(samples).into_iter().collect();

    let heights: Vec<LayerHeight> = first_z
        .windows(2)
        .map(|pair| {
            let (from_layer, from_z) = pair[0];
            let (to_layer, to_z) = pair[1];
            let height = to_z - from_z;
            LayerHeight {
                from_layer,
                to_layer,
                height,
                rounded_height: round_thousandths(height) / 1000.0,
                anomalous: !is_nominal_layer_height(height),
            }
        })
        .collect();

    debug!(
        "Layer heights: {} transitions, {} anomalous",
        heights.len(),
        heights.iter().filter(|h| h.anomalous).count()
    );
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcodelens_core::AxisValues;

    fn sample(step: usize, layer: Option<u64>, z: Option<f64>) -> MotionSample {
        let mut axes = AxisValues::new();
        axes.set(Axis::Z, z);
        MotionSample::new(step, layer, axes)
    }

    #[test]
    fn test_nominal_set() {
        for k in 0..NOMINAL_STEP_COUNT {
            assert!(is_nominal_layer_height(k as f64 * 0.1), "step {}", k);
        }
        assert!(is_nominal_layer_height(0.2000004));
        assert!(!is_nominal_layer_height(0.25));
        assert!(!is_nominal_layer_height(4.1));
        assert!(!is_nominal_layer_height(-0.2));
        assert!(!is_nominal_layer_height(f64::NAN));
        assert!(is_nominal_layer_height(-0.0001));
    }

    #[test]
    fn test_layer_height_anomaly() {
        let samples = vec![
            sample(0, Some(0), Some(0.0)),
            sample(1, Some(1), Some(0.2)),
            sample(2, Some(2), Some(0.2)),
            sample(3, Some(3), Some(5.0)),
        ];
        let heights = layer_heights(&samples);
        let rounded: Vec<f64> = heights.iter().map(|h| h.rounded_height).collect();
        assert_eq!(rounded, vec![0.2, 0.0, 4.8]);
        let flagged: Vec<bool> = heights.iter().map(|h| h.anomalous).collect();
        assert_eq!(flagged, vec![false, false, true]);
        assert_eq!((heights[2].from_layer, heights[2].to_layer), (2, 3));
    }

    #[test]
    fn test_single_layer_has_no_heights() {
        let samples = vec![sample(0, Some(7), Some(0.2)), sample(1, Some(7), Some(0.4))];
        assert!(layer_heights(&samples).is_empty());
        assert!(layer_heights(&[]).is_empty());
    }

    #[test]
    fn test_first_z_uses_first_defined_value_and_sorts_layers() {
        let samples = vec![
            sample(0, None, Some(9.0)),
            sample(1, Some(2), None),
            sample(2, Some(2), Some(0.6)),
            sample(3, Some(2), Some(0.8)),
            sample(4, Some(1), Some(0.4)),
            sample(5, Some(3), None),
        ];
        let first_z: Vec<(u64, f64)> = first_z_per_layer(&samples).into_iter().collect();
        assert_eq!(first_z, vec![(1, 0.4), (2, 0.6)]);
    }

    #[test]
    fn test_layer_axis_means() {
        let samples = vec![
            sample(0, None, Some(100.0)),
            sample(1, Some(0), Some(0.2)),
            sample(2, Some(0), Some(0.4)),
            sample(3, Some(1), None),
        ];
        let means = layer_axis_means(&samples, Axis::Z);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].layer, 0);
        assert!((means[0].mean.unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(means[1], LayerMean { layer: 1, mean: None });
    }

    #[test]
    fn test_layer_mean_time_steps() {
        let samples = vec![
            sample(0, Some(0), None),
            sample(1, Some(0), None),
            sample(2, Some(1), None),
        ];
        let means = layer_mean_time_steps(&samples);
        assert_eq!(
            means,
            vec![
                LayerMean { layer: 0, mean: Some(0.5) },
                LayerMean { layer: 1, mean: Some(2.0) },
            ]
        );
    }
}

//! Per-sample kinematic quantities

use gcodelens_core::Axis;
use gcodelens_parser::MotionSample;
use serde::{Deserialize, Serialize};

/// Distance travelled to reach a fully positioned sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    pub time_step: usize,
    pub layer: Option<u64>,
    pub position: [f64; 3],
    /// Euclidean distance from the previous fully positioned sample
    pub distance: f64,
}

/// First difference of the extrusion axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionDelta {
    pub time_step: usize,
    pub layer: Option<u64>,
    pub delta: f64,
}

pub(crate) fn in_time_order(samples: &[MotionSample]) -> Vec<&MotionSample> {
    let mut ordered: Vec<&MotionSample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.time_step);
    ordered
}

/// Displacement between consecutive fully positioned samples
///
/// Samples missing any of X, Y, Z are dropped before differencing, so the
/// result has one entry per positioned sample. The first entry is zero.
pub fn displacements(samples: &[MotionSample]) -> Vec<Displacement> {
    let mut previous: Option<[f64; 3]> = None;
    in_time_order(samples)
        .into_iter()
        .filter_map(|s| s.position().map(|p| (s, p)))
        .map(|(sample, position)| {
            let distance = previous.map_or(0.0, |prev| {
                let dx = position[0] - prev[0];
                let dy = position[1] - prev[1];
                let dz = position[2] - prev[2];
                (dx * dx + dy * dy + dz * dz).sqrt()
            });
            previous = Some(position);
            Displacement {
                time_step: sample.time_step,
                layer: sample.layer,
                position,
                distance,
            }
        })
        .collect()
}

/// Extrusion rate proxy: `E[i] - E[i-1]` in time-step order
///
/// Every sample gets an entry. The first is zero, and a step where either
/// the current or the previous sample lacks E contributes zero.
pub fn extrusion_rates(samples: &[MotionSample]) -> Vec<ExtrusionDelta> {
    let mut previous: Option<Option<f64>> = None;
    in_time_order(samples)
        .into_iter()
        .map(|sample| {
            let current = sample.get(Axis::E);
            let delta = match (previous, current) {
                (Some(Some(prev)), Some(cur)) => cur - prev,
                _ => 0.0,
            };
            previous = Some(current);
            ExtrusionDelta {
                time_step: sample.time_step,
                layer: sample.layer,
                delta,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcodelens_core::AxisValues;

    fn xyz(step: usize, x: f64, y: f64, z: f64) -> MotionSample {
        MotionSample::new(
            step,
            Some(0),
            AxisValues::new().with(Axis::X, x).with(Axis::Y, y).with(Axis::Z, z),
        )
    }

    fn e(step: usize, value: Option<f64>) -> MotionSample {
        let mut axes = AxisValues::new();
        axes.set(Axis::E, value);
        MotionSample::new(step, None, axes)
    }

    #[test]
    fn test_displacement_sequence() {
        let samples = vec![xyz(0, 0.0, 0.0, 0.0), xyz(1, 3.0, 4.0, 0.0), xyz(2, 3.0, 4.0, 0.0)];
        let distances: Vec<f64> = displacements(&samples).iter().map(|d| d.distance).collect();
        assert_eq!(distances, vec![0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_displacement_skips_partial_positions() {
        let mut partial = xyz(1, 100.0, 100.0, 100.0);
        partial.axes.set(Axis::Z, None);
        let samples = vec![xyz(0, 0.0, 0.0, 0.0), partial, xyz(2, 0.0, 0.0, 2.0)];
        let result = displacements(&samples);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].time_step, 2);
        assert_eq!(result[1].distance, 2.0);
    }

    #[test]
    fn test_displacement_orders_by_time_step() {
        let samples = vec![xyz(5, 3.0, 4.0, 0.0), xyz(1, 0.0, 0.0, 0.0)];
        let result = displacements(&samples);
        assert_eq!(result[0].time_step, 1);
        assert_eq!(result[1].distance, 5.0);
    }

    #[test]
    fn test_displacement_empty() {
        assert!(displacements(&[]).is_empty());
    }

    #[test]
    fn test_extrusion_rates_fill_unset_with_zero() {
        let samples = vec![
            e(0, Some(1.0)),
            e(1, Some(1.5)),
            e(2, None),
            e(3, Some(2.5)),
            e(4, Some(2.0)),
        ];
        let deltas: Vec<f64> = extrusion_rates(&samples).iter().map(|d| d.delta).collect();
        assert_eq!(deltas, vec![0.0, 0.5, 0.0, 0.0, -0.5]);
    }

    #[test]
    fn test_extrusion_rates_keep_every_sample() {
        let samples = vec![e(0, None), e(1, None)];
        assert_eq!(extrusion_rates(&samples).len(), 2);
    }
}

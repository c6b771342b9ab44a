//! Plot-ready series
//!
//! Plain tables for the axis-over-time and 3D toolpath views. Nothing here
//! knows about charts; consumers map the rows onto whatever they draw with.

use std::collections::BTreeMap;

use gcodelens_core::{Axis, ColorBy, SeriesMode};
use gcodelens_parser::MotionSample;
use serde::{Deserialize, Serialize};

use crate::kinematics::{displacements, extrusion_rates, in_time_order};
use crate::layers::layer_axis_means;

/// One row of an axis series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    /// Time step in [`SeriesMode::Raw`], layer id in [`SeriesMode::LayerAverage`]
    pub key: usize,
    /// One value per requested axis, in request order
    pub values: Vec<Option<f64>>,
}

/// A positioned toolpath point with its colour scalar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredPoint {
    pub time_step: usize,
    pub position: [f64; 3],
    /// `None` when the scalar is undefined for the point (e.g. no layer)
    pub value: Option<f64>,
}

/// Values of `axes` laid out per sample or per layer
pub fn axis_series(samples: &[MotionSample], axes: &[Axis], mode: SeriesMode) -> Vec<SeriesRow> {
    match mode {
        SeriesMode::Raw => in_time_order(samples)
            .into_iter()
            .map(|s| SeriesRow {
                key: s.time_step,
                values: axes.iter().map(|&axis| s.get(axis)).collect(),
            })
            .collect(),
        SeriesMode::LayerAverage => {
            let mut rows: BTreeMap<u64, Vec<Option<f64>>> = BTreeMap::new();
            for (column, &axis) in axes.iter().enumerate() {
                for mean in layer_axis_means(samples, axis) {
                    rows.entry(mean.layer).or_insert_with(|| vec![None; axes.len()])[column] =
                        mean.mean;
                }
            }
            rows.into_iter()
                .map(|(layer, values)| SeriesRow {
                    key: layer as usize,
                    values,
                })
                .collect()
        }
    }
}

/// Points of the toolpath with X, Y and Z defined, coloured by `mode`
pub fn color_series(samples: &[MotionSample], mode: ColorBy) -> Vec<ColoredPoint> {
    let moves = displacements(samples);

    let values: Vec<Option<f64>> = match mode {
        ColorBy::Layer => moves.iter().map(|m| m.layer.map(|l| l as f64)).collect(),
        ColorBy::TimeStep => moves.iter().map(|m| Some(m.time_step as f64)).collect(),
        ColorBy::AvgLayerSpeed => {
            let mut per_layer: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
            for m in &moves {
                if let Some(layer) = m.layer {
                    let entry = per_layer.entry(layer).or_insert((0.0, 0));
                    entry.0 += m.distance;
                    entry.1 += 1;
                }
            }
            moves
                .iter()
                .map(|m| {
                    m.layer
                        .and_then(|l| per_layer.get(&l))
                        .map(|&(sum, count)| sum / count as f64)
                })
                .collect()
        }
        ColorBy::Extrusion => {
            let positioned: Vec<MotionSample> = samples
                .iter()
                .filter(|s| s.position().is_some())
                .copied()
                .collect();
            extrusion_rates(&positioned)
                .into_iter()
                .map(|d| Some(d.delta))
                .collect()
        }
    };

    moves
        .iter()
        .zip(values)
        .map(|(m, value)| ColoredPoint {
            time_step: m.time_step,
            position: m.position,
            value,
        })
        .collect()
}

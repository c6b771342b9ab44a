//! Metrics facade over a sample sequence

use gcodelens_core::{Axis, ColorBy, SeriesMode};
use gcodelens_parser::{MotionSample, ParsedDataset};

use crate::bounds::{axis_extent, AxisExtent, BoundingBox};
use crate::filter::LayerFilter;
use crate::kinematics::{displacements, extrusion_rates, Displacement, ExtrusionDelta};
use crate::layers::{layer_axis_means, layer_heights, layer_mean_time_steps, LayerHeight, LayerMean};
use crate::report::AnalysisReport;
use crate::series::{axis_series, color_series, ColoredPoint, SeriesRow};
use crate::summary::{distinct_layers, layer_range, Summary};

/// Read-only metrics over a dataset or a filtered view of one
///
/// Holds a borrowed slice, so every call recomputes from the same
/// immutable samples and repeated calls give identical results.
#[derive(Debug, Clone, Copy)]
pub struct ToolpathMetrics<'a> {
    samples: &'a [MotionSample],
    layer_markers_found: usize,
}

impl<'a> ToolpathMetrics<'a> {
    /// Metrics over a whole dataset
    pub fn new(dataset: &'a ParsedDataset) -> Self {
        Self {
            samples: dataset.samples(),
            layer_markers_found: dataset.layer_markers_found(),
        }
    }

    /// Metrics over an arbitrary sample slice, e.g. the output of a [`LayerFilter`]
    pub fn from_samples(samples: &'a [MotionSample], layer_markers_found: usize) -> Self {
        Self {
            samples,
            layer_markers_found,
        }
    }

    /// The samples these metrics are computed from
    pub fn samples(&self) -> &'a [MotionSample] {
        self.samples
    }

    /// Marker count carried through from the parser
    pub fn layer_markers_found(&self) -> usize {
        self.layer_markers_found
    }

    pub fn summary(&self) -> Summary {
        Summary::from_samples(self.samples, self.layer_markers_found)
    }

    pub fn layers(&self) -> Vec<u64> {
        distinct_layers(self.samples)
    }

    pub fn layer_range(&self) -> Option<(u64, u64)> {
        layer_range(self.samples)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_samples(self.samples)
    }

    /// Extent of any axis, including rotary and extrusion axes
    pub fn extent(&self, axis: Axis) -> Option<AxisExtent> {
        axis_extent(self.samples, axis)
    }

    pub fn volume_m3(&self) -> Option<f64> {
        self.bounding_box().volume_m3()
    }

    pub fn displacements(&self) -> Vec<Displacement> {
        displacements(self.samples)
    }

    pub fn extrusion_rates(&self) -> Vec<ExtrusionDelta> {
        extrusion_rates(self.samples)
    }

    pub fn layer_axis_means(&self, axis: Axis) -> Vec<LayerMean> {
        layer_axis_means(self.samples, axis)
    }

    pub fn layer_mean_time_steps(&self) -> Vec<LayerMean> {
        layer_mean_time_steps(self.samples)
    }

    pub fn layer_heights(&self) -> Vec<LayerHeight> {
        layer_heights(self.samples)
    }

    /// Only the layer transitions flagged as anomalous
    pub fn layer_height_anomalies(&self) -> Vec<LayerHeight> {
        self.layer_heights()
            .into_iter()
            .filter(|h| h.anomalous)
            .collect()
    }

    pub fn axis_series(&self, axes: &[Axis], mode: SeriesMode) -> Vec<SeriesRow> {
        axis_series(self.samples, axes, mode)
    }

    pub fn color_series(&self, mode: ColorBy) -> Vec<ColoredPoint> {
        color_series(self.samples, mode)
    }

    /// Copy of the samples passing `filter`
    pub fn filtered(&self, filter: &LayerFilter) -> Vec<MotionSample> {
        filter.apply(self.samples)
    }

    /// Bundle the headline aggregates into one serialisable report
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::from_metrics(self)
    }
}

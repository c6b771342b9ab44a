//! Serialisable analysis report

use gcodelens_core::{Axis, ExportError, Result};
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::engine::ToolpathMetrics;
use crate::layers::LayerHeight;
use crate::summary::Summary;

/// Lengths of the bounding box edges in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxLengths {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// Headline aggregates for one dataset or view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub bounding_box: BoundingBox,
    pub lengths_mm: BoxLengths,
    pub volume_m3: Option<f64>,
    pub layer_range: Option<(u64, u64)>,
    pub layer_heights: Vec<LayerHeight>,
    pub anomaly_count: usize,
}

impl AnalysisReport {
    pub(crate) fn from_metrics(metrics: &ToolpathMetrics<'_>) -> Self {
        let bounding_box = metrics.bounding_box();
        let layer_heights = metrics.layer_heights();
        let anomaly_count = layer_heights.iter().filter(|h| h.anomalous).count();

        Self {
            summary: metrics.summary(),
            lengths_mm: BoxLengths {
                x: bounding_box.length(Axis::X),
                y: bounding_box.length(Axis::Y),
                z: bounding_box.length(Axis::Z),
            },
            volume_m3: bounding_box.volume_m3(),
            bounding_box,
            layer_range: metrics.layer_range(),
            layer_heights,
            anomaly_count,
        }
    }

    /// Anomalous layer transitions only
    pub fn anomalies(&self) -> impl Iterator<Item = &LayerHeight> {
        self.layer_heights.iter().filter(|h| h.anomalous)
    }

    /// Pretty-printed JSON
    ///
    /// Undefined aggregates serialise as `null`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ExportError::Serialization {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use gcodelens_parser::parse;

    use crate::engine::ToolpathMetrics;

    #[test]
    fn test_report_collects_anomalies() {
        let dataset = parse([
            ";-----------------------LAYER 0",
            "G1 X0 Y0 Z0.0",
            ";-----------------------LAYER 1",
            "G1 X10 Y0 Z0.2",
            ";-----------------------LAYER 2",
            "G1 X10 Y10 Z5.2",
        ]);
        let report = ToolpathMetrics::new(&dataset).report();
        assert_eq!(report.summary.total_layers, 3);
        assert_eq!(report.layer_range, Some((0, 2)));
        assert_eq!(report.anomaly_count, 1);
        assert_eq!(report.anomalies().next().map(|h| h.to_layer), Some(2));
        assert_eq!(report.lengths_mm.z, Some(5.2));
    }

    #[test]
    fn test_empty_report_serialises_nulls() {
        let dataset = parse(Vec::<&str>::new());
        let json = ToolpathMetrics::new(&dataset).report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["volume_m3"].is_null());
        assert!(value["bounding_box"]["x"].is_null());
        assert!(value["layer_range"].is_null());
        assert_eq!(value["summary"]["total_steps"], 0);
    }
}

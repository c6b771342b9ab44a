//! # GCodeLens Metrics
//!
//! Derived quantities computed from a parsed motion dataset: summary counts,
//! bounding geometry and enclosing volume, per-sample displacement and
//! extrusion deltas, per-layer aggregates, layer-height anomalies, layer
//! filters, plot series, and CSV/JSON export.
//!
//! Every function here is a pure view over a sample slice. Aggregates whose
//! inputs are missing come back as `None` rather than as a misleading zero.

pub mod bounds;
pub mod engine;
pub mod export;
pub mod filter;
pub mod kinematics;
pub mod layers;
pub mod report;
pub mod series;
pub mod summary;

pub use bounds::{axis_extent, AxisExtent, BoundingBox, BOX_EDGES};
pub use engine::ToolpathMetrics;
pub use export::{write_csv, write_csv_file, CSV_HEADER};
pub use filter::{select_layer_range, select_layers, LayerFilter};
pub use kinematics::{displacements, extrusion_rates, Displacement, ExtrusionDelta};
pub use layers::{
    is_nominal_layer_height, layer_axis_means, layer_heights, layer_mean_time_steps, LayerHeight,
    LayerMean, NOMINAL_STEP_COUNT,
};
pub use report::{AnalysisReport, BoxLengths};
pub use series::{axis_series, color_series, ColoredPoint, SeriesRow};
pub use summary::{distinct_layers, layer_range, Summary};

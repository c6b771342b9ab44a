use std::collections::BTreeSet;

use gcodelens_core::{Axis, AxisValues, ColorBy, SeriesMode};
use gcodelens_metrics::{
    select_layer_range, select_layers, write_csv, LayerFilter, ToolpathMetrics,
};
use gcodelens_parser::{parse_str, MotionSample};

const PROGRAM: &str = "\
G1 X0 Y0 Z0 E0
;-----------------------LAYER 0
G1 X0 Y0 Z0.0 E0.0
G1 X30 Y40 Z0.0 E1.0
;-----------------------LAYER 1
G1 X30 Y40 Z0.2 E1.0
G1 X0 Y40 Z0.2 E2.0
;-----------------------LAYER 2
G1 X0 Y40 Z0.4
G1 X0 Y0 Z0.4 E3.5
;-----------------------LAYER 3
G1 X0 Y0 Z5.4 E3.5
";

#[test]
fn test_full_pipeline_summary_and_bounds() {
    let dataset = parse_str(PROGRAM);
    let metrics = ToolpathMetrics::new(&dataset);

    let summary = metrics.summary();
    assert_eq!(summary.total_steps, 8);
    assert_eq!(summary.total_layers, 4);
    assert_eq!(summary.layer_markers_found, 4);

    let bbox = metrics.bounding_box();
    assert_eq!(bbox.length(Axis::X), Some(30.0));
    assert_eq!(bbox.length(Axis::Y), Some(40.0));
    assert_eq!(bbox.length(Axis::Z), Some(5.4));
    let volume = metrics.volume_m3().unwrap();
    assert!((volume - 0.03 * 0.04 * 0.0054).abs() < 1e-15);
}

#[test]
fn test_full_pipeline_layer_heights() {
    let dataset = parse_str(PROGRAM);
    let heights = ToolpathMetrics::new(&dataset).layer_heights();
    let rounded: Vec<f64> = heights.iter().map(|h| h.rounded_height).collect();
    assert_eq!(rounded, vec![0.2, 0.2, 5.0]);
    let anomalies: Vec<u64> = heights
        .iter()
        .filter(|h| h.anomalous)
        .map(|h| h.to_layer)
        .collect();
    assert_eq!(anomalies, vec![3]);
}

#[test]
fn test_full_pipeline_kinematics() {
    let dataset = parse_str(PROGRAM);
    let metrics = ToolpathMetrics::new(&dataset);

    let distances: Vec<f64> = metrics.displacements().iter().map(|d| d.distance).collect();
    assert_eq!(distances.len(), 8);
    assert_eq!(distances[0], 0.0);
    assert_eq!(distances[2], 50.0);

    let deltas: Vec<f64> = metrics.extrusion_rates().iter().map(|d| d.delta).collect();
    // Step 5 has no E, so both step 5 and step 6 contribute zero
    assert_eq!(deltas, vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_layer_slice_metrics() {
    let dataset = parse_str(PROGRAM);
    let view = select_layer_range(dataset.samples(), 1, 2);
    let sliced = ToolpathMetrics::from_samples(&view, dataset.layer_markers_found());

    assert_eq!(sliced.summary().total_steps, 4);
    assert_eq!(sliced.layer_range(), Some((1, 2)));
    assert_eq!(sliced.bounding_box().length(Axis::Z), Some(0.2));
    let means = sliced.layer_mean_time_steps();
    assert_eq!(means.len(), 2);
    assert_eq!(means[0].mean, Some(3.5));
    assert_eq!(means[1].mean, Some(5.5));
}

#[test]
fn test_range_filter_on_mixed_layers() {
    let samples: Vec<MotionSample> = [None, Some(0), Some(1), Some(1), Some(2), Some(3)]
        .into_iter()
        .enumerate()
        .map(|(step, layer)| MotionSample::new(step, layer, AxisValues::new()))
        .collect();

    let selected = select_layer_range(&samples, 1, 2);
    let layers: Vec<Option<u64>> = selected.iter().map(|s| s.layer).collect();
    assert_eq!(layers, vec![Some(1), Some(1), Some(2)]);

    let set: BTreeSet<u64> = [3].into_iter().collect();
    assert_eq!(select_layers(&samples, &set).len(), 1);
    assert_eq!(LayerFilter::range(0, 3).apply(&samples).len(), 5);
}

#[test]
fn test_series_views() {
    let dataset = parse_str(PROGRAM);
    let metrics = ToolpathMetrics::new(&dataset);

    let raw = metrics.axis_series(&Axis::LINEAR, SeriesMode::Raw);
    assert_eq!(raw.len(), 8);
    assert_eq!(raw[3].values, vec![Some(30.0), Some(40.0), Some(0.2)]);

    let averaged = metrics.axis_series(&Axis::ROTARY, SeriesMode::LayerAverage);
    assert_eq!(averaged.len(), 4);
    assert!(averaged.iter().all(|row| row.values.iter().all(Option::is_none)));

    let colored = metrics.color_series(ColorBy::Extrusion);
    assert_eq!(colored.len(), 8);
    assert_eq!(colored[2].value, Some(1.0));
}

#[test]
fn test_csv_export_of_slice() {
    let dataset = parse_str(PROGRAM);
    let view = LayerFilter::set([3]).apply(dataset.samples());
    let mut out = Vec::new();
    write_csv(&view, &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(
        csv,
        "Time Step,X,Y,Z,A,B,C,E,Layer\n7,0.0,0.0,5.4,,,,3.5,3\n"
    );
}

use std::io::Write;

use clap::Parser;
use gcodelens::cli::{run, Cli};
use gcodelens::AnalyzerConfig;
use tempfile::TempDir;

const PROGRAM: &str = "\
G90
G1 X0 Y0 Z0 E0
;-----------------------LAYER 0
G1 X0 Y0 Z0.0 E0.0
G1 X20 Y10 Z0.0 E1.0
;-----------------------LAYER 1
G1 X20 Y10 Z0.2 E1.5
;-----------------------LAYER 2
G1 X0 Y0 Z4.7 E2.0
";

fn write_program(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("part.gcode");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(PROGRAM.as_bytes()).unwrap();
    path
}

fn run_with(args: &[&str], config: &AnalyzerConfig) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args.iter().copied())?;
    let mut out = Vec::new();
    run(&cli, config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_text_report() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let text = run_with(
        &["gcodelens", path.to_str().unwrap()],
        &AnalyzerConfig::default(),
    )
    .unwrap();

    assert!(text.contains("Total Time Steps: 5"));
    assert!(text.contains("Total Layers: 3"));
    assert!(text.contains("Layer Markers Found: 3"));
    assert!(text.contains("Layer Range: 0 - 2"));
    assert!(text.contains("X length: 20.00 mm"));
    assert!(text.contains("Z length: 4.70 mm"));
    assert!(text.contains("Layer Height Anomalies: 1"));
    assert!(text.contains("Layer 1 -> 2: 4.500 mm"));
    assert!(text.contains("Color Scale (Layer): 0 to 2 over 5 points"));
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let json = run_with(
        &["gcodelens", path.to_str().unwrap(), "--json"],
        &AnalyzerConfig::default(),
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["total_steps"], 5);
    assert_eq!(value["anomaly_count"], 1);
}

#[test]
fn test_csv_export_of_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let csv_path = dir.path().join("slice.csv");
    run_with(
        &[
            "gcodelens",
            path.to_str().unwrap(),
            "--layers",
            "0..1",
            "--export-csv",
            csv_path.to_str().unwrap(),
        ],
        &AnalyzerConfig::default(),
    )
    .unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Time Step,X,Y,Z,A,B,C,E,Layer");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "3,20.0,10.0,0.2,,,,1.5,1");
}

#[test]
fn test_csv_export_uses_configured_directory() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let mut config = AnalyzerConfig::default();
    config.export.output_directory = Some(dir.path().join("out"));
    std::fs::create_dir(dir.path().join("out")).unwrap();

    run_with(
        &["gcodelens", path.to_str().unwrap(), "--export-csv"],
        &config,
    )
    .unwrap();
    assert!(dir.path().join("out").join("motion_data.csv").is_file());
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.gcode");
    let result = run_with(
        &["gcodelens", missing.to_str().unwrap()],
        &AnalyzerConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_series_uses_configured_axes_and_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let mut config = AnalyzerConfig::default();
    config.visualization.series_mode = gcodelens::SeriesMode::LayerAverage;
    config.visualization.primary_axes = vec![gcodelens::Axis::Z];
    config.visualization.secondary_axes = vec![gcodelens::Axis::E];

    let text = run_with(
        &["gcodelens", path.to_str().unwrap(), "--layers", "0..1", "--series"],
        &config,
    )
    .unwrap();

    assert!(text.contains("Series (Layer Average): Z\n  Layer 0: 0.00\n  Layer 1: 0.20\n"));
    assert!(text.contains("Series (Layer Average): E\n  Layer 0: 0.50\n  Layer 1: 1.50\n"));
}

#[test]
fn test_series_mode_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let mut config = AnalyzerConfig::default();
    config.visualization.series_mode = gcodelens::SeriesMode::LayerAverage;

    let text = run_with(
        &[
            "gcodelens",
            path.to_str().unwrap(),
            "--layer-set",
            "2",
            "--series",
            "--series-mode",
            "raw",
        ],
        &config,
    )
    .unwrap();

    assert!(text.contains("Series (Raw): X Y Z\n  Time Step 4: 0.00 0.00 4.70\n"));
    assert!(text.contains("Series (Raw): A B C\n  Time Step 4: - - -\n"));
}

#[test]
fn test_series_omitted_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir);
    let text = run_with(
        &["gcodelens", path.to_str().unwrap()],
        &AnalyzerConfig::default(),
    )
    .unwrap();
    assert!(!text.contains("Series ("));
}

//! Unit conversion utilities
//!
//! Positions in a toolpath program are millimeters. Volumes are reported in
//! cubic meters, so each extent is scaled by 1/1000 before multiplying.

/// Millimeters per meter
pub const MM_PER_M: f64 = 1000.0;

/// Convert a length in millimeters to meters
pub fn mm_to_m(value_mm: f64) -> f64 {
    value_mm / MM_PER_M
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters, `None` when undefined
/// * `precision` - Number of decimal places
pub fn format_length_mm(value_mm: Option<f64>, precision: usize) -> String {
    match value_mm {
        Some(v) => format!("{:.*} mm", precision, v),
        None => "undefined".to_string(),
    }
}

/// Format volume value for display
///
/// * `value_m3` - Value in cubic meters, `None` when undefined
/// * `precision` - Number of decimal places
pub fn format_volume_m3(value_m3: Option<f64>, precision: usize) -> String {
    match value_m3 {
        Some(v) => format!("{:.*} m³", precision, v),
        None => "undefined".to_string(),
    }
}

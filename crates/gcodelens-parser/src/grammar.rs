//! Line grammar recognised by the parser
//!
//! Matching is substring based, so a marker or motion token may appear
//! anywhere on a line. Axis words are anchored to "letter immediately followed
//! by a signed decimal number", which keeps words such as `EXTRUDE` from
//! satisfying the `E` axis.

use std::sync::OnceLock;

use gcodelens_core::Axis;
use regex::Regex;

/// Substring identifying a layer boundary comment
pub const LAYER_MARKER: &str = ";-----------------------LAYER";

/// Substring identifying a linear move
pub const MOTION_COMMAND: &str = "G1";

/// True when the line carries a layer marker
pub fn is_layer_marker(line: &str) -> bool {
    line.contains(LAYER_MARKER)
}

/// True when the line carries a linear move
pub fn is_motion_command(line: &str) -> bool {
    line.contains(MOTION_COMMAND)
}

/// Digit run following `LAYER` and whitespace, if any
pub fn layer_id_digits(line: &str) -> Option<&str> {
    static LAYER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        LAYER_REGEX.get_or_init(|| Regex::new(r"LAYER\s+(\d+)").expect("invalid regex pattern"));

    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the layer id following `LAYER` and whitespace
///
/// Returns `None` when no digits follow or the id does not fit in a `u64`.
pub fn extract_layer_id(line: &str) -> Option<u64> {
    layer_id_digits(line).and_then(|digits| digits.parse::<u64>().ok())
}

fn axis_regexes() -> &'static [Regex; 7] {
    static AXIS_REGEXES: OnceLock<[Regex; 7]> = OnceLock::new();
    AXIS_REGEXES.get_or_init(|| {
        Axis::ALL.map(|axis| {
            Regex::new(&format!(r"{}([-+]?[0-9]*\.?[0-9]+)", axis.letter()))
                .expect("invalid regex pattern")
        })
    })
}

/// Extract the leftmost value for `axis` on the line
///
/// An absent word and an unparsable number both yield `None`.
pub fn extract_axis(line: &str, axis: Axis) -> Option<f64> {
    axis_regexes()[axis.index()]
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

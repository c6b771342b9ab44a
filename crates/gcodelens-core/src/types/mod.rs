//! Shared value types
//!
//! Axis identifiers, per-sample axis values, and the series selectors used by
//! presentation consumers.

pub mod axis;
pub mod series;

pub use axis::{Axis, AxisValues};
pub use series::{ColorBy, SeriesMode};

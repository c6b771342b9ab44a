//! Series selectors for presentation consumers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How axis values are laid out over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    /// One row per sample, keyed by time step
    #[default]
    Raw,
    /// One row per layer, holding per-layer means
    LayerAverage,
}

impl fmt::Display for SeriesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "Raw"),
            Self::LayerAverage => write!(f, "Layer Average"),
        }
    }
}

impl FromStr for SeriesMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "raw" => Ok(Self::Raw),
            "layer_average" | "layer_avg" => Ok(Self::LayerAverage),
            _ => Err(format!("Unknown series mode: {}", s)),
        }
    }
}

/// Scalar attached to each point of the 3D toolpath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBy {
    /// Layer id of the point
    #[default]
    Layer,
    /// Time step of the point
    TimeStep,
    /// Mean displacement of the point's layer
    AvgLayerSpeed,
    /// Extrusion delta at the point
    Extrusion,
}

impl fmt::Display for ColorBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer => write!(f, "Layer"),
            Self::TimeStep => write!(f, "Time Step"),
            Self::AvgLayerSpeed => write!(f, "Avg Layer Speed"),
            Self::Extrusion => write!(f, "Extrusion"),
        }
    }
}

impl FromStr for ColorBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "layer" => Ok(Self::Layer),
            "time_step" | "timestep" => Ok(Self::TimeStep),
            "avg_layer_speed" | "speed" => Ok(Self::AvgLayerSpeed),
            "extrusion" => Ok(Self::Extrusion),
            _ => Err(format!("Unknown color mode: {}", s)),
        }
    }
}

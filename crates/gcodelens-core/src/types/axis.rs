//! Axis identifiers and per-sample axis values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven tracked motion channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Axis {
    /// Linear X
    X,
    /// Linear Y
    Y,
    /// Linear Z
    Z,
    /// Rotary about X
    A,
    /// Rotary about Y
    B,
    /// Rotary about Z
    C,
    /// Extrusion / material feed
    E,
}

impl Axis {
    /// All axes in column order
    pub const ALL: [Axis; 7] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::A,
        Axis::B,
        Axis::C,
        Axis::E,
    ];

    /// Linear axes
    pub const LINEAR: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Rotary axes
    pub const ROTARY: [Axis; 3] = [Axis::A, Axis::B, Axis::C];

    /// Word letter used for this axis in a program line
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::A => 'A',
            Axis::B => 'B',
            Axis::C => 'C',
            Axis::E => 'E',
        }
    }

    /// Position of this axis within [`Axis::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up an axis from its word letter (case-insensitive)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            'A' => Some(Axis::A),
            'B' => Some(Axis::B),
            'C' => Some(Axis::C),
            'E' => Some(Axis::E),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Axis::from_letter(c).ok_or_else(|| format!("Unknown axis: {}", s)),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

/// Axis values carried by one motion line
///
/// `None` means the line did not specify the axis, which is distinct from an
/// explicit zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct AxisValues {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub e: Option<f64>,
}

impl AxisValues {
    /// Create an empty set of values (every axis unset)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for an axis
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::A => self.a,
            Axis::B => self.b,
            Axis::C => self.c,
            Axis::E => self.e,
        }
    }

    /// Set or clear the value for an axis
    pub fn set(&mut self, axis: Axis, value: Option<f64>) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::A => &mut self.a,
            Axis::B => &mut self.b,
            Axis::C => &mut self.c,
            Axis::E => &mut self.e,
        };
        *slot = value;
    }

    /// Builder-style setter
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.set(axis, Some(value));
        self
    }

    /// XYZ position, only when all three linear axes are defined
    pub fn position(&self) -> Option<[f64; 3]> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), Some(z)) => Some([x, y, z]),
            _ => None,
        }
    }

    /// Iterate over every axis with its value, in column order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, Option<f64>)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    /// True when no axis is defined
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, v)| v.is_none())
    }
}

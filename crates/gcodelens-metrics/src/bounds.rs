//! Bounding geometry
//!
//! Extents are accumulated per axis over defined values only. An axis that no
//! sample specifies has no extent, and anything derived from it (length,
//! volume, corners) is undefined as well.

use gcodelens_core::{mm_to_m, Axis};
use gcodelens_parser::MotionSample;
use serde::{Deserialize, Serialize};

/// Corner index pairs forming the 12 edges of a box
///
/// Corners are numbered `i*4 + j*2 + k` with `i`, `j`, `k` selecting the
/// min (0) or max (1) of X, Y and Z respectively.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (5, 7),
    (6, 7),
];

/// Range of values observed on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub min: f64,
    pub max: f64,
}

impl AxisExtent {
    fn from_value(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// `max - min`
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn bound(&self, upper: bool) -> f64 {
        if upper {
            self.max
        } else {
            self.min
        }
    }
}

/// Extent of one axis over the defined values, `None` when there are none
pub fn axis_extent(samples: &[MotionSample], axis: Axis) -> Option<AxisExtent> {
    samples
        .iter()
        .filter_map(|s| s.get(axis))
        .fold(None, |extent: Option<AxisExtent>, value| match extent {
            Some(mut e) => {
                e.update(value);
                Some(e)
            }
            None => Some(AxisExtent::from_value(value)),
        })
}

/// Axis-aligned box over the linear axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: Option<AxisExtent>,
    pub y: Option<AxisExtent>,
    pub z: Option<AxisExtent>,
}

impl BoundingBox {
    /// Compute the box of a sample sequence
    pub fn from_samples(samples: &[MotionSample]) -> Self {
        Self {
            x: axis_extent(samples, Axis::X),
            y: axis_extent(samples, Axis::Y),
            z: axis_extent(samples, Axis::Z),
        }
    }

    /// Extent of a linear axis; rotary and extrusion axes are not part of the box
    pub fn extent(&self, axis: Axis) -> Option<AxisExtent> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            _ => None,
        }
    }

    /// Length of a linear axis in millimeters
    pub fn length(&self, axis: Axis) -> Option<f64> {
        self.extent(axis).map(|e| e.length())
    }

    /// True when all three axes have an extent
    pub fn is_defined(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }

    /// Enclosing volume in cubic meters
    ///
    /// Each millimeter length is scaled to meters before multiplying.
    pub fn volume_m3(&self) -> Option<f64> {
        Axis::LINEAR
            .iter()
            .map(|&axis| self.length(axis).map(mm_to_m))
            .product()
    }

    /// The 8 corners, indexed as described on [`BOX_EDGES`]
    pub fn corners(&self) -> Option<[[f64; 3]; 8]> {
        let (x, y, z) = (self.x?, self.y?, self.z?);
        let mut corners = [[0.0; 3]; 8];
        for (index, corner) in corners.iter_mut().enumerate() {
            *corner = [
                x.bound(index & 4 != 0),
                y.bound(index & 2 != 0),
                z.bound(index & 1 != 0),
            ];
        }
        Some(corners)
    }

    /// Wireframe segments as corner coordinate pairs
    pub fn edges(&self) -> Option<Vec<([f64; 3], [f64; 3])>> {
        let corners = self.corners()?;
        Some(BOX_EDGES.iter().map(|&(a, b)| (corners[a], corners[b])).collect())
    }
}

//! Axis-aligned bounding boxes in raster pixel space.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
///
/// In pixel space the origin is the top-left corner of the rendered page
/// image, so `y0` is the top edge and `y1` the bottom edge. Boxes serialize
/// as a flat four-element array, which is the shape downstream dataset
/// converters expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new box. Coordinates are normalized so that `x0 <= x1`
    /// and `y0 <= y1` regardless of the order they were given in.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Whether the box has positive area.
    pub fn is_valid(&self) -> bool {
        self.x0 < self.x1 && self.y0 < self.y1
    }

    /// Grow this box to the running min/max union with `other`.
    pub fn expand(&mut self, other: &BBox) {
        self.x0 = self.x0.min(other.x0);
        self.y0 = self.y0.min(other.y0);
        self.x1 = self.x1.max(other.x1);
        self.y1 = self.y1.max(other.y1);
    }

    /// Union of two boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        let mut merged = *self;
        merged.expand(other);
        merged
    }

    /// Non-zero-area intersection test.
    ///
    /// Boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &BBox) -> bool {
        if self.x1 <= other.x0 || self.x0 >= other.x1 {
            return false;
        }
        if self.y1 <= other.y0 || self.y0 >= other.y1 {
            return false;
        }
        true
    }

    /// Clamp all coordinates into `[0, width] x [0, height]`.
    pub fn clamp(&self, width: f32, height: f32) -> BBox {
        BBox {
            x0: self.x0.clamp(0.0, width),
            y0: self.y0.clamp(0.0, height),
            x1: self.x1.clamp(0.0, width),
            y1: self.y1.clamp(0.0, height),
        }
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        BBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

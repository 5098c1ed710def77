//! Axis-aligned bounding boxes in a Y-up document space.
//!
//! `top` is numerically larger than `bottom`. All measurements clamp at zero,
//! so inverted or degenerate boxes report zero width, height and area.

/// Axis of a proximity test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// An axis-aligned rectangle `(left, top, right, bottom)` with Y pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BBox {
    /// Zero-area box at the origin, used when a shape's geometry can't be read.
    pub const DEGENERATE: BBox = BBox {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a box from `(x0, y0, x1, y1)` with `(x0, y0)` the bottom-left corner.
    pub const fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            left: x0,
            top: y1,
            right: x1,
            bottom: y0,
        }
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.top - self.bottom).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when every coordinate is finite and the box is not inverted.
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.right >= self.left
            && self.top >= self.bottom
    }

    /// Intersection area; zero for touching or disjoint boxes.
    pub fn overlap_area(&self, other: &BBox) -> f64 {
        let w = (self.right.min(other.right) - self.left.max(other.left)).max(0.0);
        let h = (self.top.min(other.top) - self.bottom.max(other.bottom)).max(0.0);
        w * h
    }

    /// Horizontal separation between the two boxes, zero if their x-ranges meet.
    pub fn horizontal_gap(&self, other: &BBox) -> f64 {
        (other.left - self.right).max(self.left - other.right).max(0.0)
    }

    /// Vertical separation between the two boxes, zero if their y-ranges meet.
    pub fn vertical_gap(&self, other: &BBox) -> f64 {
        (other.bottom - self.top)
            .max(self.bottom - other.top)
            .max(0.0)
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            left: self.left.min(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

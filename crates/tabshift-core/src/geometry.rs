#![forbid(unsafe_code)]

//! Geometric primitives in layout units.
//!
//! Coordinates are floating point because tab strips are laid out by a host
//! view that measures fractional widths. The drag axis is always `x`.

use serde::{Deserialize, Serialize};

/// A pointer position as reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether this is the `(0, 0)` position some platforms report on move
    /// events that carry no real coordinates.
    ///
    /// Such events must be discarded rather than treated as a jump to the
    /// origin.
    #[inline]
    #[must_use]
    pub fn is_null_sentinel(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Usable as a live pointer sample (finite and not the null sentinel).
    #[inline]
    #[must_use]
    pub fn is_usable(self) -> bool {
        self.is_finite() && !self.is_null_sentinel()
    }

    /// Signed distance from `origin` along the drag axis.
    #[inline]
    #[must_use]
    pub fn axis_delta(self, origin: Point) -> f32 {
        self.x - origin.x
    }
}

/// An axis-aligned rectangle, typically a container or item bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }
}

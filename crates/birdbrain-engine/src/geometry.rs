//! Points, axis-aligned rectangles, and the angle/normalization helpers the
//! sensors are built from.

use std::f32::consts::PI;

/// A 2D point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle with its origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Returns true when the two rectangles overlap with positive area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Signed angle at vertex `a` between rays `a->b` and `a->c`, wrapped into
/// `(-PI, PI]`.
#[must_use]
pub fn angle(a: Point, b: Point, c: Point) -> f32 {
    let val = (b.y - a.y).atan2(b.x - a.x) - (c.y - a.y).atan2(c.x - a.x);
    if val > PI {
        val - 2.0 * PI
    } else if val <= -PI {
        val + 2.0 * PI
    } else {
        val
    }
}

/// Maps a value in `[0, range]` onto `[-1, 1]`, clamping outliers.
#[must_use]
pub fn normalize_value(value: f32, range: f32) -> f32 {
    let half_range = range / 2.0;
    ((value - half_range) / half_range).clamp(-1.0, 1.0)
}

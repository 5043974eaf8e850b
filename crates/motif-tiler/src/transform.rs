//! Rotation about a center point and angle unit helpers.

use std::f64::consts::PI;

use crate::geometry::Point;

/// A 2D rotation transform around a center point.
///
/// Sine and cosine are computed once; `apply` is then two multiply-adds
/// per axis, which matters when it runs for every grid cell.
#[derive(Debug, Clone, Copy)]
pub struct RotationTransform {
    pub center: Point,
    pub cos_a: f64,
    pub sin_a: f64,
}

impl RotationTransform {
    /// Create a new rotation transform.
    pub fn new(center: Point, angle_rad: f64) -> Self {
        Self {
            center,
            cos_a: angle_rad.cos(),
            sin_a: angle_rad.sin(),
        }
    }

    /// Create from degrees instead of radians.
    pub fn from_degrees(center: Point, angle_degrees: f64) -> Self {
        Self::new(center, degrees_to_radians(angle_degrees))
    }

    /// Apply the rotation to a point.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        Point::new(
            self.center.x + dx * self.cos_a - dy * self.sin_a,
            self.center.y + dx * self.sin_a + dy * self.cos_a,
        )
    }
}

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Radians to degrees, with negative results wrapped into `[0, 360)`.
///
/// Only negatives are wrapped; 400° of input stays 400°.
#[inline]
pub fn radians_to_positive_degrees(radians: f64) -> f64 {
    let degrees = radians * 180.0 / PI;
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

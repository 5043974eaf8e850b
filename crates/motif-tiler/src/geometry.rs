//! Plain geometry: points, sizes, rectangles, polygons.
//!
//! ## Rust Lesson #3: Copy vs Clone
//!
//! `Point`, `Size` and `Rect` are a few `f64`s, so they derive `Copy` and
//! move around by value. `Polygon` owns heap data and only derives `Clone`:
//! duplicating it is an explicit `.clone()` you can see in the code.
//!
//! The fill algorithm lives in `tiler`, the containment tests in `clip`.

use serde::{Deserialize, Serialize};

/// Position in document units, y pointing down as in SVG.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A width/height pair.
///
/// Used for motif intrinsic sizes and for the alternate row/column offset,
/// which is persisted as a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// An axis-aligned rectangle stored as its min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A fill region: one outer ring, any number of hole rings.
///
/// Rings are implicitly closed; the last point connects back to the first.
/// Functions that only need one ring borrow it as `&[Point]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub outer: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
    /// `id` of the SVG element the region came from
    pub id: Option<String>,
}

/// A region together with the rotation of the shape that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub polygon: Polygon,
    /// Rotation in radians
    pub rotation: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Size {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive. NaN counts as empty.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl Rect {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Corners in ring order, starting at the min corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// True if the two rectangles overlap (touching edges count).
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Grow into a square of side `max(width, height) * sqrt(2)` around the
    /// same center. The square covers the rectangle at any rotation.
    pub fn rotation_safe_square(&self) -> Rect {
        let side = self.width().max(self.height()) * std::f64::consts::SQRT_2;
        Rect::from_center(self.center(), side, side)
    }
}

impl Polygon {
    pub fn new(outer: Vec<Point>) -> Self {
        Self { outer, holes: Vec::new(), id: None }
    }

    pub fn with_holes(outer: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self { outer, holes, id: None }
    }

    /// The rectangle as a four-point ring.
    pub fn rect(rect: Rect) -> Self {
        Self::new(rect.corners().to_vec())
    }

    /// Bounds of the outer ring; holes are always inside it. `None` for an
    /// empty ring.
    pub fn bounding_box(&self) -> Option<Rect> {
        let (first, rest) = self.outer.split_first()?;
        let seed = Rect::new(first.x, first.y, first.x, first.y);
        Some(rest.iter().fold(seed, |r, p| {
            Rect::new(r.min_x.min(p.x), r.min_y.min(p.y), r.max_x.max(p.x), r.max_y.max(p.y))
        }))
    }
}

impl Shape {
    pub fn new(polygon: Polygon, rotation: f64) -> Self {
        Self { polygon, rotation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_bbox() {
        let poly = Polygon::new(vec![
            Point::new(4.0, -2.0),
            Point::new(10.0, 3.0),
            Point::new(1.0, 5.0),
        ]);
        assert_eq!(poly.bounding_box(), Some(Rect::new(1.0, -2.0, 10.0, 5.0)));
    }

    #[test]
    fn empty_polygon_bbox() {
        let poly = Polygon::new(Vec::new());
        assert_eq!(poly.bounding_box(), None);
    }

    #[test]
    fn rect_from_center() {
        let r = Rect::from_center(Point::new(5.0, 5.0), 4.0, 2.0);
        assert_eq!(r, Rect::new(3.0, 4.0, 7.0, 6.0));
        assert_eq!(r.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn rotation_safe_square_covers_rotated_rect() {
        let r = Rect::new(0.0, 0.0, 30.0, 10.0);
        let sq = r.rotation_safe_square();
        assert!((sq.width() - 30.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        assert!((sq.width() - sq.height()).abs() < 1e-9);
        assert_eq!(sq.center(), r.center());
    }

    #[test]
    fn rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!a.overlaps(&Rect::new(11.0, 0.0, 15.0, 10.0)));
    }

    #[test]
    fn size_drawable() {
        assert!(Size::new(1.0, 1.0).is_drawable());
        assert!(!Size::new(0.0, 1.0).is_drawable());
        assert!(!Size::new(1.0, -2.0).is_drawable());
        assert!(!Size::new(f64::NAN, 1.0).is_drawable());
    }

    #[test]
    fn single_point_bbox_is_degenerate() {
        let poly = Polygon::new(vec![Point::new(2.0, 3.0)]);
        let bbox = poly.bounding_box().unwrap();
        assert_eq!(bbox, Rect::new(2.0, 3.0, 2.0, 3.0));
        assert_eq!(bbox.width(), 0.0);
    }
}

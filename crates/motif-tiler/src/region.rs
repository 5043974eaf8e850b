//! The seams between the tiler and the host drawing application.
//!
//! ## Rust Lesson #17: Traits as Interfaces
//!
//! The tiler doesn't care what a "shape" or an "image" really is. It only
//! needs a few questions answered, so each collaborator is a trait. The
//! host implements them for its own types; this crate implements them for
//! `Polygon`, `Size`, `Vec<Placement>` and closures (via `DrawFn`) so it is
//! usable on its own.

use serde::Serialize;

use crate::clip::{point_in_body, rect_inside_polygon, rect_intersects_polygon};
use crate::geometry::{Point, Polygon, Rect, Shape, Size};

/// A closed region that motifs are placed into.
pub trait BoundaryPath {
    /// Axis-aligned bounds of the region.
    fn bounding_rect(&self) -> Rect;

    /// Cheap point containment.
    fn contains(&self, point: Point) -> bool;

    /// True if the rectangle shares any area with the region.
    fn intersects(&self, rect: &Rect) -> bool;

    /// True if the rectangle lies entirely inside the region.
    fn contains_rect(&self, rect: &Rect) -> bool;
}

/// Anything with an intrinsic drawing size.
pub trait MotifImage {
    fn intrinsic_size(&self) -> Size;
}

/// Receives one call per emitted placement, in traversal order.
pub trait MotifDrawer {
    fn place(&mut self, position: Point, rotation: f64);
}

/// The shape a fill belongs to: its rotation and its outline.
pub trait OwnerShape {
    type Boundary: BoundaryPath + ?Sized;

    /// Current rotation of the shape in radians.
    fn rotation(&self) -> f64;

    fn boundary(&self) -> &Self::Boundary;
}

/// One motif instance: where it goes and how it is turned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub position: Point,
    /// Radians
    pub rotation: f64,
}

impl BoundaryPath for Polygon {
    /// An empty polygon reports a zero rect at the origin.
    fn bounding_rect(&self) -> Rect {
        self.bounding_box().unwrap_or_default()
    }

    #[inline]
    fn contains(&self, point: Point) -> bool {
        point_in_body(point, self)
    }

    fn intersects(&self, rect: &Rect) -> bool {
        rect_intersects_polygon(rect, self)
    }

    fn contains_rect(&self, rect: &Rect) -> bool {
        rect_inside_polygon(rect, self)
    }
}

impl MotifImage for Size {
    fn intrinsic_size(&self) -> Size {
        *self
    }
}

impl<M: MotifImage + ?Sized> MotifImage for &M {
    fn intrinsic_size(&self) -> Size {
        (**self).intrinsic_size()
    }
}

impl MotifDrawer for Vec<Placement> {
    fn place(&mut self, position: Point, rotation: f64) {
        self.push(Placement { position, rotation });
    }
}

/// Adapts a closure into a drawer: `DrawFn(|p, angle| ...)`.
///
/// A blanket impl over `FnMut` would overlap the `Vec` and `&mut D` impls,
/// hence the wrapper.
pub struct DrawFn<F>(pub F);

impl<F: FnMut(Point, f64)> MotifDrawer for DrawFn<F> {
    fn place(&mut self, position: Point, rotation: f64) {
        (self.0)(position, rotation);
    }
}

impl<D: MotifDrawer + ?Sized> MotifDrawer for &mut D {
    fn place(&mut self, position: Point, rotation: f64) {
        (**self).place(position, rotation);
    }
}

impl OwnerShape for Shape {
    type Boundary = Polygon;

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn boundary(&self) -> &Polygon {
        &self.polygon
    }
}

//! Containment and intersection tests against polygon regions.
//!
//! This is the HOT PATH when clipped elements are suppressed - every grid
//! cell of a dense pattern goes through `point_in_body`, and the survivors
//! through `rect_inside_polygon`. Keep them allocation-free.

use crate::geometry::{Point, Polygon, Rect};

// ============================================================================
// POINT IN POLYGON (Ray Casting Algorithm)
// ============================================================================
//
// ## Rust Lesson #8: References & Slices
//
// `&[Point]` is a "slice" - a borrowed view into a contiguous sequence.
// It works with Vec<Point>, arrays, or any contiguous memory, so the same
// function serves outer rings, holes and the four corners of a Rect.

/// Test if a point is inside a ring using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Inside the outer ring and outside every hole.
#[inline]
pub fn point_in_body(p: Point, polygon: &Polygon) -> bool {
    if !point_in_polygon(p.x, p.y, &polygon.outer) {
        return false;
    }
    !polygon.holes.iter().any(|hole| point_in_polygon(p.x, p.y, hole))
}

// ============================================================================
// SEGMENT INTERSECTION
// ============================================================================

/// Result of a segment-segment intersection test.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// Rust enums can carry data. The compiler makes callers handle both
/// variants, so "no intersection" can never be mistaken for a point at (0, 0).
#[derive(Debug, Clone, Copy)]
pub enum Intersection {
    None,
    Point { x: f64, y: f64, t: f64 },
}

/// Find intersection point between two line segments.
///
/// Returns the intersection point and `t` parameter along the first segment.
#[inline]
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Intersection {
    let denom = (b2.y - b1.y) * (a2.x - a1.x) - (b2.x - b1.x) * (a2.y - a1.y);

    // Parallel or coincident
    if denom.abs() < 1e-10 {
        return Intersection::None;
    }

    let ua = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / denom;
    let ub = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Intersection::Point {
            x: a1.x + ua * (a2.x - a1.x),
            y: a1.y + ua * (a2.y - a1.y),
            t: ua,
        }
    } else {
        Intersection::None
    }
}

/// Iterate the closing edges of a ring: (p0,p1), (p1,p2), ..., (pn,p0).
fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// True if any edge of `ring` crosses any edge of `rect`.
fn ring_crosses_rect(ring: &[Point], rect: &Rect) -> bool {
    if ring.len() < 2 {
        return false;
    }
    let corners = rect.corners();
    ring_edges(ring).any(|(a, b)| {
        // Edge bounding box rejection before the four segment tests
        let edge_box = Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        if !edge_box.overlaps(rect) {
            return false;
        }
        ring_edges(&corners)
            .any(|(c, d)| matches!(segment_intersection(a, b, c, d), Intersection::Point { .. }))
    })
}

// ============================================================================
// RECTANGLE TESTS
// ============================================================================

/// True if `rect` lies entirely inside the polygon body.
///
/// All four corners must be inside, no boundary edge (outer or hole) may
/// cross the rectangle, and no hole may sit wholly within it. Edges that
/// merely touch the rectangle count as crossings.
pub fn rect_inside_polygon(rect: &Rect, polygon: &Polygon) -> bool {
    if let Some(bounds) = polygon.bounding_box() {
        if rect.min_x < bounds.min_x
            || rect.max_x > bounds.max_x
            || rect.min_y < bounds.min_y
            || rect.max_y > bounds.max_y
        {
            return false;
        }
    } else {
        return false;
    }

    if !rect.corners().iter().all(|c| point_in_body(*c, polygon)) {
        return false;
    }

    if ring_crosses_rect(&polygon.outer, rect) {
        return false;
    }

    // A hole strictly inside the rect has no crossing edges, so test a
    // vertex too.
    !polygon.holes.iter().any(|hole| {
        hole.first().is_some_and(|p| rect.contains(*p)) || ring_crosses_rect(hole, rect)
    })
}

/// True if `rect` and the polygon body share any area.
pub fn rect_intersects_polygon(rect: &Rect, polygon: &Polygon) -> bool {
    match polygon.bounding_box() {
        Some(bounds) if bounds.overlaps(rect) => {}
        _ => return false,
    }

    if rect.corners().iter().any(|c| point_in_body(*c, polygon)) {
        return true;
    }

    if polygon.outer.iter().any(|p| rect.contains(*p)) {
        return true;
    }

    ring_crosses_rect(&polygon.outer, rect)
        || polygon.holes.iter().any(|hole| ring_crosses_rect(hole, rect))
}

//! SVG input - fill regions, motifs and per-element pattern attributes.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, etc.)
//! then walks the tree to extract path data as polygons.
//!
//! ## Curve Flattening
//!
//! SVG paths contain Bézier curves (cubic and quadratic). These must be
//! "flattened" into line segments for containment tests. We use lyon_geom
//! for accurate curve approximation with a fixed tolerance.

use std::collections::BTreeMap;
use std::str::FromStr;

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;

use crate::geometry::{Point, Polygon, Size};
use crate::persist::{FieldError, FieldSet, FieldValue};
use crate::region::MotifImage;

/// Error type for SVG input.
///
/// ## Rust Lesson #20: Error Handling
///
/// `thiserror` derives `Display` and `std::error::Error` from the
/// `#[error(...)]` attributes, and `#[from]` lets `?` convert a
/// `FieldError` into an `SvgError` automatically.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    ParseError(String),
    #[error("No polygons found in SVG")]
    NoPolygons,
    #[error("invalid path data: {0}")]
    PathData(String),
    #[error("XML error at position {position}: {message}")]
    Xml { position: u64, message: String },
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Attribute prefix for per-element pattern fields, e.g.
/// `data-pattern-motif-angle="0.5"`.
pub const PATTERN_ATTRIBUTE_PREFIX: &str = "data-pattern-";

/// Tolerance for curve flattening.
/// Lower = more points, smoother curves, slower containment tests.
const CURVE_TOLERANCE: f64 = 0.1;

// ============================================================================
// RING BUILDER
// ============================================================================

/// Accumulates path commands into rings. The first ring is the outer
/// boundary; every later subpath is treated as a hole.
#[derive(Default)]
struct RingBuilder {
    rings: Vec<Vec<Point>>,
    current: Vec<Point>,
    last: Option<Point>,
    start: Option<Point>,
}

impl RingBuilder {
    fn move_to(&mut self, p: Point) {
        self.finish_ring();
        self.current.push(p);
        self.last = Some(p);
        self.start = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        self.current.push(p);
        self.last = Some(p);
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        if let Some(from) = self.last {
            let curve = QuadraticBezierSegment {
                from: point(from.x, from.y),
                ctrl: point(ctrl.x, ctrl.y),
                to: point(to.x, to.y),
            };
            let current = &mut self.current;
            curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                current.push(Point::new(segment.to.x, segment.to.y));
            });
        } else {
            self.current.push(to);
        }
        self.last = Some(to);
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        if let Some(from) = self.last {
            let curve = CubicBezierSegment {
                from: point(from.x, from.y),
                ctrl1: point(ctrl1.x, ctrl1.y),
                ctrl2: point(ctrl2.x, ctrl2.y),
                to: point(to.x, to.y),
            };
            let current = &mut self.current;
            curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                current.push(Point::new(segment.to.x, segment.to.y));
            });
        } else {
            self.current.push(to);
        }
        self.last = Some(to);
    }

    /// Close the subpath; the pen returns to its start.
    fn close(&mut self) {
        self.finish_ring();
        self.last = self.start;
    }

    fn finish_ring(&mut self) {
        let mut ring = std::mem::take(&mut self.current);

        // Flattening and explicit closing both repeat points
        ring.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
        if ring.len() >= 2 {
            let (first, last) = (ring[0], ring[ring.len() - 1]);
            if (first.x - last.x).abs() < 1e-6 && (first.y - last.y).abs() < 1e-6 {
                ring.pop();
            }
        }

        if ring.len() >= 3 {
            self.rings.push(ring);
        }
    }

    fn into_polygon(mut self, id: Option<String>) -> Option<Polygon> {
        self.finish_ring();
        let mut rings = self.rings.into_iter();
        let outer = rings.next()?;
        let mut polygon = Polygon::with_holes(outer, rings.collect());
        polygon.id = id;
        Some(polygon)
    }
}

// ============================================================================
// POLYGON EXTRACTION
// ============================================================================

/// Extract all polygons from an SVG document.
pub fn extract_polygons_from_svg(svg_content: &str) -> Result<Vec<Polygon>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut polygons = Vec::new();
    extract_from_group(tree.root(), &mut polygons);

    if polygons.is_empty() {
        Err(SvgError::NoPolygons)
    } else {
        Ok(polygons)
    }
}

fn extract_from_group(group: &usvg::Group, polygons: &mut Vec<Polygon>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, polygons),
            usvg::Node::Path(path) => {
                if let Some(polygon) = path_to_polygon(path) {
                    polygons.push(polygon);
                }
            }
            // Text and images don't bound a fill
            _ => {}
        }
    }
}

/// Convert a usvg path to a Polygon in document coordinates.
///
/// Path data is in the element's local space; `abs_transform` carries the
/// element and ancestor transforms. Mapping control points is exact for
/// affine transforms, so it happens before flattening.
fn path_to_polygon(path: &usvg::Path) -> Option<Polygon> {
    use usvg::tiny_skia_path::PathSegment;

    let ts = path.abs_transform();
    let (sx, kx, tx) = (ts.sx as f64, ts.kx as f64, ts.tx as f64);
    let (ky, sy, ty) = (ts.ky as f64, ts.sy as f64, ts.ty as f64);
    let to_point = |p: usvg::tiny_skia_path::Point| {
        let (x, y) = (p.x as f64, p.y as f64);
        Point::new(sx * x + kx * y + tx, ky * x + sy * y + ty)
    };
    let mut builder = RingBuilder::default();

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => builder.move_to(to_point(p)),
            PathSegment::LineTo(p) => builder.line_to(to_point(p)),
            PathSegment::QuadTo(ctrl, p) => builder.quad_to(to_point(ctrl), to_point(p)),
            PathSegment::CubicTo(c1, c2, p) => {
                builder.cubic_to(to_point(c1), to_point(c2), to_point(p))
            }
            PathSegment::Close => builder.close(),
        }
    }

    let id = path.id();
    builder.into_polygon((!id.is_empty()).then(|| id.to_string()))
}

/// Build a polygon from raw path data (`d` attribute syntax).
///
/// Relative commands, arcs and shorthand curves are normalized by
/// svgtypes before flattening.
pub fn polygon_from_path_data(d: &str) -> Result<Polygon, SvgError> {
    use svgtypes::SimplePathSegment as Seg;

    let mut builder = RingBuilder::default();
    for segment in svgtypes::SimplifyingPathParser::from(d) {
        match segment.map_err(|e| SvgError::PathData(e.to_string()))? {
            Seg::MoveTo { x, y } => builder.move_to(Point::new(x, y)),
            Seg::LineTo { x, y } => builder.line_to(Point::new(x, y)),
            Seg::Quadratic { x1, y1, x, y } => {
                builder.quad_to(Point::new(x1, y1), Point::new(x, y))
            }
            Seg::CurveTo { x1, y1, x2, y2, x, y } => {
                builder.cubic_to(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y))
            }
            Seg::ClosePath => builder.close(),
        }
    }

    builder.into_polygon(None).ok_or(SvgError::NoPolygons)
}

// ============================================================================
// MOTIFS
// ============================================================================

/// An SVG document used as a motif. Its intrinsic size is the document's
/// width/height as resolved by usvg.
#[derive(Debug, Clone)]
pub struct MotifSvg {
    source: String,
    size: Size,
}

impl FromStr for MotifSvg {
    type Err = SvgError;

    fn from_str(svg_content: &str) -> Result<Self, SvgError> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg_content, &options)
            .map_err(|e| SvgError::ParseError(e.to_string()))?;
        let size = tree.size();
        Ok(Self {
            source: svg_content.to_string(),
            size: Size::new(size.width() as f64, size.height() as f64),
        })
    }
}

impl MotifSvg {
    /// The document without its XML declaration or doctype, ready to be
    /// nested inside another SVG.
    pub fn embeddable_markup(&self) -> &str {
        match self.source.find("<svg") {
            Some(start) => self.source[start..].trim_end(),
            None => self.source.trim(),
        }
    }
}

impl MotifImage for MotifSvg {
    fn intrinsic_size(&self) -> Size {
        self.size
    }
}

// ============================================================================
// PATTERN ATTRIBUTES
// ============================================================================

/// Collect `data-pattern-*` attributes from every element that has an id.
///
/// usvg drops unknown attributes, so this streams the raw XML with
/// quick-xml instead. `data-pattern-motif-angle` maps to field
/// `motif_angle`; values use `FieldValue::parse` syntax.
pub fn read_pattern_attributes(
    svg_content: &str,
) -> Result<BTreeMap<String, FieldSet>, SvgError> {
    let mut reader = Reader::from_str(svg_content);
    reader.config_mut().trim_text(true);

    let mut by_id = BTreeMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let mut id = None;
                let mut fields = FieldSet::new();

                for attr in e.attributes() {
                    let attr = attr.map_err(|err| SvgError::Xml {
                        position: reader.buffer_position(),
                        message: err.to_string(),
                    })?;
                    let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr.unescape_value().map_err(|err| SvgError::Xml {
                        position: reader.buffer_position(),
                        message: err.to_string(),
                    })?;

                    if name == "id" {
                        id = Some(value.into_owned());
                    } else if let Some(field) = name.strip_prefix(PATTERN_ATTRIBUTE_PREFIX) {
                        let key = field.replace('-', "_");
                        fields.insert(&key, FieldValue::parse(&key, &value)?);
                    }
                }

                if let (Some(id), false) = (id, fields.is_empty()) {
                    by_id.insert(id, fields);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SvgError::Xml {
                    position: reader.error_position(),
                    message: e.to_string(),
                });
            }
            _ => {}
        }
    }

    Ok(by_id)
}

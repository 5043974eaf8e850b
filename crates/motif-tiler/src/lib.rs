//! # motif-tiler
//!
//! Pattern-fill engine: repeats a motif on a grid that covers an
//! arbitrarily rotated region, with optional stagger, wobble, angular
//! jitter and clip culling.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! ```
//! use motif_tiler::{PatternParameters, PatternTiler, Point, Polygon, Size};
//!
//! let region = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(40.0, 0.0),
//!     Point::new(40.0, 40.0),
//!     Point::new(0.0, 40.0),
//! ]);
//! let mut tiler = PatternTiler::with_motif(Size::new(10.0, 10.0))
//!     .with_parameters(PatternParameters::default().with_suppress_clipped_elements(true));
//!
//! let placements = tiler.placements(&region, 0.0);
//! assert!(!placements.is_empty());
//! ```

pub mod cache;
pub mod clip;
pub mod geometry;
pub mod params;
pub mod persist;
pub mod region;
pub mod rng;
pub mod svg;
pub mod tiler;
pub mod transform;

// Re-export common types at crate root for convenience.
pub use cache::RandomizationCache;
pub use clip::{point_in_body, point_in_polygon, rect_inside_polygon, rect_intersects_polygon};
pub use geometry::{Point, Polygon, Rect, Shape, Size};
pub use params::PatternParameters;
pub use persist::{FieldError, FieldSet, FieldValue};
pub use region::{BoundaryPath, DrawFn, MotifDrawer, MotifImage, OwnerShape, Placement};
pub use svg::{
    MotifSvg, SvgError, extract_polygons_from_svg, polygon_from_path_data, read_pattern_attributes,
};
pub use tiler::{FillStats, GridLayout, PatternTiler};

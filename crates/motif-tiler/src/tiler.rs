//! The pattern tiler - places motif instances on a grid covering a region.
//!
//! ## Algorithm
//!
//! 1. Take the region's bounding rect and grow it into a square of side
//!    `max(w, h) * sqrt(2)` around the same center. The grid is rotated
//!    about that center, and the square is big enough that the rotated
//!    grid still covers every corner of the region.
//! 2. Step the grid by `(motif + interval) * scale` per axis, visiting
//!    rows outer, columns inner, from `-n` to `n - 1` on each axis.
//! 3. Per cell: stagger, wobble, rotate about the center, optionally cull,
//!    then hand the placement to the drawer.
//!
//! Randomness is read from a cache indexed by the placement counter, so
//! the traversal order above is load-bearing: change it and every
//! existing fill re-shuffles.

use std::f64::consts::TAU;

use log::{debug, trace};

use crate::cache::RandomizationCache;
use crate::geometry::{Point, Rect, Size};
use crate::params::PatternParameters;
use crate::region::{BoundaryPath, MotifDrawer, MotifImage, OwnerShape, Placement};
use crate::rng::Rng;
use crate::transform::RotationTransform;

/// Grid dimensions for one fill pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Rotation center, the center of the region's bounds
    pub center: Point,
    /// Column step
    pub dx: f64,
    /// Row step
    pub dy: f64,
    /// Half the number of columns; columns run `-cols..cols`
    pub cols: i64,
    /// Half the number of rows; rows run `-rows..rows`
    pub rows: i64,
}

impl GridLayout {
    /// Lay out a grid of `dx` by `dy` cells over `bounds`.
    ///
    /// Steps must be positive; `PatternParameters::grid_step` guarantees it.
    pub fn new(bounds: &Rect, dx: f64, dy: f64) -> Self {
        let square = bounds.rotation_safe_square();
        Self {
            center: bounds.center(),
            dx,
            dy,
            cols: half_count(square.width(), dx),
            rows: half_count(square.height(), dy),
        }
    }

    /// Total cells visited by a fill, culled or not.
    pub fn cell_count(&self) -> u64 {
        let rows = (self.rows as u64).saturating_mul(2);
        let cols = (self.cols as u64).saturating_mul(2);
        rows.saturating_mul(cols)
    }

    /// Unrotated, unjittered position of a cell.
    ///
    /// Odd ROWS shift along x by `alternate.width`; odd COLUMNS shift along
    /// y by `alternate.height`. The crossing is what produces the stagger.
    #[inline]
    pub fn cell_position(&self, col: i64, row: i64, alternate: Size) -> Point {
        let x = if is_odd(row) {
            self.dx * (col as f64 + alternate.width) + self.center.x
        } else {
            self.dx * col as f64 + self.center.x
        };
        let y = if is_odd(col) {
            self.dy * (row as f64 + alternate.height) + self.center.y
        } else {
            self.dy * row as f64 + self.center.y
        };
        Point::new(x, y)
    }
}

/// `floor(extent / step / 2) + 1`, at least 1.
#[inline]
fn half_count(extent: f64, step: f64) -> i64 {
    // `as` saturates for huge or infinite quotients
    ((extent / step / 2.0).floor() as i64).max(0).saturating_add(1)
}

/// Two's complement parity, so -1 and -3 are odd.
#[inline]
fn is_odd(n: i64) -> bool {
    n & 1 != 0
}

/// What a fill pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Cells visited (the placement counter at the end of the pass)
    pub cells: usize,
    /// Placements handed to the drawer
    pub emitted: usize,
    /// Cells rejected by clip culling
    pub culled: usize,
}

/// A motif plus the parameters and randomness state needed to fill regions
/// with it.
///
/// `fill` takes `&mut self`: the randomization cache grows during a pass,
/// so one tiler must not be shared by concurrent fills. Wrap it in a lock
/// if several threads render with the same pattern.
#[derive(Debug, Clone)]
pub struct PatternTiler<M> {
    motif: Option<M>,
    params: PatternParameters,
    cache: RandomizationCache,
    rng: Rng,
}

impl<M: MotifImage> PatternTiler<M> {
    /// A tiler with default parameters. `None` is allowed and fills nothing.
    pub fn new(motif: Option<M>) -> Self {
        Self {
            motif,
            params: PatternParameters::default(),
            cache: RandomizationCache::new(),
            rng: Rng::default(),
        }
    }

    pub fn with_motif(motif: M) -> Self {
        Self::new(Some(motif))
    }

    /// Replace the parameters (builder form of `set_parameters`).
    pub fn with_parameters(mut self, params: PatternParameters) -> Self {
        self.set_parameters(params);
        self
    }

    /// Reseed the random source. Cached jitter is dropped so the new seed
    /// takes effect on the next fill.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::new(seed);
        self.cache.clear();
        self
    }

    pub fn motif(&self) -> Option<&M> {
        self.motif.as_ref()
    }

    pub fn set_motif(&mut self, motif: Option<M>) {
        self.motif = motif;
    }

    pub fn params(&self) -> &PatternParameters {
        &self.params
    }

    /// Replace all parameters at once.
    ///
    /// This reassigns the angle randomness, so the angle jitter cache is
    /// reset. Wobble offsets are kept.
    pub fn set_parameters(&mut self, params: PatternParameters) {
        self.params = params;
        self.cache.clear_angle_jitter();
    }

    /// Edit parameters in place. The angle jitter cache is reset only if
    /// the closure changed the angle randomness.
    pub fn update_parameters(&mut self, edit: impl FnOnce(&mut PatternParameters)) {
        let before = self.params.motif_angle_randomness();
        edit(&mut self.params);
        if self.params.motif_angle_randomness() != before {
            self.cache.clear_angle_jitter();
        }
    }

    /// Set the angular jitter magnitude and reset the jitter cache, even
    /// if the value is unchanged.
    pub fn set_motif_angle_randomness(&mut self, randomness: f64) {
        self.params.set_motif_angle_randomness(randomness);
        self.cache.clear_angle_jitter();
    }

    /// Set the wobble magnitude. Cached offsets are kept and rescaled.
    pub fn set_wobble(&mut self, wobble: f64) {
        self.params.set_wobble(wobble);
    }

    pub fn cache(&self) -> &RandomizationCache {
        &self.cache
    }

    /// Forget all cached randomness; the next fill draws fresh values.
    pub fn clear_randomization(&mut self) {
        self.cache.clear();
    }

    /// Grid that `fill` would walk for `region`, or `None` when it would
    /// bail out early.
    pub fn layout<B: BoundaryPath + ?Sized>(&self, region: &B) -> Option<GridLayout> {
        let size = self.drawable_size()?;
        let (dx, dy) = self.params.grid_step(size)?;
        Some(GridLayout::new(&region.bounding_rect(), dx, dy))
    }

    fn drawable_size(&self) -> Option<Size> {
        let size = self.motif.as_ref()?.intrinsic_size();
        size.is_drawable().then_some(size)
    }

    /// Fill `region` with motif placements.
    ///
    /// Missing motifs, empty motif sizes and non-advancing grid steps are
    /// not errors: the pass emits nothing and leaves the cache untouched.
    pub fn fill<B, D>(&mut self, region: &B, owner_rotation: f64, drawer: &mut D) -> FillStats
    where
        B: BoundaryPath + ?Sized,
        D: MotifDrawer + ?Sized,
    {
        let Some(size) = self.drawable_size() else {
            debug!("motif fill skipped: no motif or empty motif size");
            return FillStats::default();
        };
        let Some((dx, dy)) = self.params.grid_step(size) else {
            debug!(
                "motif fill skipped: grid step not positive (motif {}x{}, interval {}, scale {})",
                size.width,
                size.height,
                self.params.interval(),
                self.params.scale()
            );
            return FillStats::default();
        };

        let grid = GridLayout::new(&region.bounding_rect(), dx, dy);
        let rotation = RotationTransform::new(
            grid.center,
            self.params.effective_pattern_angle(owner_rotation),
        );
        let base_angle = self.params.effective_motif_angle(owner_rotation);

        let alternate = self.params.alternate_offset();
        let wobble = self.params.wobble();
        let randomness = self.params.motif_angle_randomness();
        let suppress = self.params.suppress_clipped_elements();
        let motif_w = size.width * self.params.scale();
        let motif_h = size.height * self.params.scale();

        // Restarts every pass so cache index N always means the Nth cell
        let mut counter = 0usize;
        let mut stats = FillStats::default();

        for row in -grid.rows..grid.rows {
            for col in -grid.cols..grid.cols {
                let mut p = grid.cell_position(col, row, alternate);

                if wobble > 0.0 {
                    let (u, v) = self.cache.wobble_offset(counter, &mut self.rng);
                    p.x += u * dx * wobble;
                    p.y += v * dy * wobble;
                }

                let mut angle = base_angle;
                if randomness > 0.0 {
                    angle += self.cache.angle_jitter(counter, &mut self.rng) * TAU * randomness;
                }

                let p = rotation.apply(p);
                counter += 1;

                if suppress {
                    // Point test first; the box test is far more expensive
                    if !region.contains(p) {
                        trace!("cell ({}, {}) culled: center outside region", col, row);
                        stats.culled += 1;
                        continue;
                    }
                    let footprint = Rect::from_center(p, motif_w, motif_h);
                    if !region.contains_rect(&footprint) {
                        trace!("cell ({}, {}) culled: motif crosses boundary", col, row);
                        stats.culled += 1;
                        continue;
                    }
                }

                drawer.place(p, angle);
                stats.emitted += 1;
            }
        }

        stats.cells = counter;
        debug!(
            "motif fill: {}x{} grid, {} cells, {} emitted, {} culled",
            grid.cols.saturating_mul(2),
            grid.rows.saturating_mul(2),
            stats.cells,
            stats.emitted,
            stats.culled
        );
        stats
    }

    /// Fill a shape's boundary using the shape's own rotation.
    pub fn fill_shape<S, D>(&mut self, shape: &S, drawer: &mut D) -> FillStats
    where
        S: OwnerShape + ?Sized,
        D: MotifDrawer + ?Sized,
    {
        let rotation = shape.rotation();
        self.fill(shape.boundary(), rotation, drawer)
    }

    /// Convenience: run a fill and collect the placements.
    pub fn placements<B: BoundaryPath + ?Sized>(
        &mut self,
        region: &B,
        owner_rotation: f64,
    ) -> Vec<Placement> {
        let mut out = Vec::new();
        self.fill(region, owner_rotation, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::rect_inside_polygon;
    use crate::geometry::{Polygon, Shape};
    use std::cell::Cell;
    use std::f64::consts::PI;

    fn centered_square(side: f64) -> Polygon {
        let h = side / 2.0;
        Polygon::rect(Rect::new(-h, -h, h, h))
    }

    /// Regular hexagon, so culling has slanted edges to deal with.
    fn hexagon(radius: f64) -> Polygon {
        Polygon::new(
            (0..6)
                .map(|i| {
                    let a = i as f64 * PI / 3.0;
                    Point::new(radius * a.cos(), radius * a.sin())
                })
                .collect(),
        )
    }

    fn tiler(motif: Size, params: PatternParameters) -> PatternTiler<Size> {
        PatternTiler::with_motif(motif).with_parameters(params).with_seed(99)
    }

    /// Position of cell (col, row) in traversal order.
    fn traversal_index(grid: &GridLayout, col: i64, row: i64) -> usize {
        ((row + grid.rows) * 2 * grid.cols + (col + grid.cols)) as usize
    }

    #[test]
    fn placement_count_matches_grid() {
        for (side, motif, interval) in [
            (20.0, Size::new(10.0, 10.0), 0.0),
            (100.0, Size::new(7.0, 3.0), 1.5),
            (33.0, Size::new(4.0, 12.0), -1.0),
        ] {
            let region = centered_square(side);
            let mut t = tiler(motif, PatternParameters::default().with_interval(interval));
            let grid = t.layout(&region).unwrap();
            let placements = t.placements(&region, 0.0);
            assert_eq!(placements.len() as u64, grid.cell_count());
            assert_eq!(grid.cell_count(), (2 * grid.rows * 2 * grid.cols) as u64);
        }
    }

    #[test]
    fn zero_size_region_still_gets_central_pass() {
        let point_region = Polygon::new(vec![Point::new(5.0, 5.0); 3]);
        let mut t = tiler(Size::new(10.0, 10.0), PatternParameters::default());
        let grid = t.layout(&point_region).unwrap();
        assert_eq!((grid.cols, grid.rows), (1, 1));
        assert_eq!(t.placements(&point_region, 0.0).len(), 4);

        let empty = Polygon::new(Vec::new());
        assert_eq!(t.placements(&empty, 0.0).len(), 4);
    }

    #[test]
    fn scenario_regular_grid() {
        let region = centered_square(20.0);
        let params = PatternParameters::default().with_alternate_offset(0.0, 0.0);
        let mut t = tiler(Size::new(10.0, 10.0), params);
        let placements = t.placements(&region, 0.0);

        let mut xs: Vec<f64> = placements.iter().map(|p| p.position.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs.dedup();
        assert_eq!(xs, vec![-20.0, -10.0, 0.0, 10.0]);

        for p in &placements {
            assert_eq!(p.position.x.rem_euclid(10.0), 0.0);
            assert_eq!(p.position.y.rem_euclid(10.0), 0.0);
            assert_eq!(p.rotation, 0.0);
        }

        // The grid reaches both sides of the square
        assert!(xs.first().unwrap() <= &-10.0);
        assert!(xs.last().unwrap() >= &10.0);
    }

    #[test]
    fn scenario_default_stagger_is_cross_wired() {
        let region = centered_square(20.0);
        let mut t = tiler(Size::new(10.0, 10.0), PatternParameters::default());
        let grid = t.layout(&region).unwrap();
        let placements = t.placements(&region, 0.0);
        let at = |col, row| placements[traversal_index(&grid, col, row)].position;

        // Default offset (0, 0.5): odd rows get the x offset, which is 0
        assert_eq!(at(0, 1).x, at(0, 0).x);
        // Odd columns get half a row step in y
        assert_eq!(at(1, 0).y - at(0, 0).y, grid.dy * 0.5);
        assert_eq!(at(-1, 0).y - at(0, 0).y, grid.dy * 0.5);
    }

    #[test]
    fn horizontal_stagger_keys_on_row_parity() {
        let region = centered_square(20.0);
        let params = PatternParameters::default().with_alternate_offset(0.5, 0.0);
        let mut t = tiler(Size::new(10.0, 10.0), params);
        let grid = t.layout(&region).unwrap();
        let placements = t.placements(&region, 0.0);
        let at = |col, row| placements[traversal_index(&grid, col, row)].position;

        assert_eq!(at(0, 1).x - at(0, 0).x, grid.dx * 0.5);
        assert_eq!(at(0, -1).x - at(0, 0).x, grid.dx * 0.5);
        assert_eq!(at(1, 0).y, at(0, 0).y);
    }

    #[test]
    fn scenario_negative_interval_overlaps() {
        let region = centered_square(20.0);
        let params = PatternParameters::default().with_interval(-5.0);
        let mut t = tiler(Size::new(10.0, 10.0), params);
        let grid = t.layout(&region).unwrap();
        assert_eq!(grid.dx, 5.0);
        let stats = t.fill(&region, 0.0, &mut Vec::<Placement>::new());
        assert_eq!(stats.cells as u64, grid.cell_count());
        assert_eq!(stats.emitted, 36);
    }

    #[test]
    fn scenario_zero_width_motif_does_nothing() {
        let region = centered_square(20.0);
        let params = PatternParameters::default()
            .with_wobble(0.5)
            .with_motif_angle_randomness(0.5);
        let mut t = tiler(Size::new(0.0, 10.0), params);
        let stats = t.fill(&region, 0.0, &mut Vec::<Placement>::new());
        assert_eq!(stats, FillStats::default());
        assert!(!t.cache().is_allocated());
    }

    #[test]
    fn missing_motif_does_nothing() {
        let mut t: PatternTiler<Size> = PatternTiler::new(None);
        assert!(t.placements(&centered_square(20.0), 0.0).is_empty());
        assert!(t.layout(&centered_square(20.0)).is_none());
    }

    #[test]
    fn collapsed_step_does_nothing() {
        let params = PatternParameters::default().with_interval(-10.0).with_wobble(1.0);
        let mut t = tiler(Size::new(10.0, 10.0), params);
        assert!(t.placements(&centered_square(20.0), 0.0).is_empty());
        assert!(!t.cache().is_allocated());
    }

    #[test]
    fn repeated_fills_are_identical() {
        let region = hexagon(50.0);
        let params = PatternParameters::default()
            .with_angle(0.3)
            .with_wobble(0.4)
            .with_motif_angle_randomness(0.2);
        let mut t = tiler(Size::new(6.0, 4.0), params);
        let first = t.placements(&region, 0.7);
        let second = t.placements(&region, 0.7);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn cache_grows_to_cell_count() {
        let small = centered_square(10.0);
        let large = centered_square(80.0);
        let params = PatternParameters::default()
            .with_wobble(0.1)
            .with_motif_angle_randomness(0.1);
        let mut t = tiler(Size::new(5.0, 5.0), params);

        let stats = t.fill(&small, 0.0, &mut Vec::<Placement>::new());
        assert!(t.cache().wobble_len() >= stats.cells);
        assert!(t.cache().angle_jitter_len() >= stats.cells);

        let big = t.fill(&large, 0.0, &mut Vec::<Placement>::new());
        assert!(big.cells > stats.cells);
        assert!(t.cache().wobble_len() >= big.cells);

        // A smaller fill afterwards never shrinks it
        t.fill(&small, 0.0, &mut Vec::<Placement>::new());
        assert_eq!(t.cache().wobble_len(), big.cells);
    }

    #[test]
    fn wobble_stays_within_step_fraction() {
        let region = centered_square(60.0);
        let params = PatternParameters::default()
            .with_alternate_offset(0.0, 0.0)
            .with_wobble(0.25);
        let mut t = tiler(Size::new(8.0, 4.0), params);
        let grid = t.layout(&region).unwrap();
        let placements = t.placements(&region, 0.0);

        let mut i = 0;
        for row in -grid.rows..grid.rows {
            for col in -grid.cols..grid.cols {
                let base = grid.cell_position(col, row, Size::default());
                let p = placements[i].position;
                assert!((p.x - base.x).abs() <= grid.dx * 0.25);
                assert!((p.y - base.y).abs() <= grid.dy * 0.25);
                i += 1;
            }
        }
    }

    #[test]
    fn changing_wobble_rescales_cached_offsets() {
        let region = centered_square(30.0);
        let params = PatternParameters::default()
            .with_alternate_offset(0.0, 0.0)
            .with_wobble(0.2);
        let mut t = tiler(Size::new(10.0, 10.0), params);
        let grid = t.layout(&region).unwrap();
        let before = t.placements(&region, 0.0);
        let cached = t.cache().wobble_len();

        t.set_wobble(0.4);
        assert_eq!(t.cache().wobble_len(), cached);
        let after = t.placements(&region, 0.0);

        let base = grid.cell_position(-grid.cols, -grid.rows, Size::default());
        let d1 = before[0].position.x - base.x;
        let d2 = after[0].position.x - base.x;
        assert!((d2 - 2.0 * d1).abs() < 1e-9);
    }

    #[test]
    fn angle_jitter_within_bounds() {
        let region = centered_square(40.0);
        let params = PatternParameters::default()
            .with_motif_angle(0.5)
            .with_motif_angle_randomness(0.1);
        let mut t = tiler(Size::new(5.0, 5.0), params);
        let placements = t.placements(&region, 0.0);
        let limit = TAU * 0.1;
        assert!(placements.iter().all(|p| (p.rotation - 0.5).abs() <= limit));
        assert!(placements.iter().any(|p| p.rotation != 0.5));
    }

    #[test]
    fn reassigning_randomness_clears_jitter() {
        let region = centered_square(40.0);
        let params = PatternParameters::default()
            .with_wobble(0.3)
            .with_motif_angle_randomness(0.3);
        let mut t = tiler(Size::new(5.0, 5.0), params);
        let first = t.placements(&region, 0.0);
        let wobble_len = t.cache().wobble_len();

        t.set_motif_angle_randomness(0.3);
        assert_eq!(t.cache().angle_jitter_len(), 0);
        assert_eq!(t.cache().wobble_len(), wobble_len);

        let second = t.placements(&region, 0.0);
        // Positions come from the untouched wobble cache, angles are fresh
        assert!(first.iter().zip(&second).all(|(a, b)| a.position == b.position));
        assert!(first.iter().zip(&second).any(|(a, b)| a.rotation != b.rotation));
    }

    #[test]
    fn update_parameters_only_clears_on_change() {
        let region = centered_square(20.0);
        let params = PatternParameters::default().with_motif_angle_randomness(0.2);
        let mut t = tiler(Size::new(5.0, 5.0), params);
        t.placements(&region, 0.0);
        let len = t.cache().angle_jitter_len();

        t.update_parameters(|p| p.set_scale(1.0));
        assert_eq!(t.cache().angle_jitter_len(), len);

        t.update_parameters(|p| p.set_motif_angle_randomness(0.4));
        assert_eq!(t.cache().angle_jitter_len(), 0);
    }

    #[test]
    fn culled_placements_lie_inside() {
        let region = hexagon(40.0);
        let params = PatternParameters::default()
            .with_angle(0.4)
            .with_wobble(0.3)
            .with_suppress_clipped_elements(true);
        let mut t = tiler(Size::new(6.0, 6.0), params);
        let mut placements: Vec<Placement> = Vec::new();
        let stats = t.fill(&region, 0.0, &mut placements);

        assert!(!placements.is_empty());
        assert!(stats.culled > 0);
        assert_eq!(stats.cells, stats.emitted + stats.culled);
        for p in &placements {
            let footprint = Rect::from_center(p.position, 6.0, 6.0);
            assert!(rect_inside_polygon(&footprint, &region));
        }
    }

    #[test]
    fn unculled_placements_spill_outside() {
        let region = hexagon(40.0);
        let mut t = tiler(Size::new(6.0, 6.0), PatternParameters::default());
        let placements = t.placements(&region, 0.0);
        assert!(placements.iter().any(|p| {
            !rect_inside_polygon(&Rect::from_center(p.position, 6.0, 6.0), &region)
        }));
    }

    #[test]
    fn culling_keeps_cache_indices_aligned() {
        // Same randomness with and without culling: surviving placements
        // must be a subsequence of the full pass.
        let region = hexagon(30.0);
        let params = PatternParameters::default().with_wobble(0.2);
        let mut t = tiler(Size::new(4.0, 4.0), params);
        let all = t.placements(&region, 0.0);

        t.update_parameters(|p| p.set_suppress_clipped_elements(true));
        let kept = t.placements(&region, 0.0);
        assert!(kept.len() < all.len());
        assert!(kept.iter().all(|k| all.contains(k)));
    }

    #[test]
    fn owner_rotation_turns_grid_and_motifs() {
        let region = centered_square(20.0);
        let params = PatternParameters::default().with_alternate_offset(0.0, 0.0);
        let mut t = tiler(Size::new(10.0, 10.0), params);
        t.update_parameters(|p| p.set_angle_is_relative_to_object(true));

        let shape = Shape::new(region.clone(), PI / 2.0);
        let mut placements: Vec<Placement> = Vec::new();
        t.fill_shape(&shape, &mut placements);

        // owner + (pattern angle, which includes owner)
        for p in &placements {
            assert!((p.rotation - PI).abs() < 1e-12);
        }

        // Quarter turn: the cell at (col 1, row 0) = (10, 0) lands on (0, 10)
        let grid = t.layout(&region).unwrap();
        let p = placements[traversal_index(&grid, 1, 0)].position;
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn scale_widens_steps() {
        let params = PatternParameters::default().with_scale(2.0).with_interval(1.0);
        let t = tiler(Size::new(4.0, 9.0), params);
        let grid = t.layout(&centered_square(10.0)).unwrap();
        assert_eq!((grid.dx, grid.dy), (10.0, 20.0));
    }

    #[test]
    fn negative_indices_use_twos_complement_parity() {
        assert!(is_odd(-1));
        assert!(is_odd(-3));
        assert!(!is_odd(-2));
        assert!(!is_odd(0));
    }

    /// Region that records which boundary tests the fill asks for.
    struct CountingRegion {
        polygon: Polygon,
        point_tests: Cell<usize>,
        box_tests: Cell<usize>,
        box_tests_off_center: Cell<usize>,
    }

    impl BoundaryPath for CountingRegion {
        fn bounding_rect(&self) -> Rect {
            self.polygon.bounding_rect()
        }

        fn contains(&self, point: Point) -> bool {
            self.point_tests.set(self.point_tests.get() + 1);
            self.polygon.contains(point)
        }

        fn intersects(&self, rect: &Rect) -> bool {
            self.polygon.intersects(rect)
        }

        fn contains_rect(&self, rect: &Rect) -> bool {
            self.box_tests.set(self.box_tests.get() + 1);
            if !self.polygon.contains(rect.center()) {
                self.box_tests_off_center.set(self.box_tests_off_center.get() + 1);
            }
            self.polygon.contains_rect(rect)
        }
    }

    #[test]
    fn box_test_only_runs_after_center_passes() {
        let region = CountingRegion {
            polygon: hexagon(50.0),
            point_tests: Cell::new(0),
            box_tests: Cell::new(0),
            box_tests_off_center: Cell::new(0),
        };
        let params = PatternParameters::default()
            .with_angle(0.3)
            .with_suppress_clipped_elements(true);
        let mut t = tiler(Size::new(10.0, 10.0), params);

        let stats = t.fill(&region, 0.0, &mut Vec::<Placement>::new());

        assert!(stats.emitted > 0);
        assert!(stats.culled > 0);
        assert_eq!(region.point_tests.get(), stats.cells);
        assert!(region.box_tests.get() >= stats.emitted);
        assert!(region.box_tests.get() < stats.cells);
        assert_eq!(region.box_tests_off_center.get(), 0);
    }
}

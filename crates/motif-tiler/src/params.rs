//! Pattern parameters: the user-facing knobs of a motif fill.
//!
//! ## Rust Lesson #18: Private Fields + Accessors
//!
//! The fields are private so every write goes through a setter. That is
//! what guarantees the `[0, 1]` ranges: there is simply no way to store
//! an out-of-range wobble from outside this module.

use crate::geometry::Size;
use crate::transform::{degrees_to_radians, radians_to_positive_degrees};

/// Default stagger: no horizontal shift on odd rows, half a step of
/// vertical shift on odd columns.
pub const DEFAULT_ALTERNATE_OFFSET: Size = Size { width: 0.0, height: 0.5 };

/// Everything that shapes a pattern fill except the motif itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternParameters {
    scale: f64,
    interval: f64,
    angle: f64,
    angle_is_relative_to_object: bool,
    motif_angle: f64,
    motif_angle_is_relative_to_pattern: bool,
    alternate_offset: Size,
    wobble: f64,
    motif_angle_randomness: f64,
    suppress_clipped_elements: bool,
}

impl Default for PatternParameters {
    fn default() -> Self {
        Self {
            scale: 1.0,
            interval: 0.0,
            angle: 0.0,
            angle_is_relative_to_object: false,
            motif_angle: 0.0,
            motif_angle_is_relative_to_pattern: true,
            alternate_offset: DEFAULT_ALTERNATE_OFFSET,
            wobble: 0.0,
            motif_angle_randomness: 0.0,
            suppress_clipped_elements: false,
        }
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl PatternParameters {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Scale & spacing
    // ------------------------------------------------------------------

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Extra space between motifs before scaling. Negative values overlap.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: f64) {
        self.interval = interval;
    }

    /// Grid step `(motif + interval) * scale` per axis, or `None` if either
    /// axis would not advance.
    pub fn grid_step(&self, motif: Size) -> Option<(f64, f64)> {
        let dx = (motif.width + self.interval) * self.scale;
        let dy = (motif.height + self.interval) * self.scale;
        // Written so NaN also fails
        if dx > 0.0 && dy > 0.0 { Some((dx, dy)) } else { None }
    }

    // ------------------------------------------------------------------
    // Angles
    // ------------------------------------------------------------------

    /// Pattern grid angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, radians: f64) {
        self.angle = radians;
    }

    /// Pattern grid angle in degrees, negatives wrapped into `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        radians_to_positive_degrees(self.angle)
    }

    pub fn set_angle_degrees(&mut self, degrees: f64) {
        self.angle = degrees_to_radians(degrees);
    }

    pub fn angle_is_relative_to_object(&self) -> bool {
        self.angle_is_relative_to_object
    }

    pub fn set_angle_is_relative_to_object(&mut self, relative: bool) {
        self.angle_is_relative_to_object = relative;
    }

    /// Per-motif angle in radians.
    pub fn motif_angle(&self) -> f64 {
        self.motif_angle
    }

    pub fn set_motif_angle(&mut self, radians: f64) {
        self.motif_angle = radians;
    }

    pub fn motif_angle_degrees(&self) -> f64 {
        radians_to_positive_degrees(self.motif_angle)
    }

    pub fn set_motif_angle_degrees(&mut self, degrees: f64) {
        self.motif_angle = degrees_to_radians(degrees);
    }

    pub fn motif_angle_is_relative_to_pattern(&self) -> bool {
        self.motif_angle_is_relative_to_pattern
    }

    pub fn set_motif_angle_is_relative_to_pattern(&mut self, relative: bool) {
        self.motif_angle_is_relative_to_pattern = relative;
    }

    /// Grid angle actually used for a shape rotated by `owner_rotation`.
    pub fn effective_pattern_angle(&self, owner_rotation: f64) -> f64 {
        if self.angle_is_relative_to_object {
            self.angle + owner_rotation
        } else {
            self.angle
        }
    }

    /// Motif angle before per-instance jitter.
    ///
    /// With both relative flags set the owner rotation contributes twice:
    /// once directly and once through the pattern angle.
    pub fn effective_motif_angle(&self, owner_rotation: f64) -> f64 {
        let mut angle = self.motif_angle;
        if self.angle_is_relative_to_object {
            angle += owner_rotation;
        }
        if self.motif_angle_is_relative_to_pattern {
            angle += self.effective_pattern_angle(owner_rotation);
        }
        angle
    }

    // ------------------------------------------------------------------
    // Stagger & randomness
    // ------------------------------------------------------------------

    /// Fraction of a step that odd rows (width) and odd columns (height)
    /// are shifted by.
    pub fn alternate_offset(&self) -> Size {
        self.alternate_offset
    }

    pub fn set_alternate_offset(&mut self, offset: Size) {
        self.alternate_offset = Size::new(clamp_unit(offset.width), clamp_unit(offset.height));
    }

    pub fn wobble(&self) -> f64 {
        self.wobble
    }

    pub fn set_wobble(&mut self, wobble: f64) {
        self.wobble = clamp_unit(wobble);
    }

    /// Angular jitter as a fraction of a full turn.
    pub fn motif_angle_randomness(&self) -> f64 {
        self.motif_angle_randomness
    }

    /// Plain value setter. `PatternTiler::set_motif_angle_randomness` also
    /// resets the jitter cache and is what hosts should call.
    pub fn set_motif_angle_randomness(&mut self, randomness: f64) {
        self.motif_angle_randomness = clamp_unit(randomness);
    }

    pub fn suppress_clipped_elements(&self) -> bool {
        self.suppress_clipped_elements
    }

    pub fn set_suppress_clipped_elements(&mut self, suppress: bool) {
        self.suppress_clipped_elements = suppress;
    }

    // ------------------------------------------------------------------
    // Builder helpers
    // ------------------------------------------------------------------

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_interval(mut self, interval: f64) -> Self {
        self.set_interval(interval);
        self
    }

    pub fn with_angle(mut self, radians: f64) -> Self {
        self.set_angle(radians);
        self
    }

    pub fn with_motif_angle(mut self, radians: f64) -> Self {
        self.set_motif_angle(radians);
        self
    }

    pub fn with_alternate_offset(mut self, x: f64, y: f64) -> Self {
        self.set_alternate_offset(Size::new(x, y));
        self
    }

    pub fn with_wobble(mut self, wobble: f64) -> Self {
        self.set_wobble(wobble);
        self
    }

    pub fn with_motif_angle_randomness(mut self, randomness: f64) -> Self {
        self.set_motif_angle_randomness(randomness);
        self
    }

    pub fn with_suppress_clipped_elements(mut self, suppress: bool) -> Self {
        self.set_suppress_clipped_elements(suppress);
        self
    }
}

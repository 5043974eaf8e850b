//! Per-placement randomization cache.
//!
//! Jitter is stored as raw unit values in `[-1, 1)` and indexed by the
//! placement counter of a fill pass. Magnitudes are applied by the caller,
//! so turning wobble up or down rescales the same offsets instead of
//! reshuffling them.
//!
//! Entries are positional, not keyed by grid cell: they stay meaningful
//! only while every fill visits cells in the same order.

use crate::rng::Rng;

#[derive(Debug, Clone, Default)]
pub struct RandomizationCache {
    /// Lazily created on first wobbled fill
    wobble_offsets: Option<Vec<(f64, f64)>>,
    /// Lazily created on first fill with angle randomness
    angle_jitter: Option<Vec<f64>>,
}

impl RandomizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw positional offset for placement `index`, drawing new values from
    /// `rng` until the cache reaches it.
    pub fn wobble_offset(&mut self, index: usize, rng: &mut Rng) -> (f64, f64) {
        let offsets = self.wobble_offsets.get_or_insert_with(Vec::new);
        while offsets.len() <= index {
            offsets.push(rng.next_signed_pair());
        }
        offsets[index]
    }

    /// Raw angular jitter for placement `index`.
    pub fn angle_jitter(&mut self, index: usize, rng: &mut Rng) -> f64 {
        let jitter = self.angle_jitter.get_or_insert_with(Vec::new);
        while jitter.len() <= index {
            jitter.push(rng.next_signed());
        }
        jitter[index]
    }

    pub fn wobble_len(&self) -> usize {
        self.wobble_offsets.as_ref().map_or(0, Vec::len)
    }

    pub fn angle_jitter_len(&self) -> usize {
        self.angle_jitter.as_ref().map_or(0, Vec::len)
    }

    /// True once any randomness has been drawn.
    pub fn is_allocated(&self) -> bool {
        self.wobble_offsets.is_some() || self.angle_jitter.is_some()
    }

    pub fn clear_angle_jitter(&mut self) {
        self.angle_jitter = None;
    }

    pub fn clear_wobble(&mut self) {
        self.wobble_offsets = None;
    }

    /// Drop everything; the next fill re-randomizes.
    pub fn clear(&mut self) {
        self.clear_wobble();
        self.clear_angle_jitter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unallocated() {
        let cache = RandomizationCache::new();
        assert!(!cache.is_allocated());
        assert_eq!(cache.wobble_len(), 0);
        assert_eq!(cache.angle_jitter_len(), 0);
    }

    #[test]
    fn fills_up_to_requested_index() {
        let mut cache = RandomizationCache::new();
        let mut rng = Rng::new(7);
        cache.wobble_offset(9, &mut rng);
        assert_eq!(cache.wobble_len(), 10);
        assert_eq!(cache.angle_jitter_len(), 0);
    }

    #[test]
    fn same_index_same_value() {
        let mut cache = RandomizationCache::new();
        let mut rng = Rng::new(7);
        let first = cache.angle_jitter(3, &mut rng);
        // The rng has moved on, but the cached value must not
        rng.next_u64();
        assert_eq!(cache.angle_jitter(3, &mut rng), first);
    }

    #[test]
    fn clearing_one_side_keeps_the_other() {
        let mut cache = RandomizationCache::new();
        let mut rng = Rng::new(7);
        let offset = cache.wobble_offset(2, &mut rng);
        cache.angle_jitter(2, &mut rng);

        cache.clear_angle_jitter();
        assert_eq!(cache.angle_jitter_len(), 0);
        assert_eq!(cache.wobble_len(), 3);
        assert_eq!(cache.wobble_offset(2, &mut rng), offset);

        cache.clear();
        assert!(!cache.is_allocated());
    }
}

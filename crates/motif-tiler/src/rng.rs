//! Seedable random source for wobble and angle jitter.
//!
//! The tiler never asks this generator for a value twice: each draw is
//! written into the randomization cache, and repeated fills read the cache.
//! The seed therefore only decides what a *fresh* cache looks like.

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0x5EED_F111;

const LCG_MUL: u64 = 6364136223846793005;
const LCG_INC: u64 = 1442695040888963407;

/// 64-bit LCG stepping, seeded through a SplitMix64 finalizer.
///
/// Neighbouring seeds (`seed`, `seed + 1`, ...) are common when every
/// shape of a document gets its own tiler, and a raw LCG started from
/// neighbouring states stays correlated for a while. Scrambling the seed
/// first breaks that up.
///
/// ```
/// use motif_tiler::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let (u, v) = rng.next_signed_pair();
/// assert!((-1.0..1.0).contains(&u) && (-1.0..1.0).contains(&v));
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: scramble(seed) }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Uniform in `[0, 1)`, built from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `[-1, 1)`.
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64().mul_add(2.0, -1.0)
    }

    /// Two draws, x first.
    #[inline]
    pub fn next_signed_pair(&mut self) -> (f64, f64) {
        let x = self.next_signed();
        (x, self.next_signed())
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

fn scramble(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

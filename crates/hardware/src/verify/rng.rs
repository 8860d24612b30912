//! Seeded pseudo-random source for scenario generation.
//!
//! A xorshift64 generator: cheap, dependency-free, and fully determined by its
//! seed, so a failing run can be replayed from the seed it reports.

/// State used when a zero seed would lock xorshift at zero.
const ZERO_SEED_STATE: u64 = 123456789;

/// Xorshift64 pseudo-random number generator.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Creates a generator from `seed`.
    ///
    /// The seed is scrambled once so that neighbouring seeds (`1`, `2`, ...) do
    /// not produce correlated first draws.
    pub const fn new(seed: u64) -> Self {
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Self {
            state: if z == 0 { ZERO_SEED_STATE } else { z },
        }
    }

    /// Returns the next 64-bit value.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns a value uniformly drawn from `0..=max`.
    pub const fn next_in_range(&mut self, max: u32) -> u32 {
        let x = self.next_u64();
        if max == u32::MAX {
            x as u32
        } else {
            (x % (max as u64 + 1)) as u32
        }
    }

    /// Returns a value that fits in `width` bits.
    pub const fn next_bits(&mut self, width: u32) -> u32 {
        self.next_in_range(width_mask(width))
    }
}

/// Returns the all-ones value of a `width`-bit port.
#[inline]
pub const fn width_mask(width: u32) -> u32 {
    if width >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

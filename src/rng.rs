//! Randomness for fruit placement and spawn rolls.
//!
//! The engine only sees [`RandomSource`]; the firmware uses [`XorShift32`],
//! reseeded from the timestamp of the start press so every game differs.

/// Uniform integers in a caller-given inclusive range.
pub trait RandomSource {
    /// A value in `min..=max`. Returns `min` when the range is empty.
    fn range_inclusive(
        &mut self,
        min: u32,
        max: u32,
    ) -> u32;

    /// True with probability `percent`/100.
    fn roll_percent(
        &mut self,
        percent: u8,
    ) -> bool {
        self.range_inclusive(0, 99) < u32::from(percent)
    }
}

/// xorshift32 PRNG.
#[derive(Clone, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Zero is not a valid xorshift state and is replaced by 1.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn reseed(
        &mut self,
        seed: u32,
    ) {
        *self = Self::new(seed);
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for XorShift32 {
    fn range_inclusive(
        &mut self,
        min: u32,
        max: u32,
    ) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min;
        if span == u32::MAX {
            return self.next_u32();
        }
        min + self.next_u32() % (span + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_is_replaced() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = XorShift32::new(1234);
        let mut b = XorShift32::new(1234);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_range_stays_inclusive() {
        let mut rng = XorShift32::new(42);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            let v = rng.range_inclusive(0, 7);
            assert!(v <= 7);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value in 0..=7 should appear");
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = XorShift32::new(7);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(9, 3), 9);
    }

    #[test]
    fn test_roll_percent_bounds() {
        let mut rng = XorShift32::new(99);
        for _ in 0..200 {
            assert!(!rng.roll_percent(0));
            assert!(rng.roll_percent(100));
        }
    }
}

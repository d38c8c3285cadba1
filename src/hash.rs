//! ## Hash family
//! Two base hash functions `h1` and `h2` are combined into an unbounded family of
//! quasi-independent hash functions `h_i(x) = h1(x) + i * h2(x)` with 64-bit
//! wraparound. Each element is hashed by the base functions only once, every
//! further member of the family costs one multiply-add.
//!
//! [Less Hashing, Same Performance](https://www.eecs.harvard.edu/~michaelm/postscripts/rsa2008.pdf)

use std::fmt::{Debug, Formatter};

/// Seeds used by `HashFamily::default`.
const DEFAULT_SEED_1: u64 = 0x243f_6a88_85a3_08d3;
const DEFAULT_SEED_2: u64 = 0x1319_8a2e_0370_7344;

/// Deterministic base hash function mapping bytes to a 64-bit value.
pub trait Hash64: Send + Sync {
    fn hash64(&self, bytes: &[u8]) -> u64;
}

impl<F> Hash64 for F
where
    F: Fn(&[u8]) -> u64 + Send + Sync,
{
    #[inline]
    fn hash64(&self, bytes: &[u8]) -> u64 {
        self(bytes)
    }
}

/// Seeded wyhash base hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WyHash64 {
    seed: u64,
}

impl WyHash64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Hash64 for WyHash64 {
    #[inline]
    fn hash64(&self, bytes: &[u8]) -> u64 {
        wyhash::wyhash(bytes, self.seed)
    }
}

/// Pair of base hash functions from which the sketch derives one hash
/// function per signature slot.
///
/// A family is immutable once built and is shared between sketches behind an `Arc`.
pub struct HashFamily<H1: Hash64 = WyHash64, H2: Hash64 = WyHash64> {
    h1: H1,
    h2: H2,
}

impl<H1: Hash64, H2: Hash64> HashFamily<H1, H2> {
    /// Creates new family from two caller supplied base hash functions
    #[inline]
    pub fn new(h1: H1, h2: H2) -> Self {
        Self { h1, h2 }
    }

    /// Hash `bytes` with both base functions.
    #[inline]
    pub fn derive(&self, bytes: &[u8]) -> (u64, u64) {
        (self.h1.hash64(bytes), self.h2.hash64(bytes))
    }

    /// Value of the `i`-th family member given the base hashes `(v1, v2)` of an element.
    #[inline]
    pub fn nth(v1: u64, v2: u64, i: usize) -> u64 {
        v1.wrapping_add((i as u64).wrapping_mul(v2))
    }

    #[inline]
    pub fn h1(&self) -> &H1 {
        &self.h1
    }

    #[inline]
    pub fn h2(&self) -> &H2 {
        &self.h2
    }
}

impl HashFamily {
    /// Family of two wyhash functions with the given seeds.
    ///
    /// Identical seeds make `h2` a copy of `h1` and every slot a multiple of the
    /// first one, which defeats the estimators.
    #[inline]
    pub fn with_seeds(seed1: u64, seed2: u64) -> Self {
        Self::new(WyHash64::new(seed1), WyHash64::new(seed2))
    }
}

impl Default for HashFamily {
    fn default() -> Self {
        Self::with_seeds(DEFAULT_SEED_1, DEFAULT_SEED_2)
    }
}

impl<H1: Hash64, H2: Hash64> Debug for HashFamily<H1, H2> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashFamily")
            .field("h1", &std::any::type_name::<H1>())
            .field("h2", &std::any::type_name::<H2>())
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    fn len_plus_one(bytes: &[u8]) -> u64 {
        bytes.len() as u64 + 1
    }

    #[test_case(0 => 10; "first member is h1")]
    #[test_case(1 => 17; "second member adds h2 once")]
    #[test_case(3 => 31; "fourth member adds h2 three times")]
    fn test_nth(i: usize) -> u64 {
        <HashFamily>::nth(10, 7, i)
    }

    #[test]
    fn test_nth_wraps_around() {
        assert_eq!(<HashFamily>::nth(u64::MAX, 1, 1), 0);
        assert_eq!(<HashFamily>::nth(1, u64::MAX, 2), u64::MAX);
    }

    #[test]
    fn test_closure_base_hashes() {
        let family = HashFamily::new(len_plus_one, |bytes: &[u8]| bytes.len() as u64 * 2);
        assert_eq!(family.derive(b"abc"), (4, 6));
    }

    #[test]
    fn test_default_family_is_deterministic() {
        let lhs = HashFamily::default();
        let rhs = HashFamily::default();
        assert_eq!(lhs.derive(b"item"), rhs.derive(b"item"));

        let (v1, v2) = lhs.derive(b"item");
        assert_ne!(v1, v2);
        assert_eq!(v1, wyhash::wyhash(b"item", DEFAULT_SEED_1));
    }
}

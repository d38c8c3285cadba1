//! ## Signature
//! A signature is a fixed-length array of `u64` minimums, one slot per member of the
//! hash family. Slot `i` holds the smallest non-zero value the `i`-th derived hash
//! function produced over every element pushed so far.
//!
//! Slot values:
//! - `INFINITY` (`u64::MAX`) - no element has touched the slot yet
//! - `0`                     - never written by a sketch; only reachable through
//!   externally supplied signatures and treated as degenerate by the estimators
//! - anything else           - current minimum of the slot's hash function

use std::ops::Index;
use std::slice;

use crate::error::{check_len, SketchError};

/// Sentinel marking a slot that no element has touched.
pub const INFINITY: u64 = u64::MAX;

/// Number of slots compared per batch in `count_matches`.
const MATCH_BATCH: usize = 8;

/// Read-only view of anything that carries a signature.
pub trait AsSignature {
    fn as_signature(&self) -> &[u64];
}

/// Owned MinHash signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(Vec<u64>);

impl Signature {
    /// Signature of the empty set: `k` slots of `INFINITY`.
    #[inline]
    pub fn empty(k: usize) -> Self {
        Self(empty_signature(k))
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every slot is still `INFINITY`.
    ///
    /// Note that this is a statement about the set the signature represents,
    /// not about the number of slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        is_empty(&self.0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, u64> {
        self.0.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }

    /// Lower slot values to the slot-wise minimum with `values`.
    #[inline]
    pub(crate) fn min_assign(&mut self, values: &[u64]) -> Result<(), SketchError> {
        check_len(self.len(), values.len())?;
        for (slot, &v) in self.0.iter_mut().zip(values) {
            *slot = (*slot).min(v);
        }
        Ok(())
    }

    /// Mutable slots for in-crate writers which uphold the monotonic invariant.
    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [u64] {
        &mut self.0
    }
}

impl From<Vec<u64>> for Signature {
    #[inline]
    fn from(mins: Vec<u64>) -> Self {
        Self(mins)
    }
}

impl From<&[u64]> for Signature {
    #[inline]
    fn from(mins: &[u64]) -> Self {
        Self(mins.to_vec())
    }
}

impl From<Signature> for Vec<u64> {
    #[inline]
    fn from(sig: Signature) -> Self {
        sig.0
    }
}

impl Index<usize> for Signature {
    type Output = u64;

    #[inline]
    fn index(&self, idx: usize) -> &u64 {
        &self.0[idx]
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a u64;
    type IntoIter = slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsSignature for Signature {
    #[inline]
    fn as_signature(&self) -> &[u64] {
        &self.0
    }
}

impl AsSignature for [u64] {
    #[inline]
    fn as_signature(&self) -> &[u64] {
        self
    }
}

impl<const N: usize> AsSignature for [u64; N] {
    #[inline]
    fn as_signature(&self) -> &[u64] {
        self
    }
}

impl AsSignature for Vec<u64> {
    #[inline]
    fn as_signature(&self) -> &[u64] {
        self
    }
}

/// Return `k` slots of `INFINITY`.
#[inline]
pub fn empty_signature(k: usize) -> Vec<u64> {
    vec![INFINITY; k]
}

/// Whether no slot was ever touched. An all-zero signature is *not* empty here,
/// although its cardinality estimate is 0.
#[inline]
pub fn is_empty<S: AsSignature + ?Sized>(sig: &S) -> bool {
    sig.as_signature().iter().all(|&v| v == INFINITY)
}

/// Signature of the union of two sets: the slot-wise minimum of their signatures.
pub fn union<A, B>(a: &A, b: &B) -> Result<Signature, SketchError>
where
    A: AsSignature + ?Sized,
    B: AsSignature + ?Sized,
{
    let mut res = Signature::from(a.as_signature());
    res.min_assign(b.as_signature())?;
    Ok(res)
}

/// Estimate the Jaccard index of two sets as the share of slots whose
/// minimums are exactly equal.
pub fn similarity<A, B>(a: &A, b: &B) -> Result<f64, SketchError>
where
    A: AsSignature + ?Sized,
    B: AsSignature + ?Sized,
{
    let (a, b) = (a.as_signature(), b.as_signature());
    check_len(a.len(), b.len())?;
    if a.is_empty() {
        return Err(SketchError::EmptySignature);
    }
    Ok(count_matches(a, b) as f64 / a.len() as f64)
}

/// Count equal slots of two equally sized slices.
///
/// Slots are compared in fixed batches with a branchless sum so the compiler
/// can use SIMD instructions for the bulk of the signature.
#[inline]
fn count_matches(a: &[u64], b: &[u64]) -> usize {
    let lhs = a.chunks_exact(MATCH_BATCH);
    let rhs = b.chunks_exact(MATCH_BATCH);
    let tail = count_equal(lhs.remainder(), rhs.remainder());
    lhs.zip(rhs).map(|(x, y)| count_equal(x, y)).sum::<usize>() + tail
}

#[inline]
fn count_equal(a: &[u64], b: &[u64]) -> usize {
    let mut res = 0;
    for (x, y) in a.iter().zip(b) {
        res += usize::from(x == y);
    }
    res
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1; "single slot")]
    #[test_case(5; "five slots")]
    #[test_case(400; "four hundred slots")]
    fn test_empty_signature(k: usize) {
        let sig = Signature::empty(k);
        assert_eq!(sig.len(), k);
        assert!(sig.is_empty());
        assert!(is_empty(&empty_signature(k)));
    }

    #[test]
    fn test_zero_signature_is_not_empty() {
        assert!(!is_empty(&[0u64, 0, 0]));
    }

    #[test]
    fn test_union() {
        let xs = [1u64, 2, 3];
        let ys = [0u64, 3, 1];
        assert_eq!(union(&xs, &ys).unwrap().into_vec(), vec![0, 2, 1]);
    }

    #[test]
    fn test_union_size_mismatch() {
        assert_eq!(
            union(&[1u64, 2], &[1u64, 2, 3]),
            Err(SketchError::SizeMismatch { left: 2, right: 3 })
        );
    }

    #[test_case(&[INFINITY; 5], &[INFINITY; 5] => 1.0; "two empty signatures")]
    #[test_case(&[1, 2], &[1, 3] => 0.5; "one of two slots match")]
    #[test_case(&[INFINITY; 5], &[1, 2, 3, 4, 5] => 0.0; "empty against full")]
    #[test_case(&[7; 19], &[7; 19] => 1.0; "batched and remainder slots")]
    fn test_similarity(a: &[u64], b: &[u64]) -> f64 {
        similarity(a, b).unwrap()
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a: Vec<u64> = (0..37).collect();
        let b: Vec<u64> = (0..37).map(|v| if v % 3 == 0 { v } else { v + 1 }).collect();
        assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn test_similarity_errors() {
        assert_eq!(
            similarity(&[1u64, 2], &[1u64]),
            Err(SketchError::SizeMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            similarity(&[] as &[u64], &[] as &[u64]),
            Err(SketchError::EmptySignature)
        );
    }
}

//! ## b-bit signatures
//! Compressed signature keeping only the lowest `b` bits of every slot.
//!
//! Fields are packed into `u64` words most significant first: each new field shifts
//! the running word left by `b` and is OR-ed into the low bits. A word is flushed as
//! soon as fewer than `b` free bits remain, so every word holds `64 / b` fields and the
//! last word may hold fewer, with its unused high bits left zero.
//!
//! `similarity_bbit` drains the words least significant first, `64 / b` fields per
//! word. Packing and unpacking walk the fields in opposite directions but always pair
//! the same positions of two words packed with the same `b`. Zero padding of the last
//! word is compared as well and counts as matching fields.
//!
//! [b-Bit Minwise Hashing](https://arxiv.org/abs/0910.3349)

use crate::error::{check_len, SketchError};
use crate::signature::{AsSignature, Signature};

const WORD_BITS: u32 = u64::BITS;

/// Mask selecting the lowest `b` bits
#[inline]
fn field_mask(b: u32) -> Result<u64, SketchError> {
    if b == 0 || b > WORD_BITS {
        return Err(SketchError::InvalidBitWidth(b));
    }
    Ok(u64::MAX >> (WORD_BITS - b))
}

/// Pack the lowest `b` bits of every slot of `sig` into words
pub fn signature_bbit<S: AsSignature + ?Sized>(sig: &S, b: u32) -> Result<Vec<u64>, SketchError> {
    let mask = field_mask(b)?;
    let sig = sig.as_signature();
    let per_word = (WORD_BITS / b) as usize;

    let mut words = Vec::with_capacity(sig.len().div_ceil(per_word));
    let mut word = 0u64;
    let mut free = WORD_BITS;
    for &v in sig {
        if free < b {
            words.push(word);
            word = 0;
            free = WORD_BITS;
        }
        // shifting by the full word width (b = 64) leaves nothing behind
        word = word.checked_shl(b).unwrap_or(0) | (v & mask);
        free -= b;
    }
    if free < WORD_BITS {
        words.push(word);
    }

    Ok(words)
}

/// Estimate the Jaccard index from two b-bit signatures packed with the same `b`,
/// as the share of equal `b`-bit fields
pub fn similarity_bbit(lhs: &[u64], rhs: &[u64], b: u32) -> Result<f64, SketchError> {
    let mask = field_mask(b)?;
    check_len(lhs.len(), rhs.len())?;
    if lhs.is_empty() {
        return Err(SketchError::EmptySignature);
    }

    let mut matches = 0usize;
    let mut total = 0usize;
    for (&x, &y) in lhs.iter().zip(rhs) {
        let (mut x, mut y) = (x, y);
        let mut remaining = WORD_BITS;
        while remaining >= b {
            matches += usize::from(x & mask == y & mask);
            total += 1;
            x = x.checked_shr(b).unwrap_or(0);
            y = y.checked_shr(b).unwrap_or(0);
            remaining -= b;
        }
    }

    Ok(matches as f64 / total as f64)
}

impl Signature {
    /// Return b-bit compressed form of the signature
    #[inline]
    pub fn to_bbit(&self, b: u32) -> Result<Vec<u64>, SketchError> {
        signature_bbit(self, b)
    }
}

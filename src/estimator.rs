//! Set-size estimators computed from one or two MinHash signatures.
//!
//! # Estimator design rationale
//!
//! ## Exponential order statistics
//! A hash function uniform over `[0, M]` with `M = INFINITY` maps the minimum of a set
//! of `n` distinct elements to `z = -ln((M - min) / M)`, which is distributed as the
//! minimum of `n` independent Exp(1) variables, i.e. as Exp(n) with mean `1/n`.
//! Every slot of a signature provides one such sample, so the inverse of the mean of
//! the transformed slots estimates `n`:
//!
//! ```text
//! n ≈ k / Σ -ln((M - sig[i]) / M)
//! ```
//!
//! Paper: E. Cohen, "Size-Estimation Framework with Applications to Transitive Closure
//! and Reachability", JCSS 1997.
//!
//! ## Slot policy
//! - `sig[i] == INFINITY` (untouched slot) contributes nothing to the sum.
//! - `sig[i] == 0` (degenerate slot) contributes nothing to the sum.
//! - The divisor is always the full signature length `k`, including skipped slots.
//! - A sum of exactly zero yields an estimate of 0, so both the empty-set signature
//!   and the all-zero signature have cardinality 0.
//!
//! ## Accuracy
//! - Relative standard error is roughly `1 / sqrt(k)`:
//!   k = 100: 10%
//!   k = 400: 5%
//!   k = 1024: 3.1%
//! - The two-function hash family only approximates independent slots, so small
//!   signatures fare somewhat worse than the bound above.
//!
//! ## Set algebra
//! Union signatures are exact (slot-wise minimum), every other operator is derived
//! from three cardinalities and clamped into its feasible range:
//! - `|A ∪ B|`  = `cardinality(min(A, B))`
//! - `|A ∩ B|`  = `|A| + |B| - |A ∪ B|` clamped to `[0, min(|A|, |B|)]`
//! - `|A △ B|`  = `|A ∪ B| - |A ∩ B|` clamped to `[0, ..]`
//! - `|A \ B|`  = `|A| - |A ∩ B|` clamped to `[0, ..]`

use tracing::trace;

use crate::error::SketchError;
use crate::signature::{union, AsSignature, INFINITY};

/// Return cardinality estimate of the set represented by `sig`
pub fn cardinality<S: AsSignature + ?Sized>(sig: &S) -> usize {
    let sig = sig.as_signature();
    let m = INFINITY as f64;

    let mut sum = 0.0;
    for &v in sig {
        let d = INFINITY - v;
        // skip untouched (d == 0) and degenerate (d == M) slots
        if d == 0 || d == INFINITY {
            continue;
        }
        sum += -(d as f64 / m).ln();
    }

    if sum == 0.0 {
        return 0;
    }
    let estimate = (sig.len() as f64 / sum) as usize;
    trace!(k = sig.len(), sum, estimate, "cardinality");
    estimate
}

/// Return cardinality estimate of `A ∪ B`
pub fn union_cardinality<A, B>(a: &A, b: &B) -> Result<usize, SketchError>
where
    A: AsSignature + ?Sized,
    B: AsSignature + ?Sized,
{
    Ok(cardinality(&union(a, b)?))
}

/// Return cardinality estimate of `A ∩ B`
pub fn intersection_cardinality<A, B>(a: &A, b: &B) -> Result<usize, SketchError>
where
    A: AsSignature + ?Sized,
    B: AsSignature + ?Sized,
{
    let u = union_cardinality(a, b)?;
    let ca = cardinality(a);
    let cb = cardinality(b);
    Ok(ca.saturating_add(cb).saturating_sub(u).min(ca).min(cb))
}

/// Return cardinality estimate of the symmetric difference `A △ B`
pub fn symmetric_difference_cardinality<A, B>(a: &A, b: &B) -> Result<usize, SketchError>
where
    A: AsSignature + ?Sized,
    B: AsSignature + ?Sized,
{
    let u = union_cardinality(a, b)?;
    let i = intersection_cardinality(a, b)?;
    Ok(u.saturating_sub(i))
}

/// Return cardinality estimate of `A \ B`. Not symmetric in its arguments.
pub fn less_cardinality<A, B>(a: &A, b: &B) -> Result<usize, SketchError>
where
    A: AsSignature + ?Sized,
    B: AsSignature + ?Sized,
{
    let i = intersection_cardinality(a, b)?;
    Ok(cardinality(a).saturating_sub(i))
}

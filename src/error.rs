use thiserror::Error;

/// Errors returned by sketch construction, merging and the estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SketchError {
    /// Two signatures (or two b-bit word arrays) of different length were combined.
    #[error("signature size mismatch: {left} != {right}")]
    SizeMismatch { left: usize, right: usize },
    /// A signature without any slots was supplied where at least one is required.
    #[error("signature must have at least one slot")]
    EmptySignature,
    /// The b-bit codec only accepts field widths in `1..=64`.
    #[error("invalid b-bit field width {0}, expected 1..=64")]
    InvalidBitWidth(u32),
}

/// Fail with `SizeMismatch` unless both lengths agree.
#[inline]
pub(crate) fn check_len(left: usize, right: usize) -> Result<(), SketchError> {
    if left == right {
        Ok(())
    } else {
        Err(SketchError::SizeMismatch { left, right })
    }
}

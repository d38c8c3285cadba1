//! `minhash-sketch` is a Rust crate for estimating set similarity (Jaccard index) and set
//! cardinality from a stream of elements without keeping the elements themselves.
//!
//! A `Sketch` keeps one MinHash signature built from a parametric hash family
//! `h1 + i * h2`. Signatures feed the cardinality and set-algebra estimators, and can be
//! compressed into b-bit signatures which support an approximate similarity of their own.
//!
//! ```
//! use minhash_sketch::Sketch;
//!
//! let mut evens = Sketch::new(256).unwrap();
//! let mut odds = Sketch::new(256).unwrap();
//! for i in 0..1000u32 {
//!     if i % 2 == 0 { evens.push(i) } else { odds.push(i) }
//! }
//!
//! let union = evens.union_cardinality(&odds).unwrap();
//! assert!(union > 700 && union < 1300);
//! ```
pub mod bbit;
pub mod element;
pub mod error;
pub mod estimator;
pub mod hash;
#[cfg(feature = "with_serde")]
mod serde;
pub mod signature;
pub mod sketch;

pub use bbit::{signature_bbit, similarity_bbit};
pub use element::Element;
pub use error::SketchError;
pub use estimator::{
    cardinality, intersection_cardinality, less_cardinality, symmetric_difference_cardinality,
    union_cardinality,
};
pub use hash::{Hash64, HashFamily, WyHash64};
pub use signature::{empty_signature, is_empty, similarity, union, AsSignature, Signature, INFINITY};
pub use sketch::Sketch;

//! MinHash sketch of a streamed set.
//!
//! A `Sketch` owns one signature and shares a read-only `HashFamily` with any
//! number of other sketches. It is mutated only by `push*` and `merge`, both of which
//! only ever lower slot values, and it never stores the pushed elements.
//!
//! A sketch follows single-writer discipline: `push` and `merge` take `&mut self`,
//! sharing one sketch between writers needs external synchronisation.

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::element::{Element, Encode, IntegerLiteral};
use crate::error::SketchError;
use crate::estimator;
use crate::hash::{Hash64, HashFamily, WyHash64};
use crate::signature::{self, AsSignature, Signature};

/// Number of slots updated by one worker in `push_batch`
const BATCH_CHUNK: usize = 64;

static DEFAULT_FAMILY: OnceLock<Arc<HashFamily>> = OnceLock::new();

/// MinHash sketch of a set: `k` slot minimums over a shared hash family.
pub struct Sketch<H1: Hash64 = WyHash64, H2: Hash64 = WyHash64> {
    mins: Signature,
    family: Arc<HashFamily<H1, H2>>,
}

impl Sketch {
    /// Creates new empty sketch with `k` slots using the default wyhash family
    #[inline]
    pub fn new(k: usize) -> Result<Self, SketchError> {
        let family = DEFAULT_FAMILY.get_or_init(|| Arc::new(HashFamily::default()));
        Self::with_family(Arc::clone(family), k)
    }
}

impl<H1: Hash64, H2: Hash64> Sketch<H1, H2> {
    /// Creates new empty sketch with `k` slots
    pub fn with_family(family: Arc<HashFamily<H1, H2>>, k: usize) -> Result<Self, SketchError> {
        if k == 0 {
            return Err(SketchError::EmptySignature);
        }
        Ok(Self {
            mins: Signature::empty(k),
            family,
        })
    }

    /// Creates new sketch from a copy of an existing signature
    pub fn from_signature(
        family: Arc<HashFamily<H1, H2>>,
        sig: &[u64],
    ) -> Result<Self, SketchError> {
        if sig.is_empty() {
            return Err(SketchError::EmptySignature);
        }
        Ok(Self {
            mins: Signature::from(sig),
            family,
        })
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.mins
    }

    #[inline]
    pub fn into_signature(self) -> Signature {
        self.mins
    }

    #[inline]
    pub fn family(&self) -> &Arc<HashFamily<H1, H2>> {
        &self.family
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.mins.len()
    }

    /// Whether the signature is still the signature of the empty set.
    ///
    /// A non-empty set may rarely produce it too, e.g. when every derived hash is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    /// Insert an element into the sketch
    #[inline]
    pub fn push<'a>(&mut self, x: impl Into<Element<'a>>) {
        let element: Element<'a> = x.into();
        self.push_bytes(element.encode().as_bytes());
    }

    /// Insert an already encoded element
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let (v1, v2) = self.family.derive(bytes);
        update_slots(self.mins.slots_mut(), 0, &[(v1, v2)]);
    }

    /// Insert the raw UTF-8 bytes of `s`, without integer literal detection
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.push_bytes(s.as_bytes());
    }

    pub fn push_strs<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for s in items {
            self.push_str(s.as_ref());
        }
    }

    /// Insert `s` as an integer when it reads as a non-negative integer literal,
    /// as raw bytes otherwise
    #[inline]
    pub fn push_str_int(&mut self, s: &str) {
        self.push(Element::IntegerLiteral(IntegerLiteral(s)));
    }

    /// Insert a batch of elements.
    ///
    /// Base hashes of all elements are computed once up front, then the slots are
    /// split into disjoint ranges which are updated independently (on the rayon pool
    /// with the `parallel` feature). The result equals pushing every element in turn.
    pub fn push_batch<'a, I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<Element<'a>>,
    {
        let hashes: Vec<(u64, u64)> = items
            .into_iter()
            .map(|x| {
                let element: Element<'a> = x.into();
                self.family.derive(element.encode().as_bytes())
            })
            .collect();
        if hashes.is_empty() {
            return;
        }
        debug!(elements = hashes.len(), k = self.len(), "push batch");

        let slots = self.mins.slots_mut();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            slots
                .par_chunks_mut(BATCH_CHUNK)
                .enumerate()
                .for_each(|(c, chunk)| update_slots(chunk, c * BATCH_CHUNK, &hashes));
        }

        #[cfg(not(feature = "parallel"))]
        slots
            .chunks_mut(BATCH_CHUNK)
            .enumerate()
            .for_each(|(c, chunk)| update_slots(chunk, c * BATCH_CHUNK, &hashes));
    }

    /// Merge another signature into this one, turning it into the signature of the union
    pub fn merge<S: AsSignature + ?Sized>(&mut self, rhs: &S) -> Result<(), SketchError> {
        self.mins.min_assign(rhs.as_signature()).map_err(|err| {
            debug!(%err, "merge rejected");
            err
        })
    }

    /// Return new sketch with a copy of the signature and the same hash family
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        estimator::cardinality(&self.mins)
    }

    #[inline]
    pub fn similarity<S: AsSignature + ?Sized>(&self, rhs: &S) -> Result<f64, SketchError> {
        signature::similarity(&self.mins, rhs)
    }

    #[inline]
    pub fn union_cardinality<S: AsSignature + ?Sized>(&self, rhs: &S) -> Result<usize, SketchError> {
        estimator::union_cardinality(&self.mins, rhs)
    }

    #[inline]
    pub fn intersection_cardinality<S: AsSignature + ?Sized>(
        &self,
        rhs: &S,
    ) -> Result<usize, SketchError> {
        estimator::intersection_cardinality(&self.mins, rhs)
    }

    #[inline]
    pub fn symmetric_difference_cardinality<S: AsSignature + ?Sized>(
        &self,
        rhs: &S,
    ) -> Result<usize, SketchError> {
        estimator::symmetric_difference_cardinality(&self.mins, rhs)
    }

    #[inline]
    pub fn less_cardinality<S: AsSignature + ?Sized>(&self, rhs: &S) -> Result<usize, SketchError> {
        estimator::less_cardinality(&self.mins, rhs)
    }
}

/// Lower `slots` (which start at slot index `offset`) with the derived hashes of
/// every `(v1, v2)` pair. Zero is never written.
#[inline]
fn update_slots(slots: &mut [u64], offset: usize, hashes: &[(u64, u64)]) {
    for (j, slot) in slots.iter_mut().enumerate() {
        let i = offset + j;
        for &(v1, v2) in hashes {
            let h = <HashFamily>::nth(v1, v2, i);
            if 0 < h && h < *slot {
                *slot = h;
            }
        }
    }
}

impl<H1: Hash64, H2: Hash64> Clone for Sketch<H1, H2> {
    fn clone(&self) -> Self {
        Self {
            mins: self.mins.clone(),
            family: Arc::clone(&self.family),
        }
    }
}

impl<H1: Hash64, H2: Hash64> PartialEq for Sketch<H1, H2> {
    /// Sketches are equal when their signatures are
    fn eq(&self, rhs: &Self) -> bool {
        self.mins == rhs.mins
    }
}

impl<H1: Hash64, H2: Hash64> AsSignature for Sketch<H1, H2> {
    #[inline]
    fn as_signature(&self) -> &[u64] {
        self.mins.as_slice()
    }
}

impl<H1: Hash64, H2: Hash64> Debug for Sketch<H1, H2> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ k: {}, empty: {}, estimate: {} }}",
            self.len(),
            self.is_empty(),
            self.cardinality()
        )
    }
}

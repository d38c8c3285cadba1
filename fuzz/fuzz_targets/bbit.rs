#![no_main]

use libfuzzer_sys::fuzz_target;
use minhash_sketch::{signature_bbit, similarity_bbit, Sketch};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let b = u32::from(data[0] % 64) + 1;
    let k = usize::from(data[1] % 64) + 1;
    let (lhs, rhs) = data[2..].split_at((data.len() - 2) / 2);

    let mut sketch1 = Sketch::new(k).unwrap();
    sketch1.push_batch(lhs.chunks(3));
    let mut sketch2 = Sketch::new(k).unwrap();
    sketch2.push_batch(rhs.chunks(3));

    let words1 = signature_bbit(sketch1.signature(), b).unwrap();
    let words2 = signature_bbit(sketch2.signature(), b).unwrap();
    let per_word = 64 / b as usize;
    assert_eq!(words1.len(), k.div_ceil(per_word));

    if let Ok(similarity) = similarity_bbit(&words1, &words2, b) {
        assert!((0.0..=1.0).contains(&similarity));
    }
});

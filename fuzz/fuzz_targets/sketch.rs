#![no_main]

use libfuzzer_sys::fuzz_target;
use minhash_sketch::{Sketch, INFINITY};
use wyhash::wyhash;

const K: usize = 32;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut sketch1 = Sketch::new(K).unwrap();
    for chunk in first_half.chunks(4) {
        let before = sketch1.signature().clone();
        sketch1.push(chunk);
        assert!(sketch1.signature().iter().zip(before.iter()).all(|(a, b)| a <= b));
        assert!(sketch1.signature().iter().all(|&v| v != 0));
    }

    let mut sketch2 = Sketch::new(K).unwrap();
    sketch2.push_batch(second_half.chunks(4));
    assert!(sketch2.signature().iter().all(|&v| v != 0));

    let similarity = sketch1.similarity(&sketch2);
    if let Ok(similarity) = similarity {
        assert!((0.0..=1.0).contains(&similarity));
    }

    let union = sketch1.union_cardinality(&sketch2).unwrap();
    let intersection = sketch1.intersection_cardinality(&sketch2).unwrap();
    assert!(intersection <= union);
    assert!(intersection <= sketch1.cardinality().min(sketch2.cardinality()));

    let mut merged = sketch1.copy();
    merged.merge(&sketch2).unwrap();
    let mut reversed = sketch2.copy();
    reversed.merge(&sketch1).unwrap();
    assert_eq!(merged, reversed);
    assert_eq!(merged.cardinality(), union);
    assert!(merged.signature().iter().all(|&v| v <= INFINITY));
});

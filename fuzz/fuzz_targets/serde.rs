#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use minhash_sketch::{HashFamily, Signature, Sketch};

fuzz_target!(|data: &[u8]| {
    if let Ok(signature) = serde_json::from_slice::<Signature>(data) {
        let mut sketch =
            Sketch::from_signature(Arc::new(HashFamily::default()), signature.as_slice()).unwrap();
        sketch.push(1u64);
        assert_eq!(sketch.len(), signature.len());
        assert!(sketch.signature().iter().zip(signature.iter()).all(|(a, b)| a <= b));
    }
});

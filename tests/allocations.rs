#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::sync::Arc;

use minhash_sketch::{HashFamily, Sketch};
use tabled::{
    settings::{Settings, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct Record {
    k: usize,
    construct: String,
    push: String,
    merge: String,
}

fn measure<F: FnOnce()>(f: F) -> (u64, u64) {
    let _profiler = dhat::Profiler::builder().testing().build();
    f();
    let stats = dhat::HeapStats::get();
    (stats.total_bytes, stats.total_blocks)
}

fn format_stats((bytes, blocks): (u64, u64)) -> String {
    format!("{} / {}", bytes, blocks)
}

#[test]
fn test_allocations() {
    let family = Arc::new(HashFamily::default());

    let results: Vec<Record> = [1, 16, 128, 400, 1024]
        .into_iter()
        .map(|k| {
            let construct = measure(|| {
                let sketch = Sketch::with_family(Arc::clone(&family), k).unwrap();
                drop(sketch);
            });
            // a single slot buffer, nothing else
            assert_eq!(construct, (8 * k as u64, 1), "construct k = {}", k);

            let mut sketch = Sketch::with_family(Arc::clone(&family), k).unwrap();
            let other = sketch.copy();
            let push = measure(|| {
                for i in 0..10_000u64 {
                    sketch.push(i);
                }
                sketch.push("item");
                sketch.push("0x2a");
                sketch.push(&b"raw bytes"[..]);
                sketch.push_str("raw string");
            });
            assert_eq!(push, (0, 0), "push k = {}", k);

            let merge = measure(|| {
                sketch.merge(&other).unwrap();
            });
            assert_eq!(merge, (0, 0), "merge k = {}", k);

            Record {
                k,
                construct: format_stats(construct),
                push: format_stats(push),
                merge: format_stats(merge),
            }
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    let markdown = Table::new(results).with(table_config).to_string();
    println!("{}", markdown);
}

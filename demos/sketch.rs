use minhash_sketch::Sketch;

fn main() -> Result<(), minhash_sketch::SketchError> {
    let mut sketch1 = Sketch::new(256)?;
    for i in 0..1000u32 {
        sketch1.push(i);
    }
    println!("sketch1 estimate = {}", sketch1.cardinality());

    let mut sketch2 = Sketch::new(256)?;
    for i in 500..1500u32 {
        sketch2.push(i);
    }
    println!("sketch2 estimate = {}", sketch2.cardinality());

    println!("similarity = {:.3}", sketch1.similarity(&sketch2)?);
    println!("intersection estimate = {}", sketch1.intersection_cardinality(&sketch2)?);

    let words1 = sketch1.signature().to_bbit(8)?;
    let words2 = sketch2.signature().to_bbit(8)?;
    println!(
        "8-bit similarity = {:.3} ({} words instead of {} slots)",
        minhash_sketch::similarity_bbit(&words1, &words2, 8)?,
        words1.len(),
        sketch1.len()
    );

    sketch1.merge(&sketch2)?;
    println!("merged estimate = {}", sketch1.cardinality());
    Ok(())
}

//! Runs one pool across a rising signal and reports how little each step
//! reshuffles the field.
use glam::Vec2;
use gridscape::prelude::{run_layout, Category, LayoutConfig, LayoutParams, Pool};
use gridscape_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut pool = Pool::new();
    pool.resize(32);
    let config = LayoutConfig::new();
    let viewport = Vec2::new(1280.0, 720.0);

    let mut previous: Option<Vec<Category>> = None;
    for step in 0..=4u32 {
        let signal = f64::from(step) * 0.25;
        let result = run_layout(
            &mut pool,
            &LayoutParams::new(signal, viewport),
            &config,
            None,
            None,
        );

        let categories: Vec<Category> = pool.slots().iter().map(|s| s.category).collect();
        let recategorized = previous
            .as_ref()
            .map(|prev| prev.iter().zip(&categories).filter(|(a, b)| a != b).count())
            .unwrap_or(0);
        println!(
            "signal {signal:.2}: counts {:?}, {} placed, {} skipped, {} slots recategorized",
            pool.counts(),
            result.placed,
            result.skipped,
            recategorized
        );
        previous = Some(categories);
    }
    Ok(())
}

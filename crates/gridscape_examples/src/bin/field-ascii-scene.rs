//! Places a pool on a medium viewport and prints the field as ASCII art.
use glam::Vec2;
use gridscape::prelude::{run_layout, LayoutConfig, LayoutEvent, LayoutParams, Pool, VecSink};
use gridscape_examples::{init_tracing, render_field};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut pool = Pool::new();
    pool.resize(28);

    let config = LayoutConfig::new();
    let params = LayoutParams::new(0.35, Vec2::new(960.0, 600.0));

    let mut sink = VecSink::new();
    let result = run_layout(&mut pool, &params, &config, None, Some(&mut sink));
    anyhow::ensure!(result.visible, "viewport too small for a field");

    let (rows, cols, used_rows) = grid_dims(&sink)?;
    println!("{}", render_field(rows, cols, used_rows, &result.items));
    println!(
        "{} slots, {} placed, {} skipped on a {}x{} grid ({} rows active).",
        result.slots_total, result.placed, result.skipped, cols, rows, used_rows
    );
    for item in &result.items {
        println!(
            "  #{:>2} {:?} at ({}, {}) {}x{} -> px ({:.1}, {:.1})",
            item.id,
            item.shape,
            item.footprint.row,
            item.footprint.col,
            item.footprint.w,
            item.footprint.h,
            item.position.x,
            item.position.y,
        );
    }
    Ok(())
}

fn grid_dims(sink: &VecSink) -> anyhow::Result<(u32, u32, u32)> {
    sink.as_slice()
        .iter()
        .find_map(|event| match event {
            LayoutEvent::GridBuilt {
                rows,
                cols,
                used_rows,
            } => Some((*rows, *cols, *used_rows)),
            _ => None,
        })
        .ok_or_else(|| anyhow::anyhow!("run emitted no grid event"))
}

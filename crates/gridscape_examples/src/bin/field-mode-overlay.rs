//! Renders the same pool in normal and overlay mode side by side; overlay
//! mode compresses the field into the upper part of the viewport.
use glam::Vec2;
use gridscape::prelude::{
    run_layout, LayoutConfig, LayoutEvent, LayoutMode, LayoutParams, Pool, VecSink,
};
use gridscape_examples::{init_tracing, render_field};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = LayoutConfig::new();
    let viewport = Vec2::new(900.0, 620.0);

    for mode in [LayoutMode::Normal, LayoutMode::Overlay] {
        let mut pool = Pool::new();
        pool.resize(20);

        let mut sink = VecSink::new();
        let params = LayoutParams::new(0.5, viewport).with_mode(mode);
        let result = run_layout(&mut pool, &params, &config, None, Some(&mut sink));

        let (rows, cols, used_rows) = sink
            .as_slice()
            .iter()
            .find_map(|event| match event {
                LayoutEvent::GridBuilt {
                    rows,
                    cols,
                    used_rows,
                } => Some((*rows, *cols, *used_rows)),
                _ => None,
            })
            .ok_or_else(|| anyhow::anyhow!("run emitted no grid event"))?;

        println!(
            "--- {mode:?}: {used_rows} of {rows} rows active, {} placed ---",
            result.placed
        );
        println!("{}", render_field(rows, cols, used_rows, &result.items));
    }
    Ok(())
}

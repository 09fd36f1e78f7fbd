//! ASCII rendering helpers shared by the example binaries.
use gridscape::prelude::{PlacedItem, Shape};

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// One display character per shape.
pub fn glyph(shape: Shape) -> char {
    match shape {
        Shape::Tree => 'T',
        Shape::Shrub => 's',
        Shape::House => 'H',
        Shape::Hut => 'h',
        Shape::Car => 'C',
        Shape::Cart => 'c',
        Shape::Cloud => '~',
        Shape::Sun => 'O',
    }
}

/// Renders placed items onto a `rows x cols` character field.
///
/// Free cells in the active region show as `.`, the reserved rows below it
/// as spaces. Each footprint is filled with its shape's glyph.
pub fn render_field(rows: u32, cols: u32, used_rows: u32, items: &[PlacedItem]) -> String {
    let mut canvas: Vec<Vec<char>> = (0..rows)
        .map(|row| {
            let fill = if row < used_rows { '.' } else { ' ' };
            vec![fill; cols as usize]
        })
        .collect();

    for item in items {
        let ch = glyph(item.shape);
        let rect = item.footprint;
        for row in rect.row..rect.bottom() {
            for col in rect.col..rect.right() {
                if let Some(cell) = canvas
                    .get_mut(row as usize)
                    .and_then(|r| r.get_mut(col as usize))
                {
                    *cell = ch;
                }
            }
        }
    }

    let mut out = String::with_capacity(((cols + 1) * rows) as usize);
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

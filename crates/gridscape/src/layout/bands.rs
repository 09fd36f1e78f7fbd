//! Row band rules: which rows of the field a shape may anchor in.
//!
//! Bands are authored as fractions of the used rows per breakpoint and shape,
//! with sparse per-mode override tables consulted first. Fractions convert to
//! anchor rows by flooring, and the band is clamped so the whole footprint
//! stays inside the used rows.
use crate::grid::{Breakpoint, LayoutMode};
use crate::pool::{Shape, ShapeFamily};

/// Inclusive range of anchor rows a footprint may start in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RowBand {
    pub top: u32,
    pub bottom: u32,
}

impl RowBand {
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    pub fn contains(&self, row: u32) -> bool {
        row >= self.top && row <= self.bottom
    }
}

type BandEntry = (Breakpoint, Shape, f32, f32);

/// Base band fractions `(top, bottom)` of the used rows.
///
/// Sky shapes hug the top, flora and buildings fill the mid-field, and
/// vehicles run along the bottom; narrower viewports get slightly wider
/// bands so small grids stay placeable.
const BASE: &[BandEntry] = &[
    (Breakpoint::Small, Shape::Cloud, 0.00, 0.30),
    (Breakpoint::Small, Shape::Sun, 0.00, 0.25),
    (Breakpoint::Small, Shape::Tree, 0.30, 0.80),
    (Breakpoint::Small, Shape::Shrub, 0.25, 0.80),
    (Breakpoint::Small, Shape::House, 0.35, 0.85),
    (Breakpoint::Small, Shape::Hut, 0.30, 0.85),
    (Breakpoint::Small, Shape::Car, 0.60, 1.00),
    (Breakpoint::Small, Shape::Cart, 0.60, 1.00),
    (Breakpoint::Medium, Shape::Cloud, 0.00, 0.25),
    (Breakpoint::Medium, Shape::Sun, 0.00, 0.22),
    (Breakpoint::Medium, Shape::Tree, 0.30, 0.75),
    (Breakpoint::Medium, Shape::Shrub, 0.28, 0.78),
    (Breakpoint::Medium, Shape::House, 0.35, 0.80),
    (Breakpoint::Medium, Shape::Hut, 0.32, 0.82),
    (Breakpoint::Medium, Shape::Car, 0.65, 1.00),
    (Breakpoint::Medium, Shape::Cart, 0.62, 1.00),
    (Breakpoint::Large, Shape::Cloud, 0.00, 0.22),
    (Breakpoint::Large, Shape::Sun, 0.00, 0.20),
    (Breakpoint::Large, Shape::Tree, 0.32, 0.72),
    (Breakpoint::Large, Shape::Shrub, 0.30, 0.75),
    (Breakpoint::Large, Shape::House, 0.36, 0.78),
    (Breakpoint::Large, Shape::Hut, 0.34, 0.80),
    (Breakpoint::Large, Shape::Car, 0.68, 1.00),
    (Breakpoint::Large, Shape::Cart, 0.65, 1.00),
];

/// Overlay mode: the survey panel trims the field from below, so sky gets
/// more headroom and vehicles start higher.
const OVERLAY: &[BandEntry] = &[
    (Breakpoint::Small, Shape::Cloud, 0.00, 0.35),
    (Breakpoint::Small, Shape::Sun, 0.00, 0.30),
    (Breakpoint::Small, Shape::Car, 0.55, 1.00),
    (Breakpoint::Small, Shape::Cart, 0.55, 1.00),
    (Breakpoint::Medium, Shape::Cloud, 0.00, 0.35),
    (Breakpoint::Medium, Shape::Sun, 0.00, 0.30),
    (Breakpoint::Medium, Shape::Car, 0.55, 1.00),
    (Breakpoint::Medium, Shape::Cart, 0.55, 1.00),
    (Breakpoint::Large, Shape::Cloud, 0.00, 0.35),
    (Breakpoint::Large, Shape::Sun, 0.00, 0.30),
    (Breakpoint::Large, Shape::Car, 0.55, 1.00),
    (Breakpoint::Large, Shape::Cart, 0.55, 1.00),
];

/// Alternate arrangement: flora spreads wider and traffic pulls up toward
/// the mid-field.
const ALTERNATE: &[BandEntry] = &[
    (Breakpoint::Small, Shape::Tree, 0.25, 0.85),
    (Breakpoint::Small, Shape::Shrub, 0.22, 0.85),
    (Breakpoint::Small, Shape::Car, 0.55, 0.95),
    (Breakpoint::Small, Shape::Cart, 0.55, 0.95),
    (Breakpoint::Medium, Shape::Tree, 0.25, 0.85),
    (Breakpoint::Medium, Shape::Shrub, 0.22, 0.85),
    (Breakpoint::Medium, Shape::Car, 0.55, 0.95),
    (Breakpoint::Medium, Shape::Cart, 0.55, 0.95),
    (Breakpoint::Large, Shape::Tree, 0.25, 0.85),
    (Breakpoint::Large, Shape::Shrub, 0.22, 0.85),
    (Breakpoint::Large, Shape::Car, 0.55, 0.95),
    (Breakpoint::Large, Shape::Cart, 0.55, 0.95),
];

fn lookup(table: &[BandEntry], breakpoint: Breakpoint, shape: Shape) -> Option<(f32, f32)> {
    table
        .iter()
        .find(|(b, s, _, _)| *b == breakpoint && *s == shape)
        .map(|(_, _, top, bottom)| (*top, *bottom))
}

/// Generic band for shapes without an authored entry.
fn family_fallback(family: ShapeFamily) -> (f32, f32) {
    match family {
        ShapeFamily::Sky => (0.0, 0.30),
        _ => (0.30, 1.0),
    }
}

/// Resolves the anchor-row band for a shape, or `None` if the footprint is
/// too tall for the used rows.
///
/// Mode override tables win over the base table per `(breakpoint, shape)`;
/// missing entries fall through. The bottom is clamped so an anchor at the
/// band bottom still fits `footprint_h` rows inside the used region.
pub fn band_for(
    shape: Shape,
    used_rows: u32,
    breakpoint: Breakpoint,
    mode: LayoutMode,
    footprint_h: u32,
) -> Option<RowBand> {
    if used_rows == 0 || footprint_h == 0 || footprint_h > used_rows {
        return None;
    }

    let mode_table: Option<&[BandEntry]> = match mode {
        LayoutMode::Normal => None,
        LayoutMode::Overlay => Some(OVERLAY),
        LayoutMode::Alternate => Some(ALTERNATE),
    };
    let (top_f, bottom_f) = mode_table
        .and_then(|t| lookup(t, breakpoint, shape))
        .or_else(|| lookup(BASE, breakpoint, shape))
        .unwrap_or_else(|| family_fallback(shape.family()));

    let max_anchor = used_rows - footprint_h;
    let top = (used_rows as f32 * top_f).floor() as u32;
    let bottom = (used_rows as f32 * bottom_f).floor() as u32;
    let bottom = bottom.min(max_anchor);
    let top = top.min(bottom);
    Some(RowBand { top, bottom })
}

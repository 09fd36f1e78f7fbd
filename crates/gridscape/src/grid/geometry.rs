//! Field grid construction from a viewport and a grid spec.
//!
//! The grid is square-celled and horizontally centered: `rows` cells span the
//! viewport height exactly, and as many whole columns as fit are laid out
//! symmetrically inside the width. Geometry is derived fresh on every layout
//! run and never persisted.
use glam::Vec2;

use crate::grid::spec::GridSpec;
use crate::hash;

/// Derived grid geometry for one layout run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldGrid {
    /// Total rows; the viewport height divided into this many square cells.
    pub rows: u32,
    /// Whole columns fitting the viewport width.
    pub cols: u32,
    /// Cell edge length in logical pixels.
    pub cell_size_px: f32,
    /// Rows from the top eligible for placement; the rest is overflow space.
    pub used_rows: u32,
    /// Pixel position of the grid's top-left corner (centers the columns).
    pub origin_px: Vec2,
}

impl FieldGrid {
    /// Upper bound on derived columns. Wider viewports get a field clipped
    /// to this many centered columns.
    pub const MAX_COLS: u32 = 1024;

    /// Derives the grid for a logical viewport size.
    ///
    /// A non-positive or non-finite viewport, or a width too narrow for a
    /// single column, produces a degenerate grid; callers treat that as
    /// "field invisible" and skip placement entirely. Columns are capped at
    /// [`Self::MAX_COLS`].
    pub fn build(viewport: Vec2, spec: &GridSpec) -> Self {
        let rows = spec.rows;
        if viewport.x <= 0.0 || viewport.y <= 0.0 || rows == 0 {
            return Self::degenerate(rows);
        }

        let cell_size_px = viewport.y / rows as f32;
        let fit = viewport.x / cell_size_px;
        if !fit.is_finite() {
            return Self::degenerate(rows);
        }
        let cols = (fit.floor() as u32).min(Self::MAX_COLS);
        if cols == 0 {
            return Self::degenerate(rows);
        }

        let used_rows = ((rows as f32) * spec.use_top_ratio)
            .round()
            .clamp(1.0, rows as f32) as u32;
        let origin_px = Vec2::new((viewport.x - cols as f32 * cell_size_px) * 0.5, 0.0);

        Self {
            rows,
            cols,
            cell_size_px,
            used_rows,
            origin_px,
        }
    }

    fn degenerate(rows: u32) -> Self {
        Self {
            rows,
            cols: 0,
            cell_size_px: 0.0,
            used_rows: 0,
            origin_px: Vec2::ZERO,
        }
    }

    /// Whether the viewport was too small to place anything.
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Pixel position of a footprint's center.
    pub fn rect_center_px(&self, rect: &crate::grid::mask::CellRect) -> Vec2 {
        self.origin_px
            + Vec2::new(
                (rect.col as f32 + rect.w as f32 * 0.5) * self.cell_size_px,
                (rect.row as f32 + rect.h as f32 * 0.5) * self.cell_size_px,
            )
    }

    /// Grid center in fractional cell coordinates, `(row, col)`.
    pub fn center_cell(&self) -> (f32, f32) {
        (self.rows as f32 * 0.5, self.cols as f32 * 0.5)
    }

    /// Per-run salt derived from the grid dimensions, so placements vary
    /// meaningfully when the grid reflows while staying deterministic.
    pub fn default_salt(&self) -> u32 {
        hash::hash32(&format!("salt|{}|{}", self.rows, self.cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_span_viewport_height() {
        let grid = FieldGrid::build(Vec2::new(1200.0, 792.0), &GridSpec::new(24, 0.88));
        assert_eq!(grid.rows, 24);
        assert_eq!(grid.cell_size_px, 33.0);
        assert_eq!(grid.cols, 36);
        assert_eq!(grid.used_rows, 21);
        assert!(!grid.is_degenerate());
    }

    #[test]
    fn columns_are_centered() {
        let grid = FieldGrid::build(Vec2::new(100.0, 80.0), &GridSpec::new(8, 1.0));
        // cell = 10px, 10 columns, no slack.
        assert_eq!(grid.cols, 10);
        assert_eq!(grid.origin_px, Vec2::ZERO);

        let grid = FieldGrid::build(Vec2::new(105.0, 80.0), &GridSpec::new(8, 1.0));
        assert_eq!(grid.cols, 10);
        assert!((grid.origin_px.x - 2.5).abs() < 1e-5);
    }

    #[test]
    fn degenerate_viewports_are_flagged() {
        let spec = GridSpec::new(20, 0.85);
        assert!(FieldGrid::build(Vec2::new(0.0, 600.0), &spec).is_degenerate());
        assert!(FieldGrid::build(Vec2::new(800.0, 0.0), &spec).is_degenerate());
        // Width narrower than one cell.
        assert!(FieldGrid::build(Vec2::new(10.0, 600.0), &spec).is_degenerate());
    }

    #[test]
    fn non_finite_viewports_degenerate() {
        let spec = GridSpec::new(20, 0.85);
        assert!(FieldGrid::build(Vec2::new(f32::INFINITY, 600.0), &spec).is_degenerate());
        assert!(FieldGrid::build(Vec2::new(f32::NAN, 600.0), &spec).is_degenerate());
        assert!(FieldGrid::build(Vec2::new(800.0, f32::NAN), &spec).is_degenerate());
    }

    #[test]
    fn extreme_widths_clamp_to_the_column_cap() {
        let grid = FieldGrid::build(Vec2::new(1.0e12, 600.0), &GridSpec::new(20, 0.85));
        assert_eq!(grid.cols, FieldGrid::MAX_COLS);
        assert_eq!(grid.used_rows, 17);
        assert!(!grid.is_degenerate());
    }

    #[test]
    fn used_rows_is_at_least_one() {
        let grid = FieldGrid::build(Vec2::new(400.0, 400.0), &GridSpec::new(4, 0.05));
        assert_eq!(grid.used_rows, 1);
        let grid = FieldGrid::build(Vec2::new(400.0, 400.0), &GridSpec::new(4, 1.0));
        assert_eq!(grid.used_rows, 4);
    }

    #[test]
    fn pixel_centers() {
        let grid = FieldGrid::build(Vec2::new(100.0, 80.0), &GridSpec::new(8, 1.0));
        let cell = crate::grid::mask::CellRect::new(0, 0, 1, 1);
        assert_eq!(grid.rect_center_px(&cell), Vec2::new(5.0, 5.0));

        let rect = crate::grid::mask::CellRect::new(2, 3, 2, 1);
        assert_eq!(grid.rect_center_px(&rect), Vec2::new(40.0, 25.0));
    }

    #[test]
    fn salt_tracks_grid_dimensions() {
        let spec = GridSpec::new(20, 0.85);
        let a = FieldGrid::build(Vec2::new(800.0, 600.0), &spec);
        let b = FieldGrid::build(Vec2::new(1100.0, 600.0), &spec);
        assert_eq!(a.default_salt(), a.default_salt());
        assert_ne!(a.default_salt(), b.default_salt());
    }
}

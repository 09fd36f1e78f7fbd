//! Cell rectangles and the per-run occupancy mask.
//!
//! The mask tracks every cell of the field grid as free, forbidden or claimed.
//! It is built fresh for a single layout run, exclusively owned by it, and
//! discarded afterwards. Claims are atomic: either every cell of a footprint
//! is granted or the mask is left untouched.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangle in grid cells: `w × h` cells anchored at `(row, col)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Topmost row of the rectangle.
    pub row: u32,
    /// Leftmost column of the rectangle.
    pub col: u32,
    /// Width in cells, ≥ 1 for any placeable footprint.
    pub w: u32,
    /// Height in cells, ≥ 1 for any placeable footprint.
    pub h: u32,
}

impl CellRect {
    pub fn new(row: u32, col: u32, w: u32, h: u32) -> Self {
        Self { row, col, w, h }
    }

    /// One past the rightmost column, saturating at `u32::MAX`.
    pub fn right(&self) -> u32 {
        self.col.saturating_add(self.w)
    }

    /// One past the bottom row, saturating at `u32::MAX`.
    pub fn bottom(&self) -> u32 {
        self.row.saturating_add(self.h)
    }

    /// Whether this rectangle shares at least one cell with `other`.
    pub fn intersects(&self, other: &CellRect) -> bool {
        self.col < other.right()
            && other.col < self.right()
            && self.row < other.bottom()
            && other.row < self.bottom()
    }

    /// Whether the cell `(row, col)` lies inside this rectangle.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.row && row < self.bottom() && col >= self.col && col < self.right()
    }
}

/// Static forbidden-cell predicate supplied by the embedding application.
///
/// Rect-shaped exclusions go into [`crate::grid::GridSpec`]; this trait covers
/// the irregular ones (e.g. cells under a non-rectangular UI element). Blocked
/// cells are baked into the mask once per run.
pub trait CellFilter: Send + Sync {
    fn blocks(&self, row: u32, col: u32) -> bool;
}

impl<F> CellFilter for F
where
    F: Fn(u32, u32) -> bool + Send + Sync,
{
    fn blocks(&self, row: u32, col: u32) -> bool {
        self(row, col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Free,
    Forbidden,
    Claimed,
}

/// Per-run ownership grid over `rows × cols` cells.
#[derive(Clone, Debug)]
pub struct OccupancyMask {
    rows: u32,
    cols: u32,
    cells: Vec<CellState>,
}

impl OccupancyMask {
    /// Creates a mask with every cell free.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Free; (rows as usize) * (cols as usize)],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    fn index(&self, row: u32, col: u32) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some((row as usize) * (self.cols as usize) + (col as usize))
    }

    /// Marks every in-bounds cell of `rect` forbidden; out-of-bounds parts are
    /// silently dropped.
    pub fn forbid_rect(&mut self, rect: &CellRect) {
        for row in rect.row..rect.bottom().min(self.rows) {
            for col in rect.col..rect.right().min(self.cols) {
                if let Some(i) = self.index(row, col) {
                    self.cells[i] = CellState::Forbidden;
                }
            }
        }
    }

    /// Marks every cell the filter blocks as forbidden.
    pub fn forbid_where(&mut self, filter: &dyn CellFilter) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if filter.blocks(row, col) {
                    if let Some(i) = self.index(row, col) {
                        self.cells[i] = CellState::Forbidden;
                    }
                }
            }
        }
    }

    /// Whether `(row, col)` is in bounds, unforbidden and unclaimed.
    pub fn is_free(&self, row: u32, col: u32) -> bool {
        self.index(row, col)
            .map(|i| self.cells[i] == CellState::Free)
            .unwrap_or(false)
    }

    /// Whether every cell of `rect` is free. Empty rects are never free.
    pub fn rect_free(&self, rect: &CellRect) -> bool {
        if rect.w == 0 || rect.h == 0 {
            return false;
        }
        if rect.bottom() > self.rows || rect.right() > self.cols {
            return false;
        }
        for row in rect.row..rect.bottom() {
            for col in rect.col..rect.right() {
                if !self.is_free(row, col) {
                    return false;
                }
            }
        }
        true
    }

    /// Claims the `w × h` rectangle anchored at `(row, col)`.
    ///
    /// Succeeds iff every cell is in bounds, unforbidden and unclaimed; on
    /// success all cells are claimed together and the rect is returned. On
    /// failure the mask is unchanged.
    pub fn try_place_at(&mut self, row: u32, col: u32, w: u32, h: u32) -> Option<CellRect> {
        let rect = CellRect::new(row, col, w, h);
        if !self.rect_free(&rect) {
            return None;
        }
        for r in rect.row..rect.bottom() {
            for c in rect.col..rect.right() {
                if let Some(i) = self.index(r, c) {
                    self.cells[i] = CellState::Claimed;
                }
            }
        }
        Some(rect)
    }

    /// Number of cells still free, mostly useful in tests and diagnostics.
    pub fn free_cells(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellState::Free).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_geometry() {
        let a = CellRect::new(1, 2, 3, 2);
        assert_eq!(a.right(), 5);
        assert_eq!(a.bottom(), 3);
        assert!(a.contains(2, 4));
        assert!(!a.contains(3, 4));

        let b = CellRect::new(2, 4, 2, 2);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = CellRect::new(3, 0, 1, 1);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn claim_succeeds_on_free_rect() {
        let mut mask = OccupancyMask::new(4, 6);
        let rect = mask.try_place_at(1, 1, 2, 2).expect("rect should be free");
        assert_eq!(rect, CellRect::new(1, 1, 2, 2));
        assert!(!mask.is_free(1, 1));
        assert!(!mask.is_free(2, 2));
        assert!(mask.is_free(0, 0));
    }

    #[test]
    fn overlapping_claim_is_rejected() {
        let mut mask = OccupancyMask::new(4, 6);
        assert!(mask.try_place_at(0, 0, 2, 2).is_some());
        assert!(mask.try_place_at(1, 1, 2, 2).is_none());
        // The failed claim must not have marked any cell.
        assert!(mask.is_free(2, 2));
    }

    #[test]
    fn out_of_bounds_claim_is_rejected() {
        let mut mask = OccupancyMask::new(3, 3);
        assert!(mask.try_place_at(2, 2, 2, 1).is_none());
        assert!(mask.try_place_at(0, 0, 4, 1).is_none());
        assert_eq!(mask.free_cells(), 9);
    }

    #[test]
    fn extreme_anchors_are_rejected_without_claiming() {
        let mut mask = OccupancyMask::new(4, 4);
        assert!(mask.try_place_at(u32::MAX, 0, 1, 1).is_none());
        assert!(mask.try_place_at(0, u32::MAX, 1, 1).is_none());
        assert!(mask.try_place_at(u32::MAX - 1, 0, 1, 4).is_none());
        assert!(!mask.rect_free(&CellRect::new(u32::MAX, 0, 1, 2)));
        assert_eq!(mask.free_cells(), 16);
    }

    #[test]
    fn zero_sized_rect_is_never_free() {
        let mask = OccupancyMask::new(3, 3);
        assert!(!mask.rect_free(&CellRect::new(0, 0, 0, 1)));
        assert!(!mask.rect_free(&CellRect::new(0, 0, 1, 0)));
    }

    #[test]
    fn forbidden_rect_blocks_claims() {
        let mut mask = OccupancyMask::new(4, 4);
        mask.forbid_rect(&CellRect::new(0, 0, 2, 4));
        assert!(mask.try_place_at(0, 0, 1, 1).is_none());
        assert!(mask.try_place_at(0, 2, 1, 1).is_some());
    }

    #[test]
    fn forbid_rect_clamps_to_bounds() {
        let mut mask = OccupancyMask::new(2, 2);
        mask.forbid_rect(&CellRect::new(1, 1, 5, 5));
        assert_eq!(mask.free_cells(), 3);
    }

    #[test]
    fn filter_bakes_forbidden_cells() {
        let mut mask = OccupancyMask::new(3, 3);
        let diagonal = |row: u32, col: u32| row == col;
        mask.forbid_where(&diagonal);
        assert!(!mask.is_free(0, 0));
        assert!(!mask.is_free(2, 2));
        assert!(mask.is_free(0, 1));
        assert_eq!(mask.free_cells(), 6);
    }
}

//! Scored candidate search and greedy footprint claiming.
//!
//! For every slot the placer enumerates free anchor positions inside the
//! shape's row band, scores them, and claims the best one. Ground shapes get
//! a hashed lane and a pull toward a preferred row; sky shapes repel each
//! other to spread across the sky. When a band is saturated, sky shapes walk
//! a center-ordered cursor over the grid and every shape may retry in a
//! widened row range at a score penalty. A slot that still finds nothing is
//! omitted, never an error.
use crate::grid::{CellRect, FieldGrid, OccupancyMask};
use crate::hash;
use crate::layout::bands::RowBand;
use crate::pool::{Shape, ShapeFamily};

/// Pull toward the grid center, applied to the normalized 2D distance.
const W_CENTER: f64 = 1.2;
/// Pull toward the preferred row inside the band.
const W_ROW_PULL: f64 = 0.6;
/// Flat penalty for landing outside the slot's hashed lane.
const W_LANE_MISMATCH: f64 = 0.7;
/// Penalty ramp for anchors close to the left or right grid edge.
const W_EDGE: f64 = 0.9;
/// Width of the edge penalty ramp as a fraction of the columns.
const EDGE_MARGIN: f64 = 0.12;
/// Pull toward the center of the free segment an anchor sits in.
const W_SEGMENT_CENTER: f64 = 0.4;
/// Deterministic jitter amplitude; a tie-breaker, not a placement driver.
const W_JITTER: f64 = 0.08;
/// Reward for vehicle anchors near the band bottom.
const W_VEHICLE_LOW: f64 = 0.8;
/// Reward for sky anchors far away from already-placed sky items.
const W_SKY_SPREAD: f64 = 2.2;
/// Rows added above and below the band by the widened fallback.
const WIDEN_PAD: u32 = 2;
/// Fixed score penalty on widened candidates so in-band spots always win.
const WIDEN_PENALTY: f64 = 8.0;
/// Preferred row depth measured from the band top.
const PREFERRED_DEPTH: f64 = 0.30;

/// Ephemeral placement candidate for one slot.
///
/// Generated in bulk, sorted descending by score with a `(row, col)`
/// tie-break, consumed greedily, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub row: u32,
    pub col: u32,
    pub score: f64,
}

/// Per-run placement state: the occupancy mask plus the sky bookkeeping.
///
/// A placer lives for exactly one layout run; nothing in it survives into
/// the next call.
pub struct FieldPlacer<'a> {
    grid: &'a FieldGrid,
    mask: OccupancyMask,
    salt: u32,
    /// Footprint centers of placed sky items, in fractional cell coordinates.
    sky_taken: Vec<(f64, f64)>,
    /// Grid-wide cells ordered by distance to the grid center, built on the
    /// first sky fallback and reused for the rest of the run.
    sky_ring: Option<Vec<(u32, u32)>>,
    sky_cursor: usize,
}

impl<'a> FieldPlacer<'a> {
    pub fn new(grid: &'a FieldGrid, mask: OccupancyMask, salt: u32) -> Self {
        Self {
            grid,
            mask,
            salt,
            sky_taken: Vec::new(),
            sky_ring: None,
            sky_cursor: 0,
        }
    }

    pub fn mask(&self) -> &OccupancyMask {
        &self.mask
    }

    /// Finds and claims a footprint for one slot.
    ///
    /// Returns the claimed rect and whether the widened fallback produced
    /// it, or `None` if the slot cannot be placed anywhere.
    pub fn place(&mut self, id: u32, shape: Shape, band: RowBand) -> Option<(CellRect, bool)> {
        let (w, h) = shape.size();
        let sky = shape.is_sky();

        let primary = self.candidates(id, shape, band);
        if let Some(rect) = self.claim(&primary, w, h) {
            if sky {
                self.note_sky(&rect);
            }
            return Some((rect, false));
        }

        if sky {
            if let Some(rect) = self.cursor_claim(band, w, h) {
                self.note_sky(&rect);
                return Some((rect, false));
            }
        }

        let widened = self.widen(band, h);
        if widened != band {
            let fallback = self.scored_candidates(id, shape, widened, WIDEN_PENALTY);
            if let Some(rect) = self.claim(&fallback, w, h) {
                if sky {
                    self.note_sky(&rect);
                }
                return Some((rect, true));
            }
        }
        None
    }

    /// Scored, sorted candidates for the primary in-band search.
    pub fn candidates(&self, id: u32, shape: Shape, band: RowBand) -> Vec<Candidate> {
        self.scored_candidates(id, shape, band, 0.0)
    }

    fn scored_candidates(
        &self,
        id: u32,
        shape: Shape,
        band: RowBand,
        penalty: f64,
    ) -> Vec<Candidate> {
        let (w, h) = shape.size();
        if w > self.grid.cols {
            return Vec::new();
        }

        let cols = self.grid.cols as f64;
        let rows = self.grid.rows as f64;
        let sky = shape.is_sky();
        let vehicle = shape.family() == ShapeFamily::Vehicle;
        let lane = hash::hash_pick(&format!("{}|{id}|{}", shape.family().tag(), self.salt), 3);
        let preferred = band.top as f64 + (band.height() - 1) as f64 * PREFERRED_DEPTH;

        let score_at = |row: u32, col: u32, seg_center: f64| -> f64 {
            let col_center = col as f64 + w as f64 * 0.5;
            let row_center = row as f64 + h as f64 * 0.5;
            let dx = (col_center - cols * 0.5) / cols;
            let dy = (row_center - rows * 0.5) / rows;
            let mut score = -W_CENTER * (dx * dx + dy * dy).sqrt();

            if sky {
                if !self.sky_taken.is_empty() {
                    let nearest = self
                        .sky_taken
                        .iter()
                        .map(|(r, c)| {
                            let dr = row_center - r;
                            let dc = col_center - c;
                            (dr * dr + dc * dc).sqrt()
                        })
                        .fold(f64::INFINITY, f64::min);
                    score += W_SKY_SPREAD * nearest / rows.max(cols);
                }
            } else {
                score -= W_ROW_PULL * (row as f64 - preferred).abs() / rows;
                if lane_of(col_center, cols) != lane {
                    score -= W_LANE_MISMATCH;
                }
                let edge = col.min(self.grid.cols - (col + w)) as f64 / cols;
                if edge < EDGE_MARGIN {
                    score -= W_EDGE * (EDGE_MARGIN - edge) / EDGE_MARGIN;
                }
                score -= W_SEGMENT_CENTER * (col as f64 - seg_center).abs() / cols;
                if vehicle {
                    let depth = if band.height() > 1 {
                        row.saturating_sub(band.top) as f64 / (band.height() - 1) as f64
                    } else {
                        1.0
                    };
                    score += W_VEHICLE_LOW * depth;
                }
            }

            let jitter = hash::hash01(&format!("jitter|{id}|{row}|{col}|{}", self.salt));
            score + W_JITTER * (jitter - 0.5) - penalty
        };

        // Rows outward from the preferred row, so generation order mirrors
        // the visual preference even before scoring.
        let mut band_rows: Vec<u32> = (band.top..=band.bottom).collect();
        band_rows.sort_by(|a, b| {
            let da = (*a as f64 - preferred).abs();
            let db = (*b as f64 - preferred).abs();
            da.total_cmp(&db).then(a.cmp(b))
        });

        let mut out = Vec::new();
        for row in band_rows {
            for (a0, a1) in self.anchor_segments(row, w, h) {
                let seg_center = (a0 + a1) as f64 * 0.5;
                for col in a0..=a1 {
                    out.push(Candidate {
                        row,
                        col,
                        score: score_at(row, col, seg_center),
                    });
                }
            }
        }
        out.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| (a.row, a.col).cmp(&(b.row, b.col)))
        });
        out
    }

    /// Maximal runs of columns where the full `w × h` footprint is free when
    /// anchored at `row`.
    fn anchor_segments(&self, row: u32, w: u32, h: u32) -> Vec<(u32, u32)> {
        let mut segments = Vec::new();
        let max_col = self.grid.cols - w;
        let mut start: Option<u32> = None;
        for col in 0..=max_col {
            let free = self.mask.rect_free(&CellRect::new(row, col, w, h));
            match (free, start) {
                (true, None) => start = Some(col),
                (false, Some(s)) => {
                    segments.push((s, col - 1));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            segments.push((s, max_col));
        }
        segments
    }

    fn claim(&mut self, candidates: &[Candidate], w: u32, h: u32) -> Option<CellRect> {
        for candidate in candidates {
            if let Some(rect) = self.mask.try_place_at(candidate.row, candidate.col, w, h) {
                return Some(rect);
            }
        }
        None
    }

    fn note_sky(&mut self, rect: &CellRect) {
        self.sky_taken.push((
            rect.row as f64 + rect.h as f64 * 0.5,
            rect.col as f64 + rect.w as f64 * 0.5,
        ));
    }

    fn widen(&self, band: RowBand, h: u32) -> RowBand {
        let max_anchor = self.grid.used_rows.saturating_sub(h);
        let top = band.top.saturating_sub(WIDEN_PAD);
        let bottom = (band.bottom + WIDEN_PAD).min(max_anchor);
        RowBand {
            top: top.min(bottom),
            bottom,
        }
    }

    /// Walks the center-ordered cell ring looking for a claimable anchor in
    /// the band. The cursor resumes after its last success and wraps at most
    /// once per attempt.
    fn cursor_claim(&mut self, band: RowBand, w: u32, h: u32) -> Option<CellRect> {
        let grid = self.grid;
        let ring = self.sky_ring.get_or_insert_with(|| build_ring(grid));
        let len = ring.len();
        for step in 0..len {
            let idx = (self.sky_cursor + step) % len;
            let (row, col) = ring[idx];
            if !band.contains(row) {
                continue;
            }
            if let Some(rect) = self.mask.try_place_at(row, col, w, h) {
                self.sky_cursor = (idx + 1) % len;
                return Some(rect);
            }
        }
        None
    }
}

fn lane_of(col_center: f64, cols: f64) -> u32 {
    ((col_center / cols * 3.0).floor() as u32).min(2)
}

fn build_ring(grid: &FieldGrid) -> Vec<(u32, u32)> {
    let (cy, cx) = grid.center_cell();
    let (cy, cx) = (f64::from(cy), f64::from(cx));
    let mut cells: Vec<(u32, u32)> = (0..grid.rows)
        .flat_map(|r| (0..grid.cols).map(move |c| (r, c)))
        .collect();
    cells.sort_by(|a, b| {
        let da = ring_dist(*a, cy, cx);
        let db = ring_dist(*b, cy, cx);
        da.total_cmp(&db).then(a.cmp(b))
    });
    cells
}

fn ring_dist((row, col): (u32, u32), cy: f64, cx: f64) -> f64 {
    let dr = row as f64 + 0.5 - cy;
    let dc = col as f64 + 0.5 - cx;
    dr * dr + dc * dc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use glam::Vec2;

    fn grid(width: f32, height: f32, rows: u32) -> FieldGrid {
        FieldGrid::build(Vec2::new(width, height), &GridSpec::new(rows, 1.0))
    }

    fn placer(grid: &FieldGrid, salt: u32) -> FieldPlacer<'_> {
        let mask = OccupancyMask::new(grid.rows, grid.cols);
        FieldPlacer::new(grid, mask, salt)
    }

    #[test]
    fn placements_stay_in_band_and_bounds() {
        let grid = grid(100.0, 80.0, 8);
        let mut placer = placer(&grid, 11);
        let band = RowBand { top: 2, bottom: 5 };

        let mut rects = Vec::new();
        for id in 0..10 {
            let (rect, widened) = placer.place(id, Shape::Hut, band).expect("room in band");
            assert!(!widened);
            assert!(rect.row >= band.top && rect.row <= band.bottom);
            assert!(rect.right() <= grid.cols && rect.bottom() <= grid.rows);
            rects.push(rect);
        }
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn vehicles_prefer_the_band_bottom() {
        let grid = grid(100.0, 100.0, 10);
        let mut placer = placer(&grid, 7);
        let band = RowBand { top: 6, bottom: 9 };

        let (rect, widened) = placer.place(1, Shape::Car, band).expect("car placed");
        assert!(!widened);
        assert_eq!(rect.row, 9);
    }

    #[test]
    fn sky_items_spread_apart() {
        let grid = grid(120.0, 100.0, 10);
        let mut placer = placer(&grid, 3);
        let band = RowBand { top: 0, bottom: 2 };

        let (first, _) = placer.place(0, Shape::Cloud, band).expect("first cloud");
        let (second, _) = placer.place(1, Shape::Cloud, band).expect("second cloud");
        let c0 = first.col as f64 + 1.0;
        let c1 = second.col as f64 + 1.0;
        assert!((c0 - c1).abs() >= 3.0, "clouds bunched: {first:?} {second:?}");
    }

    #[test]
    fn full_band_overflows_to_widened_rows() {
        let grid = grid(60.0, 60.0, 6);
        let mut placer = placer(&grid, 5);
        let band = RowBand { top: 2, bottom: 2 };

        for id in 0..6 {
            let (rect, widened) = placer.place(id, Shape::Shrub, band).expect("in band");
            assert_eq!(rect.row, 2);
            assert!(!widened);
        }

        let (rect, widened) = placer.place(6, Shape::Shrub, band).expect("widened");
        assert!(widened);
        assert_ne!(rect.row, 2);
        assert!(rect.row <= 4);
    }

    #[test]
    fn exhausted_grid_places_nothing() {
        let grid = grid(20.0, 20.0, 2);
        let mut placer = placer(&grid, 1);
        let band = RowBand { top: 0, bottom: 1 };

        for id in 0..4 {
            placer.place(id, Shape::Cart, band).expect("free cell left");
        }
        assert!(placer.place(9, Shape::Cart, band).is_none());
        assert_eq!(placer.mask().free_cells(), 0);

        // Sky goes through the cursor walk as well; it must terminate.
        assert!(placer.place(10, Shape::Sun, band).is_none());
    }

    #[test]
    fn widened_candidates_score_below_in_band_ones() {
        let grid = grid(60.0, 60.0, 6);
        let placer = placer(&grid, 5);
        let band = RowBand { top: 2, bottom: 2 };

        let in_band = placer.candidates(8, Shape::Shrub, band);
        let widened =
            placer.scored_candidates(8, Shape::Shrub, RowBand { top: 0, bottom: 4 }, WIDEN_PENALTY);
        let best_in_band = in_band.first().expect("candidates").score;
        let best_widened = widened.first().expect("candidates").score;
        assert!(best_widened < best_in_band);
    }

    #[test]
    fn identical_runs_claim_identical_footprints() {
        let grid = grid(110.0, 90.0, 9);
        let shapes = [
            (0, Shape::Tree, RowBand { top: 2, bottom: 6 }),
            (1, Shape::House, RowBand { top: 3, bottom: 6 }),
            (2, Shape::Car, RowBand { top: 5, bottom: 8 }),
            (3, Shape::Cloud, RowBand { top: 0, bottom: 1 }),
            (4, Shape::Sun, RowBand { top: 0, bottom: 1 }),
        ];

        let mut a = placer(&grid, 42);
        let mut b = placer(&grid, 42);
        for (id, shape, band) in shapes {
            assert_eq!(a.place(id, shape, band), b.place(id, shape, band));
        }
    }

    #[test]
    fn candidate_order_is_score_descending() {
        let grid = grid(100.0, 80.0, 8);
        let placer = placer(&grid, 2);
        let cands = placer.candidates(3, Shape::Shrub, RowBand { top: 2, bottom: 5 });
        assert!(!cands.is_empty());
        for pair in cands.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

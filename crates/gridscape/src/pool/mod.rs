//! Persistent slot pool: category allocation and per-run shape planning.
use crate::grid::CellRect;
use glam::Vec2;

pub mod allocate;
pub mod plan;
pub mod shapes;

pub use allocate::{rebalance, target_counts};
pub use plan::assign_shapes;
pub use shapes::{Category, Shape, ShapeFamily};

/// One persistent slot in the pool.
///
/// The id and category survive across runs; shape, footprint, and position
/// are per-run outputs cleared before every layout pass.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Slot {
    pub id: u32,
    pub category: Category,
    pub shape: Option<Shape>,
    pub footprint: Option<CellRect>,
    pub position: Option<Vec2>,
}

impl Slot {
    fn new(id: u32, category: Category) -> Self {
        Self {
            id,
            category,
            shape: None,
            footprint: None,
            position: None,
        }
    }

    /// Footprint size in cells `(w, h)`, derived from the planned shape.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.shape.map(Shape::size)
    }
}

/// Pool of slots that persists across layout runs.
///
/// Slots keep their ids and categories between runs so that small input
/// changes reshuffle as little as possible; only [`rebalance`] moves slots
/// between categories, and only by the minimal amount.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    slots: Vec<Slot>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    /// Grows or shrinks the pool to `n` slots.
    ///
    /// Growth appends fresh slots with ids unique within the pool; shrinking
    /// removes from the tail so surviving slots are untouched. New slots
    /// start in [`Category::Flora`] and get their real category from the
    /// next [`rebalance`] pass.
    pub fn resize(&mut self, n: usize) {
        if n < self.slots.len() {
            self.slots.truncate(n);
            return;
        }
        let mut next_id = self.slots.iter().map(|s| s.id + 1).max().unwrap_or(0);
        while self.slots.len() < n {
            self.slots.push(Slot::new(next_id, Category::Flora));
            next_id += 1;
        }
    }

    /// Slot count per category, in [`Category::ALL`] order.
    pub fn counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for slot in &self.slots {
            let idx = Category::ALL
                .iter()
                .position(|c| *c == slot.category)
                .unwrap_or(0);
            counts[idx] += 1;
        }
        counts
    }

    /// Clears all per-run outputs so a fresh layout pass starts clean.
    pub(crate) fn clear_run_state(&mut self) {
        for slot in &mut self.slots {
            slot.shape = None;
            slot.footprint = None;
            slot.position = None;
        }
    }
}

#![forbid(unsafe_code)]
//! gridscape: Deterministic grid placement for a decorative item field.
//!
//! Modules:
//! - grid: viewport-derived cell geometry, occupancy mask, authored grid specs
//! - pool: the slot pool, signal-driven category allocation, shape planning
//! - layout: row bands, scored candidate search, and the run loop
//! - hash: the string-keyed hash primitives every derivation shares
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod grid;
pub mod hash;
pub mod layout;
pub mod pool;

/// Convenient re-exports for common types. Import with `use gridscape::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{
        Breakpoint, CellFilter, CellRect, FieldGrid, GridSpec, LayoutMode, OccupancyMask,
        SpecTable,
    };
    pub use crate::hash::{hash01, hash32, hash_pick};
    pub use crate::layout::events::{
        EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::layout::runner::{
        run_layout, LayoutConfig, LayoutParams, LayoutResult, LayoutRunner, PlacedItem,
    };
    pub use crate::layout::{band_for, Candidate, FieldPlacer, RowBand};
    pub use crate::pool::{
        assign_shapes, rebalance, target_counts, Category, Pool, Shape, ShapeFamily, Slot,
    };
}

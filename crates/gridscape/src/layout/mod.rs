//! Placement pipeline: row bands, candidate search and the run loop.
//!
//! [`run_layout`] (or [`LayoutRunner`] for reuse across runs) turns a pool
//! plus the current viewport state into a list of non-overlapping
//! [`PlacedItem`]s. [`bands`] scopes each shape to a vertical region,
//! [`search`] finds and scores free footprints inside it, and [`events`]
//! lets callers observe the run.

pub mod bands;
pub mod events;
pub mod runner;
pub mod search;

pub use bands::{band_for, RowBand};
pub use events::{EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink};
pub use runner::{
    run_layout, LayoutConfig, LayoutParams, LayoutResult, LayoutRunner, PlacedItem,
};
pub use search::{Candidate, FieldPlacer};

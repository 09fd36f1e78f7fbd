//! Grid geometry, responsive specs, and cell occupancy.
//!
//! A [`SpecTable`] maps a viewport breakpoint and layout mode to a
//! [`GridSpec`]; [`FieldGrid::build`] turns that spec plus the concrete
//! viewport size into square-cell geometry, and an [`OccupancyMask`] tracks
//! which cells are free, forbidden, or already claimed during a run.
pub mod geometry;
pub mod mask;
pub mod spec;

pub use geometry::FieldGrid;
pub use mask::{CellFilter, CellRect, OccupancyMask};
pub use spec::{Breakpoint, GridSpec, LayoutMode, SpecTable};

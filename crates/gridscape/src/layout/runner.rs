//! High-level runner executing the placement pipeline for one viewport state.
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::grid::{
    Breakpoint, CellFilter, CellRect, FieldGrid, LayoutMode, OccupancyMask, SpecTable,
};
use crate::layout::bands;
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::search::FieldPlacer;
use crate::pool::{allocate, plan, Pool, Shape};

/// Signal at or below which the field must show a sun.
const SUN_SIGNAL_THRESHOLD: f64 = 0.05;

/// One placed instance in the output list.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    /// Slot id this item came from.
    pub id: u32,
    /// Shape the slot renders as.
    pub shape: Shape,
    /// Claimed cells.
    pub footprint: CellRect,
    /// Footprint center in logical pixels.
    pub position: Vec2,
}

impl PlacedItem {
    /// Render anchor for interop with drawing code.
    pub fn anchor(&self) -> mint::Point2<f32> {
        self.position.into()
    }
}

/// Parameters for one layout run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Allocation signal; clamped into `[0, 1]` by the run.
    pub signal: f64,
    /// Logical viewport size in pixels, DPR already applied.
    pub viewport: Vec2,
    /// UI mode of the surrounding application.
    pub mode: LayoutMode,
    /// Per-run salt; defaults to a hash of the derived grid dimensions.
    pub salt: Option<u32>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            signal: 0.5,
            viewport: Vec2::ZERO,
            mode: LayoutMode::Normal,
            salt: None,
        }
    }
}

impl LayoutParams {
    /// Creates params for the given signal and viewport.
    pub fn new(signal: f64, viewport: Vec2) -> Self {
        Self {
            signal,
            viewport,
            ..Default::default()
        }
    }

    /// Sets the UI mode.
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pins the per-run salt instead of deriving it from the grid.
    pub fn with_salt(mut self, salt: u32) -> Self {
        self.salt = Some(salt);
        self
    }

    /// Validates the parameters, returning an error if invalid.
    ///
    /// The run itself never fails: out-of-range signals are clamped and a
    /// degenerate viewport yields an invisible result. Validation is for
    /// callers that want to reject garbage early instead.
    pub fn validate(&self) -> Result<()> {
        if !self.signal.is_finite() {
            return Err(Error::InvalidConfig("signal must be finite".into()));
        }
        if !self.viewport.x.is_finite() || !self.viewport.y.is_finite() {
            return Err(Error::InvalidConfig("viewport must be finite".into()));
        }
        Ok(())
    }
}

/// Configuration shared across layout runs.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Grid spec lookup per breakpoint and mode.
    pub specs: SpecTable,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the spec table.
    pub fn with_specs(mut self, specs: SpecTable) -> Self {
        self.specs = specs;
        self
    }

    /// Validates every authored spec.
    pub fn validate(&self) -> Result<()> {
        self.specs.validate()
    }
}

/// Result of one layout run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Placed items in pool order.
    pub items: Vec<PlacedItem>,
    /// False when the viewport was too small for any grid.
    pub visible: bool,
    /// Slots in the pool when the run started.
    pub slots_total: usize,
    /// Slots that claimed a footprint.
    pub placed: usize,
    /// Slots with no free footprint, omitted from the output.
    pub skipped: usize,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Drives the full pipeline: allocate, plan, build the grid, place.
///
/// The runner holds configuration only; all per-run state lives on the
/// stack of [`run_layout`], so one runner can serve any number of runs.
pub struct LayoutRunner<'a> {
    /// Configuration applied to every run.
    pub config: LayoutConfig,
    /// Optional forbidden-cell predicate baked into each run's mask.
    pub filter: Option<&'a dyn CellFilter>,
}

impl<'a> LayoutRunner<'a> {
    pub fn try_new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            filter: None,
        })
    }

    pub fn new(config: LayoutConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid layout config");
        Self {
            config,
            filter: None,
        }
    }

    /// Sets a forbidden-cell predicate consulted when baking the mask.
    pub fn with_filter(mut self, filter: &'a dyn CellFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Runs the pipeline, mutating `pool` into its authoritative next state.
    pub fn run(&mut self, pool: &mut Pool, params: &LayoutParams) -> LayoutResult {
        run_layout(pool, params, &self.config, self.filter, None)
    }

    pub fn run_with_events(
        &mut self,
        pool: &mut Pool,
        params: &LayoutParams,
        sink: &mut dyn EventSink,
    ) -> LayoutResult {
        run_layout(pool, params, &self.config, self.filter, Some(sink))
    }
}

/// Runs the placement pipeline once.
///
/// The pool is mutated in place: categories are rebalanced, shapes and
/// footprints assigned, and the same pool should be passed back on the next
/// call so small input changes reshuffle as little as possible.
pub fn run_layout(
    pool: &mut Pool,
    params: &LayoutParams,
    config: &LayoutConfig,
    filter: Option<&dyn CellFilter>,
    sink: Option<&mut dyn EventSink>,
) -> LayoutResult {
    if let Some(s) = sink {
        run_internal(pool, params, config, filter, s)
    } else {
        run_internal(pool, params, config, filter, &mut ())
    }
}

fn run_internal(
    pool: &mut Pool,
    params: &LayoutParams,
    config: &LayoutConfig,
    filter: Option<&dyn CellFilter>,
    sink: &mut dyn EventSink,
) -> LayoutResult {
    let signal = if params.signal.is_finite() {
        params.signal.clamp(0.0, 1.0)
    } else {
        warn!("Non-finite signal {}; using 0.5.", params.signal);
        if sink.wants(LayoutEventKind::Warning) {
            sink.send(LayoutEvent::Warning {
                context: "params".into(),
                message: format!("non-finite signal {}; using 0.5", params.signal),
            });
        }
        0.5
    };

    info!(
        "Starting layout run: {} slots, signal {:.3}, mode {:?}.",
        pool.len(),
        signal,
        params.mode
    );
    if sink.wants(LayoutEventKind::RunStarted) {
        sink.send(LayoutEvent::RunStarted {
            slots: pool.len(),
            signal,
        });
    }

    let targets = allocate::target_counts(pool.len(), signal);
    let moved = allocate::rebalance(pool, targets);
    debug!("Category targets {:?}, {} slots moved.", targets, moved);
    if sink.wants(LayoutEventKind::CategoriesRebalanced) {
        sink.send(LayoutEvent::CategoriesRebalanced { moved });
    }
    pool.clear_run_state();

    let breakpoint = Breakpoint::from_width(params.viewport.x);
    let spec = config.specs.spec_for(breakpoint, params.mode);
    let grid = FieldGrid::build(params.viewport, spec);
    if sink.wants(LayoutEventKind::GridBuilt) {
        sink.send(LayoutEvent::GridBuilt {
            rows: grid.rows,
            cols: grid.cols,
            used_rows: grid.used_rows,
        });
    }

    if grid.is_degenerate() {
        warn!(
            "Viewport {}x{} leaves no usable grid; field hidden.",
            params.viewport.x, params.viewport.y
        );
        if sink.wants(LayoutEventKind::RunFinished) {
            sink.send(LayoutEvent::RunFinished {
                placed: 0,
                skipped: 0,
                visible: false,
            });
        }
        return LayoutResult {
            items: Vec::new(),
            visible: false,
            slots_total: pool.len(),
            placed: 0,
            skipped: 0,
        };
    }

    let salt = params.salt.unwrap_or_else(|| grid.default_salt());
    plan::assign_shapes(pool, signal, salt, params.mode);

    let mut mask = OccupancyMask::new(grid.rows, grid.cols);
    if grid.used_rows < grid.rows {
        mask.forbid_rect(&CellRect::new(
            grid.used_rows,
            0,
            grid.cols,
            grid.rows - grid.used_rows,
        ));
    }
    for rect in &spec.forbidden_rects {
        mask.forbid_rect(rect);
    }
    if let Some(f) = filter {
        mask.forbid_where(f);
    }

    let mut placer = FieldPlacer::new(&grid, mask, salt);
    let mut items: Vec<PlacedItem> = Vec::with_capacity(pool.len());
    let mut skipped = 0usize;

    for i in 0..pool.len() {
        let (id, shape) = {
            let slot = &pool.slots()[i];
            (slot.id, slot.shape)
        };
        let Some(shape) = shape else {
            continue;
        };
        let (_, h) = shape.size();

        let Some(band) = bands::band_for(shape, grid.used_rows, breakpoint, params.mode, h) else {
            debug!("Slot {} ({:?}) does not fit any band; omitted.", id, shape);
            skipped += 1;
            if sink.wants(LayoutEventKind::ItemSkipped) {
                sink.send(LayoutEvent::ItemSkipped { id, shape });
            }
            continue;
        };

        match placer.place(id, shape, band) {
            Some((footprint, widened)) => {
                let position = grid.rect_center_px(&footprint);
                let slot = &mut pool.slots_mut()[i];
                slot.footprint = Some(footprint);
                slot.position = Some(position);
                if sink.wants(LayoutEventKind::ItemPlaced) {
                    sink.send(LayoutEvent::ItemPlaced {
                        id,
                        shape,
                        footprint,
                        widened,
                    });
                }
                items.push(PlacedItem {
                    id,
                    shape,
                    footprint,
                    position,
                });
            }
            None => {
                debug!("Slot {} ({:?}) found no free footprint; omitted.", id, shape);
                skipped += 1;
                if sink.wants(LayoutEventKind::ItemSkipped) {
                    sink.send(LayoutEvent::ItemSkipped { id, shape });
                }
            }
        }
    }

    if signal <= SUN_SIGNAL_THRESHOLD {
        ensure_one_sun(pool, &mut items, sink);
    }

    info!(
        "Layout run finished: {} placed, {} skipped.",
        items.len(),
        skipped
    );
    if sink.wants(LayoutEventKind::RunFinished) {
        sink.send(LayoutEvent::RunFinished {
            placed: items.len(),
            skipped,
            visible: true,
        });
    }

    LayoutResult {
        visible: true,
        slots_total: pool.len(),
        placed: items.len(),
        skipped,
        items,
    }
}

/// Converts one placed single-cell item into a sun when none was placed.
///
/// Sky-family items are preferred, then any single-cell item, lowest id
/// first. Both the output list and the pool are updated so the next run
/// starts from the converted state.
fn ensure_one_sun(pool: &mut Pool, items: &mut [PlacedItem], sink: &mut dyn EventSink) {
    if items.iter().any(|item| item.shape == Shape::Sun) {
        return;
    }
    let candidate = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.footprint.w == 1 && item.footprint.h == 1)
        .min_by_key(|(_, item)| (!item.shape.is_sky(), item.id));
    let Some((index, _)) = candidate else {
        return;
    };

    let id = items[index].id;
    items[index].shape = Shape::Sun;
    if let Some(slot) = pool.slots_mut().iter_mut().find(|s| s.id == id) {
        slot.shape = Some(Shape::Sun);
    }
    info!("No sun at low signal; slot {} now renders as one.", id);
    if sink.wants(LayoutEventKind::SunEnsured) {
        sink.send(LayoutEvent::SunEnsured { id });
    }
}

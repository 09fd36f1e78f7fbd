//! Event types and sinks for observing layout runs.
//!
//! This module defines [`LayoutEvent`] and a set of sinks and adapters to
//! emit, collect, or forward events while executing a run via
//! [`crate::layout::runner::LayoutRunner`] or
//! [`crate::layout::runner::run_layout`].
use crate::grid::CellRect;
use crate::pool::Shape;

/// Describes events emitted by layout operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// Number of slots in the pool.
        slots: usize,
        /// Clamped allocation signal for this run.
        signal: f64,
    },

    /// Emitted once the grid geometry is derived.
    GridBuilt {
        /// Total rows.
        rows: u32,
        /// Total columns.
        cols: u32,
        /// Rows eligible for placement.
        used_rows: u32,
    },

    /// Emitted after category targets were applied to the pool.
    CategoriesRebalanced {
        /// How many slots changed category.
        moved: usize,
    },

    /// Emitted when a slot claims a footprint.
    ItemPlaced {
        /// Slot id.
        id: u32,
        /// Shape placed.
        shape: Shape,
        /// Claimed footprint.
        footprint: CellRect,
        /// Whether the widened fallback search produced this placement.
        widened: bool,
    },

    /// Emitted when a slot found no free footprint and was omitted.
    ItemSkipped {
        /// Slot id.
        id: u32,
        /// Shape the slot would have rendered as.
        shape: Shape,
    },

    /// Emitted when the low-signal rule converted a placed item into a sun.
    SunEnsured {
        /// Slot id of the converted item.
        id: u32,
    },

    /// Emitted when the run finishes.
    RunFinished {
        /// Items placed.
        placed: usize,
        /// Items skipped.
        skipped: usize,
        /// Whether the field is visible at all.
        visible: bool,
    },

    /// Non-fatal warning generated during layout.
    Warning {
        /// Context string (e.g. slot id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant for [`LayoutEvent`], used by sinks to filter cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    RunStarted,
    GridBuilt,
    CategoriesRebalanced,
    ItemPlaced,
    ItemSkipped,
    SunEnsured,
    RunFinished,
    Warning,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::RunStarted { .. } => LayoutEventKind::RunStarted,
            LayoutEvent::GridBuilt { .. } => LayoutEventKind::GridBuilt,
            LayoutEvent::CategoriesRebalanced { .. } => LayoutEventKind::CategoriesRebalanced,
            LayoutEvent::ItemPlaced { .. } => LayoutEventKind::ItemPlaced,
            LayoutEvent::ItemSkipped { .. } => LayoutEventKind::ItemSkipped,
            LayoutEvent::SunEnsured { .. } => LayoutEventKind::SunEnsured,
            LayoutEvent::RunFinished { .. } => LayoutEventKind::RunFinished,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Whether the sink cares about events of `kind`; emitters may skip
    /// building events nobody wants.
    fn wants(&self, kind: LayoutEventKind) -> bool {
        let _ = kind;
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = LayoutEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_their_events() {
        let event = LayoutEvent::SunEnsured { id: 3 };
        assert_eq!(event.kind(), LayoutEventKind::SunEnsured);
        let event = LayoutEvent::Warning {
            context: "slot:1".into(),
            message: "m".into(),
        };
        assert_eq!(event.kind(), LayoutEventKind::Warning);
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::with_capacity(2);
        assert!(sink.is_empty());
        sink.send(LayoutEvent::SunEnsured { id: 0 });
        sink.send(LayoutEvent::SunEnsured { id: 1 });
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let sink_a = VecSink::new();
        let sink_b = VecSink::new();
        let mut multi = MultiSink::with_sinks(vec![sink_a, sink_b]);
        multi.send(LayoutEvent::SunEnsured { id: 7 });
        assert_eq!(multi.sinks.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 1);
        matches!(multi.sinks[0].as_slice()[0], LayoutEvent::SunEnsured { id: 7 })
            .then_some(())
            .expect("event captured");
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(LayoutEvent::RunStarted {
            slots: 4,
            signal: 0.5,
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn noop_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(LayoutEventKind::ItemPlaced));
        let multi: MultiSink<VecSink> = MultiSink::new();
        assert!(!multi.wants(LayoutEventKind::ItemPlaced));
    }
}

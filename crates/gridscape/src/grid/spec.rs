//! Breakpoint-keyed grid specifications.
//!
//! The embedding application looks layout geometry up by viewport width
//! bucket and UI mode; [`SpecTable`] is that lookup. The authored defaults
//! here give a plausible field on common screen sizes; callers with their own
//! visual tuning replace entries via the builder methods.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::mask::CellRect;

/// Viewport width bucket driving row counts and band tables.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Small, Breakpoint::Medium, Breakpoint::Large];

    /// Buckets a logical viewport width in pixels.
    pub fn from_width(width: f32) -> Self {
        if width < 640.0 {
            Breakpoint::Small
        } else if width < 1024.0 {
            Breakpoint::Medium
        } else {
            Breakpoint::Large
        }
    }

    fn index(self) -> usize {
        match self {
            Breakpoint::Small => 0,
            Breakpoint::Medium => 1,
            Breakpoint::Large => 2,
        }
    }
}

/// UI mode of the surrounding application, consulted by spec and band lookups.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Plain field view.
    #[default]
    Normal,
    /// A UI panel covers the lower part of the field.
    Overlay,
    /// Alternate arrangement used by the secondary view.
    Alternate,
}

impl LayoutMode {
    /// Stable tag used in composite hash keys.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            LayoutMode::Normal => "normal",
            LayoutMode::Overlay => "overlay",
            LayoutMode::Alternate => "alternate",
        }
    }
}

/// Grid geometry for one breakpoint: target row count, the fraction of rows
/// eligible for placement, and static rectangular exclusions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct GridSpec {
    /// Number of rows the viewport height is divided into.
    pub rows: u32,
    /// Fraction of rows in `(0, 1]` counted as usable, measured from the top.
    /// The remainder stays reserved as visual overflow space.
    pub use_top_ratio: f32,
    /// Cells that may never be claimed, e.g. under fixed UI chrome.
    pub forbidden_rects: Vec<CellRect>,
}

impl GridSpec {
    pub fn new(rows: u32, use_top_ratio: f32) -> Self {
        Self {
            rows,
            use_top_ratio,
            forbidden_rects: Vec::new(),
        }
    }

    /// Adds a forbidden rectangle (builder-style).
    pub fn with_forbidden_rect(mut self, rect: CellRect) -> Self {
        self.forbidden_rects.push(rect);
        self
    }

    /// Validates authored values, returning an error for impossible geometry.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::InvalidConfig("rows must be > 0".into()));
        }
        if !self.use_top_ratio.is_finite() || self.use_top_ratio <= 0.0 || self.use_top_ratio > 1.0
        {
            return Err(Error::InvalidConfig(
                "use_top_ratio must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Lookup of [`GridSpec`]s keyed by breakpoint, with per-mode overrides
/// consulted before the base entries.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct SpecTable {
    base: [GridSpec; 3],
    overrides: Vec<(Breakpoint, LayoutMode, GridSpec)>,
}

impl Default for SpecTable {
    fn default() -> Self {
        let base = [
            GridSpec::new(16, 0.82),
            GridSpec::new(20, 0.85),
            GridSpec::new(24, 0.88),
        ];
        // Overlay mode: the survey panel covers the lower field, so fewer rows
        // are usable.
        let overrides = vec![
            (
                Breakpoint::Small,
                LayoutMode::Overlay,
                GridSpec::new(16, 0.60),
            ),
            (
                Breakpoint::Medium,
                LayoutMode::Overlay,
                GridSpec::new(20, 0.62),
            ),
            (
                Breakpoint::Large,
                LayoutMode::Overlay,
                GridSpec::new(24, 0.65),
            ),
        ];
        Self { base, overrides }
    }
}

impl SpecTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the base spec for a breakpoint.
    pub fn with_base(mut self, breakpoint: Breakpoint, spec: GridSpec) -> Self {
        self.base[breakpoint.index()] = spec;
        self
    }

    /// Adds a mode-specific override consulted before the base entry.
    pub fn with_override(mut self, breakpoint: Breakpoint, mode: LayoutMode, spec: GridSpec) -> Self {
        self.overrides.push((breakpoint, mode, spec));
        self
    }

    /// Resolves the spec for `(breakpoint, mode)`, override first.
    pub fn spec_for(&self, breakpoint: Breakpoint, mode: LayoutMode) -> &GridSpec {
        self.overrides
            .iter()
            .find(|(bp, m, _)| *bp == breakpoint && *m == mode)
            .map(|(_, _, spec)| spec)
            .unwrap_or(&self.base[breakpoint.index()])
    }

    /// Validates every authored entry.
    pub fn validate(&self) -> Result<()> {
        for spec in &self.base {
            spec.validate()?;
        }
        for (_, _, spec) in &self.overrides {
            spec.validate()?;
        }
        Ok(())
    }
}

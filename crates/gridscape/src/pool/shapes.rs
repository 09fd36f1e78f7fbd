//! Scene vocabulary: categories, shapes, and footprint sizes.
//!
//! Every slot belongs to one of four categories, and each category offers
//! exactly two shape variants, a big one and a small one. Which variant a
//! slot gets is decided per run by the shape planner.

/// Content category a slot belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Flora,
    Housing,
    Traffic,
    Sky,
}

impl Category {
    /// All categories in canonical order. Allocation and rebalancing iterate
    /// in this order so results stay deterministic.
    pub const ALL: [Category; 4] = [
        Category::Flora,
        Category::Housing,
        Category::Traffic,
        Category::Sky,
    ];

    /// Stable lowercase tag for hash keys.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Category::Flora => "flora",
            Category::Housing => "housing",
            Category::Traffic => "traffic",
            Category::Sky => "sky",
        }
    }

    /// The category's two shape variants, big variant first.
    pub fn variants(self) -> [Shape; 2] {
        match self {
            Category::Flora => [Shape::Tree, Shape::Shrub],
            Category::Housing => [Shape::House, Shape::Hut],
            Category::Traffic => [Shape::Car, Shape::Cart],
            Category::Sky => [Shape::Cloud, Shape::Sun],
        }
    }
}

/// Concrete shape a slot renders as.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Tree,
    Shrub,
    House,
    Hut,
    Car,
    Cart,
    Cloud,
    Sun,
}

impl Shape {
    /// Footprint size in cells, `(width, height)`.
    pub fn size(self) -> (u32, u32) {
        match self {
            Shape::Tree => (1, 2),
            Shape::Shrub => (1, 1),
            Shape::House => (2, 2),
            Shape::Hut => (1, 1),
            Shape::Car => (2, 1),
            Shape::Cart => (1, 1),
            Shape::Cloud => (2, 1),
            Shape::Sun => (1, 1),
        }
    }

    /// Placement family the shape follows for band and search rules.
    pub fn family(self) -> ShapeFamily {
        match self {
            Shape::Tree | Shape::Shrub => ShapeFamily::Flora,
            Shape::House | Shape::Hut => ShapeFamily::Building,
            Shape::Car | Shape::Cart => ShapeFamily::Vehicle,
            Shape::Cloud | Shape::Sun => ShapeFamily::Sky,
        }
    }

    /// Whether the shape floats in the sky band and repels its own kind.
    pub fn is_sky(self) -> bool {
        self.family() == ShapeFamily::Sky
    }
}

/// Placement family grouping shapes with shared band and search behavior.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeFamily {
    Flora,
    Building,
    Vehicle,
    Sky,
}

impl ShapeFamily {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            ShapeFamily::Flora => "flora",
            ShapeFamily::Building => "building",
            ShapeFamily::Vehicle => "vehicle",
            ShapeFamily::Sky => "sky",
        }
    }
}

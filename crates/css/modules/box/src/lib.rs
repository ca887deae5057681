//! CSS Box Model Module Level 3: box edges, margins, borders, padding.
//! See <https://www.w3.org/TR/css-box-3/>
//!
//! Also hosts the fixed-point [`LayoutUnit`] and the physical geometry
//! primitives every layout module shares.

pub mod layout_unit;
pub use layout_unit::LayoutUnit;

mod geometry;
pub use geometry::{Point, Rect, Size};

use core::ops::Add;
use serde::{Deserialize, Serialize};

/// Four physical edges of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Sides<T> {
    #[inline]
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every edge.
    #[inline]
    pub const fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    /// Apply `map` to every edge.
    #[inline]
    pub fn map<U: Copy, F: Fn(T) -> U>(self, map: F) -> Sides<U> {
        Sides {
            top: map(self.top),
            right: map(self.right),
            bottom: map(self.bottom),
            left: map(self.left),
        }
    }
}

/// One physical edge of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhysicalSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl PhysicalSide {
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    #[inline]
    pub const fn is_horizontal_edge(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl<T> Sides<T> {
    /// The value on `side`.
    #[inline]
    pub const fn side(&self, side: PhysicalSide) -> &T {
        match side {
            PhysicalSide::Top => &self.top,
            PhysicalSide::Right => &self.right,
            PhysicalSide::Bottom => &self.bottom,
            PhysicalSide::Left => &self.left,
        }
    }

    #[inline]
    pub fn side_mut(&mut self, side: PhysicalSide) -> &mut T {
        match side {
            PhysicalSide::Top => &mut self.top,
            PhysicalSide::Right => &mut self.right,
            PhysicalSide::Bottom => &mut self.bottom,
            PhysicalSide::Left => &mut self.left,
        }
    }
}

impl Sides<LayoutUnit> {
    /// `left + right`
    #[inline]
    pub fn horizontal_sum(self) -> LayoutUnit {
        self.left + self.right
    }

    /// `top + bottom`
    #[inline]
    pub fn vertical_sum(self) -> LayoutUnit {
        self.top + self.bottom
    }
}

impl<T: Copy + Add<Output = T>> Add for Sides<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

/// Specified margin on one edge.
///
/// Percentages resolve against the containing block's inline size on every
/// edge. `Auto` resolves to zero until a layout algorithm distributes free
/// space into it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Margin {
    Auto,
    Fixed(LayoutUnit),
    Percent(f32),
}

impl Default for Margin {
    fn default() -> Self {
        Self::Fixed(LayoutUnit::zero())
    }
}

impl Margin {
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Used value with `auto` treated as zero.
    #[inline]
    pub fn resolve(self, containing_inline_size: LayoutUnit) -> LayoutUnit {
        match self {
            Self::Auto => LayoutUnit::zero(),
            Self::Fixed(length) => length,
            Self::Percent(fraction) => {
                LayoutUnit::from_f32(containing_inline_size.to_f32() * fraction)
            }
        }
    }
}

/// Box edges used by layout in sub-pixel precision.
///
/// Margins may be negative. Borders and padding never are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSides {
    pub margin: Sides<LayoutUnit>,
    pub border: Sides<LayoutUnit>,
    pub padding: Sides<LayoutUnit>,
}

impl BoxSides {
    /// Border plus padding on each edge.
    #[inline]
    pub fn border_and_padding(&self) -> Sides<LayoutUnit> {
        self.border + self.padding
    }
}

/// Resolve specified margins, borders and padding into used edges.
///
/// Padding and border widths are clamped to be non-negative; margins are not.
/// `auto` margins resolve to zero. See CSS 2.2 §8.1 (box model).
pub fn compute_box_sides(
    margin: &Sides<Margin>,
    border: &Sides<LayoutUnit>,
    padding: &Sides<LayoutUnit>,
    containing_inline_size: LayoutUnit,
) -> BoxSides {
    BoxSides {
        margin: margin.map(|edge| edge.resolve(containing_inline_size)),
        border: border.map(LayoutUnit::clamp_negative_to_zero),
        padding: padding.map(LayoutUnit::clamp_negative_to_zero),
    }
}

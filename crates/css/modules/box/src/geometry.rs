//! Physical points, sizes and rectangles in `LayoutUnit`.

use crate::LayoutUnit;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
}

impl Point {
    #[inline]
    pub const fn new(x: LayoutUnit, y: LayoutUnit) -> Self {
        Self { x, y }
    }

    /// Swap the coordinates, mapping between row- and column-oriented frames.
    #[inline]
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.y, self.x)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: LayoutUnit,
    pub height: LayoutUnit,
}

impl Size {
    #[inline]
    pub const fn new(width: LayoutUnit, height: LayoutUnit) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
    pub width: LayoutUnit,
    pub height: LayoutUnit,
}

impl Rect {
    #[inline]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn max_x(&self) -> LayoutUnit {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> LayoutUnit {
        self.y + self.height
    }

    /// Mirror horizontally inside a frame of width `frame_width`.
    #[inline]
    #[must_use]
    pub fn mirrored_x(&self, frame_width: LayoutUnit) -> Self {
        Self {
            x: frame_width - self.x - self.width,
            ..*self
        }
    }
}

//! CSS Writing Modes Level 4: block and inline flow directions.
//! See <https://www.w3.org/TR/css-writing-modes-4/>

use serde::{Deserialize, Serialize};

/// Computed `writing-mode`.
///
/// See <https://www.w3.org/TR/css-writing-modes-4/#writing-mode>
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingMode {
    /// Inline direction is horizontal; block direction is vertical.
    #[default]
    HorizontalTb,
    /// Inline direction is vertical, block advances to the left.
    VerticalRl,
    /// Inline direction is vertical, block advances to the right.
    VerticalLr,
    /// Like `vertical-rl`, with all glyphs set sideways.
    SidewaysRl,
    /// Block advances to the right and lines run bottom-to-top.
    SidewaysLr,
}

/// Computed `direction`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Physical direction in which an axis progresses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowDirection {
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl FlowDirection {
    /// True when the direction runs against the physical x or y axis.
    #[inline]
    pub const fn is_flipped(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }

    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::TopToBottom => Self::BottomToTop,
            Self::BottomToTop => Self::TopToBottom,
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }
}

/// The writing-mode related style of one box.
///
/// Every logical-to-physical mapping used by layout derives from these two
/// properties.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WritingModeStyle {
    pub writing_mode: WritingMode,
    pub direction: TextDirection,
}

impl WritingModeStyle {
    #[inline]
    pub const fn new(writing_mode: WritingMode, direction: TextDirection) -> Self {
        Self {
            writing_mode,
            direction,
        }
    }

    /// True when the inline axis is horizontal.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self.writing_mode, WritingMode::HorizontalTb)
    }

    #[inline]
    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    #[inline]
    pub const fn is_bidi_ltr(self) -> bool {
        matches!(self.direction, TextDirection::Ltr)
    }

    /// Direction in which successive lines (and blocks) stack.
    #[inline]
    pub const fn block_direction(self) -> FlowDirection {
        match self.writing_mode {
            WritingMode::HorizontalTb => FlowDirection::TopToBottom,
            WritingMode::VerticalRl | WritingMode::SidewaysRl => FlowDirection::RightToLeft,
            WritingMode::VerticalLr | WritingMode::SidewaysLr => FlowDirection::LeftToRight,
        }
    }

    /// Direction in which text advances within a line.
    #[inline]
    pub const fn inline_direction(self) -> FlowDirection {
        let ltr = self.is_bidi_ltr();
        match self.writing_mode {
            WritingMode::HorizontalTb => {
                if ltr {
                    FlowDirection::LeftToRight
                } else {
                    FlowDirection::RightToLeft
                }
            }
            WritingMode::VerticalRl | WritingMode::VerticalLr | WritingMode::SidewaysRl => {
                if ltr {
                    FlowDirection::TopToBottom
                } else {
                    FlowDirection::BottomToTop
                }
            }
            WritingMode::SidewaysLr => {
                if ltr {
                    FlowDirection::BottomToTop
                } else {
                    FlowDirection::TopToBottom
                }
            }
        }
    }

    /// Block axis runs right-to-left (or bottom-to-top).
    #[inline]
    pub const fn is_block_flipped(self) -> bool {
        self.block_direction().is_flipped()
    }

    /// Inline axis runs right-to-left (or bottom-to-top).
    #[inline]
    pub const fn is_inline_flipped(self) -> bool {
        self.inline_direction().is_flipped()
    }

    /// True when the logical-left edge (left, or top in vertical modes) is the
    /// inline-start edge.
    #[inline]
    pub const fn is_logical_left_inline_start(self) -> bool {
        !self.is_inline_flipped()
    }

    /// Either axis progresses top-to-bottom.
    #[inline]
    pub const fn is_any_top_to_bottom(self) -> bool {
        matches!(self.block_direction(), FlowDirection::TopToBottom)
            || matches!(self.inline_direction(), FlowDirection::TopToBottom)
    }

    /// Either axis progresses left-to-right.
    #[inline]
    pub const fn is_any_left_to_right(self) -> bool {
        matches!(self.block_direction(), FlowDirection::LeftToRight)
            || matches!(self.inline_direction(), FlowDirection::LeftToRight)
    }

    /// Inline axes of `self` and `other` are perpendicular.
    #[inline]
    pub const fn is_orthogonal(self, other: Self) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if block/inline directions are wrong for vertical modes.
    #[test]
    fn vertical_modes_map_directions() {
        let vertical_rl = WritingModeStyle::new(WritingMode::VerticalRl, TextDirection::Ltr);
        assert_eq!(vertical_rl.block_direction(), FlowDirection::RightToLeft);
        assert_eq!(vertical_rl.inline_direction(), FlowDirection::TopToBottom);
        assert!(vertical_rl.is_block_flipped());
        assert!(vertical_rl.is_logical_left_inline_start());
        assert!(vertical_rl.is_any_top_to_bottom());
        assert!(!vertical_rl.is_any_left_to_right());

        let sideways_lr = WritingModeStyle::new(WritingMode::SidewaysLr, TextDirection::Ltr);
        assert_eq!(sideways_lr.inline_direction(), FlowDirection::BottomToTop);
        assert!(!sideways_lr.is_logical_left_inline_start());
        assert!(!sideways_lr.is_block_flipped());
    }

    /// # Panics
    /// Panics if `direction: rtl` does not flip the horizontal inline axis.
    #[test]
    fn rtl_flips_horizontal_inline_axis() {
        let rtl = WritingModeStyle::new(WritingMode::HorizontalTb, TextDirection::Rtl);
        assert!(rtl.is_inline_flipped());
        assert!(!rtl.is_block_flipped());
        assert!(!rtl.is_logical_left_inline_start());
        assert!(rtl.is_orthogonal(WritingModeStyle::new(
            WritingMode::VerticalLr,
            TextDirection::Ltr
        )));
        assert_eq!(
            FlowDirection::LeftToRight.reversed(),
            FlowDirection::RightToLeft
        );
    }
}

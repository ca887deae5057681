//! Flex containers: the container-level properties and their used values.
//! See <https://www.w3.org/TR/css-flexbox-1/#flex-containers>

use css_box::{LayoutUnit, Sides};
use css_sizing::apply_constraints;
use css_writing_modes::WritingModeStyle;
use serde::{Deserialize, Serialize};

use crate::chapter8::{ContentAlignment, ItemAlignment};

/// Display keywords relevant to flex detection.
///
/// See <https://www.w3.org/TR/css-display-3/#the-display-properties>
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayKeyword {
    #[default]
    Inline,
    Block,
    None,
    Flex,
    InlineFlex,
}

/// Returns true when the element establishes a flex formatting context.
///
/// See <https://www.w3.org/TR/css-flexbox-1/#flex-containers>
#[inline]
pub const fn establishes_flex_formatting_context(display: DisplayKeyword) -> bool {
    matches!(display, DisplayKeyword::Flex | DisplayKeyword::InlineFlex)
}

/// See <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    #[inline]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }

    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// See <https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property>
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexWrap {
    #[default]
    Nowrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    #[inline]
    pub const fn is_multiline(self) -> bool {
        !matches!(self, Self::Nowrap)
    }
}

/// Computed `row-gap` / `column-gap`.
///
/// See <https://www.w3.org/TR/css-align-3/#gaps>
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gap {
    #[default]
    Normal,
    Fixed(LayoutUnit),
    Percent(f32),
}

/// Computed `margin-trim`: which container edges suppress the adjoining
/// margins of the items touching them.
///
/// See <https://www.w3.org/TR/css-box-4/#margin-trim>
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "one flag per trimmable edge, as the property defines them"
)]
pub struct MarginTrim {
    pub block_start: bool,
    pub block_end: bool,
    pub inline_start: bool,
    pub inline_end: bool,
}

impl MarginTrim {
    pub const NONE: Self = Self {
        block_start: false,
        block_end: false,
        inline_start: false,
        inline_end: false,
    };

    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.block_start || self.block_end || self.inline_start || self.inline_end)
    }
}

/// Resolved style of a flex container.
///
/// Defaults are the CSS initial values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexContainerStyle {
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: ContentAlignment,
    pub align_items: ItemAlignment,
    pub align_content: ContentAlignment,
    pub row_gap: Gap,
    pub column_gap: Gap,
    pub margin_trim: MarginTrim,
    pub writing_mode: WritingModeStyle,
    pub border: Sides<LayoutUnit>,
    pub padding: Sides<LayoutUnit>,
}

impl FlexContainerStyle {
    /// Border plus padding on each physical edge, clamped to be non-negative.
    #[inline]
    pub fn border_and_padding(&self) -> Sides<LayoutUnit> {
        self.border.map(LayoutUnit::clamp_negative_to_zero)
            + self.padding.map(LayoutUnit::clamp_negative_to_zero)
    }

    /// Border plus padding along the container's inline axis.
    #[inline]
    pub fn inline_border_and_padding(&self) -> LayoutUnit {
        let edges = self.border_and_padding();
        if self.writing_mode.is_horizontal() {
            edges.horizontal_sum()
        } else {
            edges.vertical_sum()
        }
    }

    /// Border plus padding along the container's block axis.
    #[inline]
    pub fn block_border_and_padding(&self) -> LayoutUnit {
        let edges = self.border_and_padding();
        if self.writing_mode.is_horizontal() {
            edges.vertical_sum()
        } else {
            edges.horizontal_sum()
        }
    }
}

/// Sizes the container's own formatting context hands down, all content-box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexContainerConstraints {
    /// Used inline size; always definite once the container is laid out.
    pub content_inline_size: LayoutUnit,
    /// Block size when it does not depend on the container's content.
    pub content_block_size: Option<LayoutUnit>,
    pub min_block_size: Option<LayoutUnit>,
    pub max_block_size: Option<LayoutUnit>,
}

impl FlexContainerConstraints {
    #[inline]
    pub const fn with_inline_size(content_inline_size: LayoutUnit) -> Self {
        Self {
            content_inline_size,
            content_block_size: None,
            min_block_size: None,
            max_block_size: None,
        }
    }

    #[inline]
    pub const fn has_definite_block_size(&self) -> bool {
        self.content_block_size.is_some()
    }

    /// Used content block size for a container whose content measures
    /// `content_extent`. A definite block size wins, otherwise the content
    /// extent is clamped by min/max with min winning.
    #[inline]
    pub fn constrain_block_size(&self, content_extent: LayoutUnit) -> LayoutUnit {
        self.content_block_size.unwrap_or_else(|| {
            apply_constraints(content_extent, self.min_block_size, self.max_block_size)
                .clamp_negative_to_zero()
        })
    }
}

/// Which gap is being resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GapType {
    BetweenLines,
    BetweenItems,
}

/// Used gap between items or lines.
///
/// `row-gap` separates items in column flows and lines in row flows. A
/// `row-gap` percentage needs a definite block size and resolves to zero
/// without one.
pub fn compute_gap(
    style: &FlexContainerStyle,
    constraints: &FlexContainerConstraints,
    gap_type: GapType,
) -> LayoutUnit {
    let uses_row_gap = (gap_type == GapType::BetweenItems) == style.flex_direction.is_column();
    let (gap, basis) = if uses_row_gap {
        (
            style.row_gap,
            constraints.content_block_size.unwrap_or_default(),
        )
    } else {
        (style.column_gap, constraints.content_inline_size)
    };
    match gap {
        Gap::Normal => LayoutUnit::zero(),
        Gap::Fixed(length) => length.clamp_negative_to_zero(),
        Gap::Percent(fraction) => {
            LayoutUnit::from_f32(basis.to_f32() * fraction).clamp_negative_to_zero()
        }
    }
}

//! Flex items: per-child style and identification of in-flow items.
//! See <https://www.w3.org/TR/css-flexbox-1/#flex-items>

use css_box::{LayoutUnit, Margin, Sides, Size};
use css_sizing::{AspectRatio, BoxSizing, SizeValue};
use css_writing_modes::WritingModeStyle;
use serde::{Deserialize, Serialize};

use crate::chapter8::ItemAlignment;

/// Opaque handle to a child box, owned by the caller's box tree.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemRef(pub u64);

/// Computed `overflow` on one axis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    /// `hidden`, `scroll` and `auto` make the box a scroll container.
    #[inline]
    pub const fn is_scroll_container(self) -> bool {
        matches!(self, Self::Hidden | Self::Scroll | Self::Auto)
    }
}

/// Resolved style of one child of a flex container.
///
/// Sizes are physical (`width`/`height`), as computed style stores them.
/// Defaults are the CSS initial values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "computed style flags are independent inputs"
)]
pub struct FlexItemStyle {
    /// `display: none`; the child generates no box.
    pub display_none: bool,
    /// Absolutely or fixed positioned.
    pub out_of_flow: bool,
    pub order: i32,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: SizeValue,
    pub align_self: ItemAlignment,
    pub margin: Sides<Margin>,
    pub border: Sides<LayoutUnit>,
    pub padding: Sides<LayoutUnit>,
    pub width: SizeValue,
    pub height: SizeValue,
    pub min_width: SizeValue,
    pub min_height: SizeValue,
    pub max_width: SizeValue,
    pub max_height: SizeValue,
    pub box_sizing: BoxSizing,
    pub aspect_ratio: AspectRatio,
    /// Replaced content (images, video, ...).
    pub is_replaced: bool,
    /// Natural size of replaced content, if it has one.
    pub natural_size: Option<Size>,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub writing_mode: WritingModeStyle,
    /// Both inline-axis insets are `auto` (out-of-flow children only).
    pub inline_insets_auto: bool,
    /// Both block-axis insets are `auto` (out-of-flow children only).
    pub block_insets_auto: bool,
}

impl Default for FlexItemStyle {
    fn default() -> Self {
        Self {
            display_none: false,
            out_of_flow: false,
            order: 0,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: SizeValue::Auto,
            align_self: ItemAlignment::default(),
            margin: Sides::default(),
            border: Sides::default(),
            padding: Sides::default(),
            width: SizeValue::Auto,
            height: SizeValue::Auto,
            min_width: SizeValue::Auto,
            min_height: SizeValue::Auto,
            max_width: SizeValue::None,
            max_height: SizeValue::None,
            box_sizing: BoxSizing::ContentBox,
            aspect_ratio: AspectRatio::Auto,
            is_replaced: false,
            natural_size: None,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            writing_mode: WritingModeStyle::default(),
            inline_insets_auto: true,
            block_insets_auto: true,
        }
    }
}

impl FlexItemStyle {
    /// Border plus padding per edge, clamped to be non-negative.
    #[inline]
    pub fn border_and_padding(&self) -> Sides<LayoutUnit> {
        self.border.map(LayoutUnit::clamp_negative_to_zero)
            + self.padding.map(LayoutUnit::clamp_negative_to_zero)
    }

    /// Negative factors behave as zero.
    #[inline]
    pub fn used_flex_grow(&self) -> f32 {
        self.flex_grow.max(0.0)
    }

    #[inline]
    pub fn used_flex_shrink(&self) -> f32 {
        self.flex_shrink.max(0.0)
    }

    /// Physical width/height ratio of the box, from `aspect-ratio` or the
    /// natural size of replaced content.
    ///
    /// `auto <ratio>` prefers the natural ratio when there is one.
    pub fn physical_aspect_ratio(&self) -> Option<f64> {
        let natural = self.natural_size.and_then(|size| {
            let height = size.height.to_f64();
            (height > 0.0 && size.width > LayoutUnit::zero()).then(|| size.width.to_f64() / height)
        });
        match self.aspect_ratio {
            AspectRatio::Auto => natural.filter(|_| self.is_replaced),
            AspectRatio::Ratio(_) => self.aspect_ratio.ratio(),
            AspectRatio::AutoAndRatio(_) => natural
                .filter(|_| self.is_replaced)
                .or_else(|| self.aspect_ratio.ratio()),
        }
    }

    /// True when the ratio comes from `aspect-ratio` rather than natural size.
    /// Box-sizing then decides which box the ratio applies to.
    pub fn uses_specified_ratio(&self) -> bool {
        match self.aspect_ratio {
            AspectRatio::Auto => false,
            AspectRatio::Ratio(_) => true,
            AspectRatio::AutoAndRatio(_) => !self.is_replaced || self.natural_size.is_none(),
        }
    }
}

/// A child of the flex container in document order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlexChild {
    pub handle: ItemRef,
    #[serde(default)]
    pub style: FlexItemStyle,
}

impl FlexChild {
    #[inline]
    pub const fn new(handle: ItemRef, style: FlexItemStyle) -> Self {
        Self { handle, style }
    }
}

/// Returns true when the child takes part in flex layout.
///
/// Behavior:
/// - Excludes `display: none`.
/// - Excludes out-of-flow boxes, which only receive a static position.
/// - Assumes the children list is already normalized (`display: contents`
///   and anonymous wrapping handled upstream).
///
/// See <https://www.w3.org/TR/css-flexbox-1/#flex-items>
#[inline]
pub const fn is_flex_item(style: &FlexItemStyle) -> bool {
    !style.display_none && !style.out_of_flow
}

/// Out-of-flow children still get a static position from the container.
#[inline]
pub const fn needs_static_position(style: &FlexItemStyle) -> bool {
    !style.display_none && style.out_of_flow
}

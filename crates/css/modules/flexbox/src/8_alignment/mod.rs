//! Alignment: `justify-content`, `align-content`, `align-items`/`align-self`
//! and the offsets they produce.
//! See <https://www.w3.org/TR/css-flexbox-1/#alignment>
//! See <https://www.w3.org/TR/css-align-3/>

pub mod baseline;

use css_box::LayoutUnit;
use css_writing_modes::{TextDirection, WritingModeStyle};
use serde::{Deserialize, Serialize};

use crate::chapter5::FlexFlow;

//=============================================================================
// Alignment values
//=============================================================================

/// `<content-position>` plus the `normal`, baseline and physical keywords.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentPosition {
    #[default]
    Normal,
    Baseline,
    LastBaseline,
    Center,
    Start,
    End,
    FlexStart,
    FlexEnd,
    Left,
    Right,
}

/// `<content-distribution>`
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentDistribution {
    #[default]
    Default,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
}

/// `<overflow-position>`
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowAlignment {
    #[default]
    Default,
    Unsafe,
    Safe,
}

/// Computed `justify-content` / `align-content`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentAlignment {
    pub position: ContentPosition,
    pub distribution: ContentDistribution,
    pub overflow: OverflowAlignment,
}

impl ContentAlignment {
    #[inline]
    pub const fn position(position: ContentPosition) -> Self {
        Self {
            position,
            distribution: ContentDistribution::Default,
            overflow: OverflowAlignment::Default,
        }
    }

    #[inline]
    pub const fn distribution(distribution: ContentDistribution) -> Self {
        Self {
            position: ContentPosition::Normal,
            distribution,
            overflow: OverflowAlignment::Default,
        }
    }

    #[inline]
    #[must_use]
    pub const fn safe(self) -> Self {
        Self {
            overflow: OverflowAlignment::Safe,
            ..self
        }
    }

    /// Plain `normal` behaves as `stretch` in flex containers, which packs
    /// like `flex-start`.
    #[inline]
    const fn is_normal(self) -> bool {
        matches!(self.position, ContentPosition::Normal)
            && matches!(self.distribution, ContentDistribution::Default)
    }

    #[inline]
    pub const fn resolved_position(self) -> ContentPosition {
        self.position
    }

    #[inline]
    pub const fn resolved_distribution(self) -> ContentDistribution {
        if self.is_normal() {
            ContentDistribution::Stretch
        } else {
            self.distribution
        }
    }

    #[inline]
    pub const fn is_safe(self) -> bool {
        matches!(self.overflow, OverflowAlignment::Safe)
    }
}

/// `<self-position>` plus `auto`, `normal`, `stretch` and baselines.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemPosition {
    #[default]
    Auto,
    Normal,
    Stretch,
    Baseline,
    LastBaseline,
    AnchorCenter,
    Center,
    Start,
    End,
    SelfStart,
    SelfEnd,
    FlexStart,
    FlexEnd,
    Left,
    Right,
}

impl ItemPosition {
    #[inline]
    pub const fn is_baseline(self) -> bool {
        matches!(self, Self::Baseline | Self::LastBaseline)
    }
}

/// Computed `align-items` / `align-self`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAlignment {
    pub position: ItemPosition,
    pub overflow: OverflowAlignment,
}

impl ItemAlignment {
    #[inline]
    pub const fn new(position: ItemPosition) -> Self {
        Self {
            position,
            overflow: OverflowAlignment::Default,
        }
    }

    #[inline]
    #[must_use]
    pub const fn safe(self) -> Self {
        Self {
            overflow: OverflowAlignment::Safe,
            ..self
        }
    }

    /// `align-self` with `auto` taken from the container's `align-items` and
    /// `normal` behaving as `stretch`.
    pub const fn resolve_self(self, align_items: Self) -> Self {
        let resolved = if matches!(self.position, ItemPosition::Auto) {
            align_items
        } else {
            self
        };
        match resolved.position {
            ItemPosition::Auto | ItemPosition::Normal => Self {
                position: ItemPosition::Stretch,
                overflow: resolved.overflow,
            },
            _ => resolved,
        }
    }
}

/// Used cross-axis alignment of one item, reduced to the positions the
/// placement code handles: `stretch`, `flex-start`, `flex-end`, `center`
/// and the baselines.
///
/// `start`/`end` are not affected by `wrap-reverse` because the alignment
/// container is the line. `flex-start`/`flex-end` follow the container's
/// cross-start edge, which `wrap-reverse` moves.
pub fn alignment_for_item(
    align_self: ItemAlignment,
    align_items: ItemAlignment,
    flow: &FlexFlow,
    item_writing_mode: WritingModeStyle,
) -> (ItemPosition, OverflowAlignment) {
    let resolved = align_self.resolve_self(align_items);
    let position = match resolved.position {
        ItemPosition::Start | ItemPosition::Left | ItemPosition::Right => ItemPosition::FlexStart,
        ItemPosition::End => ItemPosition::FlexEnd,
        ItemPosition::AnchorCenter => ItemPosition::Center,
        position @ (ItemPosition::SelfStart | ItemPosition::SelfEnd) => {
            let container = flow.writing_mode;
            let same_direction = if flow.is_horizontal_flow() {
                container.is_any_top_to_bottom() == item_writing_mode.is_any_top_to_bottom()
            } else {
                container.is_any_left_to_right() == item_writing_mode.is_any_left_to_right()
            };
            if same_direction == matches!(position, ItemPosition::SelfStart) {
                ItemPosition::FlexStart
            } else {
                ItemPosition::FlexEnd
            }
        }
        ItemPosition::FlexStart if flow.is_wrap_reverse() => ItemPosition::FlexEnd,
        ItemPosition::FlexEnd if flow.is_wrap_reverse() => ItemPosition::FlexStart,
        position => position,
    };
    (position, resolved.overflow)
}

//=============================================================================
// Content distribution offsets
//=============================================================================

#[inline]
fn count_as_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Map `left`/`right` onto `start`/`end` through the physical direction of
/// the main axis. Without one, both behave as `start`.
pub const fn resolve_left_right_alignment(
    position: ContentPosition,
    left_right_axis_direction: Option<TextDirection>,
) -> ContentPosition {
    let is_endward = match (position, left_right_axis_direction) {
        (ContentPosition::Left, Some(TextDirection::Rtl))
        | (ContentPosition::Right, Some(TextDirection::Ltr)) => true,
        (ContentPosition::Left | ContentPosition::Right, _) => false,
        _ => return position,
    };
    if is_endward {
        ContentPosition::End
    } else {
        ContentPosition::Start
    }
}

/// Offset of the first item from main-start.
///
/// `safe` alignment with negative free space falls back to `start`.
pub fn initial_justify_content_offset(
    alignment: ContentAlignment,
    left_right_axis_direction: Option<TextDirection>,
    available_free_space: LayoutUnit,
    number_of_items: usize,
    is_reversed: bool,
) -> LayoutUnit {
    let mut position = alignment.resolved_position();
    let distribution = alignment.resolved_distribution();
    if available_free_space < LayoutUnit::zero() && alignment.is_safe() {
        position = ContentPosition::Start;
    }
    position = resolve_left_right_alignment(position, left_right_axis_direction);

    if position == ContentPosition::FlexEnd
        || (position == ContentPosition::End && !is_reversed)
        || (position == ContentPosition::Start && is_reversed)
    {
        return available_free_space;
    }
    if position == ContentPosition::Center {
        return available_free_space / 2;
    }
    let count = count_as_i32(number_of_items);
    match distribution {
        ContentDistribution::SpaceAround => {
            if count == 0 {
                available_free_space / 2
            } else if available_free_space > LayoutUnit::zero() {
                available_free_space / count.saturating_mul(2)
            } else {
                LayoutUnit::zero()
            }
        }
        ContentDistribution::SpaceEvenly => {
            if count == 0 {
                available_free_space / 2
            } else if available_free_space > LayoutUnit::zero() {
                available_free_space / count.saturating_add(1)
            } else {
                LayoutUnit::zero()
            }
        }
        ContentDistribution::Default
        | ContentDistribution::SpaceBetween
        | ContentDistribution::Stretch => LayoutUnit::zero(),
    }
}

/// Extra space between adjacent items. Only positive free space is
/// distributed.
pub fn justify_content_space_between(
    available_free_space: LayoutUnit,
    distribution: ContentDistribution,
    number_of_items: usize,
) -> LayoutUnit {
    if available_free_space <= LayoutUnit::zero() || number_of_items <= 1 {
        return LayoutUnit::zero();
    }
    let count = count_as_i32(number_of_items);
    match distribution {
        ContentDistribution::SpaceBetween => available_free_space / (count - 1),
        ContentDistribution::SpaceAround => available_free_space / count,
        ContentDistribution::SpaceEvenly => available_free_space / count.saturating_add(1),
        ContentDistribution::Default | ContentDistribution::Stretch => LayoutUnit::zero(),
    }
}

/// Offset of the first line from cross-start.
pub fn initial_align_content_offset(
    available_free_space: LayoutUnit,
    alignment: ContentAlignment,
    number_of_lines: usize,
    is_reversed: bool,
) -> LayoutUnit {
    let mut position = alignment.resolved_position();
    let distribution = alignment.resolved_distribution();
    if available_free_space < LayoutUnit::zero() && alignment.is_safe() {
        position = ContentPosition::Start;
    }
    if position == ContentPosition::FlexEnd
        || (position == ContentPosition::End && !is_reversed)
        || (position == ContentPosition::Start && is_reversed)
    {
        return available_free_space;
    }
    if position == ContentPosition::Center {
        return available_free_space / 2;
    }
    let count = count_as_i32(number_of_lines);
    let zero = LayoutUnit::zero();
    match distribution {
        ContentDistribution::SpaceAround => {
            if available_free_space > zero && count > 0 {
                available_free_space / count.saturating_mul(2)
            } else if available_free_space < zero {
                (available_free_space / 2).max(zero)
            } else {
                zero
            }
        }
        ContentDistribution::SpaceEvenly => {
            if available_free_space > zero {
                available_free_space / count.saturating_add(1)
            } else {
                // Falls back to `safe center`.
                (available_free_space / 2).max(zero)
            }
        }
        ContentDistribution::Default
        | ContentDistribution::SpaceBetween
        | ContentDistribution::Stretch => zero,
    }
}

/// Extra space between adjacent lines. `stretch` spacing is applied by
/// growing each line, which moves the following ones by the same amount.
pub fn align_content_space_between(
    available_free_space: LayoutUnit,
    distribution: ContentDistribution,
    number_of_lines: usize,
) -> LayoutUnit {
    if available_free_space <= LayoutUnit::zero() || number_of_lines <= 1 {
        return LayoutUnit::zero();
    }
    let count = count_as_i32(number_of_lines);
    match distribution {
        ContentDistribution::SpaceBetween => available_free_space / (count - 1),
        ContentDistribution::SpaceAround | ContentDistribution::Stretch => {
            available_free_space / count
        }
        ContentDistribution::SpaceEvenly => available_free_space / count.saturating_add(1),
        ContentDistribution::Default => LayoutUnit::zero(),
    }
}

/// How far content may overflow the start edge and still be scrollable.
///
/// `safe` alignment and non-negative free space never overflow the start.
pub fn content_alignment_start_overflow(
    available_free_space: LayoutUnit,
    position: ContentPosition,
    distribution: ContentDistribution,
    safety: OverflowAlignment,
    is_reverse: bool,
) -> LayoutUnit {
    let zero = LayoutUnit::zero();
    if available_free_space >= zero || safety == OverflowAlignment::Safe {
        return zero;
    }
    if matches!(
        distribution,
        ContentDistribution::SpaceAround | ContentDistribution::SpaceEvenly
    ) {
        return -available_free_space / 2;
    }
    match position {
        ContentPosition::Start | ContentPosition::Baseline | ContentPosition::LastBaseline => zero,
        ContentPosition::FlexStart => {
            if is_reverse {
                -available_free_space
            } else {
                zero
            }
        }
        ContentPosition::Center => -available_free_space / 2,
        ContentPosition::End => -available_free_space,
        ContentPosition::FlexEnd => {
            if is_reverse {
                zero
            } else {
                -available_free_space
            }
        }
        ContentPosition::Normal | ContentPosition::Left | ContentPosition::Right => {
            if is_reverse {
                -available_free_space
            } else {
                zero
            }
        }
    }
}

//=============================================================================
// Self alignment offsets
//=============================================================================

/// Cross-axis offset of an item inside its line.
///
/// `stretch` items that could not fill the line align with cross-end under
/// `wrap-reverse`. Baseline items move by `max_ascent - ascent`.
pub fn alignment_offset(
    available_free_space: LayoutUnit,
    position: ItemPosition,
    ascent: Option<LayoutUnit>,
    max_ascent: Option<LayoutUnit>,
    is_wrap_reverse: bool,
) -> LayoutUnit {
    match position {
        ItemPosition::Stretch if is_wrap_reverse => available_free_space,
        ItemPosition::FlexEnd => available_free_space,
        ItemPosition::Center | ItemPosition::AnchorCenter => available_free_space / 2,
        ItemPosition::Baseline | ItemPosition::LastBaseline => {
            max_ascent.unwrap_or_default() - ascent.unwrap_or_default()
        }
        ItemPosition::Auto
        | ItemPosition::Normal
        | ItemPosition::Stretch
        | ItemPosition::Start
        | ItemPosition::End
        | ItemPosition::SelfStart
        | ItemPosition::SelfEnd
        | ItemPosition::FlexStart
        | ItemPosition::Left
        | ItemPosition::Right => LayoutUnit::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter3::{FlexDirection, FlexWrap};
    use css_writing_modes::WritingMode;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }

    fn flow(wrap: FlexWrap) -> FlexFlow {
        FlexFlow {
            direction: FlexDirection::Row,
            wrap,
            writing_mode: WritingModeStyle::default(),
        }
    }

    /// # Panics
    /// Panics if justify-content offsets for positive free space are wrong.
    #[test]
    fn justify_content_offsets() {
        let between = ContentAlignment::distribution(ContentDistribution::SpaceBetween);
        let ltr = Some(TextDirection::Ltr);
        assert_eq!(
            initial_justify_content_offset(between, ltr, px(50), 3, false),
            px(0)
        );
        assert_eq!(
            justify_content_space_between(px(50), ContentDistribution::SpaceBetween, 3),
            px(25)
        );
        let around = ContentAlignment::distribution(ContentDistribution::SpaceAround);
        assert_eq!(
            initial_justify_content_offset(around, ltr, px(60), 3, false),
            px(10)
        );
        let evenly = ContentAlignment::distribution(ContentDistribution::SpaceEvenly);
        assert_eq!(
            initial_justify_content_offset(evenly, ltr, px(60), 2, false),
            px(20)
        );
        let center = ContentAlignment::position(ContentPosition::Center);
        assert_eq!(
            initial_justify_content_offset(center, ltr, px(-40), 1, false),
            px(-20)
        );
        assert_eq!(
            initial_justify_content_offset(center.safe(), ltr, px(-40), 1, false),
            px(0)
        );
        let end = ContentAlignment::position(ContentPosition::End);
        assert_eq!(
            initial_justify_content_offset(end, ltr, px(30), 1, false),
            px(30)
        );
        assert_eq!(
            initial_justify_content_offset(end, ltr, px(30), 1, true),
            px(0)
        );
    }

    /// # Panics
    /// Panics if `left`/`right` are not mapped through the physical direction.
    #[test]
    fn left_right_resolve_through_direction() {
        assert_eq!(
            resolve_left_right_alignment(ContentPosition::Right, Some(TextDirection::Ltr)),
            ContentPosition::End
        );
        assert_eq!(
            resolve_left_right_alignment(ContentPosition::Right, Some(TextDirection::Rtl)),
            ContentPosition::Start
        );
        assert_eq!(
            resolve_left_right_alignment(ContentPosition::Left, None),
            ContentPosition::Start
        );
        assert_eq!(
            resolve_left_right_alignment(ContentPosition::Center, None),
            ContentPosition::Center
        );
    }

    /// # Panics
    /// Panics if align-content fallbacks for negative space are wrong.
    #[test]
    fn align_content_negative_space_fallbacks() {
        let around = ContentAlignment::distribution(ContentDistribution::SpaceAround);
        assert_eq!(initial_align_content_offset(px(-20), around, 2, false), px(0));
        assert_eq!(initial_align_content_offset(px(40), around, 2, false), px(10));
        let stretch = ContentAlignment::distribution(ContentDistribution::Stretch);
        assert_eq!(
            align_content_space_between(px(40), stretch.distribution, 2),
            px(20)
        );
        let flex_end = ContentAlignment::position(ContentPosition::FlexEnd);
        assert_eq!(initial_align_content_offset(px(-20), flex_end, 2, false), px(-20));
        assert_eq!(
            initial_align_content_offset(px(-20), flex_end.safe(), 2, false),
            px(0)
        );
    }

    /// # Panics
    /// Panics if start overflow allowances are wrong.
    #[test]
    fn start_overflow_allowance() {
        let space = px(-30);
        let unsafe_default = OverflowAlignment::Default;
        assert_eq!(
            content_alignment_start_overflow(
                space,
                ContentPosition::Center,
                ContentDistribution::Default,
                unsafe_default,
                false
            ),
            px(15)
        );
        assert_eq!(
            content_alignment_start_overflow(
                space,
                ContentPosition::FlexEnd,
                ContentDistribution::Default,
                unsafe_default,
                true
            ),
            px(0)
        );
        assert_eq!(
            content_alignment_start_overflow(
                space,
                ContentPosition::Normal,
                ContentDistribution::Stretch,
                unsafe_default,
                true
            ),
            px(30)
        );
        assert_eq!(
            content_alignment_start_overflow(
                space,
                ContentPosition::End,
                ContentDistribution::Default,
                OverflowAlignment::Safe,
                false
            ),
            px(0)
        );
    }

    /// # Panics
    /// Panics if item alignment does not resolve `auto`, `normal` and `wrap-reverse`.
    #[test]
    fn item_alignment_resolution() {
        let auto = ItemAlignment::default();
        let normal = ItemAlignment::new(ItemPosition::Normal);
        let nowrap = flow(FlexWrap::Nowrap);
        let horizontal = WritingModeStyle::default();
        assert_eq!(
            alignment_for_item(auto, normal, &nowrap, horizontal).0,
            ItemPosition::Stretch
        );
        let flex_start = ItemAlignment::new(ItemPosition::FlexStart);
        assert_eq!(
            alignment_for_item(flex_start, normal, &flow(FlexWrap::WrapReverse), horizontal).0,
            ItemPosition::FlexEnd
        );
        let start = ItemAlignment::new(ItemPosition::Start);
        assert_eq!(
            alignment_for_item(start, normal, &flow(FlexWrap::WrapReverse), horizontal).0,
            ItemPosition::FlexStart
        );
        let self_end = ItemAlignment::new(ItemPosition::SelfEnd).safe();
        let vertical = WritingModeStyle::new(WritingMode::VerticalLr, TextDirection::Ltr);
        assert_eq!(
            alignment_for_item(self_end, normal, &nowrap, vertical),
            (ItemPosition::FlexEnd, OverflowAlignment::Safe)
        );
    }

    /// # Panics
    /// Panics if self-alignment offsets are wrong.
    #[test]
    fn self_alignment_offsets() {
        assert_eq!(
            alignment_offset(px(30), ItemPosition::Center, None, None, false),
            px(15)
        );
        assert_eq!(
            alignment_offset(px(30), ItemPosition::Stretch, None, None, true),
            px(30)
        );
        assert_eq!(
            alignment_offset(px(30), ItemPosition::Stretch, None, None, false),
            px(0)
        );
        assert_eq!(
            alignment_offset(
                px(30),
                ItemPosition::Baseline,
                Some(px(4)),
                Some(px(10)),
                false
            ),
            px(6)
        );
    }
}

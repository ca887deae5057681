//! Ordering and orientation: order-modified document order and the mapping
//! between flex-relative and physical directions.
//! See <https://www.w3.org/TR/css-flexbox-1/#flow-order>
//! See <https://www.w3.org/TR/css-flexbox-1/#box-model>

use css_box::{LayoutUnit, PhysicalSide, Point, Sides, Size};
use css_sizing::SizeValue;
use css_writing_modes::{FlowDirection, TextDirection, WritingModeStyle};

use crate::chapter3::{FlexContainerStyle, FlexDirection, FlexWrap};
use crate::chapter4::{FlexChild, FlexItemStyle, Overflow, is_flex_item, needs_static_position};
use crate::error::{Result, try_with_capacity};

//=============================================================================
// Order
//=============================================================================

/// Compute a stable ordering key for a flex item.
/// Returns (order, `original_index`) so sorting by this key respects DOM order ties.
///
/// See <https://www.w3.org/TR/css-flexbox-1/#propdef-order>
pub const fn order_key(order: i32, original_index: usize) -> (i32, usize) {
    (order, original_index)
}

/// Children split into in-flow items (in order-modified document order) and
/// out-of-flow children (in document order), as indices into the input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderedChildren {
    pub in_flow: Vec<usize>,
    pub positioned: Vec<usize>,
}

/// Partition `children` and sort the in-flow ones by `order`, keeping
/// document order for ties.
///
/// # Errors
/// Returns `OutOfMemory` if the index buffers cannot be allocated.
pub fn order_modified_document_order(children: &[FlexChild]) -> Result<OrderedChildren> {
    let positioned_count = children
        .iter()
        .filter(|child| needs_static_position(&child.style))
        .count();
    let mut keyed: Vec<(i32, usize)> = try_with_capacity(children.len(), "order keys")?;
    let mut positioned = try_with_capacity(positioned_count, "positioned children")?;
    for (index, child) in children.iter().enumerate() {
        if is_flex_item(&child.style) {
            keyed.push(order_key(child.style.order, index));
        } else if needs_static_position(&child.style) {
            positioned.push(index);
        }
    }
    keyed.sort_unstable();
    let mut in_flow = try_with_capacity(keyed.len(), "flex items")?;
    in_flow.extend(keyed.into_iter().map(|(_, index)| index));
    Ok(OrderedChildren {
        in_flow,
        positioned,
    })
}

//=============================================================================
// Flex flow orientation
//=============================================================================

/// Physical edge a flow direction starts from.
#[inline]
pub const fn start_side(direction: FlowDirection) -> PhysicalSide {
    match direction {
        FlowDirection::TopToBottom => PhysicalSide::Top,
        FlowDirection::BottomToTop => PhysicalSide::Bottom,
        FlowDirection::LeftToRight => PhysicalSide::Left,
        FlowDirection::RightToLeft => PhysicalSide::Right,
    }
}

/// Flex-relative view of a container's physical coordinate space.
///
/// Derived from `flex-direction`, `flex-wrap` and the container's writing
/// mode. Nothing here is stored per item; every query is computed on demand.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlexFlow {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub writing_mode: WritingModeStyle,
}

impl FlexFlow {
    #[inline]
    pub const fn new(style: &FlexContainerStyle) -> Self {
        Self {
            direction: style.flex_direction,
            wrap: style.flex_wrap,
            writing_mode: style.writing_mode,
        }
    }

    #[inline]
    pub const fn is_column(&self) -> bool {
        self.direction.is_column()
    }

    #[inline]
    pub const fn is_column_or_row_reverse(&self) -> bool {
        self.direction.is_reverse()
    }

    #[inline]
    pub const fn is_multiline(&self) -> bool {
        self.wrap.is_multiline()
    }

    #[inline]
    pub const fn is_wrap_reverse(&self) -> bool {
        matches!(self.wrap, FlexWrap::WrapReverse)
    }

    /// The main axis is physically horizontal.
    #[inline]
    pub const fn is_horizontal_flow(&self) -> bool {
        self.writing_mode.is_horizontal() != self.is_column()
    }

    /// Main-start is the physical left (horizontal flows) or top edge.
    ///
    /// `column-reverse` is not folded in here; it gets its own placement pass.
    pub const fn is_left_to_right_flow(&self) -> bool {
        if self.is_column() {
            return matches!(
                self.writing_mode.block_direction(),
                FlowDirection::TopToBottom | FlowDirection::LeftToRight
            );
        }
        self.writing_mode.is_logical_left_inline_start()
            ^ matches!(self.direction, FlexDirection::RowReverse)
    }

    /// Direction lines stack in, before `wrap-reverse`.
    #[inline]
    pub const fn transformed_block_direction(&self) -> FlowDirection {
        if self.is_column() {
            self.writing_mode.inline_direction()
        } else {
            self.writing_mode.block_direction()
        }
    }

    /// Physical direction of the cross axis, `wrap-reverse` included.
    #[inline]
    pub const fn cross_axis_direction(&self) -> FlowDirection {
        let direction = self.transformed_block_direction();
        if self.is_wrap_reverse() {
            direction.reversed()
        } else {
            direction
        }
    }

    /// An item's inline axis is parallel to the main axis.
    #[inline]
    pub const fn main_axis_is_item_inline_axis(&self, item: WritingModeStyle) -> bool {
        self.is_horizontal_flow() == item.is_horizontal()
    }

    /// Direction `left`/`right` alignment keywords are measured in, if the
    /// main axis is parallel to the physical left-right axis at all.
    pub const fn left_right_axis_direction(&self) -> Option<TextDirection> {
        if !self.is_column() {
            return Some(self.writing_mode.direction);
        }
        if self.writing_mode.is_vertical() {
            return Some(
                if matches!(self.writing_mode.block_direction(), FlowDirection::LeftToRight) {
                    TextDirection::Ltr
                } else {
                    TextDirection::Rtl
                },
            );
        }
        None
    }

    //-------------------------------------------------------------------------
    // Flow-relative edges
    //-------------------------------------------------------------------------

    pub const fn main_start_side(&self) -> PhysicalSide {
        match (self.is_horizontal_flow(), self.is_left_to_right_flow()) {
            (true, true) => PhysicalSide::Left,
            (true, false) => PhysicalSide::Right,
            (false, true) => PhysicalSide::Top,
            (false, false) => PhysicalSide::Bottom,
        }
    }

    #[inline]
    pub const fn main_end_side(&self) -> PhysicalSide {
        self.main_start_side().opposite()
    }

    #[inline]
    pub const fn cross_before_side(&self) -> PhysicalSide {
        start_side(self.transformed_block_direction())
    }

    /// Start edge of the main axis in the container's own writing mode,
    /// ignoring `row-reverse`. `margin-trim` keywords are logical, so they
    /// map through this edge.
    #[inline]
    pub const fn logical_main_start_side(&self) -> PhysicalSide {
        if self.is_column() {
            start_side(self.writing_mode.block_direction())
        } else {
            start_side(self.writing_mode.inline_direction())
        }
    }

    #[inline]
    pub const fn cross_after_side(&self) -> PhysicalSide {
        self.cross_before_side().opposite()
    }

    /// The physical edge pair on the cross axis: top/bottom for horizontal
    /// flows, left/right otherwise.
    #[inline]
    pub const fn cross_top_or_left_side(&self) -> PhysicalSide {
        if self.is_horizontal_flow() {
            PhysicalSide::Top
        } else {
            PhysicalSide::Left
        }
    }

    #[inline]
    pub const fn main_left_or_top_side(&self) -> PhysicalSide {
        if self.is_horizontal_flow() {
            PhysicalSide::Left
        } else {
            PhysicalSide::Top
        }
    }

    #[inline]
    pub fn main_start(&self, sides: &Sides<LayoutUnit>) -> LayoutUnit {
        *sides.side(self.main_start_side())
    }

    #[inline]
    pub fn main_end(&self, sides: &Sides<LayoutUnit>) -> LayoutUnit {
        *sides.side(self.main_end_side())
    }

    #[inline]
    pub fn cross_before(&self, sides: &Sides<LayoutUnit>) -> LayoutUnit {
        *sides.side(self.cross_before_side())
    }

    #[inline]
    pub fn cross_after(&self, sides: &Sides<LayoutUnit>) -> LayoutUnit {
        *sides.side(self.cross_after_side())
    }

    /// Sum of both edges on the main axis.
    #[inline]
    pub fn main_sum(&self, sides: &Sides<LayoutUnit>) -> LayoutUnit {
        if self.is_horizontal_flow() {
            sides.horizontal_sum()
        } else {
            sides.vertical_sum()
        }
    }

    #[inline]
    pub fn cross_sum(&self, sides: &Sides<LayoutUnit>) -> LayoutUnit {
        if self.is_horizontal_flow() {
            sides.vertical_sum()
        } else {
            sides.horizontal_sum()
        }
    }

    //-------------------------------------------------------------------------
    // Sizes and points
    //-------------------------------------------------------------------------

    #[inline]
    pub const fn main_extent(&self, size: Size) -> LayoutUnit {
        if self.is_horizontal_flow() {
            size.width
        } else {
            size.height
        }
    }

    #[inline]
    pub const fn cross_extent(&self, size: Size) -> LayoutUnit {
        if self.is_horizontal_flow() {
            size.height
        } else {
            size.width
        }
    }

    /// Physical size from main and cross extents.
    #[inline]
    pub const fn physical_size(&self, main: LayoutUnit, cross: LayoutUnit) -> Size {
        if self.is_horizontal_flow() {
            Size::new(main, cross)
        } else {
            Size::new(cross, main)
        }
    }

    /// Physical point to flow-relative `(main, cross)` coordinates.
    #[inline]
    pub const fn flow_aware_location(&self, location: Point) -> Point {
        if self.is_horizontal_flow() {
            location
        } else {
            location.transposed()
        }
    }

    /// Flow-relative `(main, cross)` coordinates to a physical point.
    #[inline]
    pub const fn physical_location(&self, flow_location: Point) -> Point {
        self.flow_aware_location(flow_location)
    }

    //-------------------------------------------------------------------------
    // Item style on flex axes
    //-------------------------------------------------------------------------

    #[inline]
    pub const fn preferred_main_size(&self, style: &FlexItemStyle) -> SizeValue {
        if self.is_horizontal_flow() {
            style.width
        } else {
            style.height
        }
    }

    #[inline]
    pub const fn preferred_cross_size(&self, style: &FlexItemStyle) -> SizeValue {
        if self.is_horizontal_flow() {
            style.height
        } else {
            style.width
        }
    }

    #[inline]
    pub const fn min_main_size(&self, style: &FlexItemStyle) -> SizeValue {
        if self.is_horizontal_flow() {
            style.min_width
        } else {
            style.min_height
        }
    }

    #[inline]
    pub const fn max_main_size(&self, style: &FlexItemStyle) -> SizeValue {
        if self.is_horizontal_flow() {
            style.max_width
        } else {
            style.max_height
        }
    }

    #[inline]
    pub const fn min_cross_size(&self, style: &FlexItemStyle) -> SizeValue {
        if self.is_horizontal_flow() {
            style.min_height
        } else {
            style.min_width
        }
    }

    #[inline]
    pub const fn max_cross_size(&self, style: &FlexItemStyle) -> SizeValue {
        if self.is_horizontal_flow() {
            style.max_height
        } else {
            style.max_width
        }
    }

    #[inline]
    pub const fn main_overflow(&self, style: &FlexItemStyle) -> Overflow {
        if self.is_horizontal_flow() {
            style.overflow_x
        } else {
            style.overflow_y
        }
    }

    #[inline]
    pub const fn cross_overflow(&self, style: &FlexItemStyle) -> Overflow {
        if self.is_horizontal_flow() {
            style.overflow_y
        } else {
            style.overflow_x
        }
    }

    /// Number of `auto` margins on the main axis that `margin-trim` left in place.
    pub fn main_auto_margin_count(&self, style: &FlexItemStyle, trimmed: &Sides<bool>) -> i32 {
        let start = self.main_left_or_top_side();
        [start, start.opposite()]
            .into_iter()
            .map(|side| i32::from(style.margin.side(side).is_auto() && !*trimmed.side(side)))
            .sum()
    }

    pub fn has_auto_margins_in_cross_axis(&self, style: &FlexItemStyle) -> bool {
        let top_or_left = self.cross_top_or_left_side();
        style.margin.side(top_or_left).is_auto()
            || style.margin.side(top_or_left.opposite()).is_auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter4::ItemRef;
    use css_box::Margin;
    use css_writing_modes::WritingMode;

    fn flow(direction: FlexDirection, wrap: FlexWrap, writing_mode: WritingModeStyle) -> FlexFlow {
        FlexFlow {
            direction,
            wrap,
            writing_mode,
        }
    }

    /// # Panics
    /// Panics if axis resolution does not match the expected mapping for `horizontal-tb`.
    #[test]
    fn horizontal_tb_axes() {
        let ltr = WritingModeStyle::default();
        let row = flow(FlexDirection::Row, FlexWrap::Nowrap, ltr);
        assert!(row.is_horizontal_flow());
        assert!(row.is_left_to_right_flow());
        assert_eq!(row.main_start_side(), PhysicalSide::Left);
        assert_eq!(row.cross_before_side(), PhysicalSide::Top);

        let row_reverse = flow(FlexDirection::RowReverse, FlexWrap::Nowrap, ltr);
        assert!(!row_reverse.is_left_to_right_flow());
        assert_eq!(row_reverse.main_start_side(), PhysicalSide::Right);
        assert_eq!(row_reverse.logical_main_start_side(), PhysicalSide::Left);

        let column = flow(FlexDirection::Column, FlexWrap::WrapReverse, ltr);
        assert!(!column.is_horizontal_flow());
        assert_eq!(column.main_start_side(), PhysicalSide::Top);
        assert_eq!(column.cross_before_side(), PhysicalSide::Left);
        assert_eq!(column.cross_axis_direction(), FlowDirection::RightToLeft);
        assert_eq!(column.left_right_axis_direction(), None);
    }

    /// # Panics
    /// Panics if vertical and right-to-left writing modes map to the wrong edges.
    #[test]
    fn vertical_and_rtl_axes() {
        let rtl = WritingModeStyle::new(WritingMode::HorizontalTb, TextDirection::Rtl);
        let row = flow(FlexDirection::Row, FlexWrap::Nowrap, rtl);
        assert_eq!(row.main_start_side(), PhysicalSide::Right);
        let column = flow(FlexDirection::Column, FlexWrap::Nowrap, rtl);
        assert_eq!(column.cross_before_side(), PhysicalSide::Right);

        let vertical_rl = WritingModeStyle::new(WritingMode::VerticalRl, TextDirection::Ltr);
        let vertical_row = flow(FlexDirection::Row, FlexWrap::Nowrap, vertical_rl);
        assert!(!vertical_row.is_horizontal_flow());
        assert_eq!(vertical_row.main_start_side(), PhysicalSide::Top);
        assert_eq!(vertical_row.cross_before_side(), PhysicalSide::Right);
        let vertical_column = flow(FlexDirection::Column, FlexWrap::Nowrap, vertical_rl);
        assert!(vertical_column.is_horizontal_flow());
        assert_eq!(vertical_column.main_start_side(), PhysicalSide::Right);
        assert_eq!(
            vertical_column.left_right_axis_direction(),
            Some(TextDirection::Rtl)
        );
        assert!(vertical_column.main_axis_is_item_inline_axis(WritingModeStyle::default()));
        assert!(!vertical_row.main_axis_is_item_inline_axis(WritingModeStyle::default()));
    }

    /// # Panics
    /// Panics if stable order sorting does not preserve document order for ties.
    #[test]
    fn stable_order_sorting() {
        let with_order = |handle: u64, order: i32, out_of_flow: bool| {
            FlexChild::new(
                ItemRef(handle),
                FlexItemStyle {
                    order,
                    out_of_flow,
                    ..FlexItemStyle::default()
                },
            )
        };
        let children = [
            with_order(10, 1, false),
            with_order(11, 0, false),
            with_order(12, -3, true),
            with_order(13, 1, false),
            with_order(14, 0, false),
        ];
        let ordered = order_modified_document_order(&children).unwrap_or_default();
        // order=0 first in document order (11, 14), then order=1 (10, 13).
        assert_eq!(ordered.in_flow, vec![1, 4, 0, 3]);
        assert_eq!(ordered.positioned, vec![2]);
    }

    /// # Panics
    /// Panics if auto margins are not counted on the right axis.
    #[test]
    fn auto_margins_by_axis() {
        let style = FlexItemStyle {
            margin: Sides::new(Margin::Auto, Margin::Auto, Margin::default(), Margin::Auto),
            ..FlexItemStyle::default()
        };
        let row = flow(
            FlexDirection::Row,
            FlexWrap::Nowrap,
            WritingModeStyle::default(),
        );
        assert_eq!(row.main_auto_margin_count(&style, &Sides::default()), 2);
        let left_trimmed = Sides::new(false, false, false, true);
        assert_eq!(row.main_auto_margin_count(&style, &left_trimmed), 1);
        assert!(row.has_auto_margins_in_cross_axis(&style));
        let column = flow(
            FlexDirection::Column,
            FlexWrap::Nowrap,
            WritingModeStyle::default(),
        );
        assert_eq!(column.main_auto_margin_count(&style, &Sides::default()), 1);
    }
}

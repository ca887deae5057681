//! Laying out flexed items and placing them along the main axis of a line.
//! See <https://www.w3.org/TR/css-flexbox-1/#main-alignment>
//! See <https://www.w3.org/TR/css-flexbox-1/#auto-margins>

use css_box::{LayoutUnit, Point, Sides};
use css_sizing::BoxSizing;
use css_writing_modes::FlowDirection;
use log::{debug, trace};

use super::constraint_space::{ChildConstraintSpace, FlexLayoutTree};
use super::context::LayoutPhase;
use super::{FlexLayoutAlgorithm, LineState, reserve_one};
use crate::chapter4::FlexItemStyle;
use crate::chapter7::FlexLayoutItem;
use crate::chapter8::baseline::BaselineAlignmentState;
use crate::chapter8::{
    ItemPosition, content_alignment_start_overflow, initial_justify_content_offset,
    justify_content_space_between, resolve_left_right_alignment,
};
use crate::error::Result;

/// Border-box block size the aspect ratio gives an item of the given
/// border-box inline size.
fn block_size_from_aspect_ratio(style: &FlexItemStyle, inline_border_box: LayoutUnit) -> Option<LayoutUnit> {
    let ratio = style.physical_aspect_ratio()?;
    let edges = style.border_and_padding();
    let (inline_border_and_padding, block_border_and_padding) = if style.writing_mode.is_horizontal() {
        (edges.horizontal_sum(), edges.vertical_sum())
    } else {
        (edges.vertical_sum(), edges.horizontal_sum())
    };
    let ratio_on_border_box = style.uses_specified_ratio() && style.box_sizing == BoxSizing::BorderBox;
    let inline = if ratio_on_border_box {
        inline_border_box
    } else {
        (inline_border_box - inline_border_and_padding).clamp_negative_to_zero()
    };
    let block = if style.writing_mode.is_horizontal() {
        inline.to_f64() / ratio
    } else {
        inline.to_f64() * ratio
    };
    let block = LayoutUnit::from_f64(block);
    Some(if ratio_on_border_box {
        block.max(block_border_and_padding)
    } else {
        block + block_border_and_padding
    })
}

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    /// Used border-box block size of an item laid out at `inline_border_box`
    /// whose content measured `content`.
    pub(super) fn used_block_size(
        &self,
        style: &FlexItemStyle,
        margins: &Sides<LayoutUnit>,
        inline_border_box: LayoutUnit,
        content: LayoutUnit,
    ) -> LayoutUnit {
        let axis = self.block_axis_sizing(style, margins);
        let size = axis
            .preferred_border_box()
            .or_else(|| {
                axis.preferred
                    .is_auto()
                    .then(|| block_size_from_aspect_ratio(style, inline_border_box))
                    .flatten()
            })
            .unwrap_or(content + axis.border_and_padding);
        axis.constrain(size, content)
    }

    /// Lay out one item at its flexed main size and record its border-box
    /// size and baselines.
    fn layout_flex_item(&mut self, item: &FlexLayoutItem) -> Result<()> {
        let Some(geometry) = self.geometry.get(item.index) else {
            return Ok(());
        };
        let child = geometry.child;
        let margins = geometry.margin;
        let orthogonal_inline_size = geometry.inline_size;
        let style = &child.style;
        let main_size = item.flexed_border_box_size();
        let main_is_inline = self.main_axis_is_inline(style);

        let space = if main_is_inline {
            ChildConstraintSpace {
                inline_size: main_size,
                block_size: None,
                percentage_resolution_block_size: None,
            }
        } else {
            ChildConstraintSpace {
                inline_size: orthogonal_inline_size,
                block_size: Some(main_size),
                percentage_resolution_block_size: self.percentage_resolution_block_size(style, Some(main_size)),
            }
        };
        let result = self.tree.layout_child(child.handle, &space);
        let cross_size = if main_is_inline {
            self.cache
                .set_intrinsic_content_block_size(child.handle, result.content_block_size);
            self.used_block_size(style, &margins, main_size, result.content_block_size)
        } else {
            orthogonal_inline_size
        };
        trace!(
            target: "css::flexbox::layout",
            "[FLEX-LAYOUT] item {:?} main={main_size} cross={cross_size} content_block={}",
            child.handle, result.content_block_size
        );

        let size = self.flow.physical_size(main_size, cross_size);
        if let Some(geometry) = self.geometry.get_mut(item.index) {
            geometry.size = size;
            geometry.first_baseline = result.first_baseline;
            geometry.last_baseline = result.last_baseline;
        }
        Ok(())
    }

    /// Share positive free space among the line's main-axis `auto` margins.
    /// The space is consumed, so justify-content no longer applies.
    fn auto_margin_offset_in_main_axis(&self, line_items: &[FlexLayoutItem], available_free_space: &mut LayoutUnit) -> LayoutUnit {
        if *available_free_space <= LayoutUnit::zero() {
            return LayoutUnit::zero();
        }
        let auto_margins: i32 = line_items
            .iter()
            .filter_map(|item| self.geometry.get(item.index))
            .map(|geometry| self.flow.main_auto_margin_count(&geometry.child.style, &geometry.trimmed))
            .sum();
        if auto_margins == 0 {
            return LayoutUnit::zero();
        }
        let size = *available_free_space / auto_margins;
        *available_free_space = LayoutUnit::zero();
        size
    }

    fn update_auto_margins_in_main_axis(&mut self, index: usize, auto_margin_offset: LayoutUnit) {
        let start = self.flow.main_left_or_top_side();
        let Some(geometry) = self.geometry.get_mut(index) else {
            return;
        };
        for side in [start, start.opposite()] {
            if geometry.child.style.margin.side(side).is_auto() && !*geometry.trimmed.side(side) {
                *geometry.margin.side_mut(side) = auto_margin_offset;
            }
        }
    }

    /// Block direction an item's baseline is measured along.
    pub(super) fn baseline_block_flow(&self, style: &FlexItemStyle) -> FlowDirection {
        if self.main_axis_is_inline(style) {
            style.writing_mode.block_direction()
        } else {
            self.flow.transformed_block_direction()
        }
    }

    /// Stretched items whose block axis is the cross axis are sized from
    /// their content, not their current (possibly stretched) size.
    pub(super) fn needs_to_stretch_block_size(&self, style: &FlexItemStyle) -> bool {
        self.item_alignment(style).0 == ItemPosition::Stretch
            && self.main_axis_is_inline(style)
            && !(style.is_replaced && style.physical_aspect_ratio().is_some())
            && self.block_axis_sizing(style, &Sides::default()).preferred.is_auto()
    }

    /// Border-box cross size the item would have before stretching.
    fn cross_axis_intrinsic_extent(&self, index: usize) -> Result<LayoutUnit> {
        let Some(geometry) = self.geometry.get(index) else {
            return Ok(LayoutUnit::zero());
        };
        let style = &geometry.child.style;
        if !self.main_axis_is_inline(style) {
            if self.cross_size_is_definite(self.flow.preferred_cross_size(style)) {
                return Ok(self.flow.cross_extent(geometry.size));
            }
            return self.fit_inline_size(geometry.child_index, geometry.child, &geometry.margin, None);
        }
        if self.needs_to_stretch_block_size(style) {
            let content = self.intrinsic_content_block_size(geometry.child_index, geometry.child)?;
            return Ok(self.block_axis_sizing(style, &geometry.margin).used_border_box(content));
        }
        Ok(self.flow.cross_extent(geometry.size))
    }

    /// Lay out the items of one line, place them along the main axis and
    /// record the line's cross extent.
    ///
    /// # Errors
    /// Returns `OutOfMemory` if the line list cannot grow and
    /// `MissingMeasurement` if an item's intrinsic size was never measured.
    pub(super) fn layout_and_place_items(
        &mut self,
        line_items: &[FlexLayoutItem],
        available_free_space: LayoutUnit,
        cross_axis_offset: &mut LayoutUnit,
        gap_between_items: LayoutUnit,
    ) -> Result<()> {
        let mut available_free_space = available_free_space;
        let auto_margin_offset = self.auto_margin_offset_in_main_axis(line_items, &mut available_free_space);
        let item_count = line_items.len();
        let is_reversed = self.flow.is_column_or_row_reverse();
        let left_right = self.flow.left_right_axis_direction();
        let justify_content = self.style.justify_content;
        let mut main_axis_offset = self.flow.main_start(&self.border_and_padding)
            + initial_justify_content_offset(justify_content, left_right, available_free_space, item_count, is_reversed);

        if available_free_space < LayoutUnit::zero() {
            let position = resolve_left_right_alignment(justify_content.resolved_position(), left_right);
            let overflow = content_alignment_start_overflow(
                available_free_space,
                position,
                justify_content.resolved_distribution(),
                justify_content.overflow,
                is_reversed,
            );
            self.justify_content_start_overflow = self.justify_content_start_overflow.max(overflow);
        }

        let total_main_extent = self.main_axis_extent();
        let space_between = justify_content_space_between(
            available_free_space,
            justify_content.resolved_distribution(),
            item_count,
        );
        let should_flip_main_axis = !self.flow.is_column() && !self.flow.is_left_to_right_flow();
        let cross_after_edge = self.flow.cross_after(&self.border_and_padding);
        let mut max_cross_axis_extent = LayoutUnit::zero();
        let mut max_ascent = LayoutUnit::zero();
        let mut last_baseline_max_ascent = LayoutUnit::zero();
        let mut max_descent = LayoutUnit::min_value();
        let mut baseline_state: Option<BaselineAlignmentState> = None;

        let context = self.context;
        let _phase = context.enter(LayoutPhase::FlexItemLayout);
        for (position, item) in line_items.iter().enumerate() {
            self.layout_flex_item(item)?;
            self.update_auto_margins_in_main_axis(item.index, auto_margin_offset);
            let Some(geometry) = self.geometry.get(item.index) else {
                continue;
            };
            let style = &geometry.child.style;
            let margin = geometry.margin;
            let size = geometry.size;
            let cross_margin = self.flow.cross_sum(&margin);
            let (alignment, _) = self.item_alignment(style);

            let cross_margin_box_extent = if alignment.is_baseline()
                && !self.flow.has_auto_margins_in_cross_axis(style)
            {
                let ascent = self.margin_box_ascent(item.index);
                let descent = cross_margin + self.flow.cross_extent(size) - ascent;
                max_descent = max_descent.max(descent);
                baseline_state.get_or_insert_with(BaselineAlignmentState::new).update_shared_group(
                    item.index,
                    self.baseline_block_flow(style),
                    alignment,
                    ascent,
                );
                if alignment == ItemPosition::Baseline {
                    max_ascent = max_ascent.max(ascent);
                    max_ascent + max_descent
                } else {
                    last_baseline_max_ascent = last_baseline_max_ascent.max(ascent);
                    last_baseline_max_ascent + max_descent
                }
            } else {
                self.cross_axis_intrinsic_extent(item.index)? + cross_margin
            };

            if !self.flow.is_column() {
                self.logical_height = self
                    .logical_height
                    .max(*cross_axis_offset + cross_after_edge + cross_margin_box_extent);
            }
            max_cross_axis_extent = max_cross_axis_extent.max(cross_margin_box_extent);

            main_axis_offset += self.flow.main_start(&margin);
            let main_extent = self.flow.main_extent(size);
            let main = if should_flip_main_axis {
                total_main_extent - main_axis_offset - main_extent
            } else {
                main_axis_offset
            };
            let location = Point::new(main, *cross_axis_offset + self.flow.cross_before(&margin));
            if let Some(geometry) = self.geometry.get_mut(item.index) {
                geometry.location = location;
            }
            main_axis_offset += main_extent + self.flow.main_end(&margin);
            if position + 1 != item_count {
                main_axis_offset += space_between + gap_between_items;
            }
        }

        if self.flow.is_column() {
            self.logical_height = self
                .logical_height
                .max(main_axis_offset + self.flow.main_end(&self.border_and_padding));
        }
        if self.flow.is_column() && is_reversed {
            // Items start from the end, which is only known now.
            self.update_logical_height();
            self.layout_column_reverse(line_items, *cross_axis_offset, available_free_space, gap_between_items);
        }

        let first = line_items.first().map_or(0, |item| item.index);
        debug!(
            target: "css::flexbox::layout",
            "[FLEX-LAYOUT] line items={item_count} cross_offset={} cross_extent={max_cross_axis_extent} free={available_free_space}",
            *cross_axis_offset
        );
        reserve_one(&mut self.lines, "flex lines")?;
        self.lines.push(LineState {
            cross_axis_offset: *cross_axis_offset,
            cross_axis_extent: max_cross_axis_extent,
            baseline: baseline_state,
            items: first..first + item_count,
        });
        *cross_axis_offset += max_cross_axis_extent;
        Ok(())
    }

    /// Re-place a `column-reverse` line from the end of the main axis.
    fn layout_column_reverse(
        &mut self,
        line_items: &[FlexLayoutItem],
        cross_axis_offset: LayoutUnit,
        available_free_space: LayoutUnit,
        gap_between_items: LayoutUnit,
    ) {
        let item_count = line_items.len();
        let justify_content = self.style.justify_content;
        let mut main_axis_offset = self.logical_height
            - self.flow.main_end(&self.border_and_padding)
            - initial_justify_content_offset(
                justify_content,
                self.flow.left_right_axis_direction(),
                available_free_space,
                item_count,
                true,
            );
        let space_between = justify_content_space_between(
            available_free_space,
            justify_content.resolved_distribution(),
            item_count,
        );
        let flow = self.flow;
        for (position, item) in line_items.iter().enumerate() {
            let Some(geometry) = self.geometry.get_mut(item.index) else {
                continue;
            };
            main_axis_offset -= flow.main_extent(geometry.size) + flow.main_end(&geometry.margin);
            geometry.location = Point::new(main_axis_offset, cross_axis_offset + flow.cross_before(&geometry.margin));
            main_axis_offset -= flow.main_start(&geometry.margin);
            if position + 1 != item_count {
                main_axis_offset -= space_between + gap_between_items;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_box::Margin;
    use css_sizing::{AspectRatio, IntrinsicSizes, SizeValue};

    use super::super::{ChildLayoutResult, FlexLayoutCache, perform_flex_layout};
    use crate::chapter3::{FlexContainerConstraints, FlexContainerStyle, FlexDirection};
    use crate::chapter4::{FlexChild, ItemRef};
    use crate::chapter8::{ContentAlignment, ContentDistribution, ContentPosition};

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }

    /// Children are empty boxes; every size comes from style.
    struct EmptyContent;

    impl FlexLayoutTree for EmptyContent {
        fn intrinsic_inline_sizes(&mut self, _item: ItemRef) -> IntrinsicSizes {
            IntrinsicSizes::zero()
        }

        fn layout_child(&mut self, _item: ItemRef, _space: &ChildConstraintSpace) -> ChildLayoutResult {
            ChildLayoutResult::default()
        }
    }

    fn sized(handle: u64, width: i32, height: i32) -> FlexChild {
        FlexChild::new(
            ItemRef(handle),
            FlexItemStyle {
                width: SizeValue::Fixed(px(width)),
                height: SizeValue::Fixed(px(height)),
                ..FlexItemStyle::default()
            },
        )
    }

    fn main_positions(style: &FlexContainerStyle, constraints: &FlexContainerConstraints, children: &[FlexChild]) -> Vec<(i32, i32)> {
        let mut cache = FlexLayoutCache::new();
        perform_flex_layout(style, constraints, children, &mut EmptyContent, &mut cache)
            .map(|output| {
                output
                    .items
                    .iter()
                    .map(|item| (item.rect.x.to_int(), item.rect.y.to_int()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// # Panics
    /// Panics if auto margins do not absorb the free space before
    /// justify-content.
    #[test]
    fn auto_margins_take_free_space() {
        let style = FlexContainerStyle {
            justify_content: ContentAlignment::position(ContentPosition::Center),
            ..FlexContainerStyle::default()
        };
        let constraints = FlexContainerConstraints::with_inline_size(px(200));
        let mut pushed = sized(2, 50, 10);
        pushed.style.margin.left = Margin::Auto;
        let positions = main_positions(&style, &constraints, &[sized(1, 50, 10), pushed]);
        assert_eq!(positions, vec![(0, 0), (150, 0)]);
    }

    /// # Panics
    /// Panics if `row-reverse` does not mirror items around the main extent.
    #[test]
    fn row_reverse_places_from_the_right() {
        let style = FlexContainerStyle {
            flex_direction: FlexDirection::RowReverse,
            ..FlexContainerStyle::default()
        };
        let constraints = FlexContainerConstraints::with_inline_size(px(200));
        let positions = main_positions(&style, &constraints, &[sized(1, 50, 10), sized(2, 30, 10)]);
        assert_eq!(positions, vec![(150, 0), (120, 0)]);
    }

    /// # Panics
    /// Panics if `column-reverse` does not stack items from the block end.
    #[test]
    fn column_reverse_stacks_from_the_bottom() {
        let style = FlexContainerStyle {
            flex_direction: FlexDirection::ColumnReverse,
            ..FlexContainerStyle::default()
        };
        let constraints = FlexContainerConstraints {
            content_block_size: Some(px(100)),
            ..FlexContainerConstraints::with_inline_size(px(200))
        };
        let positions = main_positions(&style, &constraints, &[sized(1, 50, 10), sized(2, 30, 20)]);
        assert_eq!(positions, vec![(0, 90), (0, 70)]);
    }

    /// # Panics
    /// Panics if `space-around` does not put half a share at each end.
    #[test]
    fn space_around_distribution() {
        let style = FlexContainerStyle {
            justify_content: ContentAlignment::distribution(ContentDistribution::SpaceAround),
            ..FlexContainerStyle::default()
        };
        let constraints = FlexContainerConstraints::with_inline_size(px(200));
        let positions = main_positions(&style, &constraints, &[sized(1, 50, 10), sized(2, 50, 10)]);
        assert_eq!(positions, vec![(25, 0), (125, 0)]);
    }

    /// # Panics
    /// Panics if an auto block size ignores the aspect ratio.
    #[test]
    fn aspect_ratio_sets_block_size() {
        let style = FlexItemStyle {
            aspect_ratio: AspectRatio::Ratio(2.0),
            ..FlexItemStyle::default()
        };
        assert_eq!(
            block_size_from_aspect_ratio(&style, px(80)),
            Some(px(40))
        );
        assert_eq!(
            block_size_from_aspect_ratio(&FlexItemStyle::default(), px(80)),
            None
        );
    }
}

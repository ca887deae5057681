//! Static positions of out-of-flow children.
//! See <https://www.w3.org/TR/css-flexbox-1/#abspos-items>

use css_box::{LayoutUnit, Size};
use log::trace;

use super::constraint_space::FlexLayoutTree;
use super::{FlexLayoutAlgorithm, StaticPosition, reserve_one};
use crate::chapter4::FlexChild;
use crate::chapter5::start_side;
use crate::chapter8::{ItemPosition, OverflowAlignment, alignment_offset, initial_justify_content_offset};
use crate::error::Result;

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    /// Physical border-box size an out-of-flow child would have.
    fn positioned_child_size(&self, child_index: usize, child: &FlexChild) -> Result<Size> {
        let style = &child.style;
        let margins = self.resolved_margins(style);
        let inline_size = self.fit_inline_size(child_index, child, &margins, None)?;
        let content = self
            .measurements
            .block_layout(child_index)
            .map_or_else(LayoutUnit::zero, |result| result.content_block_size);
        let block_size = self.used_block_size(style, &margins, inline_size, content);
        Ok(if style.writing_mode.is_horizontal() {
            Size::new(inline_size, block_size)
        } else {
            Size::new(block_size, inline_size)
        })
    }

    /// Main-axis offset from the content box's main-start edge, as if the
    /// child were the only item on the line.
    fn static_main_axis_position(&self, margin_box_main_extent: LayoutUnit) -> LayoutUnit {
        let available = self.main_axis_content_extent(self.content_logical_height()) - margin_box_main_extent;
        let is_reversed = self.flow.is_column_or_row_reverse();
        let offset = initial_justify_content_offset(
            self.style.justify_content,
            self.flow.left_right_axis_direction(),
            available,
            0,
            is_reversed,
        );
        if is_reversed { available - offset } else { offset }
    }

    /// Cross-axis offset from the content box's cross-before edge.
    fn static_cross_axis_position(&self, child: &FlexChild, margin_box_cross_extent: LayoutUnit) -> LayoutUnit {
        let available = self.cross_axis_content_extent() - margin_box_cross_extent;
        let (mut position, safety) = self.item_alignment(&child.style);
        if available < LayoutUnit::zero() && safety == OverflowAlignment::Safe {
            position = ItemPosition::FlexStart;
        }
        alignment_offset(available, position, None, None, self.flow.is_wrap_reverse())
    }

    /// Static position of each out-of-flow child, in `positioned` order.
    ///
    /// # Errors
    /// Returns `OutOfMemory` if the result cannot grow and
    /// `MissingMeasurement` if a child's inline sizes were never measured.
    pub(super) fn static_positions(&self, positioned: &[usize]) -> Result<Vec<StaticPosition>> {
        let mut positions = Vec::new();
        let writing_mode = self.style.writing_mode;
        let inline_start = *self
            .border_and_padding
            .side(start_side(writing_mode.inline_direction()));
        let block_start = *self
            .border_and_padding
            .side(start_side(writing_mode.block_direction()));
        for &child_index in positioned {
            let Some(child) = self.children.get(child_index) else {
                continue;
            };
            let style = &child.style;
            let size = self.positioned_child_size(child_index, child)?;
            let margins = self.resolved_margins(style);
            let main = self.static_main_axis_position(self.flow.main_extent(size) + self.flow.main_sum(&margins));
            let cross =
                self.static_cross_axis_position(child, self.flow.cross_extent(size) + self.flow.cross_sum(&margins));
            let (inline, block) = if self.flow.is_column() {
                (cross, main)
            } else {
                (main, cross)
            };
            let position = StaticPosition {
                handle: child.handle,
                inline_offset: style.inline_insets_auto.then_some(inline_start + inline),
                block_offset: style.block_insets_auto.then_some(block_start + block),
            };
            trace!(
                target: "css::flexbox::layout",
                "[FLEX-LAYOUT] static position {:?} inline={:?} block={:?}",
                child.handle, position.inline_offset, position.block_offset
            );
            reserve_one(&mut positions, "static positions")?;
            positions.push(position);
        }
        Ok(positions)
    }
}

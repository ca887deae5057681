//! Cross-axis work that needs the container's final block size: line
//! distribution, self alignment, stretching and the reverse flips.
//! See <https://www.w3.org/TR/css-flexbox-1/#cross-alignment>
//! See <https://www.w3.org/TR/css-flexbox-1/#align-content-property>

use css_box::LayoutUnit;
use css_writing_modes::FlowDirection;
use log::{debug, trace};

use super::FlexLayoutAlgorithm;
use super::constraint_space::{ChildConstraintSpace, FlexLayoutTree};
use super::context::LayoutPhase;
use crate::chapter8::baseline::BaselineAlignmentState;
use crate::chapter8::{
    ContentDistribution, ContentPosition, ItemPosition, OverflowAlignment,
    align_content_space_between, alignment_offset, content_alignment_start_overflow,
    initial_align_content_offset,
};
use crate::error::Result;

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    /// Align lines and items once the container's block size is known.
    ///
    /// # Errors
    /// Returns `MissingMeasurement` if a stretched item has no intrinsic
    /// block size to clamp against.
    pub(super) fn reposition_logical_height_dependent_items(&mut self, gap_between_lines: LayoutUnit) -> Result<()> {
        let context = self.context;
        let _phase = context.enter(LayoutPhase::CrossAxisLayout);
        let cross_axis_start_edge = self
            .lines
            .first()
            .map_or_else(LayoutUnit::zero, |line| line.cross_axis_offset);
        if !self.flow.is_multiline() {
            // A single line fills the container.
            let extent = self.cross_axis_content_extent();
            if let Some(line) = self.lines.first_mut() {
                line.cross_axis_extent = extent;
            }
        }
        self.align_flex_lines(gap_between_lines);
        self.align_flex_items()?;
        if self.flow.is_wrap_reverse() {
            self.flip_for_wrap_reverse(cross_axis_start_edge);
        }
        self.flip_for_right_to_left_column();
        Ok(())
    }

    /// Move an item along the cross axis.
    fn adjust_alignment(&mut self, index: usize, delta: LayoutUnit) {
        if let Some(geometry) = self.geometry.get_mut(index) {
            geometry.location.y += delta;
        }
    }

    /// Line cross extent minus the item's cross-axis margin box.
    fn available_alignment_space(&self, index: usize, line_cross_axis_extent: LayoutUnit) -> LayoutUnit {
        self.geometry.get(index).map_or_else(LayoutUnit::zero, |geometry| {
            line_cross_axis_extent
                - self.flow.cross_sum(&geometry.margin)
                - self.flow.cross_extent(geometry.size)
        })
    }

    /// Distribute the lines of a multi-line container with `align-content`.
    fn align_flex_lines(&mut self, gap_between_lines: LayoutUnit) {
        if self.lines.is_empty() || !self.flow.is_multiline() {
            return;
        }
        let align_content = self.style.align_content;
        let position = align_content.resolved_position();
        let distribution = align_content.resolved_distribution();
        let safety = align_content.overflow;
        let is_wrap_reverse = self.flow.is_wrap_reverse();
        if position == ContentPosition::FlexStart
            && gap_between_lines == LayoutUnit::zero()
            && safety != OverflowAlignment::Safe
            && !is_wrap_reverse
        {
            return;
        }

        let line_count = self.lines.len();
        let count = i32::try_from(line_count).unwrap_or(i32::MAX);
        let line_extents: LayoutUnit = self.lines.iter().map(|line| line.cross_axis_extent).sum();
        let available = self.cross_axis_content_extent() - gap_between_lines * (count - 1) - line_extents;
        self.align_content_start_overflow =
            content_alignment_start_overflow(available, position, distribution, safety, is_wrap_reverse);

        let mut line_offset = initial_align_content_offset(available, align_content, line_count, is_wrap_reverse);
        let space_between = align_content_space_between(available, distribution, line_count);
        let stretch = (distribution == ContentDistribution::Stretch && available > LayoutUnit::zero())
            .then(|| available / count);
        debug!(
            target: "css::flexbox::alignment",
            "[FLEX-ALIGN] lines={line_count} available={available} first_offset={line_offset}"
        );
        for line_number in 0..line_count {
            let Some(line) = self.lines.get_mut(line_number) else {
                continue;
            };
            line.cross_axis_offset += line_offset;
            if let Some(extra) = stretch {
                line.cross_axis_extent += extra;
            }
            for index in line.items.clone() {
                self.adjust_alignment(index, line_offset);
            }
            line_offset += space_between + gap_between_lines;
        }
    }

    /// Apply `align-self` to every item in its line.
    fn align_flex_items(&mut self) -> Result<()> {
        let is_wrap_reverse = self.flow.is_wrap_reverse();
        for line_number in 0..self.lines.len() {
            let Some(line) = self.lines.get(line_number) else {
                continue;
            };
            let line_cross_axis_extent = line.cross_axis_extent;
            let items = line.items.clone();
            if let Some(baseline) = line.baseline.clone() {
                self.perform_baseline_alignment(&baseline, line_cross_axis_extent);
            }
            for index in items {
                let Some(child) = self.geometry.get(index).map(|geometry| geometry.child) else {
                    continue;
                };
                let (mut position, safety) = self.item_alignment(&child.style);
                let space = self
                    .available_alignment_space(index, line_cross_axis_extent)
                    .clamp_negative_to_zero();
                if self.update_auto_margins_in_cross_axis(index, space) || position.is_baseline() {
                    continue;
                }
                if position == ItemPosition::Stretch {
                    self.apply_stretch_alignment(index, line_cross_axis_extent)?;
                }
                let available = self.available_alignment_space(index, line_cross_axis_extent);
                if available < LayoutUnit::zero() && safety == OverflowAlignment::Safe {
                    position = ItemPosition::FlexStart;
                }
                let offset = alignment_offset(available, position, None, None, is_wrap_reverse);
                self.adjust_alignment(index, offset);
            }
        }
        Ok(())
    }

    /// Baseline alignment whose fallback pushes the item towards cross-end.
    fn aligns_towards_cross_axis_end(&self, block_flow: FlowDirection, position: ItemPosition) -> bool {
        let cross_axis_direction = self.flow.cross_axis_direction();
        if position == ItemPosition::Baseline {
            cross_axis_direction != block_flow
        } else {
            cross_axis_direction == block_flow
        }
    }

    /// Line up each baseline-sharing group, then shift groups whose fallback
    /// alignment is cross-end by their smallest leftover space.
    /// See <https://www.w3.org/TR/css-align-3/#align-by-baseline>
    fn perform_baseline_alignment(&mut self, state: &BaselineAlignmentState, line_cross_axis_extent: LayoutUnit) {
        let is_wrap_reverse = self.flow.is_wrap_reverse();
        for group in state.groups() {
            let mut min_margin_after_baseline: Option<LayoutUnit> = None;
            for &index in group.items() {
                let Some(child) = self.geometry.get(index).map(|geometry| geometry.child) else {
                    continue;
                };
                let (position, _) = self.item_alignment(&child.style);
                let available = self.available_alignment_space(index, line_cross_axis_extent);
                let ascent = self.margin_box_ascent(index);
                let offset = alignment_offset(
                    available,
                    position,
                    Some(ascent),
                    Some(group.max_ascent()),
                    is_wrap_reverse,
                );
                self.adjust_alignment(index, offset);
                if self.aligns_towards_cross_axis_end(self.baseline_block_flow(&child.style), position) {
                    let after = available - offset;
                    min_margin_after_baseline =
                        Some(min_margin_after_baseline.map_or(after, |current| current.min(after)));
                }
            }
            let Some(shift) = min_margin_after_baseline.filter(|shift| *shift != LayoutUnit::zero()) else {
                continue;
            };
            for &index in group.items() {
                let Some(child) = self.geometry.get(index).map(|geometry| geometry.child) else {
                    continue;
                };
                let (position, _) = self.item_alignment(&child.style);
                if self.aligns_towards_cross_axis_end(self.baseline_block_flow(&child.style), position)
                    && !self.flow.has_auto_margins_in_cross_axis(&child.style)
                {
                    self.adjust_alignment(index, shift);
                }
            }
        }
    }

    /// Ascent of the item's margin box, measured from its cross-before edge.
    pub(super) fn margin_box_ascent(&self, index: usize) -> LayoutUnit {
        let Some(geometry) = self.geometry.get(index) else {
            return LayoutUnit::zero();
        };
        let style = &geometry.child.style;
        let cross_extent = self.flow.cross_extent(geometry.size);
        let margin_before = self.flow.cross_before(&geometry.margin);
        if !self.main_axis_is_inline(style) {
            return cross_extent + margin_before;
        }
        let baseline = if self.item_alignment(style).0 == ItemPosition::LastBaseline {
            geometry.last_baseline
        } else {
            geometry.first_baseline
        };
        let Some(mut ascent) = baseline else {
            return cross_extent + margin_before;
        };
        let item_block = style.writing_mode.block_direction();
        let container = self.style.writing_mode;
        if item_block != container.block_direction() && item_block != container.inline_direction() {
            // Measured as if the item shared the container's block direction.
            ascent = cross_extent - ascent;
        }
        if self.flow.cross_overflow(style).is_scroll_container() {
            ascent = ascent.min(cross_extent).clamp_negative_to_zero();
        }
        ascent + margin_before
    }

    /// Resolve `auto` cross-axis margins against the leftover line space.
    /// Returns whether the item had any.
    fn update_auto_margins_in_cross_axis(&mut self, index: usize, available_alignment_space: LayoutUnit) -> bool {
        let Some(geometry) = self.geometry.get(index) else {
            return false;
        };
        let style = &geometry.child.style;
        let top_or_left = self.flow.cross_top_or_left_side();
        let bottom_or_right = top_or_left.opposite();
        let is_auto = |side| style.margin.side(side).is_auto() && !*geometry.trimmed.side(side);
        let (start_auto, end_auto) = (is_auto(top_or_left), is_auto(bottom_or_right));
        let is_column = self.flow.is_column();
        let should_adjust_top_or_left = !(is_column && style.writing_mode.is_inline_flipped())
            && !(!is_column && style.writing_mode.is_block_flipped());

        if start_auto && end_auto {
            let half = available_alignment_space / 2;
            self.adjust_alignment(index, half);
            if let Some(geometry) = self.geometry.get_mut(index) {
                *geometry.margin.side_mut(top_or_left) = half;
                *geometry.margin.side_mut(bottom_or_right) = half;
            }
            return true;
        }
        let (side, adjust) = if start_auto {
            (top_or_left, should_adjust_top_or_left)
        } else if end_auto {
            (bottom_or_right, !should_adjust_top_or_left)
        } else {
            return false;
        };
        if adjust {
            self.adjust_alignment(index, available_alignment_space);
        }
        if let Some(geometry) = self.geometry.get_mut(index) {
            *geometry.margin.side_mut(side) = available_alignment_space;
        }
        true
    }

    /// Grow an `auto`-sized item to fill its line and lay it out again at
    /// that size. The cached intrinsic block size is left untouched.
    fn apply_stretch_alignment(&mut self, index: usize, line_cross_axis_extent: LayoutUnit) -> Result<()> {
        let Some(geometry) = self.geometry.get(index) else {
            return Ok(());
        };
        let child = geometry.child;
        let child_index = geometry.child_index;
        let margins = geometry.margin;
        let main_size = self.flow.main_extent(geometry.size);
        let current_cross = self.flow.cross_extent(geometry.size);
        let style = &child.style;
        let cross_margin = self.flow.cross_sum(&margins);

        let is_orthogonal = !self.main_axis_is_inline(style);
        let (space, desired) = if !is_orthogonal {
            let axis = self.block_axis_sizing(style, &margins);
            if !axis.preferred.is_auto() {
                return Ok(());
            }
            let stretched = (line_cross_axis_extent - cross_margin).max(axis.border_and_padding);
            let content = self.intrinsic_content_block_size(child_index, child)?;
            let desired = axis.constrain(stretched, content);
            if desired == current_cross {
                return Ok(());
            }
            let space = ChildConstraintSpace {
                inline_size: main_size,
                block_size: Some(desired),
                percentage_resolution_block_size: self.percentage_resolution_block_size(style, Some(desired)),
            };
            (space, desired)
        } else {
            let axis = self.inline_axis_sizing(style, &margins);
            if !axis.preferred.is_auto() {
                return Ok(());
            }
            let content = self
                .measurements
                .inline_sizes(child_index, child.handle)
                .map_or_else(|_| LayoutUnit::zero(), |sizes| sizes.max_content);
            let desired = axis.constrain((line_cross_axis_extent - cross_margin).clamp_negative_to_zero(), content);
            if desired == current_cross {
                return Ok(());
            }
            let space = ChildConstraintSpace {
                inline_size: desired,
                block_size: Some(main_size),
                percentage_resolution_block_size: self.percentage_resolution_block_size(style, Some(main_size)),
            };
            (space, desired)
        };

        let result = self.tree.layout_child(child.handle, &space);
        trace!(
            target: "css::flexbox::alignment",
            "[FLEX-ALIGN] stretched {:?} cross {current_cross} -> {desired}",
            child.handle
        );
        let size = self.flow.physical_size(main_size, desired);
        if let Some(geometry) = self.geometry.get_mut(index) {
            geometry.size = size;
            geometry.first_baseline = result.first_baseline;
            geometry.last_baseline = result.last_baseline;
            if is_orthogonal {
                geometry.inline_size = desired;
            }
        }
        Ok(())
    }

    /// Mirror every line across the cross axis for `wrap-reverse`.
    fn flip_for_wrap_reverse(&mut self, cross_axis_start_edge: LayoutUnit) {
        let content_extent = self.cross_axis_content_extent();
        for line_number in 0..self.lines.len() {
            let Some(line) = self.lines.get_mut(line_number) else {
                continue;
            };
            let original_offset = line.cross_axis_offset - cross_axis_start_edge;
            let new_offset = content_extent - original_offset - line.cross_axis_extent;
            line.cross_axis_offset = cross_axis_start_edge + new_offset;
            for index in line.items.clone() {
                self.adjust_alignment(index, new_offset - original_offset);
            }
        }
    }

    /// In right-to-left columns the cross axis runs from the right.
    fn flip_for_right_to_left_column(&mut self) {
        if self.style.writing_mode.is_logical_left_inline_start() || !self.flow.is_column() {
            return;
        }
        let cross_extent = self.cross_axis_extent();
        let flow = self.flow;
        for geometry in &mut self.geometry {
            geometry.location.y = cross_extent - flow.cross_extent(geometry.size) - geometry.location.y;
        }
    }
}

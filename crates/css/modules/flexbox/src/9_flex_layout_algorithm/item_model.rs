//! Flex item records: which measurements an item needs, its flex base size,
//! and the min/max clamps of its main size.
//! See <https://www.w3.org/TR/css-flexbox-1/#algo-main-item>
//! See <https://www.w3.org/TR/css-flexbox-1/#min-size-auto>

use css_box::{LayoutUnit, Sides};
use css_sizing::{
    BoxSizing, IntrinsicSizes, SizeValue, SizingContext, apply_box_sizing, apply_constraints,
    compute_border_box_size, content_box_size,
};
use log::{debug, trace};

use super::constraint_space::{ChildConstraintSpace, ChildLayoutWorklist, FlexLayoutTree};
use super::context::LayoutPhase;
use super::{FlexLayoutAlgorithm, ItemGeometry, reserve_one};
use crate::chapter4::{FlexChild, FlexItemStyle, Overflow};
use crate::chapter7::FlexLayoutItem;
use crate::chapter8::{ItemPosition, OverflowAlignment, alignment_for_item};
use crate::error::{FlexLayoutError, MeasurementKind, Result, try_with_capacity};

/// Sizing inputs of one item along one physical axis.
#[derive(Copy, Clone, Debug)]
pub(super) struct AxisSizing {
    pub(super) preferred: SizeValue,
    min: SizeValue,
    max: SizeValue,
    box_sizing: BoxSizing,
    pub(super) border_and_padding: LayoutUnit,
    /// Sum of both margins on this axis.
    pub(super) margins: LayoutUnit,
    percentage_base: Option<LayoutUnit>,
}

impl AxisSizing {
    /// Border-box size of a length on this axis, if it resolves.
    fn resolve(&self, value: SizeValue) -> Option<LayoutUnit> {
        value
            .resolve(self.percentage_base)
            .map(|specified| apply_box_sizing(specified, self.box_sizing, self.border_and_padding))
    }

    #[inline]
    pub(super) fn preferred_border_box(&self) -> Option<LayoutUnit> {
        self.resolve(self.preferred)
    }

    /// Clamp a border-box size by min/max, min winning. Intrinsic keywords
    /// stand for `content`; nothing goes below border plus padding.
    pub(super) fn constrain(&self, size: LayoutUnit, content: LayoutUnit) -> LayoutUnit {
        let limit = |value: SizeValue| {
            if value.is_intrinsic() {
                Some(content + self.border_and_padding)
            } else {
                self.resolve(value)
            }
        };
        apply_constraints(size, limit(self.min), limit(self.max)).max(self.border_and_padding)
    }

    /// Used border-box size for a box whose content measures `content`.
    pub(super) fn used_border_box(&self, content: LayoutUnit) -> LayoutUnit {
        let size = self
            .preferred_border_box()
            .unwrap_or(content + self.border_and_padding);
        self.constrain(size, content)
    }
}

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    //-------------------------------------------------------------------------
    // Style queries
    //-------------------------------------------------------------------------

    /// Margins with percentages resolved against the container's inline size
    /// and `auto` as zero.
    pub(super) fn resolved_margins(&self, style: &FlexItemStyle) -> Sides<LayoutUnit> {
        let base = self.constraints.content_inline_size;
        style.margin.map(|margin| margin.resolve(base))
    }

    #[inline]
    pub(super) fn main_axis_is_inline(&self, style: &FlexItemStyle) -> bool {
        self.flow.main_axis_is_item_inline_axis(style.writing_mode)
    }

    #[inline]
    pub(super) fn item_alignment(&self, style: &FlexItemStyle) -> (ItemPosition, OverflowAlignment) {
        alignment_for_item(style.align_self, self.style.align_items, &self.flow, style.writing_mode)
    }

    pub(super) fn item_axis(&self, style: &FlexItemStyle, margins: &Sides<LayoutUnit>, horizontal: bool) -> AxisSizing {
        let (width_base, height_base) = self.percentage_bases();
        let edges = style.border_and_padding();
        if horizontal {
            AxisSizing {
                preferred: style.width,
                min: style.min_width,
                max: style.max_width,
                box_sizing: style.box_sizing,
                border_and_padding: edges.horizontal_sum(),
                margins: margins.horizontal_sum(),
                percentage_base: width_base,
            }
        } else {
            AxisSizing {
                preferred: style.height,
                min: style.min_height,
                max: style.max_height,
                box_sizing: style.box_sizing,
                border_and_padding: edges.vertical_sum(),
                margins: margins.vertical_sum(),
                percentage_base: height_base,
            }
        }
    }

    #[inline]
    pub(super) fn inline_axis_sizing(&self, style: &FlexItemStyle, margins: &Sides<LayoutUnit>) -> AxisSizing {
        self.item_axis(style, margins, style.writing_mode.is_horizontal())
    }

    #[inline]
    pub(super) fn block_axis_sizing(&self, style: &FlexItemStyle, margins: &Sides<LayoutUnit>) -> AxisSizing {
        self.item_axis(style, margins, !style.writing_mode.is_horizontal())
    }

    fn flex_basis(&self, style: &FlexItemStyle) -> SizeValue {
        if style.flex_basis.is_auto() {
            self.flow.preferred_main_size(style)
        } else {
            style.flex_basis
        }
    }

    fn main_size_is_definite(&self, style: &FlexItemStyle, size: SizeValue) -> bool {
        match size {
            SizeValue::Auto | SizeValue::None | SizeValue::Content => false,
            SizeValue::MinContent | SizeValue::MaxContent | SizeValue::FitContent => {
                self.main_axis_is_inline(style)
            }
            SizeValue::Percent(_) | SizeValue::Calc { .. } => self.main_percentage_base().is_some(),
            SizeValue::Fixed(_) => true,
        }
    }

    pub(super) fn cross_size_is_definite(&self, size: SizeValue) -> bool {
        match size {
            SizeValue::Fixed(_) => true,
            SizeValue::Percent(_) | SizeValue::Calc { .. } => self.cross_percentage_base().is_some(),
            SizeValue::Auto
            | SizeValue::None
            | SizeValue::MinContent
            | SizeValue::MaxContent
            | SizeValue::FitContent
            | SizeValue::Content => false,
        }
    }

    /// A stretched item of a single-line container with a definite cross size
    /// takes that size as its definite cross size.
    /// See <https://www.w3.org/TR/css-flexbox-1/#definite-sizes>
    pub(super) fn should_use_container_cross_size(&self, style: &FlexItemStyle) -> bool {
        !self.flow.is_multiline()
            && self.item_alignment(style).0 == ItemPosition::Stretch
            && !self.flow.has_auto_margins_in_cross_axis(style)
            && self.flow.preferred_cross_size(style).is_auto()
            && (self.flow.is_column() || self.constraints.content_block_size.is_some())
    }

    /// Outer cross size of the container minus the item's cross margins.
    pub(super) fn container_cross_size_for_item(&self, style: &FlexItemStyle) -> LayoutUnit {
        let container = if self.flow.is_column() {
            self.constraints.content_inline_size
        } else {
            self.constraints.content_block_size.unwrap_or_default()
        };
        (container - self.flow.cross_sum(&self.resolved_margins(style))).clamp_negative_to_zero()
    }

    fn has_ratio_and_definite_cross_size(&self, style: &FlexItemStyle) -> bool {
        style.physical_aspect_ratio().is_some()
            && (self.cross_size_is_definite(self.flow.preferred_cross_size(style))
                || self.should_use_container_cross_size(style))
    }

    //-------------------------------------------------------------------------
    // Aspect ratio
    //-------------------------------------------------------------------------

    /// Content-box main size transferred through the aspect ratio from a
    /// cross size. `auto` stands for the container's cross size.
    ///
    /// The ratio applies to the border box for `aspect-ratio` with
    /// `box-sizing: border-box`, and to the content box otherwise.
    fn main_size_from_aspect_ratio(&self, style: &FlexItemStyle, cross_size: SizeValue) -> LayoutUnit {
        let Some(ratio) = style.physical_aspect_ratio() else {
            return LayoutUnit::zero();
        };
        let edges = style.border_and_padding();
        let main_border_and_padding = self.flow.main_sum(&edges);
        let cross_border_and_padding = self.flow.cross_sum(&edges);
        let cross_border_box = if cross_size.is_auto() {
            Some(self.container_cross_size_for_item(style))
        } else {
            cross_size
                .resolve(self.cross_percentage_base())
                .map(|cross| apply_box_sizing(cross, style.box_sizing, cross_border_and_padding))
        };
        let Some(cross_border_box) = cross_border_box else {
            return LayoutUnit::zero();
        };

        let ratio_on_border_box = style.uses_specified_ratio() && style.box_sizing == BoxSizing::BorderBox;
        let cross = if ratio_on_border_box {
            cross_border_box
        } else {
            cross_border_box - cross_border_and_padding
        };
        let main = if self.flow.is_horizontal_flow() {
            cross.to_f64() * ratio
        } else {
            cross.to_f64() / ratio
        };
        let main = LayoutUnit::from_f64(main);
        let content = if ratio_on_border_box {
            main - main_border_and_padding
        } else {
            main
        };
        content.clamp_negative_to_zero()
    }

    /// Clamp a ratio-derived main size by the main sizes the cross min/max
    /// transfer to.
    fn adjust_for_aspect_ratio_cross_min_max(&self, style: &FlexItemStyle, mut size: LayoutUnit) -> LayoutUnit {
        let max = self.flow.max_cross_size(style);
        if self.cross_size_is_definite(max) {
            size = size.min(self.main_size_from_aspect_ratio(style, max));
        }
        let min = self.flow.min_cross_size(style);
        if self.cross_size_is_definite(min) {
            size = size.max(self.main_size_from_aspect_ratio(style, min));
        }
        size
    }

    //-------------------------------------------------------------------------
    // Measurements
    //-------------------------------------------------------------------------

    /// Content block size from the child's last unstretched layout.
    pub(super) fn intrinsic_content_block_size(&self, child_index: usize, child: &FlexChild) -> Result<LayoutUnit> {
        self.cache
            .intrinsic_content_block_size(child.handle)
            .or_else(|| {
                self.measurements
                    .block_layout(child_index)
                    .map(|result| result.content_block_size)
            })
            .ok_or(FlexLayoutError::MissingMeasurement {
                item: child.handle,
                kind: MeasurementKind::BlockLayout,
            })
    }

    fn intrinsic_inline_sizes(&self, child_index: usize, child: &FlexChild) -> Result<IntrinsicSizes> {
        self.measurements.inline_sizes(child_index, child.handle)
    }

    /// Content-box main size a length resolves to, if it does.
    fn main_axis_extent_for(&self, child_index: usize, child: &FlexChild, size: SizeValue) -> Result<Option<LayoutUnit>> {
        let style = &child.style;
        let border_and_padding = self.flow.main_sum(&style.border_and_padding());
        let resolve_length = |length: SizeValue| {
            length
                .resolve(self.main_percentage_base())
                .map(|specified| content_box_size(specified, style.box_sizing, border_and_padding))
        };
        if !self.main_axis_is_inline(style) {
            if size.is_intrinsic() {
                return self.intrinsic_content_block_size(child_index, child).map(Some);
            }
            return Ok(resolve_length(size));
        }
        Ok(match size {
            SizeValue::MinContent => Some(self.intrinsic_inline_sizes(child_index, child)?.min_content),
            SizeValue::MaxContent => Some(self.intrinsic_inline_sizes(child_index, child)?.max_content),
            SizeValue::FitContent => {
                let sizes = self.intrinsic_inline_sizes(child_index, child)?;
                let margins = self.flow.main_sum(&self.resolved_margins(style));
                Some(self.main_percentage_base().map_or(sizes.max_content, |available| {
                    sizes.shrink_to_fit((available - margins - border_and_padding).clamp_negative_to_zero())
                }))
            }
            SizeValue::Auto
            | SizeValue::None
            | SizeValue::Fixed(_)
            | SizeValue::Percent(_)
            | SizeValue::Calc { .. }
            | SizeValue::Content => resolve_length(size),
        })
    }

    /// Border-box inline size of a child whose inline axis is not the main
    /// axis: its specified size, the stretched size, or fit-content.
    pub(super) fn fit_inline_size(
        &self,
        child_index: usize,
        child: &FlexChild,
        margins: &Sides<LayoutUnit>,
        stretch_to: Option<LayoutUnit>,
    ) -> Result<LayoutUnit> {
        let axis = self.inline_axis_sizing(&child.style, margins);
        if let Some(specified) = axis.preferred_border_box() {
            return Ok(axis.constrain(specified, LayoutUnit::zero()));
        }
        if let Some(available) = stretch_to {
            return Ok(axis.constrain((available - axis.margins).clamp_negative_to_zero(), LayoutUnit::zero()));
        }
        let sizes = self.intrinsic_inline_sizes(child_index, child)?;
        let content = axis.percentage_base.map_or(sizes.max_content, |available| {
            sizes.shrink_to_fit((available - axis.margins - axis.border_and_padding).clamp_negative_to_zero())
        });
        Ok(axis.constrain(content + axis.border_and_padding, content))
    }

    /// Single-line columns lay stretched items out at the container's inline
    /// size straight away.
    fn initial_stretch_size(&self, style: &FlexItemStyle) -> Option<LayoutUnit> {
        (self.flow.is_column()
            && !self.flow.is_multiline()
            && self.item_alignment(style).0 == ItemPosition::Stretch
            && !self.flow.has_auto_margins_in_cross_axis(style))
        .then_some(self.constraints.content_inline_size)
    }

    /// Block size percentages inside the child resolve against the flex
    /// layout's overriding block size only in some phases and flex setups.
    pub(super) fn percentage_resolution_block_size(
        &self,
        style: &FlexItemStyle,
        overriding_block_size: Option<LayoutUnit>,
    ) -> Option<LayoutUnit> {
        let overriding_block_size = overriding_block_size?;
        let main_is_inline = self.main_axis_is_inline(style);
        if !self
            .context
            .allows_percentage_resolution(main_is_inline, self.should_use_container_cross_size(style))
        {
            return None;
        }
        let by_style = if main_is_inline {
            self.item_alignment(style).0 == ItemPosition::Stretch
        } else if style.used_flex_grow() <= 0.0
            && style.used_flex_shrink() <= 0.0
            && self.main_size_is_definite(style, self.flex_basis(style))
        {
            true
        } else {
            !self.flow.is_column() || self.constraints.content_block_size.is_some()
        };
        by_style.then_some(overriding_block_size)
    }

    fn should_apply_min_size_auto(&self, style: &FlexItemStyle) -> bool {
        let min = self.flow.min_main_size(style);
        let block_size_is_automatic = !self.main_axis_is_inline(style) && min.is_intrinsic();
        (min.is_auto() || block_size_is_automatic) && self.flow.main_overflow(style) == Overflow::Visible
    }

    /// Block-axis main sizes that need the child laid out first.
    fn has_intrinsic_main_axis_size(&self, style: &FlexItemStyle) -> bool {
        if self.main_axis_is_inline(style) {
            return false;
        }
        !self.main_size_is_definite(style, self.flex_basis(style))
            || self.flow.min_main_size(style).is_intrinsic()
            || self.flow.max_main_size(style).is_intrinsic()
            || self.should_apply_min_size_auto(style)
    }

    fn needs_intrinsic_inline_sizes(&self, style: &FlexItemStyle) -> bool {
        if !self.main_axis_is_inline(style) {
            // The inline axis is the cross axis.
            return self
                .inline_axis_sizing(style, &Sides::default())
                .preferred_border_box()
                .is_none();
        }
        let basis = self.flex_basis(style);
        let sizes = [
            basis,
            self.flow.preferred_main_size(style),
            self.flow.min_main_size(style),
            self.flow.max_main_size(style),
        ];
        (!self.main_size_is_definite(style, basis) && !self.has_ratio_and_definite_cross_size(style))
            || sizes.iter().any(|size| size.is_intrinsic())
            || self.should_apply_min_size_auto(style)
    }

    /// Schedule and run every measurement item records depend on: intrinsic
    /// inline sizes first, then block layouts at those inline sizes.
    ///
    /// # Errors
    /// Returns `OutOfMemory` if the worklist cannot grow and
    /// `MissingMeasurement` if a block layout needs inline sizes nobody asked for.
    pub(super) fn measure_children(&mut self, in_flow: &[usize], positioned: &[usize]) -> Result<()> {
        let mut worklist = ChildLayoutWorklist::default();
        for &child_index in in_flow {
            let Some(child) = self.children.get(child_index) else {
                continue;
            };
            let style = &child.style;
            if self.needs_intrinsic_inline_sizes(style) {
                worklist.request_inline_sizes(child_index)?;
            }
            if self.has_intrinsic_main_axis_size(style) {
                worklist.request_block_layout(child_index)?;
            }
        }
        for &child_index in positioned {
            let Some(child) = self.children.get(child_index) else {
                continue;
            };
            let margins = self.resolved_margins(&child.style);
            if self.inline_axis_sizing(&child.style, &margins).preferred_border_box().is_none() {
                worklist.request_inline_sizes(child_index)?;
            }
            if self.block_axis_sizing(&child.style, &margins).preferred_border_box().is_none() {
                worklist.request_block_layout(child_index)?;
            }
        }
        debug!(
            target: "css::flexbox::items",
            "[FLEX-ITEMS] measurements scheduled={} inline={} block={}",
            worklist.len(), worklist.inline_size_requests().len(), worklist.block_layout_requests().len()
        );

        let context = self.context;
        let _phase = context.enter(LayoutPhase::ComputingFlexBaseSizes);
        for &child_index in worklist.inline_size_requests() {
            let Some(child) = self.children.get(child_index) else {
                continue;
            };
            let sizes = self.tree.intrinsic_inline_sizes(child.handle);
            self.measurements.record_inline_sizes(child_index, sizes);
        }
        for &child_index in worklist.block_layout_requests() {
            let Some(child) = self.children.get(child_index) else {
                continue;
            };
            let margins = self.resolved_margins(&child.style);
            let stretch_to = if child.style.out_of_flow {
                None
            } else {
                self.initial_stretch_size(&child.style)
            };
            let inline_size = self.fit_inline_size(child_index, child, &margins, stretch_to)?;
            let space = ChildConstraintSpace {
                inline_size,
                block_size: None,
                percentage_resolution_block_size: None,
            };
            let result = self.tree.layout_child(child.handle, &space);
            trace!(
                target: "css::flexbox::items",
                "[FLEX-ITEMS] measured {:?} inline={inline_size} content_block={}",
                child.handle, result.content_block_size
            );
            if !child.style.out_of_flow {
                self.cache
                    .set_intrinsic_content_block_size(child.handle, result.content_block_size);
            }
            self.measurements.record_block_layout(child_index, result);
        }
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Item records
    //-------------------------------------------------------------------------

    /// Flex base size, excluding border and padding.
    fn compute_flex_base_size(&self, child_index: usize, child: &FlexChild) -> Result<LayoutUnit> {
        let style = &child.style;
        let basis = self.flex_basis(style);
        if self.main_size_is_definite(style, basis) {
            let resolved = self.main_axis_extent_for(child_index, child, basis)?;
            return Ok(resolved.unwrap_or_default().clamp_negative_to_zero());
        }
        if self.has_ratio_and_definite_cross_size(style) {
            let cross = self.flow.preferred_cross_size(style);
            return Ok(self.adjust_for_aspect_ratio_cross_min_max(
                style,
                self.main_size_from_aspect_ratio(style, cross),
            ));
        }
        if self.main_axis_is_inline(style) {
            return Ok(self.intrinsic_inline_sizes(child_index, child)?.max_content);
        }
        let content = self.intrinsic_content_block_size(child_index, child)?;
        let border_and_padding = self.flow.main_sum(&style.border_and_padding());
        let resolve_limit = |length: SizeValue| {
            if length.is_specified() {
                length.resolve(self.main_percentage_base())
            } else {
                None
            }
        };
        let border_box = compute_border_box_size(SizingContext {
            specified: None,
            content_size: content,
            box_sizing: style.box_sizing,
            padding_border: border_and_padding,
            min: resolve_limit(self.flow.min_main_size(style)),
            max: resolve_limit(self.flow.max_main_size(style)),
        });
        Ok(border_box - border_and_padding)
    }

    /// Content-box (min, max) main sizes, with `min-size: auto` resolved.
    fn compute_min_max_sizes(&self, child_index: usize, child: &FlexChild) -> Result<(LayoutUnit, LayoutUnit)> {
        let style = &child.style;
        let max = self.flow.max_main_size(style);
        let max_extent = if max.is_specified() || max.is_intrinsic() {
            self.main_axis_extent_for(child_index, child, max)?
        } else {
            None
        };
        let max_or_unbounded = max_extent.unwrap_or(LayoutUnit::max_value());

        let min = self.flow.min_main_size(style);
        if min.is_specified() || (min.is_intrinsic() && self.main_axis_is_inline(style)) {
            let min_extent = self.main_axis_extent_for(child_index, child, min)?;
            return Ok((min_extent.unwrap_or_default(), max_or_unbounded));
        }
        if !self.should_apply_min_size_auto(style) {
            return Ok((LayoutUnit::zero(), max_or_unbounded));
        }

        let has_ratio = style.physical_aspect_ratio().is_some();
        let cross = self.flow.preferred_cross_size(style);
        let mut content_size = if style.is_replaced && has_ratio && self.cross_size_is_definite(cross) {
            self.main_size_from_aspect_ratio(style, cross)
        } else {
            self.main_axis_extent_for(child_index, child, SizeValue::MinContent)?
                .unwrap_or_default()
        };
        if has_ratio {
            content_size = self.adjust_for_aspect_ratio_cross_min_max(style, content_size);
        }
        content_size = content_size.min(max_extent.unwrap_or(content_size));

        let preferred = self.flow.preferred_main_size(style);
        if self.main_size_is_definite(style, preferred) {
            let resolved = self
                .main_axis_extent_for(child_index, child, preferred)?
                .unwrap_or_default();
            let specified = resolved.min(max_extent.unwrap_or(resolved));
            return Ok((specified.min(content_size), max_or_unbounded));
        }
        if style.is_replaced && self.has_ratio_and_definite_cross_size(style) {
            let transferred = self
                .adjust_for_aspect_ratio_cross_min_max(style, self.main_size_from_aspect_ratio(style, cross));
            return Ok((transferred.min(content_size), max_or_unbounded));
        }
        Ok((content_size, max_or_unbounded))
    }

    /// Build the item records of the in-flow children, in order-modified
    /// document order, and their placement state.
    ///
    /// # Errors
    /// Returns `OutOfMemory` if a buffer cannot grow and `MissingMeasurement`
    /// if an item needs a measurement that was not taken.
    pub(super) fn construct_flex_items(&mut self, in_flow: &[usize]) -> Result<Vec<FlexLayoutItem>> {
        let mut items = try_with_capacity(in_flow.len(), "flex items")?;
        self.geometry = try_with_capacity(in_flow.len(), "item geometry")?;
        let main_start = self.flow.logical_main_start_side();
        for &child_index in in_flow {
            let children = self.children;
            let Some(child) = children.get(child_index) else {
                continue;
            };
            let style = &child.style;
            let margins = self.resolved_margins(style);
            let main_border_and_padding = self.flow.main_sum(&style.border_and_padding());
            let flex_base_size = self.compute_flex_base_size(child_index, child)?;
            let min_max = self.compute_min_max_sizes(child_index, child)?;
            let item = FlexLayoutItem::new(items.len(), child.handle, flex_base_size, min_max)
                .with_factors(style.used_flex_grow(), style.used_flex_shrink())
                .with_main_edges(
                    main_border_and_padding,
                    *margins.side(main_start),
                    *margins.side(main_start.opposite()),
                );

            let mut geometry = ItemGeometry::new(child, child_index, margins);
            if !self.main_axis_is_inline(style) {
                geometry.inline_size =
                    self.fit_inline_size(child_index, child, &margins, self.initial_stretch_size(style))?;
            }
            trace!(
                target: "css::flexbox::items",
                "[FLEX-ITEMS] {:?} base={} hypothetical={} min={} max={}",
                child.handle, item.flex_base_content_size, item.hypothetical_main_content_size,
                item.min_main_size, item.max_main_size
            );
            reserve_one(&mut items, "flex items")?;
            items.push(item);
            reserve_one(&mut self.geometry, "item geometry")?;
            self.geometry.push(geometry);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_box::Margin;
    use css_sizing::AspectRatio;

    use super::super::{ChildLayoutResult, FlexLayoutCache, LayoutContext};
    use crate::chapter3::{FlexContainerConstraints, FlexContainerStyle, FlexDirection};
    use crate::chapter4::ItemRef;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }

    /// Every child has 50px of content in both axes and a 20..80 inline range.
    struct FixedContent;

    impl FlexLayoutTree for FixedContent {
        fn intrinsic_inline_sizes(&mut self, _item: ItemRef) -> IntrinsicSizes {
            IntrinsicSizes {
                min_content: px(20),
                max_content: px(80),
            }
        }

        fn layout_child(&mut self, _item: ItemRef, _space: &ChildConstraintSpace) -> ChildLayoutResult {
            ChildLayoutResult {
                content_block_size: px(50),
                ..ChildLayoutResult::default()
            }
        }
    }

    fn records(
        container: &FlexContainerStyle,
        constraints: &FlexContainerConstraints,
        children: &[FlexChild],
    ) -> Result<Vec<FlexLayoutItem>> {
        let mut tree = FixedContent;
        let mut cache = FlexLayoutCache::new();
        let context = LayoutContext::new();
        let mut algorithm =
            FlexLayoutAlgorithm::new(container, constraints, children, &mut tree, &mut cache, &context);
        let in_flow: Vec<usize> = (0..children.len()).collect();
        algorithm.measure_children(&in_flow, &[])?;
        algorithm.construct_flex_items(&in_flow)
    }

    fn child(style: FlexItemStyle) -> FlexChild {
        FlexChild::new(ItemRef(1), style)
    }

    /// # Panics
    /// Panics if an auto basis does not fall back to max-content and the
    /// min-content floor.
    #[test]
    fn auto_basis_uses_content_sizes() {
        let container = FlexContainerStyle::default();
        let constraints = FlexContainerConstraints::with_inline_size(px(300));
        let items = records(&container, &constraints, &[child(FlexItemStyle::default())])
            .unwrap_or_default();
        assert_eq!(items.first().map(|item| item.flex_base_content_size), Some(px(80)));
        assert_eq!(items.first().map(|item| item.min_main_size), Some(px(20)));
        assert_eq!(items.first().map(|item| item.max_main_size), Some(LayoutUnit::max_value()));
    }

    /// # Panics
    /// Panics if a definite basis or specified sizes are not honored.
    #[test]
    fn definite_basis_and_specified_sizes() {
        let container = FlexContainerStyle::default();
        let constraints = FlexContainerConstraints::with_inline_size(px(300));
        let style = FlexItemStyle {
            flex_basis: SizeValue::Percent(0.5),
            min_width: SizeValue::Fixed(px(10)),
            max_width: SizeValue::Fixed(px(200)),
            padding: Sides::uniform(px(5)),
            margin: Sides::uniform(Margin::Fixed(px(3))),
            ..FlexItemStyle::default()
        };
        let items = records(&container, &constraints, &[child(style)]).unwrap_or_default();
        assert_eq!(items.len(), 1);
        let item = items.first().cloned().unwrap_or_else(|| FlexLayoutItem::new(0, ItemRef(0), px(0), (px(0), px(0))));
        assert_eq!(item.flex_base_content_size, px(150));
        assert_eq!(item.min_main_size, px(10));
        assert_eq!(item.max_main_size, px(200));
        assert_eq!(item.main_axis_border_and_padding, px(10));
        assert_eq!(item.main_axis_margin(), px(6));
    }

    /// # Panics
    /// Panics if `min-width: auto` does not clamp to a smaller specified width.
    #[test]
    fn min_size_auto_prefers_smaller_specified_size() {
        let container = FlexContainerStyle::default();
        let constraints = FlexContainerConstraints::with_inline_size(px(300));
        let style = FlexItemStyle {
            width: SizeValue::Fixed(px(12)),
            ..FlexItemStyle::default()
        };
        let items = records(&container, &constraints, &[child(style)]).unwrap_or_default();
        assert_eq!(items.first().map(|item| item.flex_base_content_size), Some(px(12)));
        assert_eq!(items.first().map(|item| item.min_main_size), Some(px(12)));

        let scrolling = FlexItemStyle {
            overflow_x: Overflow::Hidden,
            ..FlexItemStyle::default()
        };
        let items = records(&container, &constraints, &[child(scrolling)]).unwrap_or_default();
        assert_eq!(items.first().map(|item| item.min_main_size), Some(px(0)));
    }

    /// # Panics
    /// Panics if column items do not take their base size from block layout.
    #[test]
    fn column_items_measure_block_size() {
        let container = FlexContainerStyle {
            flex_direction: FlexDirection::Column,
            ..FlexContainerStyle::default()
        };
        let constraints = FlexContainerConstraints::with_inline_size(px(300));
        let items = records(&container, &constraints, &[child(FlexItemStyle::default())])
            .unwrap_or_default();
        assert_eq!(items.first().map(|item| item.flex_base_content_size), Some(px(50)));
        assert_eq!(items.first().map(|item| item.min_main_size), Some(px(50)));
    }

    /// # Panics
    /// Panics if the aspect ratio does not transfer a definite cross size.
    #[test]
    fn aspect_ratio_transfers_cross_size() {
        let container = FlexContainerStyle::default();
        let constraints = FlexContainerConstraints::with_inline_size(px(300));
        let style = FlexItemStyle {
            height: SizeValue::Fixed(px(40)),
            aspect_ratio: AspectRatio::Ratio(2.0),
            ..FlexItemStyle::default()
        };
        let items = records(&container, &constraints, &[child(style)]).unwrap_or_default();
        assert_eq!(items.first().map(|item| item.flex_base_content_size), Some(px(80)));
    }

    /// # Panics
    /// Panics if min/max keep intrinsic keywords or drop border and padding.
    #[test]
    fn axis_constraints_use_border_box() {
        let axis = AxisSizing {
            preferred: SizeValue::Auto,
            min: SizeValue::MinContent,
            max: SizeValue::Fixed(px(30)),
            box_sizing: BoxSizing::ContentBox,
            border_and_padding: px(4),
            margins: LayoutUnit::zero(),
            percentage_base: None,
        };
        assert_eq!(axis.used_border_box(px(100)), px(104));
        assert_eq!(axis.constrain(px(100), px(10)), px(34));
        assert_eq!(axis.constrain(px(0), px(10)), px(14));
    }
}

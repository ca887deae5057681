//! Flex layout algorithm: sizing items, collecting lines, flexing and
//! aligning them.
//! See <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>

mod baselines;
mod constraint_space;
mod context;
mod cross_axis;
mod intrinsic_sizes;
mod item_model;
mod main_axis;
mod static_position;

pub use constraint_space::{
    ChildConstraintSpace, ChildLayoutResult, FlexLayoutCache, FlexLayoutTree,
};
pub use context::{LayoutContext, LayoutPhase, PhaseScope};
pub use intrinsic_sizes::compute_intrinsic_inline_sizes;

use core::ops::Range;

use css_box::{LayoutUnit, Point, Rect, Sides, Size};
use log::debug;
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use constraint_space::ChildMeasurements;

use crate::chapter3::{FlexContainerConstraints, FlexContainerStyle, GapType, compute_gap};
use crate::chapter4::{FlexChild, ItemRef};
use crate::chapter5::{FlexFlow, order_modified_document_order};
use crate::chapter6::{LineBreakContext, LineMarginTrim, compute_next_flex_line};
use crate::chapter7::{FlexLayoutItem, resolve_line};
use crate::chapter8::baseline::BaselineAlignmentState;
use crate::error::{Result, try_reserve, try_with_capacity};

//=============================================================================
// Output
//=============================================================================

/// Final geometry of one flex item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexItemLayout {
    pub handle: ItemRef,
    /// Physical border box, relative to the container's border-box origin.
    pub rect: Rect,
    /// Used margins: `auto` resolved, trimmed edges zero.
    pub margin: Sides<LayoutUnit>,
    pub trimmed_margins: Sides<bool>,
}

/// Static position of an out-of-flow child, as if it were the sole flex item.
///
/// Offsets are logical in the container's writing mode, measured from the
/// border-box start edges to the child's margin box. An axis is `None` when
/// the child has a non-`auto` inset on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPosition {
    pub handle: ItemRef,
    pub inline_offset: Option<LayoutUnit>,
    pub block_offset: Option<LayoutUnit>,
}

/// One line after cross-axis alignment, in flow-relative coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexLineLayout {
    pub cross_axis_offset: LayoutUnit,
    pub cross_axis_extent: LayoutUnit,
    pub item_count: usize,
}

/// Result of laying out one flex container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexLayoutOutput {
    /// In-flow items in order-modified document order.
    pub items: Vec<FlexItemLayout>,
    pub static_positions: Vec<StaticPosition>,
    pub content_block_size: LayoutUnit,
    pub border_box_block_size: LayoutUnit,
    pub lines: Vec<FlexLineLayout>,
    /// Offsets from the border-box block-start edge.
    pub first_baseline: Option<LayoutUnit>,
    pub last_baseline: Option<LayoutUnit>,
    /// How far unsafe `justify-content` pushed items past main-start.
    pub justify_content_start_overflow: LayoutUnit,
    /// How far unsafe `align-content` pushed lines past cross-start.
    pub align_content_start_overflow: LayoutUnit,
}

//=============================================================================
// Algorithm state
//=============================================================================

/// Placement state of one flex item during a pass.
#[derive(Clone, Debug)]
struct ItemGeometry<'input> {
    child: &'input FlexChild,
    /// Position in the container's children.
    child_index: usize,
    margin: Sides<LayoutUnit>,
    trimmed: Sides<bool>,
    /// Physical border-box size.
    size: Size,
    /// Border-box origin as (main, cross), before any block flip.
    location: Point,
    /// Border-box inline size for items whose inline axis is the cross axis.
    inline_size: LayoutUnit,
    first_baseline: Option<LayoutUnit>,
    last_baseline: Option<LayoutUnit>,
}

impl<'input> ItemGeometry<'input> {
    fn new(child: &'input FlexChild, child_index: usize, margin: Sides<LayoutUnit>) -> Self {
        Self {
            child,
            child_index,
            margin,
            trimmed: Sides::default(),
            size: Size::default(),
            location: Point::default(),
            inline_size: LayoutUnit::zero(),
            first_baseline: None,
            last_baseline: None,
        }
    }
}

#[derive(Clone, Debug)]
struct LineState {
    cross_axis_offset: LayoutUnit,
    cross_axis_extent: LayoutUnit,
    baseline: Option<BaselineAlignmentState>,
    /// Indices into the item geometry list.
    items: Range<usize>,
}

/// One layout pass over a flex container.
struct FlexLayoutAlgorithm<'input, Tree: FlexLayoutTree + ?Sized> {
    style: &'input FlexContainerStyle,
    constraints: &'input FlexContainerConstraints,
    children: &'input [FlexChild],
    tree: &'input mut Tree,
    cache: &'input mut FlexLayoutCache,
    context: &'input LayoutContext,
    flow: FlexFlow,
    border_and_padding: Sides<LayoutUnit>,
    measurements: ChildMeasurements,
    geometry: Vec<ItemGeometry<'input>>,
    lines: Vec<LineState>,
    /// Border-box block size of the container so far.
    logical_height: LayoutUnit,
    justify_content_start_overflow: LayoutUnit,
    align_content_start_overflow: LayoutUnit,
}

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    fn new(
        style: &'input FlexContainerStyle,
        constraints: &'input FlexContainerConstraints,
        children: &'input [FlexChild],
        tree: &'input mut Tree,
        cache: &'input mut FlexLayoutCache,
        context: &'input LayoutContext,
    ) -> Self {
        Self {
            style,
            constraints,
            children,
            tree,
            cache,
            context,
            flow: FlexFlow::new(style),
            border_and_padding: style.border_and_padding(),
            measurements: ChildMeasurements::default(),
            geometry: Vec::new(),
            lines: Vec::new(),
            logical_height: style.block_border_and_padding(),
            justify_content_start_overflow: LayoutUnit::zero(),
            align_content_start_overflow: LayoutUnit::zero(),
        }
    }

    //-------------------------------------------------------------------------
    // Container geometry
    //-------------------------------------------------------------------------

    fn inline_border_box_size(&self) -> LayoutUnit {
        self.constraints.content_inline_size + self.style.inline_border_and_padding()
    }

    fn content_logical_height(&self) -> LayoutUnit {
        (self.logical_height - self.style.block_border_and_padding()).clamp_negative_to_zero()
    }

    /// Clamp the border-box block size by the container's own constraints.
    fn update_logical_height(&mut self) {
        let block_border_and_padding = self.style.block_border_and_padding();
        self.logical_height = self
            .constraints
            .constrain_block_size(self.logical_height - block_border_and_padding)
            + block_border_and_padding;
    }

    /// Main-axis content size if the container's content measured
    /// `content_logical_height` along its block axis.
    fn main_axis_content_extent(&self, content_logical_height: LayoutUnit) -> LayoutUnit {
        if self.flow.is_column() {
            self.constraints.constrain_block_size(content_logical_height)
        } else {
            self.constraints.content_inline_size
        }
    }

    fn cross_axis_content_extent(&self) -> LayoutUnit {
        if self.flow.is_column() {
            self.constraints.content_inline_size
        } else {
            self.content_logical_height()
        }
    }

    fn main_axis_extent(&self) -> LayoutUnit {
        if self.flow.is_column() {
            self.logical_height
        } else {
            self.inline_border_box_size()
        }
    }

    fn cross_axis_extent(&self) -> LayoutUnit {
        if self.flow.is_column() {
            self.inline_border_box_size()
        } else {
            self.logical_height
        }
    }

    fn physical_border_box_size(&self) -> Size {
        let size = Size::new(self.inline_border_box_size(), self.logical_height);
        if self.style.writing_mode.is_horizontal() {
            size
        } else {
            size.transposed()
        }
    }

    /// Percentage bases for an item's physical width and height.
    fn percentage_bases(&self) -> (Option<LayoutUnit>, Option<LayoutUnit>) {
        let inline = Some(self.constraints.content_inline_size);
        let block = self.constraints.content_block_size;
        if self.style.writing_mode.is_horizontal() {
            (inline, block)
        } else {
            (block, inline)
        }
    }

    fn main_percentage_base(&self) -> Option<LayoutUnit> {
        let (width, height) = self.percentage_bases();
        if self.flow.is_horizontal_flow() { width } else { height }
    }

    fn cross_percentage_base(&self) -> Option<LayoutUnit> {
        let (width, height) = self.percentage_bases();
        if self.flow.is_horizontal_flow() { height } else { width }
    }

    //-------------------------------------------------------------------------
    // Lines
    //-------------------------------------------------------------------------

    /// Collect lines, flex and place their items, then size the container and
    /// align everything that depends on its block size.
    fn layout_lines(&mut self, items: &mut [FlexLayoutItem]) -> Result<()> {
        if items.is_empty() {
            self.update_logical_height();
            return Ok(());
        }
        let gap_between_items = compute_gap(self.style, self.constraints, GapType::BetweenItems);
        let gap_between_lines = compute_gap(self.style, self.constraints, GapType::BetweenLines);
        let line_break = LineBreakContext {
            line_break_length: self.main_axis_content_extent(LayoutUnit::max_value()),
            gap_between_items,
            is_multiline: self.flow.is_multiline(),
            margin_trim: LineMarginTrim::new(&self.flow, self.style.margin_trim),
        };
        let item_count = items.len();
        let mut cross_axis_offset = self.flow.cross_before(&self.border_and_padding);
        let mut cursor = 0;
        while let Some(mut line) = compute_next_flex_line(&mut cursor, items, &line_break) {
            let range = line.range.clone();
            let is_first_line = self.lines.is_empty();
            let Some(line_items) = items.get_mut(range.clone()) else {
                break;
            };
            self.apply_margin_trims(line_items, is_first_line, range.end == item_count);
            let container_main_inner_size =
                self.main_axis_content_extent(line.sum_hypothetical_main_size);
            let remaining_free_space =
                resolve_line(line_items, &mut line, container_main_inner_size, gap_between_items);
            self.layout_and_place_items(
                line_items,
                remaining_free_space,
                &mut cross_axis_offset,
                gap_between_items,
            )?;
        }

        let line_count = self.lines.len();
        if !self.flow.is_column() && line_count > 1 {
            let gaps = i32::try_from(line_count - 1).unwrap_or(i32::MAX);
            self.logical_height += gap_between_lines * gaps;
        }
        self.update_logical_height();
        debug!(
            target: "css::flexbox::layout",
            "[FLEX-LAYOUT] lines={line_count} logical_height={} break_length={}",
            self.logical_height, line_break.line_break_length
        );
        self.reposition_logical_height_dependent_items(gap_between_lines)?;
        Ok(())
    }

    /// Copy main-axis trims decided by line breaking into the item geometry,
    /// and trim cross-axis margins on the first and last lines.
    fn apply_margin_trims(&mut self, line_items: &[FlexLayoutItem], is_first_line: bool, is_last_line: bool) {
        let main_start = self.flow.logical_main_start_side();
        let trim = self.style.margin_trim;
        let (trim_cross_start, trim_cross_end) = if self.flow.is_column() {
            (trim.inline_start, trim.inline_end)
        } else {
            (trim.block_start, trim.block_end)
        };
        let cross_before = self.flow.cross_before_side();
        for item in line_items {
            let Some(geometry) = self.geometry.get_mut(item.index) else {
                continue;
            };
            let edges = [
                (main_start, item.trimmed_main_start),
                (main_start.opposite(), item.trimmed_main_end),
                (cross_before, trim_cross_start && is_first_line),
                (cross_before.opposite(), trim_cross_end && is_last_line),
            ];
            for (side, trimmed) in edges {
                if trimmed {
                    *geometry.margin.side_mut(side) = LayoutUnit::zero();
                    *geometry.trimmed.side_mut(side) = true;
                }
            }
        }
    }

    //-------------------------------------------------------------------------
    // Output
    //-------------------------------------------------------------------------

    /// Physical border box of a placed item.
    fn physical_rect(&self, geometry: &ItemGeometry<'_>) -> Rect {
        let mut origin = self.flow.physical_location(geometry.location);
        if self.style.writing_mode.is_block_flipped() {
            origin.x = self.physical_border_box_size().width - origin.x - geometry.size.width;
        }
        Rect::new(origin, geometry.size)
    }

    fn into_output(self, static_positions: Vec<StaticPosition>) -> Result<FlexLayoutOutput> {
        let mut items = try_with_capacity(self.geometry.len(), "item layouts")?;
        for geometry in &self.geometry {
            items.push(FlexItemLayout {
                handle: geometry.child.handle,
                rect: self.physical_rect(geometry),
                margin: geometry.margin,
                trimmed_margins: geometry.trimmed,
            });
        }
        let mut lines = try_with_capacity(self.lines.len(), "line layouts")?;
        for line in &self.lines {
            lines.push(FlexLineLayout {
                cross_axis_offset: line.cross_axis_offset,
                cross_axis_extent: line.cross_axis_extent,
                item_count: line.items.len(),
            });
        }
        Ok(FlexLayoutOutput {
            items,
            static_positions,
            content_block_size: self.content_logical_height(),
            border_box_block_size: self.logical_height,
            lines,
            first_baseline: self.first_line_baseline(),
            last_baseline: self.last_line_baseline(),
            justify_content_start_overflow: self.justify_content_start_overflow,
            align_content_start_overflow: self.align_content_start_overflow,
        })
    }
}

/// Lay out a flex container's children inside `constraints`.
///
/// `tree` measures and lays out the children on request. `cache` carries
/// intrinsic block sizes between passes over the same container; callers
/// must drop entries of children whose content changed.
///
/// # Errors
/// Returns `OutOfMemory` if a temporary buffer cannot grow, and
/// `MissingMeasurement` if an item needed a measurement that was never taken.
pub fn perform_flex_layout<Tree: FlexLayoutTree + ?Sized>(
    style: &FlexContainerStyle,
    constraints: &FlexContainerConstraints,
    children: &[FlexChild],
    tree: &mut Tree,
    cache: &mut FlexLayoutCache,
) -> Result<FlexLayoutOutput> {
    let span = debug_span!(
        "flex_layout",
        children = children.len(),
        direction = ?style.flex_direction,
        wrap = ?style.flex_wrap
    );
    let _entered = span.enter();

    let context = LayoutContext::new();
    let ordered = order_modified_document_order(children)?;
    let mut algorithm =
        FlexLayoutAlgorithm::new(style, constraints, children, tree, cache, &context);
    algorithm.measure_children(&ordered.in_flow, &ordered.positioned)?;
    let mut items = algorithm.construct_flex_items(&ordered.in_flow)?;
    algorithm.layout_lines(&mut items)?;
    let static_positions = algorithm.static_positions(&ordered.positioned)?;
    let output = algorithm.into_output(static_positions)?;
    debug!(
        target: "css::flexbox::layout",
        "[FLEX-LAYOUT] items={} positioned={} block_size={}",
        output.items.len(), output.static_positions.len(), output.border_box_block_size
    );
    Ok(output)
}

/// Reserve one more slot in a per-pass buffer.
fn reserve_one<T>(buffer: &mut Vec<T>, what: &'static str) -> Result<()> {
    try_reserve(buffer, 1, what)
}

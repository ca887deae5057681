//! CSS Flexible Box Layout Module Level 1: flex layout for one container.
//! See <https://www.w3.org/TR/css-flexbox-1/>
//!
//! The box tree stays outside this crate. Callers describe the container
//! and its children by style, and answer measurement and layout requests
//! for the children through [`FlexLayoutTree`].

// Chapter modules follow the structure of Flexbox Level 1.
// §3 Flex containers
#[path = "3_flex_containers/mod.rs"]
mod chapter3;
// §4 Flex items
#[path = "4_flex_items/mod.rs"]
mod chapter4;
// §5 Ordering and orientation
#[path = "5_ordering_and_orientation/mod.rs"]
mod chapter5;
// §6 Flex lines
#[path = "6_flex_lines/mod.rs"]
mod chapter6;
// §7 Flexibility
#[path = "7_flexibility/mod.rs"]
mod chapter7;
// §8 Alignment
#[path = "8_alignment/mod.rs"]
mod chapter8;
// §9 Flex layout algorithm
#[path = "9_flex_layout_algorithm/mod.rs"]
mod chapter9;

pub mod error;

pub use chapter3::{
    DisplayKeyword, FlexContainerConstraints, FlexContainerStyle, FlexDirection, FlexWrap, Gap,
    GapType, MarginTrim, compute_gap, establishes_flex_formatting_context,
};
pub use chapter4::{
    FlexChild, FlexItemStyle, ItemRef, Overflow, is_flex_item, needs_static_position,
};
pub use chapter5::{FlexFlow, OrderedChildren, order_key, order_modified_document_order, start_side};
pub use chapter6::{FlexLine, LineBreakContext, LineMarginTrim, compute_next_flex_line};
pub use chapter7::{
    FlexLayoutItem, FlexSign, freeze_inflexible_items, freeze_violations,
    resolve_flexible_lengths, resolve_line,
};
pub use chapter8::baseline::{BaselineAlignmentState, BaselineGroup, BaselinePreference};
pub use chapter8::{
    ContentAlignment, ContentDistribution, ContentPosition, ItemAlignment, ItemPosition,
    OverflowAlignment, align_content_space_between, alignment_for_item, alignment_offset,
    content_alignment_start_overflow, initial_align_content_offset, initial_justify_content_offset,
    justify_content_space_between, resolve_left_right_alignment,
};
pub use chapter9::{
    ChildConstraintSpace, ChildLayoutResult, FlexItemLayout, FlexLayoutCache, FlexLayoutOutput,
    FlexLayoutTree, FlexLineLayout, LayoutContext, LayoutPhase, PhaseScope, StaticPosition,
    compute_intrinsic_inline_sizes, perform_flex_layout,
};
pub use error::{FlexLayoutError, MeasurementKind, Result};

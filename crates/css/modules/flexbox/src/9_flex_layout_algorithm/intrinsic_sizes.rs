//! Min-content and max-content inline sizes of a flex container.
//! See <https://www.w3.org/TR/css-flexbox-1/#intrinsic-main-sizes>
//! See <https://www.w3.org/TR/css-flexbox-1/#intrinsic-cross-sizes>

use css_box::LayoutUnit;
use css_sizing::IntrinsicSizes;
use log::debug;
use tracing::debug_span;

use super::constraint_space::{ChildConstraintSpace, FlexLayoutCache, FlexLayoutTree};
use super::context::{LayoutContext, LayoutPhase};
use super::FlexLayoutAlgorithm;
use crate::chapter3::{FlexContainerConstraints, FlexContainerStyle, GapType, compute_gap};
use crate::chapter4::FlexChild;
use crate::chapter5::order_modified_document_order;
use crate::error::Result;

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    /// Margin-box contribution of one child to the container's inline size.
    fn inline_size_contribution(&mut self, child: &FlexChild) -> IntrinsicSizes {
        let style = &child.style;
        let margins = self.resolved_margins(style);
        let inline_axis = self.inline_axis_sizing(style, &margins);
        let inline_sizes = match inline_axis.preferred_border_box() {
            Some(specified) => IntrinsicSizes::fixed(inline_axis.constrain(specified, LayoutUnit::zero())),
            None => {
                let content = self.tree.intrinsic_inline_sizes(child.handle);
                let clamp = |size: LayoutUnit| inline_axis.constrain(size + inline_axis.border_and_padding, size);
                IntrinsicSizes {
                    min_content: clamp(content.min_content),
                    max_content: clamp(content.max_content),
                }
            }
        };
        if !style.writing_mode.is_orthogonal(self.style.writing_mode) {
            return IntrinsicSizes {
                min_content: inline_sizes.min_content + inline_axis.margins,
                max_content: inline_sizes.max_content + inline_axis.margins,
            };
        }

        // The child's block axis runs along the container's inline axis.
        let block_axis = self.block_axis_sizing(style, &margins);
        let content = if block_axis.preferred_border_box().is_some() {
            LayoutUnit::zero()
        } else {
            let stretched_block_size = self
                .should_use_container_cross_size(style)
                .then(|| self.container_cross_size_for_item(style));
            let space = ChildConstraintSpace {
                inline_size: inline_sizes.max_content,
                block_size: None,
                percentage_resolution_block_size: self
                    .percentage_resolution_block_size(style, stretched_block_size),
            };
            self.tree.layout_child(child.handle, &space).content_block_size
        };
        let block_size =
            self.used_block_size(style, &margins, inline_sizes.max_content, content) + block_axis.margins;
        IntrinsicSizes::fixed(block_size)
    }

    fn intrinsic_inline_sizes_of_children(&mut self, in_flow: &[usize]) -> IntrinsicSizes {
        let is_row = !self.flow.is_column();
        let is_multiline = self.flow.is_multiline();
        let mut sizes = IntrinsicSizes::zero();
        let children = self.children;
        for &child_index in in_flow {
            let Some(child) = children.get(child_index) else {
                continue;
            };
            let contribution = self.inline_size_contribution(child);
            if is_row {
                sizes.max_content += contribution.max_content;
                sizes.min_content = if is_multiline {
                    sizes.min_content.max(contribution.min_content)
                } else {
                    sizes.min_content + contribution.min_content
                };
            } else {
                sizes.max_content = sizes.max_content.max(contribution.max_content);
                sizes.min_content = sizes.min_content.max(contribution.min_content);
            }
        }

        if is_row && in_flow.len() > 1 {
            let gaps = i32::try_from(in_flow.len() - 1).unwrap_or(i32::MAX);
            let gap = compute_gap(self.style, self.constraints, GapType::BetweenItems) * gaps;
            sizes.max_content += gap;
            if !is_multiline {
                sizes.min_content += gap;
            }
        }
        sizes.max_content = sizes.max_content.max(sizes.min_content);
        IntrinsicSizes {
            min_content: sizes.min_content.clamp_negative_to_zero(),
            max_content: sizes.max_content.clamp_negative_to_zero(),
        }
    }
}

/// Content-box min-content and max-content inline sizes of a flex container.
///
/// Percentage gaps and margins resolve against `constraints`, which callers
/// usually leave at zero while the inline size is still unknown.
///
/// # Errors
/// Returns `OutOfMemory` if ordering the children cannot allocate.
pub fn compute_intrinsic_inline_sizes<Tree: FlexLayoutTree + ?Sized>(
    style: &FlexContainerStyle,
    constraints: &FlexContainerConstraints,
    children: &[FlexChild],
    tree: &mut Tree,
    cache: &mut FlexLayoutCache,
) -> Result<IntrinsicSizes> {
    let span = debug_span!("flex_intrinsic_sizes", children = children.len());
    let _entered = span.enter();

    let context = LayoutContext::new();
    let _phase = context.enter(LayoutPhase::IntrinsicWidthComputation);
    let ordered = order_modified_document_order(children)?;
    let mut algorithm =
        FlexLayoutAlgorithm::new(style, constraints, children, tree, cache, &context);
    let sizes = algorithm.intrinsic_inline_sizes_of_children(&ordered.in_flow);
    debug!(
        target: "css::flexbox::layout",
        "[FLEX-LAYOUT] intrinsic inline sizes min={} max={}",
        sizes.min_content, sizes.max_content
    );
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter3::{FlexDirection, FlexWrap, Gap};
    use crate::chapter4::{FlexItemStyle, ItemRef};
    use crate::ChildLayoutResult;
    use css_box::{Margin, Sides};
    use css_sizing::SizeValue;
    use css_writing_modes::{TextDirection, WritingMode, WritingModeStyle};

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }

    /// Children whose min-content is their handle and max-content twice it,
    /// and whose content is five pixels tall per handle.
    struct ScaledContent;

    impl FlexLayoutTree for ScaledContent {
        fn intrinsic_inline_sizes(&mut self, item: ItemRef) -> IntrinsicSizes {
            let base = i32::try_from(item.0).unwrap_or_default();
            IntrinsicSizes {
                min_content: px(base),
                max_content: px(base * 2),
            }
        }

        fn layout_child(&mut self, item: ItemRef, _space: &ChildConstraintSpace) -> ChildLayoutResult {
            ChildLayoutResult {
                content_block_size: px(i32::try_from(item.0).unwrap_or_default() * 5),
                ..ChildLayoutResult::default()
            }
        }
    }

    /// Records the percentage base each child layout was given.
    #[derive(Default)]
    struct PercentageBases {
        seen: Vec<Option<LayoutUnit>>,
    }

    impl FlexLayoutTree for PercentageBases {
        fn intrinsic_inline_sizes(&mut self, _item: ItemRef) -> IntrinsicSizes {
            IntrinsicSizes::fixed(px(10))
        }

        fn layout_child(&mut self, _item: ItemRef, space: &ChildConstraintSpace) -> ChildLayoutResult {
            self.seen.push(space.percentage_resolution_block_size);
            ChildLayoutResult {
                content_block_size: px(25),
                ..ChildLayoutResult::default()
            }
        }
    }

    fn children(handles: &[u64]) -> Vec<FlexChild> {
        handles
            .iter()
            .map(|&handle| FlexChild::new(ItemRef(handle), FlexItemStyle::default()))
            .collect()
    }

    fn intrinsic(style: &FlexContainerStyle, children: &[FlexChild]) -> IntrinsicSizes {
        let mut cache = FlexLayoutCache::new();
        compute_intrinsic_inline_sizes(
            style,
            &FlexContainerConstraints::default(),
            children,
            &mut ScaledContent,
            &mut cache,
        )
        .unwrap_or_else(|_| IntrinsicSizes::zero())
    }

    /// # Panics
    /// Panics if row contributions are not summed.
    #[test]
    fn single_line_rows_sum_contributions() {
        let style = FlexContainerStyle {
            column_gap: Gap::Fixed(px(4)),
            ..FlexContainerStyle::default()
        };
        let sizes = intrinsic(&style, &children(&[10, 20]));
        assert_eq!(sizes.min_content, px(34));
        assert_eq!(sizes.max_content, px(64));
    }

    /// # Panics
    /// Panics if a wrapping row does not take its largest min contribution.
    #[test]
    fn multi_line_rows_take_largest_min_contribution() {
        let style = FlexContainerStyle {
            flex_wrap: FlexWrap::Wrap,
            ..FlexContainerStyle::default()
        };
        let sizes = intrinsic(&style, &children(&[10, 20]));
        assert_eq!(sizes.min_content, px(20));
        assert_eq!(sizes.max_content, px(60));
    }

    /// # Panics
    /// Panics if columns do not take the widest item.
    #[test]
    fn columns_take_widest_item() {
        let style = FlexContainerStyle {
            flex_direction: FlexDirection::Column,
            column_gap: Gap::Fixed(px(4)),
            ..FlexContainerStyle::default()
        };
        let mut items = children(&[10, 20]);
        if let Some(first) = items.first_mut() {
            first.style.width = SizeValue::Fixed(px(50));
            first.style.margin = Sides::new(
                Margin::Fixed(px(0)),
                Margin::Fixed(px(3)),
                Margin::Fixed(px(0)),
                Margin::Fixed(px(2)),
            );
        }
        let sizes = intrinsic(&style, &items);
        assert_eq!(sizes.min_content, px(55));
        assert_eq!(sizes.max_content, px(55));
    }

    /// # Panics
    /// Panics if an orthogonal item does not contribute its block size.
    #[test]
    fn orthogonal_items_contribute_block_size() {
        let mut items = children(&[6]);
        if let Some(first) = items.first_mut() {
            first.style.writing_mode = WritingModeStyle::new(WritingMode::VerticalRl, TextDirection::Ltr);
        }
        let sizes = intrinsic(&FlexContainerStyle::default(), &items);
        assert_eq!(sizes.min_content, px(30));
        assert_eq!(sizes.max_content, px(30));
    }

    /// # Panics
    /// Panics if a stretched orthogonal item in a column cannot resolve
    /// percentages against the container's inline size, or a row item can.
    #[test]
    fn stretched_orthogonal_items_see_container_cross_size() {
        let mut items = children(&[1]);
        if let Some(first) = items.first_mut() {
            first.style.writing_mode = WritingModeStyle::new(WritingMode::VerticalRl, TextDirection::Ltr);
        }
        let constraints = FlexContainerConstraints::with_inline_size(px(80));
        let column = FlexContainerStyle {
            flex_direction: FlexDirection::Column,
            ..FlexContainerStyle::default()
        };
        let mut tree = PercentageBases::default();
        let mut cache = FlexLayoutCache::new();
        let sizes = compute_intrinsic_inline_sizes(&column, &constraints, &items, &mut tree, &mut cache)
            .unwrap_or_else(|_| IntrinsicSizes::zero());
        assert_eq!(sizes.max_content, px(25));
        assert_eq!(tree.seen, vec![Some(px(80))]);

        let mut row_tree = PercentageBases::default();
        let row_sizes = compute_intrinsic_inline_sizes(
            &FlexContainerStyle::default(),
            &constraints,
            &items,
            &mut row_tree,
            &mut cache,
        )
        .unwrap_or_else(|_| IntrinsicSizes::zero());
        assert_eq!(row_sizes.max_content, px(25));
        assert_eq!(row_tree.seen, vec![None]);
    }
}

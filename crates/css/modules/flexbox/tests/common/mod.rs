//! Shared box tree for flex layout integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::HashMap;

use css_box::LayoutUnit;
use css_flexbox::{
    ChildConstraintSpace, ChildLayoutResult, FlexChild, FlexContainerConstraints,
    FlexContainerStyle, FlexItemStyle, FlexLayoutCache, FlexLayoutOutput, FlexLayoutTree, ItemRef,
    perform_flex_layout,
};
use css_sizing::{IntrinsicSizes, SizeValue};
use serde::Deserialize;

pub fn px(value: i32) -> LayoutUnit {
    LayoutUnit::from_int(value)
}

/// Content of one child as the fixture tree models it.
///
/// With a `line_height`, the content behaves like a run of text that is
/// `max_content` wide and wraps onto as many lines as the inline size needs.
#[derive(Copy, Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FixtureContent {
    pub min_content: LayoutUnit,
    pub max_content: LayoutUnit,
    pub block_size: LayoutUnit,
    pub line_height: Option<LayoutUnit>,
    pub first_baseline: Option<LayoutUnit>,
    pub last_baseline: Option<LayoutUnit>,
}

impl FixtureContent {
    pub fn fixed(block_size: i32) -> Self {
        Self {
            block_size: px(block_size),
            ..Self::default()
        }
    }

    pub fn text(min_content: i32, max_content: i32, line_height: i32) -> Self {
        Self {
            min_content: px(min_content),
            max_content: px(max_content),
            line_height: Some(px(line_height)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_baseline(self, baseline: i32) -> Self {
        Self {
            first_baseline: Some(px(baseline)),
            last_baseline: Some(px(baseline)),
            ..self
        }
    }

    fn content_block_size(&self, inline_size: LayoutUnit) -> LayoutUnit {
        let Some(line_height) = self.line_height else {
            return self.block_size;
        };
        if inline_size <= LayoutUnit::zero() || self.max_content <= inline_size {
            return line_height;
        }
        let lines = self
            .max_content
            .to_int()
            .unsigned_abs()
            .div_ceil(inline_size.to_int().unsigned_abs().max(1));
        line_height * i32::try_from(lines).unwrap_or(1).max(1)
    }
}

/// Box tree backed by a map from handle to content, recording each layout
/// request it answers.
#[derive(Debug, Default)]
pub struct FixtureTree {
    pub content: HashMap<ItemRef, FixtureContent>,
    pub layouts: Vec<(ItemRef, ChildConstraintSpace)>,
    pub intrinsic_queries: usize,
}

impl FixtureTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: u64, content: FixtureContent) {
        self.content.insert(ItemRef(handle), content);
    }
}

impl FlexLayoutTree for FixtureTree {
    fn intrinsic_inline_sizes(&mut self, item: ItemRef) -> IntrinsicSizes {
        self.intrinsic_queries += 1;
        self.content.get(&item).map_or_else(IntrinsicSizes::zero, |content| IntrinsicSizes {
            min_content: content.min_content,
            max_content: content.max_content,
        })
    }

    fn layout_child(&mut self, item: ItemRef, space: &ChildConstraintSpace) -> ChildLayoutResult {
        self.layouts.push((item, *space));
        let content = self.content.get(&item).copied().unwrap_or_default();
        let content_block_size = content.content_block_size(space.inline_size);
        ChildLayoutResult {
            content_block_size,
            first_baseline: content.first_baseline,
            last_baseline: content.last_baseline,
        }
    }
}

/// Child with a fixed border-box width and content-sized height.
pub fn sized_child(handle: u64, width: i32) -> FlexChild {
    FlexChild::new(
        ItemRef(handle),
        FlexItemStyle {
            width: SizeValue::Fixed(px(width)),
            ..FlexItemStyle::default()
        },
    )
}

/// Run one layout pass with a fresh cache.
pub fn layout(
    style: &FlexContainerStyle,
    constraints: &FlexContainerConstraints,
    children: &[FlexChild],
    tree: &mut FixtureTree,
) -> anyhow::Result<FlexLayoutOutput> {
    let mut cache = FlexLayoutCache::new();
    Ok(perform_flex_layout(style, constraints, children, tree, &mut cache)?)
}

/// `(x, y, width, height)` of every placed item, in whole pixels.
pub fn rects(output: &FlexLayoutOutput) -> Vec<(i32, i32, i32, i32)> {
    output
        .items
        .iter()
        .map(|item| {
            (
                item.rect.x.to_int(),
                item.rect.y.to_int(),
                item.rect.width.to_int(),
                item.rect.height.to_int(),
            )
        })
        .collect()
}

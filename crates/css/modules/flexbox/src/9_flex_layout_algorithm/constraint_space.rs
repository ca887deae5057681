//! The boundary between flex layout and the box tree that owns the children.

use std::collections::HashMap;

use css_box::LayoutUnit;
use css_sizing::IntrinsicSizes;
use serde::{Deserialize, Serialize};

use crate::ItemRef;
use crate::error::{FlexLayoutError, MeasurementKind, Result, try_reserve};

/// Sizes a child is laid out at.
///
/// Sizes are border-box and logical in the child's own writing mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildConstraintSpace {
    /// Always definite; flex layout resolves the inline size before asking.
    pub inline_size: LayoutUnit,
    /// Set when flex layout dictates the block size (flexed or stretched).
    pub block_size: Option<LayoutUnit>,
    /// Block size percentages inside the child may resolve against, if any.
    pub percentage_resolution_block_size: Option<LayoutUnit>,
}

/// What laying out a child reports back.
///
/// Baselines are offsets from the child's border-box block-start edge in
/// its own writing mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildLayoutResult {
    /// Content-box block size the child's content needs.
    pub content_block_size: LayoutUnit,
    pub first_baseline: Option<LayoutUnit>,
    pub last_baseline: Option<LayoutUnit>,
}

/// Box tree that owns the children of a flex container.
///
/// Laying out a child may itself run flex layout for a nested container.
pub trait FlexLayoutTree {
    /// Content-box min-content and max-content inline sizes of `item`.
    fn intrinsic_inline_sizes(&mut self, item: ItemRef) -> IntrinsicSizes;

    /// Lay out the content of `item` inside `space`.
    fn layout_child(&mut self, item: ItemRef, space: &ChildConstraintSpace) -> ChildLayoutResult;
}

/// State kept across layout passes of one container.
///
/// Holds each child's content block size from its last unstretched layout,
/// so a stretched relayout cannot feed back into the intrinsic size.
#[derive(Clone, Debug, Default)]
pub struct FlexLayoutCache {
    intrinsic_content_block_sizes: HashMap<ItemRef, LayoutUnit>,
}

impl FlexLayoutCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intrinsic_content_block_size(&self, item: ItemRef) -> Option<LayoutUnit> {
        self.intrinsic_content_block_sizes.get(&item).copied()
    }

    #[inline]
    pub fn set_intrinsic_content_block_size(&mut self, item: ItemRef, size: LayoutUnit) {
        self.intrinsic_content_block_sizes.insert(item, size);
    }

    #[inline]
    pub fn remove(&mut self, item: ItemRef) {
        self.intrinsic_content_block_sizes.remove(&item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.intrinsic_content_block_sizes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intrinsic_content_block_sizes.is_empty()
    }
}

/// Measurements scheduled before flex base sizes can be computed.
///
/// Entries are child indices, each queued at most once per kind. All inline
/// size queries run before any block layout, because a child's block layout
/// needs its inline size first.
#[derive(Clone, Debug, Default)]
pub(crate) struct ChildLayoutWorklist {
    inline_sizes: Vec<usize>,
    block_layouts: Vec<usize>,
}

impl ChildLayoutWorklist {
    /// # Errors
    /// Returns `OutOfMemory` if the queue cannot grow.
    pub(crate) fn request_inline_sizes(&mut self, child: usize) -> Result<()> {
        if !self.inline_sizes.contains(&child) {
            try_reserve(&mut self.inline_sizes, 1, "inline size requests")?;
            self.inline_sizes.push(child);
        }
        Ok(())
    }

    /// # Errors
    /// Returns `OutOfMemory` if the queue cannot grow.
    pub(crate) fn request_block_layout(&mut self, child: usize) -> Result<()> {
        if !self.block_layouts.contains(&child) {
            try_reserve(&mut self.block_layouts, 1, "block layout requests")?;
            self.block_layouts.push(child);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn inline_size_requests(&self) -> &[usize] {
        &self.inline_sizes
    }

    #[inline]
    pub(crate) fn block_layout_requests(&self) -> &[usize] {
        &self.block_layouts
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.inline_sizes.len() + self.block_layouts.len()
    }
}

/// Results of a drained [`ChildLayoutWorklist`], keyed by child index.
#[derive(Clone, Debug, Default)]
pub(crate) struct ChildMeasurements {
    inline_sizes: HashMap<usize, IntrinsicSizes>,
    block_layouts: HashMap<usize, ChildLayoutResult>,
}

impl ChildMeasurements {
    #[inline]
    pub(crate) fn record_inline_sizes(&mut self, child: usize, sizes: IntrinsicSizes) {
        self.inline_sizes.insert(child, sizes);
    }

    #[inline]
    pub(crate) fn record_block_layout(&mut self, child: usize, result: ChildLayoutResult) {
        self.block_layouts.insert(child, result);
    }

    /// # Errors
    /// Returns `MissingMeasurement` if the sizes were never queried.
    pub(crate) fn inline_sizes(&self, child: usize, item: ItemRef) -> Result<IntrinsicSizes> {
        self.inline_sizes
            .get(&child)
            .copied()
            .ok_or(FlexLayoutError::MissingMeasurement {
                item,
                kind: MeasurementKind::InlineSizes,
            })
    }

    #[inline]
    pub(crate) fn block_layout(&self, child: usize) -> Option<&ChildLayoutResult> {
        self.block_layouts.get(&child)
    }
}

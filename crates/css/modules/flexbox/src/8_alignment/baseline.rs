//! Baseline-sharing groups for one flex line.
//! See <https://www.w3.org/TR/css-align-3/#baseline-sharing-group>

use css_box::LayoutUnit;
use css_writing_modes::FlowDirection;
use smallvec::SmallVec;

use crate::chapter8::ItemPosition;

/// First or last baseline alignment.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BaselinePreference {
    First,
    Last,
}

impl BaselinePreference {
    #[inline]
    pub const fn from_position(position: ItemPosition) -> Self {
        if matches!(position, ItemPosition::LastBaseline) {
            Self::Last
        } else {
            Self::First
        }
    }
}

/// Items of one line that align to the same physical baseline edge.
#[derive(Clone, Debug)]
pub struct BaselineGroup {
    block_flow: FlowDirection,
    preference: BaselinePreference,
    max_ascent: LayoutUnit,
    items: SmallVec<usize, 4>,
}

impl BaselineGroup {
    fn new(block_flow: FlowDirection, preference: BaselinePreference) -> Self {
        Self {
            block_flow,
            preference,
            max_ascent: LayoutUnit::zero(),
            items: SmallVec::new(),
        }
    }

    /// Items share a group when they align to the same edge: equal (or
    /// orthogonal) block flow with the same preference, or opposite block
    /// flow with the opposite preference.
    fn is_compatible(&self, block_flow: FlowDirection, preference: BaselinePreference) -> bool {
        let is_orthogonal = self.block_flow.is_horizontal() != block_flow.is_horizontal();
        let is_opposite = self.block_flow.reversed() == block_flow;
        ((self.block_flow == block_flow || is_orthogonal) && self.preference == preference)
            || (is_opposite && self.preference != preference)
    }

    fn update(&mut self, item: usize, ascent: LayoutUnit) {
        if self.items.is_empty() || ascent > self.max_ascent {
            self.max_ascent = ascent;
        }
        self.items.push(item);
    }

    #[inline]
    pub const fn max_ascent(&self) -> LayoutUnit {
        self.max_ascent
    }

    #[inline]
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    #[inline]
    pub const fn preference(&self) -> BaselinePreference {
        self.preference
    }
}

/// Baseline bookkeeping of one line, built while its items are placed.
#[derive(Clone, Debug, Default)]
pub struct BaselineAlignmentState {
    groups: SmallVec<BaselineGroup, 2>,
}

impl BaselineAlignmentState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` with its margin-box `ascent` to the first compatible group,
    /// creating one when none matches.
    pub fn update_shared_group(
        &mut self,
        item: usize,
        block_flow: FlowDirection,
        position: ItemPosition,
        ascent: LayoutUnit,
    ) {
        let preference = BaselinePreference::from_position(position);
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|group| group.is_compatible(block_flow, preference))
        {
            group.update(item, ascent);
            return;
        }
        let mut group = BaselineGroup::new(block_flow, preference);
        group.update(item, ascent);
        self.groups.push(group);
    }

    #[inline]
    pub fn groups(&self) -> &[BaselineGroup] {
        &self.groups
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Largest ascent in the group holding `item`.
    pub fn max_ascent_for(&self, item: usize) -> Option<LayoutUnit> {
        self.groups
            .iter()
            .find(|group| group.items.contains(&item))
            .map(BaselineGroup::max_ascent)
    }
}

//! First and last baselines of the flex container.
//! See <https://www.w3.org/TR/css-flexbox-1/#flex-baselines>

use css_box::LayoutUnit;

use super::constraint_space::FlexLayoutTree;
use super::{FlexLayoutAlgorithm, ItemGeometry};
use crate::chapter8::ItemPosition;
use crate::chapter8::baseline::BaselinePreference;

impl<'input, Tree: FlexLayoutTree + ?Sized> FlexLayoutAlgorithm<'input, Tree> {
    /// Item of the first (or last) line that provides the container's
    /// baseline: the first baseline-aligned item with a parallel writing
    /// mode and no cross-axis `auto` margins, else the first item.
    fn baseline_item(&self, preference: BaselinePreference) -> Option<&ItemGeometry<'input>> {
        let wants_first_line = (preference == BaselinePreference::First) != self.flow.is_wrap_reverse();
        let line = if wants_first_line {
            self.lines.first()
        } else {
            self.lines.last()
        }?;
        let wanted = match preference {
            BaselinePreference::First => ItemPosition::Baseline,
            BaselinePreference::Last => ItemPosition::LastBaseline,
        };
        // Walk items from the edge the baseline is taken from.
        if (preference == BaselinePreference::First) == self.flow.is_column_or_row_reverse() {
            self.baseline_candidate(line.items.clone().rev(), wanted)
        } else {
            self.baseline_candidate(line.items.clone(), wanted)
        }
    }

    fn baseline_candidate(
        &self,
        indices: impl Iterator<Item = usize>,
        wanted: ItemPosition,
    ) -> Option<&ItemGeometry<'input>> {
        let mut fallback = None;
        for index in indices {
            let Some(geometry) = self.geometry.get(index) else {
                continue;
            };
            let style = &geometry.child.style;
            if self.item_alignment(style).0 == wanted
                && !style.writing_mode.is_orthogonal(self.style.writing_mode)
                && !self.flow.has_auto_margins_in_cross_axis(style)
            {
                return Some(geometry);
            }
            fallback.get_or_insert(geometry);
        }
        fallback
    }

    /// Offset of the item's border box from the container's block-start
    /// edge, before any block flip.
    fn logical_top(&self, geometry: &ItemGeometry<'_>) -> LayoutUnit {
        let location = self.flow.physical_location(geometry.location);
        if self.style.writing_mode.is_horizontal() {
            location.y
        } else {
            location.x
        }
    }

    fn container_block_extent(&self, geometry: &ItemGeometry<'_>) -> LayoutUnit {
        if self.style.writing_mode.is_horizontal() {
            geometry.size.height
        } else {
            geometry.size.width
        }
    }

    fn line_baseline(&self, preference: BaselinePreference) -> Option<LayoutUnit> {
        let geometry = self.baseline_item(preference)?;
        let logical_top = self.logical_top(geometry);
        let synthesized = self.container_block_extent(geometry) + logical_top;
        if !self.main_axis_is_inline(&geometry.child.style) {
            return Some(LayoutUnit::from_int(synthesized.floor()));
        }
        let baseline = match preference {
            BaselinePreference::First => geometry.first_baseline,
            BaselinePreference::Last => geometry.last_baseline,
        };
        let value = baseline.map_or(synthesized, |baseline| baseline + logical_top);
        Some(LayoutUnit::from_int(value.floor()))
    }

    pub(super) fn first_line_baseline(&self) -> Option<LayoutUnit> {
        self.line_baseline(BaselinePreference::First)
    }

    pub(super) fn last_line_baseline(&self) -> Option<LayoutUnit> {
        self.line_baseline(BaselinePreference::Last)
    }
}

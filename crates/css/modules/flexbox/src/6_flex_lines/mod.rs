//! Flex lines: collecting items into lines.
//! See <https://www.w3.org/TR/css-flexbox-1/#flex-lines>
//! See <https://www.w3.org/TR/css-flexbox-1/#algo-line-break>

use core::ops::Range;

use css_box::LayoutUnit;
use log::{debug, trace};

use crate::chapter3::MarginTrim;
use crate::chapter5::FlexFlow;
use crate::chapter7::FlexLayoutItem;

/// A run of consecutive items and the sums the resolver starts from.
///
/// Both sums include `(n - 1)` gaps and may be negative when items carry
/// negative margins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlexLine {
    /// Indices into the container's item list.
    pub range: Range<usize>,
    pub sum_flex_base_size: LayoutUnit,
    pub sum_hypothetical_main_size: LayoutUnit,
    pub total_flex_grow: f64,
    pub total_flex_shrink: f64,
    pub total_weighted_flex_shrink: f64,
}

impl FlexLine {
    #[inline]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Which main-axis margins `margin-trim` removes at line edges.
///
/// Row flows trim the inline margins, column flows the block margins.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LineMarginTrim {
    pub start: bool,
    pub end: bool,
}

impl LineMarginTrim {
    #[inline]
    pub const fn new(flow: &FlexFlow, margin_trim: MarginTrim) -> Self {
        if flow.is_column() {
            Self {
                start: margin_trim.block_start,
                end: margin_trim.block_end,
            }
        } else {
            Self {
                start: margin_trim.inline_start,
                end: margin_trim.inline_end,
            }
        }
    }
}

/// Inputs shared by every line of one container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineBreakContext {
    /// Main-axis space before a multi-line container wraps.
    pub line_break_length: LayoutUnit,
    pub gap_between_items: LayoutUnit,
    pub is_multiline: bool,
    pub margin_trim: LineMarginTrim,
}

impl LineBreakContext {
    /// With `margin-trim` at the line end, an overflowing item may still fit
    /// once its end margin is dropped.
    fn fits_with_trimmed_margin_end(
        &self,
        item: &FlexLayoutItem,
        sum_hypothetical_main_size: LayoutUnit,
    ) -> bool {
        self.margin_trim.end
            && sum_hypothetical_main_size + item.hypothetical_main_axis_margin_box_size()
                - item.main_margin_end
                <= self.line_break_length
    }

    fn should_break_before(
        &self,
        item: &FlexLayoutItem,
        line: &FlexLine,
    ) -> bool {
        self.is_multiline
            && !line.is_empty()
            && line.sum_hypothetical_main_size + item.hypothetical_main_axis_margin_box_size()
                > self.line_break_length
            && !self.fits_with_trimmed_margin_end(item, line.sum_hypothetical_main_size)
    }
}

/// Collect the next line starting at `*cursor` and advance the cursor past
/// it. Returns `None` once every item has been placed on a line.
///
/// The first item of a line is always accepted, so each call makes progress.
/// Trimmed margins are zeroed on the items and flagged for the caller.
pub fn compute_next_flex_line(
    cursor: &mut usize,
    items: &mut [FlexLayoutItem],
    context: &LineBreakContext,
) -> Option<FlexLine> {
    let start = *cursor;
    if start >= items.len() {
        return None;
    }
    if context.margin_trim.start
        && let Some(first) = items.get_mut(start)
    {
        first.trim_main_margin_start();
    }

    let gap = context.gap_between_items;
    let mut line = FlexLine {
        range: start..start,
        ..FlexLine::default()
    };
    while let Some(item) = items.get(*cursor) {
        if context.should_break_before(item, &line) {
            break;
        }
        line.sum_flex_base_size += item.flex_base_margin_box_size() + gap;
        line.sum_hypothetical_main_size += item.hypothetical_main_axis_margin_box_size() + gap;
        line.total_flex_grow += f64::from(item.flex_grow);
        line.total_flex_shrink += f64::from(item.flex_shrink);
        line.total_weighted_flex_shrink += item.weighted_flex_shrink();
        *cursor += 1;
        line.range.end = *cursor;
    }

    // A gap was added after every item; the last one has none.
    line.sum_flex_base_size -= gap;
    line.sum_hypothetical_main_size -= gap;

    if context.margin_trim.end
        && let Some(last) = items.get_mut(line.range.end - 1)
    {
        line.sum_flex_base_size -= last.main_margin_end;
        line.sum_hypothetical_main_size -= last.main_margin_end;
        last.trim_main_margin_end();
    }

    debug!(
        target: "css::flexbox::lines",
        "[FLEX-LINE] items={:?} sum_base={} sum_hypothetical={} break_length={}",
        line.range, line.sum_flex_base_size, line.sum_hypothetical_main_size,
        context.line_break_length
    );
    trace!(
        target: "css::flexbox::lines",
        "[FLEX-LINE] grow={} shrink={} weighted_shrink={}",
        line.total_flex_grow, line.total_flex_shrink, line.total_weighted_flex_shrink
    );
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter3::{FlexDirection, FlexWrap};
    use crate::chapter4::ItemRef;
    use css_writing_modes::WritingModeStyle;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }

    fn item(index: usize, size: i32) -> FlexLayoutItem {
        FlexLayoutItem::new(
            index,
            ItemRef(index as u64),
            px(size),
            (LayoutUnit::zero(), LayoutUnit::max_value()),
        )
        .with_factors(0.0, 1.0)
    }

    fn context(break_length: i32, is_multiline: bool) -> LineBreakContext {
        LineBreakContext {
            line_break_length: px(break_length),
            gap_between_items: LayoutUnit::zero(),
            is_multiline,
            margin_trim: LineMarginTrim::default(),
        }
    }

    fn collect(items: &mut [FlexLayoutItem], context: &LineBreakContext) -> Vec<FlexLine> {
        let mut cursor = 0;
        let mut lines = Vec::new();
        while let Some(line) = compute_next_flex_line(&mut cursor, items, context) {
            lines.push(line);
        }
        lines
    }

    /// # Panics
    /// Panics if items that overflow the break length do not start new lines.
    #[test]
    fn wraps_when_line_overflows() {
        let mut items = vec![item(0, 60), item(1, 60), item(2, 60)];
        let lines = collect(&mut items, &context(100, true));
        let ranges: Vec<_> = lines.iter().map(|line| line.range.clone()).collect();
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);

        let mut items = vec![item(0, 60), item(1, 30), item(2, 60)];
        let lines = collect(&mut items, &context(100, true));
        let ranges: Vec<_> = lines.iter().map(|line| line.range.clone()).collect();
        assert_eq!(ranges, vec![0..2, 2..3]);
        assert_eq!(lines.first().map(|line| line.sum_hypothetical_main_size), Some(px(90)));
    }

    /// # Panics
    /// Panics if a single-line container breaks or an oversized first item is rejected.
    #[test]
    fn single_line_never_breaks() {
        let mut items = vec![item(0, 60), item(1, 60), item(2, 60)];
        let lines = collect(&mut items, &context(100, false));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(FlexLine::len), Some(3));
        assert!(
            lines
                .first()
                .is_some_and(|line| (line.total_flex_shrink - 3.0).abs() < f64::EPSILON)
        );

        let mut items = vec![item(0, 500)];
        let lines = collect(&mut items, &context(100, true));
        assert_eq!(lines.len(), 1);
    }

    /// # Panics
    /// Panics if gaps are not counted between items only.
    #[test]
    fn gaps_count_between_items() {
        let mut items = vec![item(0, 40), item(1, 40), item(2, 40)];
        let mut with_gap = context(100, true);
        with_gap.gap_between_items = px(10);
        let lines = collect(&mut items, &with_gap);
        // 40 + 10 + 40 = 90 fits; adding the third needs 140.
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.first().map(|line| line.sum_flex_base_size), Some(px(90)));
        assert_eq!(lines.get(1).map(|line| line.sum_flex_base_size), Some(px(40)));
    }

    /// # Panics
    /// Panics if trimmed line-edge margins still count towards the sums.
    #[test]
    fn trims_margins_at_line_edges() {
        let flow = FlexFlow {
            direction: FlexDirection::Row,
            wrap: FlexWrap::Wrap,
            writing_mode: WritingModeStyle::default(),
        };
        let trim = MarginTrim {
            inline_start: true,
            inline_end: true,
            ..MarginTrim::NONE
        };
        let mut trimmed = context(100, true);
        trimmed.margin_trim = LineMarginTrim::new(&flow, trim);
        assert!(trimmed.margin_trim.start && trimmed.margin_trim.end);

        let edges = |entry: FlexLayoutItem| entry.with_main_edges(LayoutUnit::zero(), px(5), px(10));
        let mut items = vec![edges(item(0, 40)), edges(item(1, 40)), edges(item(2, 40))];
        let lines = collect(&mut items, &trimmed);
        // Line one: 0 + 40 + 10 | 5 + 40 (+ 10 trimmed) = 95.
        assert_eq!(lines.first().map(|line| line.range.clone()), Some(0..2));
        assert_eq!(lines.first().map(|line| line.sum_hypothetical_main_size), Some(px(95)));
        assert!(items.first().is_some_and(|first| first.trimmed_main_start));
        assert!(items.get(1).is_some_and(|second| second.trimmed_main_end));
        assert!(items.get(2).is_some_and(|third| third.trimmed_main_start && third.trimmed_main_end));
    }
}

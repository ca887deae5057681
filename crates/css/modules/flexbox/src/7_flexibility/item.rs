//! The per-pass record of one flex item.

use css_box::LayoutUnit;

use crate::chapter4::ItemRef;

/// Whether a line grows or shrinks its items.
///
/// See <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FlexSign {
    Positive,
    Negative,
}

impl FlexSign {
    /// Items grow when their hypothetical sizes leave room on the line.
    #[inline]
    pub fn for_line(sum_hypothetical_main_size: LayoutUnit, container_main_inner_size: LayoutUnit) -> Self {
        if sum_hypothetical_main_size < container_main_inner_size {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// Main-axis sizing state of one in-flow child for a single layout pass.
///
/// Content sizes exclude border and padding. Margins are split by the
/// container-logical start and end of the main axis so `margin-trim` can
/// drop either one.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexLayoutItem {
    /// Position in the container's order-modified item list.
    pub index: usize,
    pub handle: ItemRef,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_base_content_size: LayoutUnit,
    pub hypothetical_main_content_size: LayoutUnit,
    pub min_main_size: LayoutUnit,
    /// `LayoutUnit::max_value()` when unconstrained.
    pub max_main_size: LayoutUnit,
    pub main_axis_border_and_padding: LayoutUnit,
    pub main_margin_start: LayoutUnit,
    pub main_margin_end: LayoutUnit,
    pub trimmed_main_start: bool,
    pub trimmed_main_end: bool,
    pub flexed_content_size: LayoutUnit,
    pub frozen: bool,
}

impl FlexLayoutItem {
    /// New item with no border, padding, margins or flexibility.
    pub fn new(
        index: usize,
        handle: ItemRef,
        flex_base_content_size: LayoutUnit,
        (min_main_size, max_main_size): (LayoutUnit, LayoutUnit),
    ) -> Self {
        let mut item = Self {
            index,
            handle,
            flex_grow: 0.0,
            flex_shrink: 0.0,
            flex_base_content_size,
            hypothetical_main_content_size: flex_base_content_size,
            min_main_size,
            max_main_size,
            main_axis_border_and_padding: LayoutUnit::zero(),
            main_margin_start: LayoutUnit::zero(),
            main_margin_end: LayoutUnit::zero(),
            trimmed_main_start: false,
            trimmed_main_end: false,
            flexed_content_size: LayoutUnit::zero(),
            frozen: false,
        };
        item.hypothetical_main_content_size = item.constrain_size_by_min_max(flex_base_content_size);
        item
    }

    #[inline]
    #[must_use]
    pub const fn with_factors(mut self, flex_grow: f32, flex_shrink: f32) -> Self {
        self.flex_grow = flex_grow;
        self.flex_shrink = flex_shrink;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_main_edges(
        mut self,
        border_and_padding: LayoutUnit,
        margin_start: LayoutUnit,
        margin_end: LayoutUnit,
    ) -> Self {
        self.main_axis_border_and_padding = border_and_padding;
        self.main_margin_start = margin_start;
        self.main_margin_end = margin_end;
        self
    }

    /// `max(min, min(size, max))`: the minimum wins.
    #[inline]
    pub fn constrain_size_by_min_max(&self, size: LayoutUnit) -> LayoutUnit {
        size.min(self.max_main_size).max(self.min_main_size)
    }

    #[inline]
    pub fn main_axis_margin(&self) -> LayoutUnit {
        self.main_margin_start + self.main_margin_end
    }

    #[inline]
    pub fn flex_base_margin_box_size(&self) -> LayoutUnit {
        self.flex_base_content_size + self.main_axis_border_and_padding + self.main_axis_margin()
    }

    #[inline]
    pub fn hypothetical_main_axis_margin_box_size(&self) -> LayoutUnit {
        self.hypothetical_main_content_size
            + self.main_axis_border_and_padding
            + self.main_axis_margin()
    }

    #[inline]
    pub fn flexed_border_box_size(&self) -> LayoutUnit {
        self.flexed_content_size + self.main_axis_border_and_padding
    }

    #[inline]
    pub fn flexed_margin_box_size(&self) -> LayoutUnit {
        self.flexed_border_box_size() + self.main_axis_margin()
    }

    /// `flex-grow` when growing, `flex-shrink` when shrinking.
    #[inline]
    pub const fn flex_factor(&self, sign: FlexSign) -> f32 {
        match sign {
            FlexSign::Positive => self.flex_grow,
            FlexSign::Negative => self.flex_shrink,
        }
    }

    /// `flex-shrink` scaled by the base size.
    #[inline]
    pub fn weighted_flex_shrink(&self) -> f64 {
        f64::from(self.flex_shrink) * self.flex_base_content_size.to_f64()
    }

    pub(crate) fn trim_main_margin_start(&mut self) {
        self.main_margin_start = LayoutUnit::zero();
        self.trimmed_main_start = true;
    }

    pub(crate) fn trim_main_margin_end(&mut self) {
        self.main_margin_end = LayoutUnit::zero();
        self.trimmed_main_end = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }

    /// # Panics
    /// Panics if the hypothetical size ignores min/max or the margin box sums are off.
    #[test]
    fn hypothetical_size_is_clamped() {
        let item = FlexLayoutItem::new(0, ItemRef(1), px(120), (px(10), px(100)))
            .with_main_edges(px(4), px(3), px(5));
        assert_eq!(item.hypothetical_main_content_size, px(100));
        assert_eq!(item.flex_base_margin_box_size(), px(132));
        assert_eq!(item.hypothetical_main_axis_margin_box_size(), px(112));

        // The minimum wins over a smaller maximum.
        let inverted = FlexLayoutItem::new(1, ItemRef(2), px(5), (px(50), px(20)));
        assert_eq!(inverted.hypothetical_main_content_size, px(50));
    }

    /// # Panics
    /// Panics if the flex sign does not follow the hypothetical sum.
    #[test]
    fn sign_follows_free_space() {
        assert_eq!(FlexSign::for_line(px(90), px(100)), FlexSign::Positive);
        assert_eq!(FlexSign::for_line(px(100), px(100)), FlexSign::Negative);
    }
}

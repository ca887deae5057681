//! Flexibility: resolving flexible lengths on one line.
//! See <https://www.w3.org/TR/css-flexbox-1/#flexibility>
//! See <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>

mod item;
pub use item::{FlexLayoutItem, FlexSign};

use css_box::LayoutUnit;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::chapter6::FlexLine;

type Violations = SmallVec<usize, 4>;

/// Freeze `violations` (indices into `items`) at their current flexed size
/// and take them out of the line's totals.
pub fn freeze_violations(
    items: &mut [FlexLayoutItem],
    violations: &[usize],
    remaining_free_space: &mut LayoutUnit,
    line: &mut FlexLine,
) {
    for &index in violations {
        let Some(item) = items.get_mut(index) else {
            continue;
        };
        *remaining_free_space -= item.flexed_content_size - item.flex_base_content_size;
        line.total_flex_grow -= f64::from(item.flex_grow);
        line.total_flex_shrink -= f64::from(item.flex_shrink);
        line.total_weighted_flex_shrink -= item.weighted_flex_shrink();
        // Subtracting each factor with full precision can undershoot the sums
        // computed up front.
        line.total_flex_grow = line.total_flex_grow.max(0.0);
        line.total_flex_shrink = line.total_flex_shrink.max(0.0);
        line.total_weighted_flex_shrink = line.total_weighted_flex_shrink.max(0.0);
        item.frozen = true;
    }
}

/// Freeze items with a zero flex factor, and items whose base size already
/// sits on the wrong side of their hypothetical size for this sign.
pub fn freeze_inflexible_items(
    sign: FlexSign,
    items: &mut [FlexLayoutItem],
    remaining_free_space: &mut LayoutUnit,
    line: &mut FlexLine,
) {
    let mut inflexible = Violations::new();
    for (index, item) in items.iter_mut().enumerate() {
        let violates_sign = match sign {
            FlexSign::Positive => item.flex_base_content_size > item.hypothetical_main_content_size,
            FlexSign::Negative => item.flex_base_content_size < item.hypothetical_main_content_size,
        };
        if item.flex_factor(sign) == 0.0 || violates_sign {
            item.flexed_content_size = item.hypothetical_main_content_size;
            inflexible.push(index);
        }
    }
    freeze_violations(items, &inflexible, remaining_free_space, line);
}

/// Share of the remaining free space for one unfrozen item, or zero when the
/// proportion is not finite.
fn extra_space_for(
    sign: FlexSign,
    item: &FlexLayoutItem,
    remaining_free_space: LayoutUnit,
    line: &FlexLine,
) -> f64 {
    let remaining = remaining_free_space.to_f64();
    let zero = LayoutUnit::zero();
    let share = match sign {
        FlexSign::Positive
            if remaining_free_space > zero
                && line.total_flex_grow > 0.0
                && line.total_flex_grow.is_finite() =>
        {
            remaining * f64::from(item.flex_grow) / line.total_flex_grow
        }
        FlexSign::Negative
            if remaining_free_space < zero
                && line.total_weighted_flex_shrink > 0.0
                && line.total_weighted_flex_shrink.is_finite()
                && item.flex_shrink != 0.0 =>
        {
            remaining * item.weighted_flex_shrink() / line.total_weighted_flex_shrink
        }
        FlexSign::Positive | FlexSign::Negative => 0.0,
    };
    if share.is_finite() { share } else { 0.0 }
}

/// One distribution round over the unfrozen items.
///
/// Returns `true` once the line has converged. Otherwise the items whose
/// clamping matches the sign of the total violation were frozen and the
/// caller runs another round.
pub fn resolve_flexible_lengths(
    sign: FlexSign,
    items: &mut [FlexLayoutItem],
    initial_free_space: LayoutUnit,
    remaining_free_space: &mut LayoutUnit,
    line: &mut FlexLine,
) -> bool {
    let sum_flex_factors = match sign {
        FlexSign::Positive => line.total_flex_grow,
        FlexSign::Negative => line.total_flex_shrink,
    };
    if sum_flex_factors > 0.0 && sum_flex_factors < 1.0 {
        let fractional = LayoutUnit::from_f64(initial_free_space.to_f64() * sum_flex_factors);
        if fractional.abs() < remaining_free_space.abs() {
            *remaining_free_space = fractional;
        }
    }

    let mut total_violation = LayoutUnit::zero();
    let mut used_free_space = LayoutUnit::zero();
    let mut min_violations = Violations::new();
    let mut max_violations = Violations::new();
    for (index, item) in items.iter_mut().enumerate() {
        if item.frozen {
            continue;
        }
        let extra_space = extra_space_for(sign, item, *remaining_free_space, line);
        let flexed = item.flex_base_content_size + LayoutUnit::from_float_round(extra_space as f32);
        let adjusted = item.constrain_size_by_min_max(flexed);
        item.flexed_content_size = adjusted;
        used_free_space += adjusted - item.flex_base_content_size;

        let violation = adjusted - flexed;
        if violation > LayoutUnit::zero() {
            min_violations.push(index);
        } else if violation < LayoutUnit::zero() {
            max_violations.push(index);
        }
        total_violation += violation;
        trace!(
            target: "css::flexbox::flexibility",
            "[FLEX-RESOLVE] item={:?} extra={extra_space} flexed={adjusted} violation={violation}",
            item.handle
        );
    }

    if total_violation.is_zero() {
        *remaining_free_space -= used_free_space;
        return true;
    }
    let violations = if total_violation < LayoutUnit::zero() {
        &max_violations
    } else {
        &min_violations
    };
    freeze_violations(items, violations, remaining_free_space, line);
    false
}

/// Resolve the flexed sizes of every item on `line` and return the free
/// space left for justification.
///
/// `items` is the line's slice of the container's item list. The loop ends
/// because every unconverged round freezes at least one item.
pub fn resolve_line(
    items: &mut [FlexLayoutItem],
    line: &mut FlexLine,
    container_main_inner_size: LayoutUnit,
    gap_between_items: LayoutUnit,
) -> LayoutUnit {
    let mut remaining_free_space = container_main_inner_size - line.sum_flex_base_size;
    let sign = FlexSign::for_line(line.sum_hypothetical_main_size, container_main_inner_size);
    freeze_inflexible_items(sign, items, &mut remaining_free_space, line);
    let initial_free_space = remaining_free_space;
    let mut rounds = 0_usize;
    while !resolve_flexible_lengths(sign, items, initial_free_space, &mut remaining_free_space, line) {
        rounds += 1;
    }

    // Fractional flex sums scale the free space, so measure what is left.
    let gaps = i32::try_from(items.len().saturating_sub(1)).unwrap_or(i32::MAX);
    let used: LayoutUnit = items.iter().map(FlexLayoutItem::flexed_margin_box_size).sum();
    let remaining = container_main_inner_size - used - gap_between_items * gaps;
    debug!(
        target: "css::flexbox::flexibility",
        "[FLEX-RESOLVE] sign={sign:?} inner={container_main_inner_size} freeze_rounds={rounds} remaining={remaining}"
    );
    remaining
}

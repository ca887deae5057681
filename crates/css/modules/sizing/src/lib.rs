//! CSS Sizing Module - sizing values and the box-sizing pipeline shared by all
//! layout contexts.
//!
//! See <https://www.w3.org/TR/css-sizing-3/>
//!
//! ## Design
//!
//! ```text
//! SizeValue (specified)
//!   ↓ resolve(Option<containing>)   percentages need a definite basis
//! border-box or content-box length
//!   ↓ apply box-sizing
//!   ↓ constrain by min/max          min wins over max
//! used border-box size (LayoutUnit)
//! ```
//!
//! This module contains only sizing code. It does not know about layout trees
//! or formatting contexts.

use css_box::LayoutUnit;
use serde::{Deserialize, Serialize};

//=============================================================================
// Size values
//=============================================================================

/// Computed value of a sizing property (`width`, `min-height`, `flex-basis`, ...).
///
/// Percentages are stored as fractions (`50%` is `0.5`).
///
/// See <https://www.w3.org/TR/css-sizing-3/#sizing-values>
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeValue {
    #[default]
    Auto,
    /// `none`, only meaningful for max sizes.
    None,
    Fixed(LayoutUnit),
    Percent(f32),
    /// `calc(<length> + <percentage>)`
    Calc { fixed: LayoutUnit, percent: f32 },
    MinContent,
    MaxContent,
    FitContent,
    /// `flex-basis: content`
    Content,
}

impl SizeValue {
    #[inline]
    pub fn px(pixels: f32) -> Self {
        Self::Fixed(LayoutUnit::from_f32(pixels))
    }

    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Needs a containing-block size to resolve.
    #[inline]
    pub const fn is_percent_or_calc(self) -> bool {
        matches!(self, Self::Percent(_) | Self::Calc { .. })
    }

    /// A length, percentage or calc.
    #[inline]
    pub const fn is_specified(self) -> bool {
        matches!(self, Self::Fixed(_) | Self::Percent(_) | Self::Calc { .. })
    }

    /// `min-content`, `max-content` or `fit-content`.
    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::FitContent)
    }

    #[inline]
    pub const fn is_content(self) -> bool {
        matches!(self, Self::Content)
    }

    /// Evaluate against `containing`, treating non-length keywords as zero.
    ///
    /// ```
    /// # use css_box::LayoutUnit;
    /// # use css_sizing::SizeValue;
    /// let half = SizeValue::Percent(0.5);
    /// assert_eq!(half.evaluate(LayoutUnit::from_int(300)), LayoutUnit::from_int(150));
    /// assert_eq!(SizeValue::Auto.evaluate(LayoutUnit::from_int(300)), LayoutUnit::zero());
    /// ```
    #[inline]
    pub fn evaluate(self, containing: LayoutUnit) -> LayoutUnit {
        match self {
            Self::Fixed(length) => length,
            Self::Percent(fraction) => LayoutUnit::from_f32(containing.to_f32() * fraction),
            Self::Calc { fixed, percent } => {
                fixed + LayoutUnit::from_f32(containing.to_f32() * percent)
            }
            Self::Auto
            | Self::None
            | Self::MinContent
            | Self::MaxContent
            | Self::FitContent
            | Self::Content => LayoutUnit::zero(),
        }
    }

    /// Resolve to a definite length, if possible.
    ///
    /// Fixed lengths always resolve. Percentages and calc resolve only when
    /// the containing size is definite. Keywords never resolve.
    #[inline]
    pub fn resolve(self, containing: Option<LayoutUnit>) -> Option<LayoutUnit> {
        match self {
            Self::Fixed(length) => Some(length),
            Self::Percent(_) | Self::Calc { .. } => containing.map(|basis| self.evaluate(basis)),
            Self::Auto
            | Self::None
            | Self::MinContent
            | Self::MaxContent
            | Self::FitContent
            | Self::Content => None,
        }
    }
}

//=============================================================================
// Box sizing
//=============================================================================

/// `box-sizing`
///
/// See <https://www.w3.org/TR/css-sizing-3/#box-sizing>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

/// Transform a specified size to a border-box size.
///
/// ```text
/// box-sizing: content-box  → border_box = specified + padding + border
/// box-sizing: border-box   → border_box = max(specified, padding + border)
/// ```
///
/// ```
/// # use css_box::LayoutUnit;
/// # use css_sizing::{apply_box_sizing, BoxSizing};
/// let specified = LayoutUnit::from_int(100);
/// let padding_border = LayoutUnit::from_int(20);
/// assert_eq!(
///     apply_box_sizing(specified, BoxSizing::ContentBox, padding_border),
///     LayoutUnit::from_int(120)
/// );
/// assert_eq!(
///     apply_box_sizing(LayoutUnit::from_int(5), BoxSizing::BorderBox, padding_border),
///     padding_border
/// );
/// ```
#[inline]
pub fn apply_box_sizing(
    specified: LayoutUnit,
    box_sizing: BoxSizing,
    padding_border: LayoutUnit,
) -> LayoutUnit {
    match box_sizing {
        BoxSizing::ContentBox => specified + padding_border,
        BoxSizing::BorderBox => specified.max(padding_border),
    }
}

/// Transform a specified size to a content-box size, floored at zero.
#[inline]
pub fn content_box_size(
    specified: LayoutUnit,
    box_sizing: BoxSizing,
    padding_border: LayoutUnit,
) -> LayoutUnit {
    let content = match box_sizing {
        BoxSizing::ContentBox => specified,
        BoxSizing::BorderBox => specified - padding_border,
    };
    content.clamp_negative_to_zero()
}

/// Apply min/max constraints to a size.
///
/// ```text
/// 1. clamped = min(size, max_size)
/// 2. clamped = max(clamped, min_size)
/// ```
///
/// The minimum is applied last, so it wins when `min > max`.
#[inline]
pub fn apply_constraints(
    size: LayoutUnit,
    min: Option<LayoutUnit>,
    max: Option<LayoutUnit>,
) -> LayoutUnit {
    let mut result = size;

    if let Some(max_size) = max {
        result = result.min(max_size);
    }

    if let Some(min_size) = min {
        result = result.max(min_size);
    }

    result
}

//=============================================================================
// Border-box size from a sizing context
//=============================================================================

/// Everything needed to compute a used border-box size in one dimension.
///
/// All lengths are in the same box as `box_sizing` says, except
/// `content_size`, which is always a content-box size.
#[derive(Debug, Clone, Copy)]
pub struct SizingContext {
    /// Specified size already resolved, if definite.
    pub specified: Option<LayoutUnit>,
    /// Content-box size from layout, used when nothing is specified.
    pub content_size: LayoutUnit,
    pub box_sizing: BoxSizing,
    /// Sum of padding + border in this dimension.
    pub padding_border: LayoutUnit,
    pub min: Option<LayoutUnit>,
    pub max: Option<LayoutUnit>,
}

/// Compute a used border-box size.
///
/// ```text
/// 1. specified → border-box via box-sizing, else content + padding + border
/// 2. min/max (each transformed via box-sizing)
/// ```
#[inline]
pub fn compute_border_box_size(ctx: SizingContext) -> LayoutUnit {
    let border_box = ctx.specified.map_or_else(
        || ctx.content_size + ctx.padding_border,
        |specified| apply_box_sizing(specified, ctx.box_sizing, ctx.padding_border),
    );
    let to_border_box =
        |value: LayoutUnit| apply_box_sizing(value, ctx.box_sizing, ctx.padding_border);
    apply_constraints(
        border_box,
        ctx.min.map(to_border_box),
        ctx.max.map(to_border_box),
    )
}

//=============================================================================
// Intrinsic sizing
//=============================================================================

/// Intrinsic inline sizes of an element's content box.
///
/// See <https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes>
///
/// - **Min-content**: width when the element wraps as much as possible
/// - **Max-content**: width when the element does not wrap at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrinsicSizes {
    pub min_content: LayoutUnit,
    pub max_content: LayoutUnit,
}

impl IntrinsicSizes {
    #[inline]
    pub const fn zero() -> Self {
        Self {
            min_content: LayoutUnit::zero(),
            max_content: LayoutUnit::zero(),
        }
    }

    /// Replaced content whose size does not depend on available space.
    #[inline]
    pub const fn fixed(inline: LayoutUnit) -> Self {
        Self {
            min_content: inline,
            max_content: inline,
        }
    }

    /// `fit-content`: `min(max-content, max(min-content, available))`.
    ///
    /// See <https://www.w3.org/TR/css-sizing-3/#fit-content-size>
    #[inline]
    pub fn shrink_to_fit(&self, available: LayoutUnit) -> LayoutUnit {
        self.max_content.min(self.min_content.max(available))
    }
}

//=============================================================================
// Aspect ratio
//=============================================================================

/// `aspect-ratio`, stored as width / height.
///
/// See <https://www.w3.org/TR/css-sizing-4/#aspect-ratio>
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectRatio {
    /// Use the natural ratio of replaced content, if any.
    #[default]
    Auto,
    Ratio(f64),
    /// `auto <ratio>`: natural ratio when present, else this one.
    AutoAndRatio(f64),
}

impl AspectRatio {
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The specified ratio, if usable. Degenerate ratios (`0`, `∞`, NaN)
    /// behave as `auto`.
    #[inline]
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Ratio(value) | Self::AutoAndRatio(value) => {
                (value.is_finite() && value > 0.0).then_some(value)
            }
        }
    }
}

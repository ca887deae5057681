//! Which step of flex layout is running, for percentage resolution.

use core::cell::Cell;

/// Step of flex layout a child is being laid out from.
///
/// Percentages inside a flex item may only resolve against the item's
/// overriding block size during some of these steps.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LayoutPhase {
    #[default]
    Idle,
    /// Measuring children to find flex base sizes and min-size floors.
    ComputingFlexBaseSizes,
    /// Laying out items at their flexed main sizes.
    FlexItemLayout,
    /// Stretching and aligning items once line extents are known.
    CrossAxisLayout,
    /// Asking children for their contribution to the container's intrinsic
    /// inline sizes.
    IntrinsicWidthComputation,
}

/// Current phase of one container's layout pass.
///
/// Phases nest: entering one returns a guard that restores the previous
/// phase when dropped.
#[derive(Debug, Default)]
pub struct LayoutContext {
    phase: Cell<LayoutPhase>,
}

impl LayoutContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> LayoutPhase {
        self.phase.get()
    }

    /// Switch to `phase` until the returned scope is dropped.
    #[inline]
    #[must_use = "the phase ends when the scope is dropped"]
    pub fn enter(&self, phase: LayoutPhase) -> PhaseScope<'_> {
        let previous = self.phase.replace(phase);
        PhaseScope {
            context: self,
            previous,
        }
    }

    /// Whether the current phase lets a child resolve percentages against
    /// its overriding block size.
    ///
    /// While items are flexed only orthogonal items qualify, since their
    /// block size is the main size being set. Intrinsic width queries only
    /// see the container's cross size for items that would be stretched.
    pub fn allows_percentage_resolution(
        &self,
        main_axis_is_inline_axis: bool,
        uses_container_cross_size: bool,
    ) -> bool {
        match self.phase() {
            LayoutPhase::Idle | LayoutPhase::CrossAxisLayout => true,
            LayoutPhase::ComputingFlexBaseSizes => false,
            LayoutPhase::FlexItemLayout => !main_axis_is_inline_axis,
            LayoutPhase::IntrinsicWidthComputation => uses_container_cross_size,
        }
    }
}

/// Restores the phase that was active before [`LayoutContext::enter`].
#[derive(Debug)]
pub struct PhaseScope<'context> {
    context: &'context LayoutContext,
    previous: LayoutPhase,
}

impl Drop for PhaseScope<'_> {
    fn drop(&mut self) {
        self.context.phase.set(self.previous);
    }
}

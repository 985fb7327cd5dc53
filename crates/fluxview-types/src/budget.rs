//! Point budget derived from a detail control.

/// Upper bound on the number of points requested for one chart.
pub const MAX_POINTS: usize = 100_000;

/// Number of points to request for a detail control at `position` out of
/// `steps` positions, scaled against `max_points`.
///
/// The scale factor is computed with integer division first, so
/// `point_budget(3, 7, 100_000)` is `14_285 * 3`. Zero `steps` yields zero.
///
/// ```
/// use fluxview_types::{point_budget, MAX_POINTS};
///
/// assert_eq!(point_budget(10, 100, MAX_POINTS), 10_000);
/// assert_eq!(point_budget(100, 100, MAX_POINTS), MAX_POINTS);
/// ```
#[must_use]
pub fn point_budget(position: usize, steps: usize, max_points: usize) -> usize {
    max_points
        .checked_div(steps)
        .map_or(0, |per_step| per_step.saturating_mul(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_scales_linearly() {
        assert_eq!(point_budget(1, 100, MAX_POINTS), 1_000);
        assert_eq!(point_budget(50, 100, MAX_POINTS), 50_000);
    }

    #[test]
    fn test_budget_truncates_scale_first() {
        assert_eq!(point_budget(3, 7, MAX_POINTS), 14_285 * 3);
    }

    #[test]
    fn test_budget_zero_steps() {
        assert_eq!(point_budget(5, 0, MAX_POINTS), 0);
    }

    #[test]
    fn test_budget_zero_position() {
        assert_eq!(point_budget(0, 10, MAX_POINTS), 0);
    }
}

/// Property-based tests for the point budget.
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The top position never asks for more than `max_points`.
        #[test]
        fn budget_never_exceeds_max(steps in 1usize..1_000, max_points in 0usize..1_000_000) {
            prop_assert!(point_budget(steps, steps, max_points) <= max_points);
        }

        /// Moving the control up never lowers the budget.
        #[test]
        fn budget_is_monotonic(position in 0usize..999, steps in 1usize..1_000) {
            prop_assert!(
                point_budget(position, steps, MAX_POINTS)
                    <= point_budget(position + 1, steps, MAX_POINTS)
            );
        }
    }
}

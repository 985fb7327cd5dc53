//! Fixed-stride decimation of ordered readings.
//!
//! Decimation keeps every `stride`-th item of an ordered sequence, starting
//! with the first and running to the end of the input. It never averages or
//! picks at random, so identical input always yields identical output.

/// Distance between kept items when reducing `total` items to `batch_size`.
///
/// Returns 1 when everything fits. `batch_size` must be non-zero.
///
/// ```
/// use fluxview_store::sampling::stride;
///
/// assert_eq!(stride(10_000, 100), 100);
/// assert_eq!(stride(10_000, 5_000), 2);
/// assert_eq!(stride(10_000, 30_000), 1);
/// ```
pub fn stride(total: usize, batch_size: usize) -> usize {
    debug_assert!(batch_size > 0, "batch size must be non-zero");
    if batch_size >= total {
        1
    } else {
        total / batch_size
    }
}

/// Reduce `items` to roughly `batch_size` evenly strided items.
///
/// Keeps positions `0, stride, 2 * stride, ...` up to the last item, so the
/// result spans the whole input and holds `ceil(len / stride)` elements.
pub fn decimate<T>(items: Vec<T>, batch_size: usize) -> Vec<T> {
    let step = stride(items.len(), batch_size);
    if step == 1 {
        return items;
    }
    items.into_iter().step_by(step).collect()
}


/// Property-based tests for decimation.
///
/// ```bash
/// cargo test -p fluxview-store sampling::proptests
/// ```
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The result holds one item per stride, never more than the input.
        #[test]
        fn decimate_length_follows_stride(total in 0usize..5_000, batch_size in 1usize..6_000) {
            let step = stride(total, batch_size);
            let kept = decimate((0..total).collect::<Vec<_>>(), batch_size);
            prop_assert_eq!(kept.len(), total.div_ceil(step));
            prop_assert!(kept.len() <= total);
        }

        /// The last kept item lies within one stride of the end.
        #[test]
        fn decimate_reaches_the_end(total in 1usize..5_000, batch_size in 1usize..6_000) {
            let step = stride(total, batch_size);
            let kept = decimate((0..total).collect::<Vec<_>>(), batch_size);
            let last = kept.last().copied();
            prop_assert!(last.is_some_and(|i| i + step >= total));
        }

        /// Kept items sit exactly at multiples of the stride.
        #[test]
        fn decimate_keeps_stride_positions(total in 1usize..5_000, batch_size in 1usize..6_000) {
            let step = stride(total, batch_size);
            let kept = decimate((0..total).collect::<Vec<_>>(), batch_size);
            for (k, position) in kept.iter().enumerate() {
                prop_assert_eq!(*position, k * step);
            }
        }

        /// Every kept position lies inside the input.
        #[test]
        fn stride_stays_in_bounds(total in 0usize..100_000, batch_size in 1usize..100_000) {
            let step = stride(total, batch_size);
            prop_assert!(step >= 1);
            if batch_size < total {
                prop_assert!(step * (batch_size - 1) < total);
            } else {
                prop_assert_eq!(step, 1);
            }
        }
    }
}

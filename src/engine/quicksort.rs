use std::ops::Range;

use log::trace;

use super::{heapsort, pivot, smallsort, Slots, Strategy};
use crate::codec::ElementCodec;

/// Sorts `range` recursively.
///
/// If the range had a predecessor in the original slots, its index is passed as
/// `ancestor_pivot`. Every element in `range` is greater or equal to it.
///
/// `limit` is the number of allowed imbalanced partitions before switching to `heapsort`. If zero,
/// this function will immediately switch to heapsort.
pub(crate) fn quicksort<C: ElementCodec>(
    slots: &mut Slots<'_, C>,
    mut range: Range<usize>,
    mut ancestor_pivot: Option<usize>,
    mut limit: u32,
) {
    loop {
        match Strategy::select(range.len(), limit) {
            Strategy::SmallSort => {
                smallsort::insertion_sort_shift_left(slots, range, 1);
                return;
            }
            Strategy::Heapsort => {
                // Too many bad pivot choices were made, fall back to heapsort in order to
                // guarantee `O(n * log(n))` worst-case.
                trace!("partition limit reached, heapsort for {} elements", range.len());
                heapsort::heapsort(slots, range);
                return;
            }
            Strategy::Partition => {}
        }

        limit -= 1;

        let pivot_pos = pivot::choose_pivot(slots, range.clone());

        // If the chosen pivot is equal to the predecessor, then it's the smallest element in the
        // range. Partition the range into elements equal to and elements greater than the pivot.
        // This case is usually hit when the input contains many duplicate elements.
        if let Some(p) = ancestor_pivot {
            if !slots.is_less(p, pivot_pos) {
                let mid = partition(slots, range.clone(), pivot_pos, |s, elem, pivot| {
                    !s.is_less(pivot, elem)
                });

                // Continue sorting elements greater than the pivot. We know that mid contains the
                // pivot. So we can continue after mid.
                range.start = mid + 1;
                ancestor_pivot = None;
                continue;
            }
        }

        let mid = partition(slots, range.clone(), pivot_pos, |s, elem, pivot| {
            s.is_less(elem, pivot)
        });

        // Recurse into the left side. We have a fixed recursion limit, testing shows no real
        // benefit for recursing into the shorter side.
        quicksort(slots, range.start..mid, ancestor_pivot, limit);

        // Continue with the right side.
        ancestor_pivot = Some(mid);
        range.start = mid + 1;
    }
}

/// Moves the pivot at `pivot_pos` to the front of `range`, then moves every element `e` with
/// `goes_left(e, pivot)` in front of the others and places the pivot between the two groups.
///
/// Returns the final index of the pivot.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn partition<C, F>(
    slots: &mut Slots<'_, C>,
    range: Range<usize>,
    pivot_pos: usize,
    goes_left: F,
) -> usize
where
    C: ElementCodec,
    F: Fn(&Slots<'_, C>, usize, usize) -> bool,
{
    let start = range.start;
    debug_assert!(range.contains(&pivot_pos));

    // The pivot stays at `start` while the rest of the range is scanned.
    slots.swap(start, pivot_pos);

    let mut num_left = start + 1;
    for i in (start + 1)..range.end {
        if goes_left(&*slots, i, start) {
            slots.swap(num_left, i);
            num_left += 1;
        }
    }

    // Place the pivot between the two partitions.
    let mid = num_left - 1;
    slots.swap(start, mid);

    mid
}

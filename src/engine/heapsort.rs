use std::ops::Range;

use super::Slots;
use crate::codec::ElementCodec;

/// Sorts `range` using heapsort, which guarantees *O*(*n* \* log(*n*)) worst-case.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn heapsort<C: ElementCodec>(slots: &mut Slots<'_, C>, range: Range<usize>) {
    let base = range.start;
    let len = range.len();

    // This binary heap respects the invariant `parent >= child`.
    // Heap positions are relative to `base`.
    let sift_down = |slots: &mut Slots<'_, C>, mut node: usize, end: usize| {
        loop {
            // Children of `node`.
            let mut child = 2 * node + 1;
            if child >= end {
                break;
            }

            // Choose the greater child.
            if child + 1 < end && slots.is_less(base + child, base + child + 1) {
                child += 1;
            }

            // Stop if the invariant holds at `node`.
            if !slots.is_less(base + node, base + child) {
                break;
            }

            // Swap `node` with the greater child, move one step down, and continue sifting.
            slots.swap(base + node, base + child);
            node = child;
        }
    };

    // Build the heap in linear time.
    for i in (0..len / 2).rev() {
        sift_down(slots, i, len);
    }

    // Pop maximal elements from the heap.
    for i in (1..len).rev() {
        slots.swap(base, base + i);
        sift_down(slots, 0, i);
    }
}

use std::ops::Range;

use super::Slots;
use crate::codec::ElementCodec;

/// Sorts `range` using insertion sort, which is *O*(*n*^2) worst-case.
///
/// The first `offset` elements of `range` must already be sorted. Elements are shifted left by
/// swapping adjacent slots, equal elements never pass each other, so an already sorted range is
/// left untouched.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn insertion_sort_shift_left<C: ElementCodec>(
    slots: &mut Slots<'_, C>,
    range: Range<usize>,
    offset: usize,
) {
    let start = range.start;
    debug_assert!(offset != 0 || range.is_empty());

    for i in (start + offset).min(range.end)..range.end {
        insert_tail(slots, start, i);
    }
}

/// Moves the element at `tail` left until `start` or a predecessor that is not greater.
#[inline]
fn insert_tail<C: ElementCodec>(slots: &mut Slots<'_, C>, start: usize, tail: usize) {
    let mut hole = tail;
    while hole > start && slots.is_less(hole, hole - 1) {
        slots.swap(hole, hole - 1);
        hole -= 1;
    }
}

//! In-place introspective sort over element slots.
//!
//! Quicksort with median-of-three (ninther for larger inputs) pivots does the bulk of the work.
//! Each partition step that is taken costs one unit of a budget of `2 * floor(log2(len))`; once
//! it is used up, heapsort finishes the current sub-slice, bounding the worst case to
//! *O*(*n* \* log(*n*)). Sub-slices of at most [`SMALL_SORT_THRESHOLD`] elements are insertion
//! sorted. [`Strategy::select`] is the single place that decides between the three.
//!
//! The engine only ever sees slot indices. Comparisons go through the codec, swaps exchange the
//! `C::WIDTH` bytes of two slots. Nothing outside the view is read or written, and nothing is
//! allocated.

use std::ops::Range;

use log::trace;

use crate::buffer::BufferView;
use crate::codec::{Codec, CodecVisitor, ElementCodec};

mod heapsort;
mod pivot;
mod quicksort;
mod smallsort;

/// Sub-slices up to this length are insertion sorted.
pub(crate) const SMALL_SORT_THRESHOLD: usize = 16;

/// How the engine handles a sub-slice of a given length with a given remaining budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Short enough for insertion sort.
    SmallSort,
    /// The partition budget is exhausted.
    Heapsort,
    /// Choose a pivot, partition, recurse left, loop right.
    Partition,
}

impl Strategy {
    #[inline]
    pub(crate) fn select(len: usize, limit: u32) -> Strategy {
        if len <= SMALL_SORT_THRESHOLD {
            Strategy::SmallSort
        } else if limit == 0 {
            Strategy::Heapsort
        } else {
            Strategy::Partition
        }
    }
}

/// Sorts `view` with `codec`. The view's item size must equal the codec width.
pub(crate) fn sort(view: BufferView<'_>, codec: Codec) {
    debug_assert_eq!(view.item_size(), codec.width());

    codec.visit(SortVisitor { view });
}

struct SortVisitor<'a> {
    view: BufferView<'a>,
}

impl CodecVisitor for SortVisitor<'_> {
    type Output = ();

    fn visit<C: ElementCodec>(self, codec: C) {
        let mut slots = Slots::new(self.view.into_bytes(), codec);
        sort_slots(&mut slots);
    }
}

/// Index based access to the element slots of a byte buffer.
pub(crate) struct Slots<'a, C> {
    bytes: &'a mut [u8],
    codec: C,
}

impl<'a, C: ElementCodec> Slots<'a, C> {
    pub(crate) fn new(bytes: &'a mut [u8], codec: C) -> Self {
        debug_assert!(bytes.len() % C::WIDTH == 0);

        Self { bytes, codec }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len() / C::WIDTH
    }

    #[inline(always)]
    fn slot(&self, i: usize) -> &[u8] {
        let start = i * C::WIDTH;
        &self.bytes[start..start + C::WIDTH]
    }

    /// `v[a] < v[b]` under the codec order.
    #[inline(always)]
    pub(crate) fn is_less(&self, a: usize, b: usize) -> bool {
        self.codec.is_less(self.slot(a), self.slot(b))
    }

    /// Exchanges the bytes of slots `a` and `b`.
    #[inline(always)]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        if C::WIDTH == 1 {
            self.bytes.swap(a, b);
            return;
        }

        if a == b {
            return;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.bytes.split_at_mut(hi * C::WIDTH);
        let lo_start = lo * C::WIDTH;
        left[lo_start..lo_start + C::WIDTH].swap_with_slice(&mut right[..C::WIDTH]);
    }

    pub(crate) fn reverse(&mut self, range: Range<usize>) {
        let (mut i, mut j) = (range.start, range.end);
        while i + 1 < j {
            j -= 1;
            self.swap(i, j);
            i += 1;
        }
    }
}

/// Sorts all slots.
pub(crate) fn sort_slots<C: ElementCodec>(slots: &mut Slots<'_, C>) {
    let len = slots.len();

    if len < 2 {
        return;
    }

    if len <= SMALL_SORT_THRESHOLD {
        smallsort::insertion_sort_shift_left(slots, 0..len, 1);
        return;
    }

    let (streak_end, was_reversed) = find_streak(slots);
    if streak_end == len {
        trace!("input of {len} elements is one presorted run, reversed: {was_reversed}");
        if was_reversed {
            slots.reverse(0..len);
        }

        return;
    }

    // Limit the number of imbalanced partitions to `2 * floor(log2(len))`.
    // The binary OR by one is used to eliminate the zero-check in the logarithm.
    let limit = 2 * (len | 1).ilog2();

    quicksort::quicksort(slots, 0..len, None, limit);
}

/// Finds a streak of presorted elements starting at the beginning of the slots. Returns the first
/// index that is not part of said streak, and a bool denoting whether the streak was reversed.
/// Streaks can be non-decreasing or strictly decreasing, so reversing never reorders equal
/// elements.
fn find_streak<C: ElementCodec>(slots: &Slots<'_, C>) -> (usize, bool) {
    let len = slots.len();

    if len < 2 {
        return (len, false);
    }

    let mut end = 2;

    let assume_reverse = slots.is_less(1, 0);

    if assume_reverse {
        while end < len && slots.is_less(end, end - 1) {
            end += 1;
        }

        (end, true)
    } else {
        while end < len && !slots.is_less(end, end - 1) {
            end += 1;
        }

        (end, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{LittleEndian, Opaque, Typed};

    fn sort_u16(values: &[u16]) -> Vec<u16> {
        let mut bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let mut slots = Slots::new(&mut bytes, Typed::<u16, LittleEndian>::new());
        sort_slots(&mut slots);

        bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect()
    }

    #[test]
    fn strategy_transitions() {
        assert_eq!(Strategy::select(0, 0), Strategy::SmallSort);
        assert_eq!(Strategy::select(SMALL_SORT_THRESHOLD, 10), Strategy::SmallSort);
        assert_eq!(Strategy::select(SMALL_SORT_THRESHOLD + 1, 0), Strategy::Heapsort);
        assert_eq!(Strategy::select(SMALL_SORT_THRESHOLD + 1, 1), Strategy::Partition);
    }

    #[test]
    fn swap_exchanges_whole_slots() {
        let mut bytes = [1u8, 2, 3, 4, 5, 6];
        let mut slots = Slots::new(&mut bytes, Typed::<u16, LittleEndian>::new());
        slots.swap(2, 0);
        slots.swap(1, 1);
        assert_eq!(bytes, [5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn reverse_range() {
        let mut bytes = [0u8, 1, 2, 3, 4, 5];
        let mut slots = Slots::new(&mut bytes, Opaque);
        slots.reverse(1..5);
        assert_eq!(bytes, [0, 4, 3, 2, 1, 5]);
    }

    #[test]
    fn streaks() {
        let mut ascending = [1u8, 2, 2, 3];
        assert_eq!(find_streak(&Slots::new(&mut ascending, Opaque)), (4, false));

        let mut descending = [5u8, 4, 4, 1];
        assert_eq!(find_streak(&Slots::new(&mut descending, Opaque)), (2, true));
    }

    #[test]
    fn sorts_various_sizes() {
        for len in [0usize, 1, 2, 3, 15, 16, 17, 33, 100, 1_000, 5_000] {
            // Deterministic scramble, multiplicative hashing mod 2^16.
            let values: Vec<u16> = (0..len as u32)
                .map(|i| (i.wrapping_mul(40503) >> 3) as u16)
                .collect();

            let mut expected = values.clone();
            expected.sort_unstable();

            assert_eq!(sort_u16(&values), expected, "len {len}");
        }
    }

    #[test]
    fn many_duplicates() {
        let values: Vec<u16> = (0..10_000u32).map(|i| (i % 3) as u16).collect();
        let mut expected = values.clone();
        expected.sort_unstable();

        assert_eq!(sort_u16(&values), expected);
    }

    #[test]
    fn presorted_runs() {
        let ascending: Vec<u16> = (0..500).collect();
        assert_eq!(sort_u16(&ascending), ascending);

        let descending: Vec<u16> = (0..500).rev().collect();
        assert_eq!(sort_u16(&descending), ascending);
    }
}

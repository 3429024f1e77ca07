use std::ops::Range;

use super::Slots;
use crate::codec::ElementCodec;

/// Minimum length to choose the median-of-medians (ninther) method.
/// Shorter ranges use the simple median-of-three method.
const SHORTEST_MEDIAN_OF_MEDIANS: usize = 50;

/// Chooses a pivot in `range` and returns its index.
///
/// Elements are not moved, only indices are sorted.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn choose_pivot<C: ElementCodec>(slots: &Slots<'_, C>, range: Range<usize>) -> usize {
    let len = range.len();
    debug_assert!(len >= 8);

    // Three indices near which we are going to choose a pivot.
    let len_div_4 = len / 4;
    let mut a = range.start + len_div_4;
    let mut b = range.start + len_div_4 * 2;
    let mut c = range.start + len_div_4 * 3;

    // Swaps indices so that `v[a] <= v[b]`.
    let sort2_idx = |a: &mut usize, b: &mut usize| {
        if slots.is_less(*b, *a) {
            std::mem::swap(a, b);
        }
    };

    // Swaps indices so that `v[a] <= v[b] <= v[c]`.
    let sort3_idx = |a: &mut usize, b: &mut usize, c: &mut usize| {
        sort2_idx(a, b);
        sort2_idx(b, c);
        sort2_idx(a, b);
    };

    if len >= SHORTEST_MEDIAN_OF_MEDIANS {
        // Finds the median of `v[a - 1], v[a], v[a + 1]` and stores the index into `a`.
        let sort_adjacent = |a: &mut usize| {
            let tmp = *a;
            sort3_idx(&mut (tmp - 1), a, &mut (tmp + 1));
        };

        // Find medians in the neighborhoods of `a`, `b`, and `c`.
        sort_adjacent(&mut a);
        sort_adjacent(&mut b);
        sort_adjacent(&mut c);
    }

    // Find the median among `a`, `b`, and `c`.
    sort3_idx(&mut a, &mut b, &mut c);

    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Opaque;

    #[test]
    fn median_of_three() {
        // Candidates at 5, 10 and 15 hold 30, 10 and 20.
        let mut bytes = [0u8; 20];
        bytes[5] = 30;
        bytes[10] = 10;
        bytes[15] = 20;

        let slots = Slots::new(&mut bytes, Opaque);
        assert_eq!(choose_pivot(&slots, 0..20), 15);
    }

    #[test]
    fn pivot_in_range() {
        let mut bytes: Vec<u8> = (0..255u8).rev().collect();
        let slots = Slots::new(&mut bytes, Opaque);

        for start in [0usize, 17, 100] {
            let range = start..(start + 120);
            let pivot = choose_pivot(&slots, range.clone());
            assert!(range.contains(&pivot));
        }
    }
}

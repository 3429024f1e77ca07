use std::cmp::Ordering;
use std::fmt::Debug;
use std::mem;

use crate::descriptor::ItemDescriptor;

mod private {
    pub trait Sealed {}
}

/// Primitive element types a typed buffer can declare.
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `u64`, `f32` and `f64`. Every
/// bit pattern of these types is a valid value and none of them has padding, which is what makes
/// viewing a `[T]` as raw bytes sound.
pub trait Element: Copy + Debug + Send + Sync + private::Sealed + 'static {
    /// Declared encoding, native byte order.
    const DESCRIPTOR: ItemDescriptor;

    /// Decodes a little-endian value, `bytes.len()` must equal `size_of::<Self>()`.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Decodes a big-endian value, `bytes.len()` must equal `size_of::<Self>()`.
    fn from_be_slice(bytes: &[u8]) -> Self;

    /// Total order used for sorting.
    fn compare(&self, other: &Self) -> Ordering;

    #[inline]
    fn is_less(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }
}

macro_rules! impl_element_int {
    ($($t:ty => $desc:path),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Element for $t {
                const DESCRIPTOR: ItemDescriptor = $desc(mem::size_of::<$t>());

                #[inline(always)]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_le_bytes(raw)
                }

                #[inline(always)]
                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_be_bytes(raw)
                }

                #[inline(always)]
                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                #[inline(always)]
                fn is_less(&self, other: &Self) -> bool {
                    *self < *other
                }
            }
        )*
    };
}

// NaNs, regardless of sign and payload, compare equal to each other and greater than every other
// value including +inf. -0.0 and 0.0 compare equal.
macro_rules! impl_element_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Element for $t {
                const DESCRIPTOR: ItemDescriptor = ItemDescriptor::float(mem::size_of::<$t>());

                #[inline(always)]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_le_bytes(raw)
                }

                #[inline(always)]
                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_be_bytes(raw)
                }

                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (false, false) => {
                            if *self < *other {
                                Ordering::Less
                            } else if *self > *other {
                                Ordering::Greater
                            } else {
                                Ordering::Equal
                            }
                        }
                        (false, true) => Ordering::Less,
                        (true, false) => Ordering::Greater,
                        (true, true) => Ordering::Equal,
                    }
                }

                #[inline(always)]
                fn is_less(&self, other: &Self) -> bool {
                    !self.is_nan() && (other.is_nan() || *self < *other)
                }
            }
        )*
    };
}

impl_element_int!(
    i8 => ItemDescriptor::signed,
    i16 => ItemDescriptor::signed,
    i32 => ItemDescriptor::signed,
    i64 => ItemDescriptor::signed,
    u8 => ItemDescriptor::unsigned,
    u16 => ItemDescriptor::unsigned,
    u32 => ItemDescriptor::unsigned,
    u64 => ItemDescriptor::unsigned,
);

impl_element_float!(f32, f64);

/// Views a typed slice as its underlying bytes.
pub(crate) fn as_bytes_mut<T: Element>(v: &mut [T]) -> &mut [u8] {
    let byte_len = mem::size_of_val(v);

    // SAFETY: `Element` is sealed and only implemented for primitive integers and floats. They
    // have no padding and no invalid bit patterns, so any write through the byte view leaves
    // valid `T` values behind. The returned slice borrows `v` mutably, so nothing else can
    // observe the memory while it is in use.
    unsafe { std::slice::from_raw_parts_mut(v.as_mut_ptr().cast::<u8>(), byte_len) }
}

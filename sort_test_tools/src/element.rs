use std::cmp::Ordering;
use std::fmt::Debug;

/// Mutable slice of one of the primitive element types, for implementations that need to call
/// into an API bound on the concrete type.
pub enum TypedSliceMut<'a> {
    I8(&'a mut [i8]),
    I16(&'a mut [i16]),
    I32(&'a mut [i32]),
    I64(&'a mut [i64]),
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
    U32(&'a mut [u32]),
    U64(&'a mut [u64]),
    F32(&'a mut [f32]),
    F64(&'a mut [f64]),
}

/// Evaluates `$body` with `$s` bound to the concrete slice inside a [`TypedSliceMut`].
#[macro_export]
macro_rules! with_typed_slice {
    ($typed:expr, $s:ident => $body:expr) => {
        match $typed {
            $crate::TypedSliceMut::I8($s) => $body,
            $crate::TypedSliceMut::I16($s) => $body,
            $crate::TypedSliceMut::I32($s) => $body,
            $crate::TypedSliceMut::I64($s) => $body,
            $crate::TypedSliceMut::U8($s) => $body,
            $crate::TypedSliceMut::U16($s) => $body,
            $crate::TypedSliceMut::U32($s) => $body,
            $crate::TypedSliceMut::U64($s) => $body,
            $crate::TypedSliceMut::F32($s) => $body,
            $crate::TypedSliceMut::F64($s) => $body,
        }
    };
}

/// Element types the test-suite is generic over.
pub trait Element: Copy + Debug + PartialOrd + Send + 'static {
    /// dtype notation of the type in native byte order.
    const DTYPE: &'static str;

    /// Maps the i32 patterns into the value range of `Self`, preserving order where the range
    /// allows it.
    fn from_i32(val: i32) -> Self;

    /// Expected total order: numeric order, NaNs last and equal to each other.
    fn cmp_total(&self, other: &Self) -> Ordering;

    fn typed_slice_mut(v: &mut [Self]) -> TypedSliceMut<'_>;

    fn encode(v: &[Self], big_endian: bool) -> Vec<u8>;

    fn decode(bytes: &[u8], big_endian: bool) -> Vec<Self>;

    fn to_ne_bytes_vec(v: &[Self]) -> Vec<u8> {
        Self::encode(v, cfg!(target_endian = "big"))
    }

    fn from_ne_bytes_vec(bytes: &[u8]) -> Vec<Self> {
        Self::decode(bytes, cfg!(target_endian = "big"))
    }
}

macro_rules! impl_codec_helpers {
    ($t:ty, $variant:ident) => {
        fn typed_slice_mut(v: &mut [Self]) -> TypedSliceMut<'_> {
            TypedSliceMut::$variant(v)
        }

        fn encode(v: &[Self], big_endian: bool) -> Vec<u8> {
            if big_endian {
                v.iter().flat_map(|x| x.to_be_bytes()).collect()
            } else {
                v.iter().flat_map(|x| x.to_le_bytes()).collect()
            }
        }

        fn decode(bytes: &[u8], big_endian: bool) -> Vec<Self> {
            bytes
                .chunks_exact(std::mem::size_of::<$t>())
                .map(|chunk| {
                    let raw = chunk.try_into().unwrap();
                    if big_endian {
                        <$t>::from_be_bytes(raw)
                    } else {
                        <$t>::from_le_bytes(raw)
                    }
                })
                .collect()
        }
    };
}

macro_rules! impl_element_int {
    ($($t:ty => $variant:ident, $dtype:literal, $from_i32:expr);* $(;)?) => {
        $(
            impl Element for $t {
                const DTYPE: &'static str = $dtype;

                fn from_i32(val: i32) -> Self {
                    let f: fn(i32) -> $t = $from_i32;
                    f(val)
                }

                fn cmp_total(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                impl_codec_helpers!($t, $variant);
            }
        )*
    };
}

// Shifts the i32 range onto [0, u32::MAX] without changing the order.
fn offset_u32(val: i32) -> u32 {
    (val as i64 - i32::MIN as i64) as u32
}

impl_element_int!(
    i8 => I8, "i8", |val| (val >> 24) as i8;
    i16 => I16, "i16", |val| (val >> 16) as i16;
    i32 => I32, "i32", |val| val;
    // Extends the value into the 64 bit range, while preserving input order.
    i64 => I64, "i64", |val| (val as i64) * (i32::MAX as i64);
    u8 => U8, "u8", |val| (offset_u32(val) >> 24) as u8;
    u16 => U16, "u16", |val| (offset_u32(val) >> 16) as u16;
    u32 => U32, "u32", offset_u32;
    u64 => U64, "u64", |val| (offset_u32(val) as u64) * (i32::MAX as u64);
);

macro_rules! impl_element_float {
    ($($t:ty => $variant:ident, $dtype:literal);* $(;)?) => {
        $(
            impl Element for $t {
                const DTYPE: &'static str = $dtype;

                fn from_i32(val: i32) -> Self {
                    // Spread the values over the fractional range, including tiny and negative
                    // values.
                    (val as $t) / 1024.0
                }

                fn cmp_total(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (false, false) => self.partial_cmp(other).unwrap(),
                        (false, true) => Ordering::Less,
                        (true, false) => Ordering::Greater,
                        (true, true) => Ordering::Equal,
                    }
                }

                impl_codec_helpers!($t, $variant);
            }
        )*
    };
}

impl_element_float!(
    f32 => F32, "f32";
    f64 => F64, "f64";
);

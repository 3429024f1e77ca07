//! Element codecs: total order comparison over raw element bytes.
//!
//! A codec is resolved once per sort call. [`Codec`] is the closed set of supported encodings,
//! [`Codec::visit`] turns it into a zero-sized [`ElementCodec`] so the sort engine is
//! monomorphized per encoding and pays no dispatch cost per comparison.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::buffer::BufferView;
use crate::descriptor::{ByteOrder, ItemDescriptor};
use crate::element::Element;

/// Comparison over element slots of exactly `WIDTH` bytes.
///
/// Swapping is the same byte-wise exchange for every codec and lives with the engine.
pub trait ElementCodec: Copy + Send + Sync + 'static {
    const WIDTH: usize;

    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;

    #[inline]
    fn is_less(&self, a: &[u8], b: &[u8]) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Storage byte order of a resolved codec.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl From<ByteOrder> for Endianness {
    fn from(byte_order: ByteOrder) -> Self {
        match byte_order.resolve() {
            ByteOrder::Big => Endianness::Big,
            _ => Endianness::Little,
        }
    }
}

impl From<Endianness> for ByteOrder {
    fn from(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => ByteOrder::Little,
            Endianness::Big => ByteOrder::Big,
        }
    }
}

pub trait Endian: Copy + Send + Sync + 'static {
    const ENDIANNESS: Endianness;

    fn read<T: Element>(bytes: &[u8]) -> T;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LittleEndian;

#[derive(Copy, Clone, Debug, Default)]
pub struct BigEndian;

impl Endian for LittleEndian {
    const ENDIANNESS: Endianness = Endianness::Little;

    #[inline(always)]
    fn read<T: Element>(bytes: &[u8]) -> T {
        T::from_le_slice(bytes)
    }
}

impl Endian for BigEndian {
    const ENDIANNESS: Endianness = Endianness::Big;

    #[inline(always)]
    fn read<T: Element>(bytes: &[u8]) -> T {
        T::from_be_slice(bytes)
    }
}

/// Codec for a primitive `T` stored with byte order `E`.
pub struct Typed<T, E> {
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Typed<T, E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T, E> Clone for Typed<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for Typed<T, E> {}

impl<T, E> Default for Typed<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E: Endian> fmt::Debug for Typed<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Typed<{}, {:?}>",
            std::any::type_name::<T>(),
            E::ENDIANNESS
        )
    }
}

impl<T: Element, E: Endian> ElementCodec for Typed<T, E> {
    const WIDTH: usize = mem::size_of::<T>();

    #[inline(always)]
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        E::read::<T>(a).compare(&E::read::<T>(b))
    }

    #[inline(always)]
    fn is_less(&self, a: &[u8], b: &[u8]) -> bool {
        E::read::<T>(a).is_less(&E::read::<T>(b))
    }
}

/// Codec for bytes without declared structure: one unsigned byte per element.
#[derive(Copy, Clone, Debug, Default)]
pub struct Opaque;

impl ElementCodec for Opaque {
    const WIDTH: usize = 1;

    #[inline(always)]
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a[0].cmp(&b[0])
    }

    #[inline(always)]
    fn is_less(&self, a: &[u8], b: &[u8]) -> bool {
        a[0] < b[0]
    }
}

/// Receives the concrete codec picked by [`Codec::visit`].
pub trait CodecVisitor {
    type Output;

    fn visit<C: ElementCodec>(self, codec: C) -> Self::Output;
}

/// The closed set of supported encodings. Single byte encodings carry no byte order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    I8,
    I16(Endianness),
    I32(Endianness),
    I64(Endianness),
    U8,
    U16(Endianness),
    U32(Endianness),
    U64(Endianness),
    F32(Endianness),
    F64(Endianness),
    Opaque,
}

macro_rules! visit_endian {
    ($visitor:expr, $t:ty, $endianness:expr) => {
        match $endianness {
            Endianness::Little => $visitor.visit(Typed::<$t, LittleEndian>::new()),
            Endianness::Big => $visitor.visit(Typed::<$t, BigEndian>::new()),
        }
    };
}

impl Codec {
    /// Calls `visitor` with the zero-sized codec for `self`. This is the only place that branches
    /// on the encoding.
    pub fn visit<V: CodecVisitor>(self, visitor: V) -> V::Output {
        match self {
            Codec::I8 => visitor.visit(Typed::<i8, LittleEndian>::new()),
            Codec::I16(e) => visit_endian!(visitor, i16, e),
            Codec::I32(e) => visit_endian!(visitor, i32, e),
            Codec::I64(e) => visit_endian!(visitor, i64, e),
            Codec::U8 => visitor.visit(Typed::<u8, LittleEndian>::new()),
            Codec::U16(e) => visit_endian!(visitor, u16, e),
            Codec::U32(e) => visit_endian!(visitor, u32, e),
            Codec::U64(e) => visit_endian!(visitor, u64, e),
            Codec::F32(e) => visit_endian!(visitor, f32, e),
            Codec::F64(e) => visit_endian!(visitor, f64, e),
            Codec::Opaque => visitor.visit(Opaque),
        }
    }

    /// Element width in bytes.
    #[must_use]
    pub fn width(self) -> usize {
        struct Width;

        impl CodecVisitor for Width {
            type Output = usize;

            fn visit<C: ElementCodec>(self, _codec: C) -> usize {
                C::WIDTH
            }
        }

        self.visit(Width)
    }

    /// The descriptor this codec implements, with an explicit byte order.
    #[must_use]
    pub fn descriptor(self) -> ItemDescriptor {
        let (desc, endianness) = match self {
            Codec::I8 => (ItemDescriptor::signed(1), None),
            Codec::I16(e) => (ItemDescriptor::signed(2), Some(e)),
            Codec::I32(e) => (ItemDescriptor::signed(4), Some(e)),
            Codec::I64(e) => (ItemDescriptor::signed(8), Some(e)),
            Codec::U8 => (ItemDescriptor::unsigned(1), None),
            Codec::U16(e) => (ItemDescriptor::unsigned(2), Some(e)),
            Codec::U32(e) => (ItemDescriptor::unsigned(4), Some(e)),
            Codec::U64(e) => (ItemDescriptor::unsigned(8), Some(e)),
            Codec::F32(e) => (ItemDescriptor::float(4), Some(e)),
            Codec::F64(e) => (ItemDescriptor::float(8), Some(e)),
            Codec::Opaque => (ItemDescriptor::OPAQUE, None),
        };

        match endianness {
            Some(e) => desc.with_byte_order(e.into()),
            None => desc,
        }
    }

    /// Compares two element slots of [`Codec::width`] bytes each.
    ///
    /// Branches on the encoding every call, use it for verification, not in loops.
    #[must_use]
    pub fn compare(self, a: &[u8], b: &[u8]) -> Ordering {
        struct Compare<'a> {
            a: &'a [u8],
            b: &'a [u8],
        }

        impl CodecVisitor for Compare<'_> {
            type Output = Ordering;

            fn visit<C: ElementCodec>(self, codec: C) -> Ordering {
                codec.compare(self.a, self.b)
            }
        }

        self.visit(Compare { a, b })
    }

    /// Checks that the bytes of `view`, grouped by [`Codec::width`], are in non-decreasing order.
    #[must_use]
    pub fn is_sorted(self, view: &BufferView<'_>) -> bool {
        self.is_sorted_bytes(view.as_bytes())
    }

    /// Same as [`Codec::is_sorted`] for plain bytes. A trailing partial element is ignored.
    #[must_use]
    pub fn is_sorted_bytes(self, bytes: &[u8]) -> bool {
        struct IsSorted<'a> {
            bytes: &'a [u8],
        }

        impl CodecVisitor for IsSorted<'_> {
            type Output = bool;

            fn visit<C: ElementCodec>(self, codec: C) -> bool {
                let mut slots = self.bytes.chunks_exact(C::WIDTH);
                let Some(mut prev) = slots.next() else {
                    return true;
                };

                for slot in slots {
                    if codec.is_less(slot, prev) {
                        return false;
                    }
                    prev = slot;
                }

                true
            }
        }

        self.visit(IsSorted { bytes })
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.descriptor(), f)
    }
}

use log::trace;

use crate::codec::{Codec, Endianness};
use crate::descriptor::{ElementKind, ItemDescriptor};
use crate::error::SortError;

/// Maps a descriptor to its codec.
///
/// This is the authoritative check for supported encodings. Widths without a codec, such as
/// 128-bit integers or extended precision floats, fail with [`SortError::UnsupportedEncoding`]
/// and are never compared at a nearby width. A declared width of zero bytes describes no element
/// slot at all and fails with [`SortError::InvalidBuffer`].
pub fn resolve(descriptor: &ItemDescriptor) -> Result<Codec, SortError> {
    let e = Endianness::from(descriptor.byte_order());

    let codec = match (descriptor.kind(), descriptor.width()) {
        (ElementKind::OpaqueByte, _) => Codec::Opaque,
        (_, 0) => return Err(SortError::invalid_buffer("element width of zero bytes")),
        (ElementKind::SignedInt, 1) => Codec::I8,
        (ElementKind::SignedInt, 2) => Codec::I16(e),
        (ElementKind::SignedInt, 4) => Codec::I32(e),
        (ElementKind::SignedInt, 8) => Codec::I64(e),
        (ElementKind::UnsignedInt, 1) => Codec::U8,
        (ElementKind::UnsignedInt, 2) => Codec::U16(e),
        (ElementKind::UnsignedInt, 4) => Codec::U32(e),
        (ElementKind::UnsignedInt, 8) => Codec::U64(e),
        (ElementKind::Float, 4) => Codec::F32(e),
        (ElementKind::Float, 8) => Codec::F64(e),
        (kind, width) => {
            trace!("no codec for {descriptor}");
            return Err(SortError::UnsupportedEncoding { kind, width });
        }
    };

    trace!("resolved {descriptor} to {codec:?}");

    Ok(codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ByteOrder;

    #[test]
    fn resolves_every_supported_encoding() {
        let native = Endianness::from(ByteOrder::Native);

        let cases = [
            ("i8", Codec::I8),
            ("i16", Codec::I16(native)),
            ("i32", Codec::I32(native)),
            ("i64", Codec::I64(native)),
            ("u8", Codec::U8),
            ("u16", Codec::U16(native)),
            ("u32", Codec::U32(native)),
            ("u64", Codec::U64(native)),
            ("f32", Codec::F32(native)),
            ("f64", Codec::F64(native)),
            ("bytes", Codec::Opaque),
            ("<i64", Codec::I64(Endianness::Little)),
            (">f32", Codec::F32(Endianness::Big)),
            (">u8", Codec::U8),
        ];

        for (dtype, expected) in cases {
            let desc: ItemDescriptor = dtype.parse().unwrap();
            assert_eq!(resolve(&desc), Ok(expected), "{dtype}");
            assert_eq!(expected.width(), desc.item_size(), "{dtype}");
        }
    }

    #[test]
    fn unsupported_widths_are_not_coerced() {
        let cases = [
            (ItemDescriptor::signed(16), ElementKind::SignedInt, 16),
            (ItemDescriptor::unsigned(16), ElementKind::UnsignedInt, 16),
            (ItemDescriptor::unsigned(3), ElementKind::UnsignedInt, 3),
            (ItemDescriptor::float(2), ElementKind::Float, 2),
            (ItemDescriptor::float(10), ElementKind::Float, 10),
            (ItemDescriptor::float(16), ElementKind::Float, 16),
        ];

        for (desc, kind, width) in cases {
            assert_eq!(
                resolve(&desc),
                Err(SortError::UnsupportedEncoding { kind, width }),
                "{desc}"
            );
        }
    }

    #[test]
    fn zero_width_is_invalid() {
        for desc in [
            ItemDescriptor::signed(0),
            ItemDescriptor::unsigned(0),
            ItemDescriptor::float(0).with_byte_order(ByteOrder::Big),
        ] {
            assert!(
                matches!(resolve(&desc), Err(SortError::InvalidBuffer(_))),
                "{desc}"
            );
        }
    }
}

use std::thread;

use paste::paste;
use rand::prelude::*;

use buffersort::codec::Endianness;
use buffersort::{
    describe, resolve_codec, sort, sort_with, ByteOrder, Codec, ElementKind, ItemDescriptor,
    OpaqueBytes, RawBuffer, SortError,
};

fn ne_bytes_f32(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|x| x.to_ne_bytes()).collect()
}

#[test]
fn signed_bytes() {
    let mut v = [3i8, -1, 2, -128, 127];
    sort(&mut v).unwrap();
    assert_eq!(v, [-128, -1, 2, 3, 127]);
}

#[test]
fn opaque_bytes_are_unsigned() {
    let mut bytes = [0xFFu8, 0x00, 0x80, 0x7F];
    sort(&mut OpaqueBytes::new(&mut bytes)).unwrap();
    assert_eq!(bytes, [0x00, 0x7F, 0x80, 0xFF]);
}

#[test]
fn f32_values() {
    let mut v = vec![1.5f32, -2.25, 0.0, 3.125];
    sort(&mut v).unwrap();
    assert_eq!(v, [-2.25, 0.0, 1.5, 3.125]);
}

#[test]
fn nan_sorts_last() {
    let mut v = [f64::NAN, 2.0, -f64::NAN, f64::INFINITY, -0.0, f64::NEG_INFINITY, 0.0];
    sort(&mut v).unwrap();

    assert_eq!(v[0], f64::NEG_INFINITY);
    assert_eq!(v[1], 0.0);
    assert_eq!(v[2], 0.0);
    assert_eq!(v[3], 2.0);
    assert_eq!(v[4], f64::INFINITY);
    assert!(v[5].is_nan() && v[6].is_nan());
}

#[test]
fn divergence_on_demand() {
    let values = [1.5f32, -2.25, 0.0, 3.125];

    let mut as_floats = values;
    sort(&mut as_floats).unwrap();

    let mut as_opaque = values;
    sort_with(&mut as_opaque, ItemDescriptor::OPAQUE).unwrap();

    let mut expected_opaque = ne_bytes_f32(&values);
    expected_opaque.sort_unstable();

    assert_eq!(ne_bytes_f32(&as_opaque), expected_opaque);
    assert_ne!(ne_bytes_f32(&as_floats), ne_bytes_f32(&as_opaque));

    // A byte-serialized view of the floats is opaque too.
    let mut serialized = values;
    sort(&mut OpaqueBytes::of(&mut serialized)).unwrap();
    assert_eq!(ne_bytes_f32(&serialized), expected_opaque);
}

#[test]
fn opaque_bytes_regrouped_by_descriptor() {
    let mut bytes = [7i32, -3, 1 << 20, 0]
        .iter()
        .flat_map(|x| x.to_be_bytes())
        .collect::<Vec<_>>();

    let descriptor = ItemDescriptor::signed(4).with_byte_order(ByteOrder::Big);
    sort_with(&mut OpaqueBytes::new(&mut bytes), descriptor).unwrap();

    let got = bytes
        .chunks_exact(4)
        .map(|c| i32::from_be_bytes(c.try_into().unwrap()))
        .collect::<Vec<_>>();
    assert_eq!(got, [-3, 0, 7, 1 << 20]);
}

#[test]
fn invalid_buffers() {
    let mut odd = [0u8; 7];
    assert!(matches!(
        sort_with(&mut OpaqueBytes::new(&mut odd), ItemDescriptor::unsigned(4)),
        Err(SortError::InvalidBuffer(_))
    ));

    assert!(matches!(
        sort_with(&mut [1i32, 2, 3], ItemDescriptor::signed(2)),
        Err(SortError::InvalidBuffer(_))
    ));

    let mut bytes = [0u8; 8];
    assert!(matches!(
        sort(&mut RawBuffer::new(&mut bytes, 0, Some(ItemDescriptor::unsigned(2)))),
        Err(SortError::InvalidBuffer(_))
    ));
    assert!(matches!(
        sort(&mut RawBuffer::new(&mut bytes, 4, Some(ItemDescriptor::unsigned(2)))),
        Err(SortError::InvalidBuffer(_))
    ));

    // SAFETY: Null pointers are rejected before they are used.
    unsafe {
        assert!(matches!(
            RawBuffer::from_raw_parts(std::ptr::null_mut(), 4, 4, None),
            Err(SortError::InvalidBuffer(_))
        ));

        let mut empty = RawBuffer::from_raw_parts(std::ptr::null_mut(), 0, 4, None).unwrap();
        assert_eq!(sort(&mut empty), Ok(()));
    }
}

#[test]
fn raw_buffer_without_descriptor_is_opaque() {
    let mut bytes = 0x0102_0304_0506_0708u64.to_le_bytes();
    sort(&mut RawBuffer::new(&mut bytes, 8, None)).unwrap();
    assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn unsupported_encodings() {
    let cases = [
        (ItemDescriptor::signed(16), ElementKind::SignedInt, 16),
        (ItemDescriptor::unsigned(16), ElementKind::UnsignedInt, 16),
        (ItemDescriptor::float(10), ElementKind::Float, 10),
        (ItemDescriptor::float(16), ElementKind::Float, 16),
        (ItemDescriptor::float(2), ElementKind::Float, 2),
        (ItemDescriptor::signed(3), ElementKind::SignedInt, 3),
    ];

    for (descriptor, kind, width) in cases {
        let expected = Err(SortError::UnsupportedEncoding { kind, width });

        let mut empty: [u8; 0] = [];
        assert_eq!(
            sort(&mut RawBuffer::new(&mut empty, width, Some(descriptor))),
            expected
        );

        let mut bytes = vec![0xA5u8; width * 4];
        let original = bytes.clone();
        assert_eq!(
            sort(&mut RawBuffer::new(&mut bytes, width, Some(descriptor))),
            expected
        );
        assert_eq!(bytes, original);
    }

    // Reported even when the buffer itself is malformed for that width.
    let mut bytes = [0u8; 8];
    assert!(matches!(
        sort(&mut RawBuffer::new(&mut bytes, 8, Some(ItemDescriptor::float(16)))),
        Err(SortError::UnsupportedEncoding { .. })
    ));
}

#[test]
fn zero_width_is_invalid_buffer() {
    let mut empty: [u8; 0] = [];
    assert!(matches!(
        sort(&mut RawBuffer::new(&mut empty, 0, Some(ItemDescriptor::signed(0)))),
        Err(SortError::InvalidBuffer(_))
    ));

    let mut bytes = [5u8, 3, 1, 4];
    assert!(matches!(
        sort_with(&mut OpaqueBytes::new(&mut bytes), ItemDescriptor::float(0)),
        Err(SortError::InvalidBuffer(_))
    ));
    assert_eq!(bytes, [5, 3, 1, 4]);
}

macro_rules! empty_buffer_tests {
    ($($t:ident),*) => {
        paste! {
            $(
                #[test]
                fn [<empty_ $t>]() {
                    let mut v: Vec<$t> = Vec::new();
                    assert_eq!(sort(&mut v), Ok(()));
                    assert!(v.is_empty());

                    let mut single: [$t; 1] = [<$t>::default()];
                    assert_eq!(sort(&mut single), Ok(()));
                }
            )*
        }
    };
}

empty_buffer_tests!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

#[test]
fn empty_opaque() {
    let mut bytes: [u8; 0] = [];
    assert_eq!(sort(&mut OpaqueBytes::new(&mut bytes)), Ok(()));
}

#[test]
fn describe_and_resolve() {
    let native = Endianness::from(ByteOrder::Native);

    assert_eq!(describe(&[0u16; 3][..]), ItemDescriptor::unsigned(2));
    assert_eq!(describe(&vec![0.0f64]), ItemDescriptor::float(8));

    let mut bytes = [0u8; 4];
    let opaque = OpaqueBytes::new(&mut bytes);
    assert_eq!(describe(&opaque), ItemDescriptor::OPAQUE);
    assert_eq!(resolve_codec(&opaque), Ok(Codec::Opaque));

    assert_eq!(resolve_codec(&[0i64; 2]), Ok(Codec::I64(native)));
    assert_eq!(resolve_codec(&vec![0.0f32]), Ok(Codec::F32(native)));
    assert_eq!(resolve_codec(&[0u8; 1]), Ok(Codec::U8));
}

#[test]
fn codec_verifies_order() {
    let mut v = vec![9u32, 1, 1 << 31, 4, 0];
    sort(&mut v).unwrap();

    let codec = resolve_codec(&v).unwrap();
    let bytes = v.iter().flat_map(|x| x.to_ne_bytes()).collect::<Vec<_>>();
    assert!(codec.is_sorted_bytes(&bytes));
    assert_eq!(
        codec.compare(&bytes[..4], &bytes[4..8]),
        std::cmp::Ordering::Less
    );

    // As opaque bytes the same memory is not in order.
    assert!(!Codec::Opaque.is_sorted_bytes(&bytes));
}

#[test]
fn disjoint_buffers_in_parallel() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut data = (0..16_000).map(|_| rng.gen::<f32>()).collect::<Vec<_>>();

    thread::scope(|s| {
        for chunk in data.chunks_mut(1_000) {
            s.spawn(move || sort(chunk).unwrap());
        }
    });

    for chunk in data.chunks(1_000) {
        assert!(chunk.windows(2).all(|w| w[0] <= w[1]));
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;

use buffersort::{Codec, ItemDescriptor, RawBuffer};

const DTYPES: [&str; 12] = [
    "bytes", "i8", "<i16", ">i32", "<i64", "u8", ">u16", "<u32", ">u64", "<f32", ">f64", "f80",
];

// The first byte picks the encoding, the rest is the buffer.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };

    let descriptor: ItemDescriptor = DTYPES[selector as usize % DTYPES.len()].parse().unwrap();
    let item_size = descriptor.item_size();
    let usable = rest.len() - rest.len() % item_size;

    let mut bytes = rest[..usable].to_vec();
    let result = buffersort::sort(&mut RawBuffer::new(&mut bytes, item_size, Some(descriptor)));

    let Ok(codec) = buffersort::dispatch::resolve(&descriptor) else {
        assert!(result.is_err());
        assert_eq!(bytes, &rest[..usable]);
        return;
    };
    result.unwrap();

    assert!(codec.is_sorted_bytes(&bytes));

    // Same elements, bit for bit.
    let mut before = rest[..usable].chunks_exact(item_size).collect::<Vec<_>>();
    let mut after = bytes.chunks_exact(item_size).collect::<Vec<_>>();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);

    if codec == Codec::Opaque {
        assert!(bytes.windows(2).all(|w| w[0] <= w[1]));
    }
});

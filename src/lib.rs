//! In-place sorting of generic memory buffers.
//!
//! A buffer is sorted according to what it declares about its elements:
//!
//! - typed slices, arrays and `Vec`s of `i8`..`i64`, `u8`..`u64`, `f32` and `f64` are sorted by
//!   element value,
//! - `ndarray` arrays of those types (feature `ndarray`) are sorted the same way, as one sequence
//!   in memory order,
//! - [`OpaqueBytes`] and [`RawBuffer`]s without a descriptor declare nothing and are sorted byte by
//!   byte as unsigned values.
//!
//! The last point is deliberate: the bytes of four `f32` sorted as opaque bytes are not the same
//! as the four `f32` sorted as floats.
//!
//! Floats sort by value, `-0.0` and `0.0` are equal, and all NaNs are equal to each other and
//! greater than any other value, so they end up at the end.
//!
//! ```
//! let mut v = [3i8, -1, 2, -128, 127];
//! buffersort::sort(&mut v).unwrap();
//! assert_eq!(v, [-128, -1, 2, 3, 127]);
//! ```

use log::debug;

#[cfg(feature = "ndarray")]
mod array;
mod buffer;
pub mod codec;
mod descriptor;
pub mod dispatch;
mod element;
mod engine;
mod error;

pub use buffer::{BufferView, OpaqueBytes, RawBuffer, SortBuffer};
pub use codec::Codec;
pub use descriptor::{ByteOrder, ElementKind, ItemDescriptor};
pub use element::Element;
pub use error::SortError;

/// Sorts `buffer` in place, in non-decreasing order of its declared encoding.
///
/// Buffers that declare no encoding are sorted as opaque bytes. The encoding is checked even for
/// empty buffers, so an unsupported encoding always fails with
/// [`SortError::UnsupportedEncoding`].
///
/// The sort is unstable and *O*(*n* \* log(*n*)) worst-case. It does not allocate.
///
/// On error the buffer keeps its size, but its order is unspecified.
pub fn sort<B>(buffer: &mut B) -> Result<(), SortError>
where
    B: SortBuffer + ?Sized,
{
    let descriptor = describe(buffer);
    sort_with(buffer, descriptor)
}

/// Sorts `buffer` as if it declared `descriptor`.
///
/// This makes either behavior reproducible on the same memory, e.g. sorting typed elements as
/// opaque bytes with [`ItemDescriptor::OPAQUE`], or sorting integers stored in a foreign byte
/// order.
///
/// A buffer that declares its own encoding must have the same item size as `descriptor`. The
/// bytes of a buffer that declares nothing are regrouped into elements of
/// `descriptor.item_size()`.
pub fn sort_with<B>(buffer: &mut B, descriptor: ItemDescriptor) -> Result<(), SortError>
where
    B: SortBuffer + ?Sized,
{
    let codec = dispatch::resolve(&descriptor)?;
    let declares_items = buffer.declared_item().is_some();

    let view = buffer.buffer_view()?;

    let view = if descriptor.is_opaque() {
        view.into_opaque()
    } else if !declares_items {
        view.regroup(codec.width())?
    } else if view.item_size() != codec.width() {
        return Err(SortError::invalid_buffer(format!(
            "buffer item size {} does not match {descriptor} ({} bytes)",
            view.item_size(),
            codec.width()
        )));
    } else {
        view
    };

    debug!("sorting {} elements as {codec}", view.len());

    engine::sort(view, codec);

    Ok(())
}

/// The descriptor [`sort`] uses for `buffer`, opaque bytes if it declares nothing.
#[must_use]
pub fn describe<B>(buffer: &B) -> ItemDescriptor
where
    B: SortBuffer + ?Sized,
{
    buffer.declared_item().unwrap_or(ItemDescriptor::OPAQUE)
}

/// Resolves the codec [`sort`] would use for `buffer`, without touching its memory.
pub fn resolve_codec<B>(buffer: &B) -> Result<Codec, SortError>
where
    B: SortBuffer + ?Sized,
{
    dispatch::resolve(&describe(buffer))
}

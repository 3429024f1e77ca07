//! Buffer views and the ways a caller can hand memory to [`crate::sort`].

use std::fmt;
use std::mem;
use std::slice;

use crate::descriptor::ItemDescriptor;
use crate::element::{self, Element};
use crate::error::SortError;

/// Non-owning view of `len() * item_size()` contiguous bytes, valid for one sort call.
///
/// The view mutably borrows the memory, so no one else can access it while the sort runs.
pub struct BufferView<'a> {
    bytes: &'a mut [u8],
    item_size: usize,
}

impl<'a> BufferView<'a> {
    /// Groups `bytes` into slots of `item_size` bytes.
    pub fn new(bytes: &'a mut [u8], item_size: usize) -> Result<Self, SortError> {
        if item_size == 0 {
            return Err(SortError::invalid_buffer("item size must be non-zero"));
        }

        if bytes.len() % item_size != 0 {
            return Err(SortError::invalid_buffer(format!(
                "byte length {} is not a multiple of the item size {item_size}",
                bytes.len()
            )));
        }

        Ok(Self { bytes, item_size })
    }

    /// Builds a view of `len` elements of `item_size` bytes each starting at `ptr`.
    ///
    /// A null `ptr` is accepted for `len == 0`.
    ///
    /// # Safety
    ///
    /// If `len > 0`, `ptr` must be valid for reads and writes of `len * item_size` bytes for the
    /// whole lifetime `'a`, and nothing else may access that memory during that lifetime.
    pub unsafe fn from_raw_parts(
        ptr: *mut u8,
        len: usize,
        item_size: usize,
    ) -> Result<Self, SortError> {
        if item_size == 0 {
            return Err(SortError::invalid_buffer("item size must be non-zero"));
        }

        let byte_len = len
            .checked_mul(item_size)
            .filter(|&byte_len| byte_len <= isize::MAX as usize)
            .ok_or_else(|| {
                SortError::invalid_buffer(format!(
                    "{len} elements of {item_size} bytes overflow the address space"
                ))
            })?;

        if len == 0 {
            return Ok(Self {
                bytes: <&mut [u8]>::default(),
                item_size,
            });
        }

        if ptr.is_null() {
            return Err(SortError::invalid_buffer(format!(
                "null pointer for {len} elements"
            )));
        }

        // SAFETY: The caller guarantees validity and exclusive access for `'a`, we checked for
        // null and for an overflowing length.
        let bytes = unsafe { slice::from_raw_parts_mut(ptr, byte_len) };

        Ok(Self { bytes, item_size })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / self.item_size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// The same bytes grouped into slots of `item_size`.
    pub fn regroup(self, item_size: usize) -> Result<Self, SortError> {
        BufferView::new(self.bytes, item_size)
    }

    /// The same bytes, one element per byte.
    #[must_use]
    pub fn into_opaque(self) -> Self {
        Self {
            bytes: self.bytes,
            item_size: 1,
        }
    }

    pub(crate) fn into_bytes(self) -> &'a mut [u8] {
        self.bytes
    }
}

impl fmt::Debug for BufferView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("len", &self.len())
            .field("item_size", &self.item_size)
            .finish()
    }
}

/// Anything that can be sorted in place by [`crate::sort`].
pub trait SortBuffer {
    /// The element encoding the buffer declares, `None` if it declares no element structure.
    fn declared_item(&self) -> Option<ItemDescriptor>;

    /// A view of the whole buffer. Fails with [`SortError::InvalidBuffer`] if the memory can't
    /// be viewed as one contiguous region.
    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError>;
}

pub(crate) fn typed_view<T: Element>(v: &mut [T]) -> Result<BufferView<'_>, SortError> {
    BufferView::new(element::as_bytes_mut(v), mem::size_of::<T>())
}

impl<T: Element> SortBuffer for [T] {
    fn declared_item(&self) -> Option<ItemDescriptor> {
        Some(T::DESCRIPTOR)
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        typed_view(self)
    }
}

impl<T: Element, const N: usize> SortBuffer for [T; N] {
    fn declared_item(&self) -> Option<ItemDescriptor> {
        Some(T::DESCRIPTOR)
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        typed_view(self.as_mut_slice())
    }
}

impl<T: Element> SortBuffer for Vec<T> {
    fn declared_item(&self) -> Option<ItemDescriptor> {
        Some(T::DESCRIPTOR)
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        typed_view(self.as_mut_slice())
    }
}

impl<B: SortBuffer + ?Sized> SortBuffer for &mut B {
    fn declared_item(&self) -> Option<ItemDescriptor> {
        (**self).declared_item()
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        (**self).buffer_view()
    }
}

/// Bytes that declare no element structure. Every byte is sorted as its own unsigned element.
///
/// Wrapping the bytes of wider elements, see [`OpaqueBytes::of`], does not change that: the
/// result is byte order, not element order.
#[derive(Debug)]
pub struct OpaqueBytes<'a> {
    bytes: &'a mut [u8],
}

impl<'a> OpaqueBytes<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Byte-serialized view of a typed slice.
    pub fn of<T: Element>(v: &'a mut [T]) -> Self {
        Self {
            bytes: element::as_bytes_mut(v),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl SortBuffer for OpaqueBytes<'_> {
    fn declared_item(&self) -> Option<ItemDescriptor> {
        None
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        BufferView::new(&mut *self.bytes, 1)
    }
}

/// A `{memory, item size, optional descriptor}` triple, for callers that obtained their buffer
/// from somewhere that only exposes raw parts.
///
/// Without a descriptor the memory is sorted as opaque bytes, whatever `item_size` says.
#[derive(Debug)]
pub struct RawBuffer<'a> {
    bytes: &'a mut [u8],
    item_size: usize,
    descriptor: Option<ItemDescriptor>,
}

impl<'a> RawBuffer<'a> {
    /// Validation is deferred to the sort call, which reports [`SortError::InvalidBuffer`].
    pub fn new(bytes: &'a mut [u8], item_size: usize, descriptor: Option<ItemDescriptor>) -> Self {
        Self {
            bytes,
            item_size,
            descriptor,
        }
    }

    /// # Safety
    ///
    /// Same contract as [`BufferView::from_raw_parts`].
    pub unsafe fn from_raw_parts(
        ptr: *mut u8,
        len: usize,
        item_size: usize,
        descriptor: Option<ItemDescriptor>,
    ) -> Result<Self, SortError> {
        // SAFETY: Forwarded to the caller.
        let view = unsafe { BufferView::from_raw_parts(ptr, len, item_size)? };

        Ok(Self {
            bytes: view.into_bytes(),
            item_size,
            descriptor,
        })
    }
}

impl SortBuffer for RawBuffer<'_> {
    fn declared_item(&self) -> Option<ItemDescriptor> {
        self.descriptor
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        BufferView::new(&mut *self.bytes, self.item_size)
    }
}

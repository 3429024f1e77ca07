//! Multi-dimensional arrays as sort buffers.
//!
//! An array declares its element type, so it is sorted with the typed codec. All elements are
//! sorted as one sequence in memory order, regardless of shape and strides.

use ndarray::{ArrayBase, DataMut, Dimension};

use crate::buffer::{typed_view, BufferView, SortBuffer};
use crate::descriptor::ItemDescriptor;
use crate::element::Element;
use crate::error::SortError;

impl<A, S, D> SortBuffer for ArrayBase<S, D>
where
    A: Element,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    fn declared_item(&self) -> Option<ItemDescriptor> {
        Some(A::DESCRIPTOR)
    }

    fn buffer_view(&mut self) -> Result<BufferView<'_>, SortError> {
        let shape = self.shape().to_vec();
        let elements = self.as_slice_memory_order_mut().ok_or_else(|| {
            SortError::invalid_buffer(format!(
                "array of shape {shape:?} is not contiguous in memory"
            ))
        })?;

        typed_view(elements)
    }
}

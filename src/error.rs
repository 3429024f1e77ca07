use thiserror::Error;

use crate::descriptor::ElementKind;

/// Failure of a sort call.
///
/// A failed call leaves the buffer in an unspecified order, but it is never resized and no byte
/// outside the view is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The declared element encoding has no codec, e.g. 128-bit integers or extended floats.
    #[error("unsupported element encoding: {kind} with a width of {width} bytes")]
    UnsupportedEncoding { kind: ElementKind, width: usize },

    /// The buffer view is malformed, checked before any comparison or swap.
    #[error("invalid buffer: {0}")]
    InvalidBuffer(String),

    /// A dtype string that could not be parsed into an item descriptor.
    #[error("invalid dtype notation: {0:?}")]
    InvalidDescriptor(String),
}

impl SortError {
    pub(crate) fn invalid_buffer(reason: impl Into<String>) -> Self {
        SortError::InvalidBuffer(reason.into())
    }
}

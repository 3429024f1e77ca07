pub trait Sort {
    fn name() -> String;

    /// Sorts a typed slice through the buffer shape under test.
    fn sort<T>(arr: &mut [T]) -> Result<(), SortFailure>
    where
        T: Element;

    /// Sorts raw memory. `dtype` is the declared encoding in dtype notation, `None` declares
    /// nothing.
    fn sort_bytes(bytes: &mut [u8], dtype: Option<&str>) -> Result<(), SortFailure>;
}

/// Error classes the suite distinguishes between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortFailure {
    UnsupportedEncoding,
    InvalidBuffer,
    Other(String),
}

pub mod element;
pub mod patterns;

pub use element::{Element, TypedSliceMut};

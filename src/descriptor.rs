//! Item descriptors, the passive metadata that says how the bytes of a buffer are grouped into
//! elements and how those elements compare.

use std::fmt;
use std::str::FromStr;

use crate::error::SortError;

/// The broad encoding family of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    SignedInt,
    UnsignedInt,
    Float,
    /// No declared structure, every byte is its own element.
    OpaqueByte,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::SignedInt => "signed integer",
            ElementKind::UnsignedInt => "unsigned integer",
            ElementKind::Float => "float",
            ElementKind::OpaqueByte => "opaque byte",
        };

        f.write_str(name)
    }
}

/// Byte order of the stored elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    Little,
    Big,
    /// The byte order of the target, resolved when the codec is picked.
    #[default]
    Native,
}

impl ByteOrder {
    /// Returns `Little` or `Big`, never `Native`.
    #[must_use]
    pub const fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::Native => {
                if cfg!(target_endian = "big") {
                    ByteOrder::Big
                } else {
                    ByteOrder::Little
                }
            }
            other => other,
        }
    }
}

/// Declared element encoding of a buffer.
///
/// The item size of a buffer always equals `width`. An opaque descriptor always has a width of
/// one byte, no matter what element size the container of the bytes might suggest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    kind: ElementKind,
    width: usize,
    byte_order: ByteOrder,
}

impl ItemDescriptor {
    /// The fallback for buffers that declare nothing.
    pub const OPAQUE: ItemDescriptor = ItemDescriptor {
        kind: ElementKind::OpaqueByte,
        width: 1,
        byte_order: ByteOrder::Native,
    };

    /// Creates a descriptor with native byte order. `width` is ignored for
    /// [`ElementKind::OpaqueByte`].
    ///
    /// Any width is accepted here, whether a codec exists for it is decided by
    /// [`crate::dispatch::resolve`].
    #[must_use]
    pub const fn new(kind: ElementKind, width: usize) -> Self {
        match kind {
            ElementKind::OpaqueByte => Self::OPAQUE,
            _ => Self {
                kind,
                width,
                byte_order: ByteOrder::Native,
            },
        }
    }

    #[must_use]
    pub const fn signed(width: usize) -> Self {
        Self::new(ElementKind::SignedInt, width)
    }

    #[must_use]
    pub const fn unsigned(width: usize) -> Self {
        Self::new(ElementKind::UnsignedInt, width)
    }

    #[must_use]
    pub const fn float(width: usize) -> Self {
        Self::new(ElementKind::Float, width)
    }

    /// Same encoding, stored in `byte_order`. Opaque bytes have no byte order and are returned
    /// unchanged.
    #[must_use]
    pub const fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        match self.kind {
            ElementKind::OpaqueByte => self,
            _ => Self { byte_order, ..self },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Size in bytes of one element slot.
    #[must_use]
    pub const fn item_size(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self.kind, ElementKind::OpaqueByte)
    }
}

impl Default for ItemDescriptor {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Compact dtype notation: an optional `<`, `>` or `=` byte order prefix followed by
/// `i`, `u` or `f` and the width in bits, e.g. `<i32`, `u8`, `>f64`, `f80`. The word `bytes`
/// denotes opaque bytes.
impl FromStr for ItemDescriptor {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SortError::InvalidDescriptor(s.to_owned());

        let trimmed = s.trim();
        if trimmed == "bytes" {
            return Ok(Self::OPAQUE);
        }

        let (byte_order, rest) = match trimmed.as_bytes().first() {
            Some(b'<') => (ByteOrder::Little, &trimmed[1..]),
            Some(b'>') => (ByteOrder::Big, &trimmed[1..]),
            Some(b'=') => (ByteOrder::Native, &trimmed[1..]),
            Some(_) => (ByteOrder::Native, trimmed),
            None => return Err(invalid()),
        };

        let mut chars = rest.chars();
        let kind = match chars.next() {
            Some('i') => ElementKind::SignedInt,
            Some('u') => ElementKind::UnsignedInt,
            Some('f') => ElementKind::Float,
            _ => return Err(invalid()),
        };

        let bits_str = chars.as_str();
        if bits_str.is_empty() || !bits_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let bits: usize = bits_str.parse().map_err(|_| invalid())?;
        if bits == 0 || bits % 8 != 0 {
            return Err(invalid());
        }

        Ok(Self::new(kind, bits / 8).with_byte_order(byte_order))
    }
}

impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_char = match self.kind {
            ElementKind::SignedInt => 'i',
            ElementKind::UnsignedInt => 'u',
            ElementKind::Float => 'f',
            ElementKind::OpaqueByte => return f.write_str("bytes"),
        };

        let prefix = match self.byte_order {
            ByteOrder::Little => "<",
            ByteOrder::Big => ">",
            ByteOrder::Native => "",
        };

        match self.width.checked_mul(8) {
            Some(bits) => write!(f, "{prefix}{kind_char}{bits}"),
            None => write!(f, "{prefix}{kind_char}<{} bytes>", self.width),
        }
    }
}

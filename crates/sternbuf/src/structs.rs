//! Fixed-layout inline aggregates.

use crate::scalar::Scalar;

/// A struct with a fixed byte image, written inline where it is used.
///
/// `write_le` must fill exactly `SIZE` bytes including any interior padding,
/// which is written as zero.
pub trait InlineStruct: Sized {
    const SIZE: usize;
    /// Largest scalar alignment among the fields.
    const ALIGN: usize;

    fn write_le(&self, out: &mut [u8]);

    fn read_le(bytes: &[u8]) -> Self;
}

/// Zero-copy view of a struct inside a buffer.
#[derive(Clone, Copy)]
pub struct StructView<'a> {
    buf: &'a [u8],
    loc: usize,
}

impl std::fmt::Debug for StructView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructView").field("loc", &self.loc).finish()
    }
}

impl<'a> StructView<'a> {
    pub fn new(buf: &'a [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Absolute position of the struct's first byte.
    pub fn loc(&self) -> usize {
        self.loc
    }

    /// Scalar at `byte_offset` from the struct start.
    #[inline]
    pub fn get<T: Scalar>(&self, byte_offset: usize) -> T {
        T::read_le(&self.buf[self.loc + byte_offset..])
    }

    /// Struct nested at `byte_offset`.
    #[inline]
    pub fn nested(&self, byte_offset: usize) -> StructView<'a> {
        StructView::new(self.buf, self.loc + byte_offset)
    }

    /// Decode the whole struct image.
    pub fn read<S: InlineStruct>(&self) -> S {
        S::read_le(self.bytes(S::SIZE))
    }

    pub fn bytes(&self, size: usize) -> &'a [u8] {
        &self.buf[self.loc..self.loc + size]
    }
}

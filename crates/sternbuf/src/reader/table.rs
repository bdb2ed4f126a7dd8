use std::borrow::Cow;

use crate::error::ReadError;
use crate::offsets::{
    SIZE_UOFFSET, VOffset, follow_uoffset, read_i32_le, read_u16_le, read_u32_le,
};
use crate::scalar::Scalar;
use crate::structs::{InlineStruct, StructView};

use super::union::UnionVariant;
use super::vector::{Element, Vector};

/// Field-presence table of one object.
#[derive(Clone, Copy)]
pub struct VTable<'a> {
    buf: &'a [u8],
    loc: usize,
}

impl std::fmt::Debug for VTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VTable")
            .field("loc", &self.loc)
            .field("bytes", &self.bytes())
            .finish()
    }
}

impl<'a> VTable<'a> {
    pub fn new(buf: &'a [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    pub fn loc(&self) -> usize {
        self.loc
    }

    /// Byte size of the vtable, metadata included.
    pub fn byte_len(&self) -> usize {
        read_u16_le(self.buf, self.loc) as usize
    }

    /// Byte size of the table it describes, backpointer included.
    pub fn object_len(&self) -> usize {
        read_u16_le(self.buf, self.loc + 2) as usize
    }

    /// Number of slots actually stored (trailing absent slots are trimmed).
    pub fn num_slots(&self) -> usize {
        (self.byte_len() / 2).saturating_sub(2)
    }

    /// In-table offset of `field`, or 0 if the field is absent or lies
    /// beyond this vtable.
    pub fn get(&self, field: VOffset) -> VOffset {
        if field as usize >= self.byte_len() {
            return 0;
        }
        read_u16_le(self.buf, self.loc + field as usize)
    }

    /// The raw vtable image.
    pub fn bytes(&self) -> &'a [u8] {
        &self.buf[self.loc..self.loc + self.byte_len()]
    }
}

/// Zero-copy view of a table.
///
/// Fields are addressed by their vtable offset (see
/// [`field_offset`](crate::field_offset)). Reads trust the buffer: a
/// corrupted buffer makes them panic on slice bounds.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Table<'a> {
    buf: &'a [u8],
    loc: usize,
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("loc", &self.loc).finish()
    }
}

impl<'a> Table<'a> {
    pub fn new(buf: &'a [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Absolute position of the table (its backpointer).
    pub fn loc(&self) -> usize {
        self.loc
    }

    pub fn vtable(&self) -> VTable<'a> {
        let backpointer = read_i32_le(self.buf, self.loc) as isize;
        VTable::new(self.buf, self.loc.wrapping_add_signed(-backpointer))
    }

    /// Absolute position of `field`'s value, if present.
    pub fn field_loc(&self, field: VOffset) -> Option<usize> {
        match self.vtable().get(field) {
            0 => None,
            off => Some(self.loc + off as usize),
        }
    }

    pub fn has_field(&self, field: VOffset) -> bool {
        self.field_loc(field).is_some()
    }

    /// Scalar `field`, or `default` when absent.
    #[inline]
    pub fn get<T: Scalar>(&self, field: VOffset, default: T) -> T {
        self.get_optional(field).unwrap_or(default)
    }

    /// Scalar `field`, distinguishing absence from any stored value.
    #[inline]
    pub fn get_optional<T: Scalar>(&self, field: VOffset) -> Option<T> {
        self.field_loc(field).map(|loc| T::read_le(&self.buf[loc..]))
    }

    /// Position of the object `field` refers to.
    fn follow(&self, field: VOffset) -> Option<usize> {
        self.field_loc(field).map(|loc| follow_uoffset(self.buf, loc))
    }

    /// A string field. Strings are byte vectors on the wire, so bytes that
    /// are not UTF-8 come back as [`ReadError::InvalidUtf8`].
    pub fn get_str(&self, field: VOffset) -> Option<Result<&'a str, ReadError>> {
        self.follow(field).map(|loc| read_str(self.buf, loc))
    }

    /// A string field with invalid sequences replaced by U+FFFD.
    pub fn get_str_lossy(&self, field: VOffset) -> Option<Cow<'a, str>> {
        self.get_bytes(field).map(String::from_utf8_lossy)
    }

    /// A `[u8]` vector or byte string field.
    pub fn get_bytes(&self, field: VOffset) -> Option<&'a [u8]> {
        self.follow(field).map(|loc| read_byte_slice(self.buf, loc))
    }

    pub fn get_vector<T: Element<'a>>(&self, field: VOffset) -> Option<Vector<'a, T>> {
        self.follow(field).map(|loc| Vector::new(self.buf, loc))
    }

    pub fn get_table(&self, field: VOffset) -> Option<Table<'a>> {
        self.follow(field).map(|loc| Table::new(self.buf, loc))
    }

    /// Inline struct `field`.
    pub fn get_struct(&self, field: VOffset) -> Option<StructView<'a>> {
        self.field_loc(field).map(|loc| StructView::new(self.buf, loc))
    }

    pub fn get_struct_value<S: InlineStruct>(&self, field: VOffset) -> Option<S> {
        self.get_struct(field).map(|view| view.read())
    }

    /// Decode a union from its tag field and value field.
    ///
    /// The tag is resolved on every call.
    pub fn get_union<U: UnionVariant<'a>>(&self, tag_field: VOffset, value_field: VOffset) -> U {
        let tag = self.get::<u8>(tag_field, 0);
        U::from_tag(tag, self.get_table(value_field))
    }
}

/// Bytes of the vector whose length word is at `loc`.
pub(crate) fn read_byte_slice(buf: &[u8], loc: usize) -> &[u8] {
    let len = read_u32_le(buf, loc) as usize;
    let start = loc + SIZE_UOFFSET;
    &buf[start..start + len]
}

/// String whose length word is at `loc`.
pub(crate) fn read_str(buf: &[u8], loc: usize) -> Result<&str, ReadError> {
    std::str::from_utf8(read_byte_slice(buf, loc)).map_err(|e| ReadError::InvalidUtf8 {
        loc,
        valid_up_to: e.valid_up_to(),
    })
}

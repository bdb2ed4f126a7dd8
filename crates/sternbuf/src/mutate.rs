//! In-place scalar rewriting.
//!
//! Mutators overwrite bytes that already exist. They never add a field,
//! resize anything, or touch a vtable or offset, so a field that was omitted
//! at build time cannot be mutated.

use crate::error::ReadError;
use crate::offsets::{SIZE_PREFIX_LEN, SIZE_UOFFSET, VOffset, follow_uoffset, read_u32_le};
use crate::reader::{Table, root_loc};
use crate::scalar::Scalar;
use crate::structs::StructView;

pub fn root_table_mut(buf: &mut [u8]) -> Result<TableMut<'_>, ReadError> {
    let loc = root_loc(buf, 0)?;
    Ok(TableMut::new(buf, loc))
}

pub fn size_prefixed_root_table_mut(buf: &mut [u8]) -> Result<TableMut<'_>, ReadError> {
    let loc = root_loc(buf, SIZE_PREFIX_LEN)?;
    Ok(TableMut::new(buf, loc))
}

/// Mutable view of a table.
#[derive(Debug)]
pub struct TableMut<'a> {
    buf: &'a mut [u8],
    loc: usize,
}

impl<'a> TableMut<'a> {
    pub fn new(buf: &'a mut [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    pub fn as_table(&self) -> Table<'_> {
        Table::new(&*self.buf, self.loc)
    }

    /// Overwrite scalar `field`. Returns `false` if the field is absent.
    pub fn mutate<T: Scalar>(&mut self, field: VOffset, value: T) -> bool {
        let Some(loc) = self.as_table().field_loc(field) else {
            return false;
        };
        value.write_le(&mut self.buf[loc..]);
        true
    }

    /// Overwrite the scalar at `byte_offset` inside inline struct `field`.
    pub fn mutate_struct_field<T: Scalar>(
        &mut self,
        field: VOffset,
        byte_offset: usize,
        value: T,
    ) -> bool {
        match self.struct_mut(field) {
            Some(mut s) => {
                s.set(byte_offset, value);
                true
            }
            None => false,
        }
    }

    /// Overwrite element `idx` of scalar vector `field`.
    ///
    /// Returns `false` if the vector is absent or `idx` is out of range.
    pub fn mutate_vector_element<T: Scalar>(
        &mut self,
        field: VOffset,
        idx: usize,
        value: T,
    ) -> bool {
        let Some(field_loc) = self.as_table().field_loc(field) else {
            return false;
        };
        let vec_loc = follow_uoffset(self.buf, field_loc);
        if idx >= read_u32_le(self.buf, vec_loc) as usize {
            return false;
        }
        let elem_loc = vec_loc + SIZE_UOFFSET + idx * T::SIZE;
        value.write_le(&mut self.buf[elem_loc..]);
        true
    }

    /// Mutable view of the table `field` refers to.
    pub fn table_mut(&mut self, field: VOffset) -> Option<TableMut<'_>> {
        let child = self.as_table().get_table(field)?.loc();
        Some(TableMut::new(self.buf, child))
    }

    /// Mutable view of element `idx` of the table vector `field`.
    pub fn vector_table_mut(&mut self, field: VOffset, idx: usize) -> Option<TableMut<'_>> {
        let child = self
            .as_table()
            .get_vector::<Table<'_>>(field)?
            .try_get(idx)?
            .loc();
        Some(TableMut::new(self.buf, child))
    }

    pub fn struct_mut(&mut self, field: VOffset) -> Option<StructMut<'_>> {
        let loc = self.as_table().field_loc(field)?;
        Some(StructMut::new(self.buf, loc))
    }
}

/// Mutable view of an inline struct.
#[derive(Debug)]
pub struct StructMut<'a> {
    buf: &'a mut [u8],
    loc: usize,
}

impl<'a> StructMut<'a> {
    pub fn new(buf: &'a mut [u8], loc: usize) -> Self {
        Self { buf, loc }
    }

    pub fn as_view(&self) -> StructView<'_> {
        StructView::new(&*self.buf, self.loc)
    }

    pub fn get<T: Scalar>(&self, byte_offset: usize) -> T {
        T::read_le(&self.buf[self.loc + byte_offset..])
    }

    pub fn set<T: Scalar>(&mut self, byte_offset: usize, value: T) {
        value.write_le(&mut self.buf[self.loc + byte_offset..]);
    }

    pub fn nested(&mut self, byte_offset: usize) -> StructMut<'_> {
        StructMut::new(self.buf, self.loc + byte_offset)
    }
}

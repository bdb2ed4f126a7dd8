//! Vectors, strings and shared strings.

use std::cmp::Ordering;

use super::{Builder, Nesting};
use crate::error::BuildError;
use crate::offsets::{SIZE_UOFFSET, TailOffset, UOffset};
use crate::reader::Table;
use crate::scalar::Scalar;
use crate::structs::InlineStruct;

impl Builder {
    /// Open a vector of `num_elems` elements, `elem_size` bytes each.
    ///
    /// Elements are then prepended last to first, and the vector is closed
    /// with [`end_vector`](Self::end_vector).
    pub fn start_vector(
        &mut self,
        elem_size: usize,
        num_elems: usize,
        alignment: usize,
    ) -> Result<(), BuildError> {
        self.check_not_nested()?;
        self.nesting = Nesting::Vector;
        self.prep(SIZE_UOFFSET, elem_size * num_elems);
        self.prep(alignment, elem_size * num_elems);
        Ok(())
    }

    /// Write the length word of the open vector and return its location.
    pub fn end_vector(&mut self, num_elems: usize) -> Result<TailOffset, BuildError> {
        if self.nesting != Nesting::Vector {
            return Err(BuildError::NotInVector);
        }
        // start_vector already aligned for the length word.
        self.place(num_elems as UOffset);
        self.nesting = Nesting::None;
        Ok(self.offset())
    }

    fn write_byte_vector(&mut self, bytes: &[u8], nul: bool) -> Result<TailOffset, BuildError> {
        self.check_not_nested()?;
        let extra = usize::from(nul);
        self.prep(SIZE_UOFFSET, bytes.len() + extra);
        if nul {
            self.place(0u8);
        }
        self.head -= bytes.len();
        self.buf[self.head..self.head + bytes.len()].copy_from_slice(bytes);
        self.place(bytes.len() as UOffset);
        Ok(self.offset())
    }

    /// Write a NUL-terminated string. The NUL is not counted in the length.
    pub fn create_string(&mut self, s: &str) -> Result<TailOffset, BuildError> {
        self.write_byte_vector(s.as_bytes(), true)
    }

    /// Write arbitrary bytes with string framing (trailing NUL).
    pub fn create_byte_string(&mut self, bytes: &[u8]) -> Result<TailOffset, BuildError> {
        self.write_byte_vector(bytes, true)
    }

    /// Write a `[u8]` vector without a trailing NUL.
    pub fn create_byte_vector(&mut self, bytes: &[u8]) -> Result<TailOffset, BuildError> {
        self.write_byte_vector(bytes, false)
    }

    /// Write `s` once per generation; later calls with equal content return
    /// the first location.
    pub fn create_shared_string(&mut self, s: &str) -> Result<TailOffset, BuildError> {
        self.check_not_nested()?;
        if let Some(&off) = self.shared_strings.get(s) {
            tracing::trace!(offset = off.0, len = s.len(), "shared string cache hit");
            return Ok(off);
        }
        let off = self.create_string(s)?;
        self.shared_strings.insert(s.to_owned(), off);
        Ok(off)
    }

    pub fn create_vector<T: Scalar>(&mut self, items: &[T]) -> Result<TailOffset, BuildError> {
        self.start_vector(T::SIZE, items.len(), T::SIZE)?;
        for &item in items.iter().rev() {
            self.place(item);
        }
        self.end_vector(items.len())
    }

    /// Write a vector of forward offsets to already written tables.
    pub fn create_vector_of_tables(
        &mut self,
        tables: &[TailOffset],
    ) -> Result<TailOffset, BuildError> {
        self.start_vector(SIZE_UOFFSET, tables.len(), SIZE_UOFFSET)?;
        for &table in tables.iter().rev() {
            self.prepend_uoffset(table);
        }
        self.end_vector(tables.len())
    }

    /// Write each string, then a vector referring to them in order.
    pub fn create_vector_of_strings<S: AsRef<str>>(
        &mut self,
        items: &[S],
    ) -> Result<TailOffset, BuildError> {
        let offsets = items
            .iter()
            .map(|s| self.create_string(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.create_vector_of_tables(&offsets)
    }

    pub fn create_vector_of_structs<S: InlineStruct>(
        &mut self,
        items: &[S],
    ) -> Result<TailOffset, BuildError> {
        self.start_vector(S::SIZE, items.len(), S::ALIGN)?;
        for item in items.iter().rev() {
            self.head -= S::SIZE;
            item.write_le(&mut self.buf[self.head..self.head + S::SIZE]);
        }
        self.end_vector(items.len())
    }

    /// Sort `tables` with `compare` and write them as a vector.
    ///
    /// Lookups on the result must use a comparison that agrees with
    /// `compare`. The slice is left in sorted order.
    pub fn create_vector_of_sorted_tables<F>(
        &mut self,
        tables: &mut [TailOffset],
        mut compare: F,
    ) -> Result<TailOffset, BuildError>
    where
        F: FnMut(&Table<'_>, &Table<'_>) -> Ordering,
    {
        let len = self.buf.len();
        let buf = &self.buf;
        tables.sort_by(|a, b| {
            let ta = Table::new(buf, a.resolve(len));
            let tb = Table::new(buf, b.resolve(len));
            compare(&ta, &tb)
        });
        self.create_vector_of_tables(tables)
    }
}

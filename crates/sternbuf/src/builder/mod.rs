//! Back-to-front buffer builder.
//!
//! The builder writes from the tail of its buffer toward the head. Every
//! location it hands out is a [`TailOffset`], a distance from the tail, which
//! stays valid when the buffer doubles and its contents move to the upper
//! half. Forward offsets are resolved only when something refers to them.
//!
//! Tables are written field by field between [`Builder::start_table`] and
//! [`Builder::end_table`]; the vtable is computed on close and deduplicated
//! against every vtable already written in the current generation.

mod vectors;
mod vtable;

#[cfg(test)]
mod layout_tests;
#[cfg(test)]
mod vtable_tests;

use std::collections::HashMap;

use crate::error::BuildError;
use crate::offsets::{
    FILE_IDENTIFIER_LEN, MAX_BUFFER_SIZE, SIZE_PREFIX_LEN, SIZE_UOFFSET, TailOffset, UOffset,
    padding_for,
};
use crate::options::BuilderOptions;
use crate::scalar::Scalar;
use crate::structs::InlineStruct;

pub use vtable::VTableCache;

/// What the builder is in the middle of writing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Nesting {
    #[default]
    None,
    Table,
    Vector,
}

impl std::fmt::Display for Nesting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Nesting::None => "nothing",
            Nesting::Table => "table",
            Nesting::Vector => "vector",
        };
        f.write_str(name)
    }
}

/// Serializes one object graph at a time into a single byte buffer.
///
/// A builder is reusable: [`reset`](Self::reset) starts a new generation
/// without releasing the allocation.
#[derive(Debug)]
pub struct Builder {
    buf: Vec<u8>,
    /// Index of the lowest written byte.
    head: usize,
    min_align: usize,
    /// Tail offset of each field of the open table, 0 when unset.
    fields: Vec<UOffset>,
    /// Offset at which the open table started.
    object_end: UOffset,
    vtables: VTableCache,
    shared_strings: HashMap<String, TailOffset>,
    nesting: Nesting,
    finished: bool,
    options: BuilderOptions,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::with_options(BuilderOptions::default())
    }

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::with_options(BuilderOptions::with_capacity(initial_capacity))
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        let capacity = options.initial_capacity;
        Self {
            buf: vec![0; capacity],
            head: capacity,
            min_align: 1,
            fields: Vec::new(),
            object_end: 0,
            vtables: VTableCache::default(),
            shared_strings: HashMap::new(),
            nesting: Nesting::None,
            finished: false,
            options,
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Store slot values equal to their default instead of omitting them.
    pub fn force_defaults(&mut self, force: bool) {
        self.options.force_defaults = force;
    }

    /// Start a new generation.
    ///
    /// Every offset returned before the reset becomes meaningless. Both caches
    /// are cleared; the allocation is kept.
    pub fn reset(&mut self) {
        self.head = self.buf.len();
        self.min_align = 1;
        self.fields.clear();
        self.object_end = 0;
        self.vtables.clear();
        self.shared_strings.clear();
        self.nesting = Nesting::None;
        self.finished = false;
        tracing::debug!(capacity = self.buf.len(), "builder reset");
    }

    /// Bytes written so far.
    #[inline]
    pub fn offset(&self) -> TailOffset {
        TailOffset((self.buf.len() - self.head) as UOffset)
    }

    /// Index of the lowest written byte in the backing buffer.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Everything written so far, finished or not.
    pub fn data(&self) -> &[u8] {
        &self.buf[self.head..]
    }

    /// The finished buffer, starting at the root offset (or size prefix).
    pub fn finished_data(&self) -> Result<&[u8], BuildError> {
        if !self.finished {
            return Err(BuildError::NotFinished);
        }
        Ok(self.data())
    }

    /// Double the buffer, moving existing contents to the upper half.
    ///
    /// # Panics
    /// If the buffer would exceed the 2 GiB addressable limit.
    fn grow(&mut self) {
        let old_len = self.buf.len();
        assert!(
            old_len < MAX_BUFFER_SIZE,
            "cannot grow buffer beyond {MAX_BUFFER_SIZE} bytes"
        );
        let new_len = (old_len * 2).clamp(1, MAX_BUFFER_SIZE);
        let shift = new_len - old_len;
        self.buf.resize(new_len, 0);
        self.buf.copy_within(0..old_len, shift);
        self.buf[..shift].fill(0);
        self.head += shift;
        tracing::trace!(old_len, new_len, "grew builder buffer");
    }

    /// Make room for `additional` bytes followed by a `size`-aligned value.
    ///
    /// After this call, writing `additional` bytes and then a value of width
    /// `size` leaves that value aligned to `size`.
    pub fn prep(&mut self, size: usize, additional: usize) {
        self.min_align = self.min_align.max(size);
        let align_size = padding_for(self.offset().0 as usize + additional, size);
        while self.head <= align_size + size + additional {
            self.grow();
        }
        self.pad(align_size);
    }

    /// Write `n` zero bytes. Capacity must already be reserved.
    pub fn pad(&mut self, n: usize) {
        self.buf[self.head - n..self.head].fill(0);
        self.head -= n;
    }

    /// Write a scalar without alignment or capacity checks.
    #[inline]
    pub fn place<T: Scalar>(&mut self, value: T) {
        self.head -= T::SIZE;
        value.write_le(&mut self.buf[self.head..]);
    }

    /// Align and write a scalar.
    #[inline]
    pub fn prepend<T: Scalar>(&mut self, value: T) {
        self.prep(T::SIZE, 0);
        self.place(value);
    }

    /// Write a forward offset pointing at `off`.
    ///
    /// # Panics
    /// If `off` refers to data not yet written.
    pub fn prepend_uoffset(&mut self, off: TailOffset) {
        self.prep(SIZE_UOFFSET, 0);
        let here = self.offset().0;
        assert!(
            off.0 <= here,
            "offset {off} refers past the written region ({here})"
        );
        self.place(here - off.0 + SIZE_UOFFSET as UOffset);
    }

    pub fn prepend_soffset(&mut self, value: i32) {
        self.prepend(value);
    }

    fn check_not_nested(&self) -> Result<(), BuildError> {
        if self.finished {
            return Err(BuildError::AlreadyFinished);
        }
        if self.nesting != Nesting::None {
            return Err(BuildError::Nested {
                active: self.nesting,
            });
        }
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<(), BuildError> {
        if self.nesting != Nesting::Table {
            return Err(BuildError::NotInTable);
        }
        if slot >= self.fields.len() {
            return Err(BuildError::SlotOutOfRange {
                slot,
                fields: self.fields.len(),
            });
        }
        Ok(())
    }

    /// Open a table with `num_fields` declared slots.
    pub fn start_table(&mut self, num_fields: usize) -> Result<(), BuildError> {
        self.check_not_nested()?;
        self.fields.clear();
        self.fields.resize(num_fields, 0);
        self.object_end = self.offset().0;
        self.nesting = Nesting::Table;
        Ok(())
    }

    /// Record the current offset as the location of field `slot`.
    pub fn slot(&mut self, slot: usize) -> Result<(), BuildError> {
        self.check_slot(slot)?;
        self.fields[slot] = self.offset().0;
        Ok(())
    }

    /// Write a scalar field unless it equals `default`.
    pub fn prepend_slot<T: Scalar>(
        &mut self,
        slot: usize,
        value: T,
        default: T,
    ) -> Result<(), BuildError> {
        self.check_slot(slot)?;
        if !self.options.force_defaults
            && value.matches_default(default, self.options.float_defaults)
        {
            return Ok(());
        }
        self.prepend(value);
        self.fields[slot] = self.offset().0;
        Ok(())
    }

    /// Write a scalar field regardless of its value.
    ///
    /// Used for optional scalars, where presence is the information.
    pub fn prepend_slot_always<T: Scalar>(
        &mut self,
        slot: usize,
        value: T,
    ) -> Result<(), BuildError> {
        self.check_slot(slot)?;
        self.prepend(value);
        self.fields[slot] = self.offset().0;
        Ok(())
    }

    /// Write a field holding a forward offset to a table, vector or string.
    pub fn prepend_offset_slot(&mut self, slot: usize, off: TailOffset) -> Result<(), BuildError> {
        self.check_slot(slot)?;
        self.prepend_uoffset(off);
        self.fields[slot] = self.offset().0;
        Ok(())
    }

    /// Register a struct written immediately before this call as field `slot`.
    ///
    /// Nothing is recorded when `off` equals `default`; generated code passes
    /// `TailOffset(0)`, which no written struct can have.
    pub fn prepend_struct_slot(
        &mut self,
        slot: usize,
        off: TailOffset,
        default: TailOffset,
    ) -> Result<(), BuildError> {
        self.check_slot(slot)?;
        if off == default {
            return Ok(());
        }
        let here = self.offset();
        if off != here {
            return Err(BuildError::StructNotInline {
                expected: here.0,
                actual: off.0,
            });
        }
        self.fields[slot] = here.0;
        Ok(())
    }

    /// Write a struct image at its alignment.
    pub fn push_struct<S: InlineStruct>(&mut self, value: &S) -> TailOffset {
        self.prep(S::ALIGN, S::SIZE);
        self.head -= S::SIZE;
        value.write_le(&mut self.buf[self.head..self.head + S::SIZE]);
        self.offset()
    }

    /// Write a struct inline as field `slot`.
    pub fn push_struct_slot<S: InlineStruct>(
        &mut self,
        slot: usize,
        value: &S,
    ) -> Result<(), BuildError> {
        self.check_slot(slot)?;
        let off = self.push_struct(value);
        self.prepend_struct_slot(slot, off, TailOffset(0))
    }

    /// Close the open table and return its location.
    pub fn end_table(&mut self) -> Result<TailOffset, BuildError> {
        if self.nesting != Nesting::Table {
            return Err(BuildError::NotInTable);
        }
        let off = self.write_vtable();
        self.fields.clear();
        self.nesting = Nesting::None;
        Ok(off)
    }

    /// Write the root offset. `size_prefixed` adds a 4-byte length in front.
    pub fn finish(&mut self, root: TailOffset, size_prefixed: bool) -> Result<(), BuildError> {
        self.finish_inner(root, None, size_prefixed)
    }

    /// Like [`finish`](Self::finish), with a 4-byte file identifier written
    /// right after the root offset.
    pub fn finish_with_identifier(
        &mut self,
        root: TailOffset,
        identifier: [u8; FILE_IDENTIFIER_LEN],
        size_prefixed: bool,
    ) -> Result<(), BuildError> {
        self.finish_inner(root, Some(identifier), size_prefixed)
    }

    fn finish_inner(
        &mut self,
        root: TailOffset,
        identifier: Option<[u8; FILE_IDENTIFIER_LEN]>,
        size_prefixed: bool,
    ) -> Result<(), BuildError> {
        self.check_not_nested()?;

        let prefix_len = if size_prefixed { SIZE_PREFIX_LEN } else { 0 };
        let id_len = if identifier.is_some() {
            FILE_IDENTIFIER_LEN
        } else {
            0
        };
        self.prep(
            self.min_align.max(SIZE_UOFFSET),
            SIZE_UOFFSET + id_len + prefix_len,
        );
        if let Some(id) = identifier {
            for &b in id.iter().rev() {
                self.place(b);
            }
        }
        self.prepend_uoffset(root);
        if size_prefixed {
            let len = self.offset().0;
            self.place(len);
        }
        self.finished = true;

        tracing::debug!(
            root = root.0,
            size_prefixed,
            len = self.offset().0,
            "finished buffer"
        );
        Ok(())
    }
}

//! Vtable encoding and deduplication.
//!
//! A vtable image is `[vtable_len][object_len][slot_0 .. slot_n]`, all
//! little-endian u16, with trailing zero slots trimmed. Two tables whose
//! images are byte-identical share one vtable.

use std::collections::HashMap;

use super::Builder;
use crate::offsets::{SIZE_VOFFSET, TailOffset, UOffset, VOffset, VTABLE_METADATA_FIELDS};

/// Vtables written in the current generation, keyed by their exact image.
#[derive(Debug, Default)]
pub struct VTableCache {
    by_image: HashMap<Vec<u8>, UOffset>,
}

impl VTableCache {
    pub fn find(&self, image: &[u8]) -> Option<UOffset> {
        self.by_image.get(image).copied()
    }

    pub fn insert(&mut self, image: Vec<u8>, at: UOffset) {
        self.by_image.insert(image, at);
    }

    pub fn len(&self) -> usize {
        self.by_image.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_image.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_image.clear();
    }
}

/// Encode a vtable image for a table that ends at `object_offset`.
///
/// `fields` holds the tail offset of each written field (0 when absent);
/// `object_end` is the offset at which the table started.
pub(crate) fn encode_vtable(
    fields: &[UOffset],
    object_offset: UOffset,
    object_end: UOffset,
) -> Vec<u8> {
    let used = fields.iter().rposition(|&f| f != 0).map_or(0, |i| i + 1);
    let vtable_len = (VTABLE_METADATA_FIELDS + used) * SIZE_VOFFSET;
    let object_len = object_offset - object_end;

    let mut image = Vec::with_capacity(vtable_len);
    image.extend_from_slice(&(vtable_len as VOffset).to_le_bytes());
    image.extend_from_slice(&(object_len as VOffset).to_le_bytes());
    for &field in &fields[..used] {
        let slot = if field == 0 { 0 } else { object_offset - field };
        image.extend_from_slice(&(slot as VOffset).to_le_bytes());
    }
    image
}

impl Builder {
    /// Number of distinct vtables written in this generation.
    pub fn vtable_count(&self) -> usize {
        self.vtables.len()
    }

    /// Close the open table: write its backpointer and its vtable, or point
    /// it at an identical vtable already in the buffer.
    pub(super) fn write_vtable(&mut self) -> TailOffset {
        self.prepend::<i32>(0);
        let object_offset = self.offset().0;
        let image = encode_vtable(&self.fields, object_offset, self.object_end);

        let backpointer = match self.vtables.find(&image) {
            Some(existing) => {
                tracing::trace!(vtable = existing, object = object_offset, "reused vtable");
                existing as i32 - object_offset as i32
            }
            None => {
                self.prep(SIZE_VOFFSET, image.len());
                self.head -= image.len();
                self.buf[self.head..self.head + image.len()].copy_from_slice(&image);
                let written = self.offset().0;
                tracing::trace!(
                    vtable = written,
                    object = object_offset,
                    len = image.len(),
                    "wrote vtable"
                );
                self.vtables.insert(image, written);
                written as i32 - object_offset as i32
            }
        };

        // Writing the vtable may have grown the buffer.
        let table_pos = self.buf.len() - object_offset as usize;
        self.buf[table_pos..table_pos + 4].copy_from_slice(&backpointer.to_le_bytes());
        TailOffset(object_offset)
    }
}

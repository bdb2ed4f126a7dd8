//! Offset roles and wire constants.
//!
//! Three fixed-width integers give the format its addressing model:
//! - [`UOffset`]: forward distance from a reference location to the data it
//!   refers to, added to that location's absolute position.
//! - [`SOffset`]: signed distance from a table to its vtable, read as
//!   `table_pos - backpointer`.
//! - [`VOffset`]: byte offset of a field inside its owning table, recorded in
//!   the vtable. Zero means the field is absent.

/// Forward offset.
pub type UOffset = u32;
/// Vtable backpointer.
pub type SOffset = i32;
/// Field slot offset.
pub type VOffset = u16;

pub const SIZE_UOFFSET: usize = 4;
pub const SIZE_SOFFSET: usize = 4;
pub const SIZE_VOFFSET: usize = 2;

/// Width of the optional length field in front of a size-prefixed buffer.
pub const SIZE_PREFIX_LEN: usize = 4;

/// Width of the optional file identifier that follows the root offset.
pub const FILE_IDENTIFIER_LEN: usize = 4;

/// Leading vtable entries before the first field slot: vtable byte size and
/// object byte size.
pub const VTABLE_METADATA_FIELDS: usize = 2;

/// Largest buffer addressable with signed 32-bit backpointers (2 GiB).
pub const MAX_BUFFER_SIZE: usize = 1 << 31;

/// Vtable byte offset of the field declared at index `slot`.
///
/// Reader and mutator accessors address fields by this value; the builder
/// addresses them by index.
#[inline]
pub const fn field_offset(slot: usize) -> VOffset {
    ((VTABLE_METADATA_FIELDS + slot) * SIZE_VOFFSET) as VOffset
}

/// Location of written data, measured backwards from the tail of the
/// builder's buffer.
///
/// Tail offsets stay valid while the buffer grows toward its head; they are
/// only resolved to absolute positions when something refers to them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct TailOffset(pub UOffset);

impl TailOffset {
    #[inline]
    pub fn value(self) -> UOffset {
        self.0
    }

    /// Absolute position of this offset inside a buffer of `buf_len` bytes
    /// whose tail coincides with the builder's tail.
    #[inline]
    pub fn resolve(self, buf_len: usize) -> usize {
        buf_len - self.0 as usize
    }
}

impl std::fmt::Display for TailOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read a little-endian u16 from bytes at the given offset.
#[inline]
pub(crate) fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Read a little-endian u32 from bytes at the given offset.
#[inline]
pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Read a little-endian i32 from bytes at the given offset.
#[inline]
pub(crate) fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    read_u32_le(bytes, offset) as i32
}

/// Follow the forward offset stored at `loc`.
#[inline]
pub(crate) fn follow_uoffset(bytes: &[u8], loc: usize) -> usize {
    loc + read_u32_le(bytes, loc) as usize
}

/// Padding needed so that `used + padding` is a multiple of `align`.
///
/// `align` must be a power of two.
#[inline]
pub(crate) fn padding_for(used: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two(), "alignment {align} is not a power of two");
    used.wrapping_neg() & (align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_offsets_skip_metadata() {
        assert_eq!(field_offset(0), 4);
        assert_eq!(field_offset(1), 6);
        assert_eq!(field_offset(16), 36);
    }

    #[test]
    fn padding_rounds_up_to_alignment() {
        assert_eq!(padding_for(0, 4), 0);
        assert_eq!(padding_for(1, 4), 3);
        assert_eq!(padding_for(5, 4), 3);
        assert_eq!(padding_for(8, 8), 0);
        assert_eq!(padding_for(13, 1), 0);
    }

    #[test]
    fn tail_offset_resolves_from_end() {
        assert_eq!(TailOffset(12).resolve(40), 28);
        assert_eq!(TailOffset(0).resolve(40), 40);
    }

    #[test]
    fn little_endian_reads() {
        let bytes = [0x88, 0x77, 0x66, 0x55, 0xF0, 0xFF, 0xFF, 0xFF];
        assert_eq!(read_u16_le(&bytes, 0), 0x7788);
        assert_eq!(read_u32_le(&bytes, 0), 0x5566_7788);
        assert_eq!(read_i32_le(&bytes, 4), -16);
    }
}

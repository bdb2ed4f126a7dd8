use crate::error::ReadError;
use crate::offsets::{FILE_IDENTIFIER_LEN, SIZE_PREFIX_LEN, SIZE_UOFFSET, read_u32_le};
use crate::structs::StructView;

use super::table::Table;

fn check_len(buf: &[u8], needed: usize) -> Result<(), ReadError> {
    if buf.len() < needed {
        return Err(ReadError::BufferTooShort {
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Position of the root object of a buffer whose root offset is at `base`.
pub fn root_loc(buf: &[u8], base: usize) -> Result<usize, ReadError> {
    check_len(buf, base + SIZE_UOFFSET)?;
    let loc = base + read_u32_le(buf, base) as usize;
    if loc >= buf.len() {
        return Err(ReadError::OffsetOutOfBounds {
            offset: loc,
            len: buf.len(),
        });
    }
    Ok(loc)
}

pub fn root_table(buf: &[u8]) -> Result<Table<'_>, ReadError> {
    root_table_at(buf, 0)
}

pub fn root_table_at(buf: &[u8], base: usize) -> Result<Table<'_>, ReadError> {
    Ok(Table::new(buf, root_loc(buf, base)?))
}

/// Root table of a buffer that starts with a 4-byte length.
pub fn size_prefixed_root_table(buf: &[u8]) -> Result<Table<'_>, ReadError> {
    size_prefixed_root_table_at(buf, 0)
}

pub fn size_prefixed_root_table_at(buf: &[u8], base: usize) -> Result<Table<'_>, ReadError> {
    root_table_at(buf, base + SIZE_PREFIX_LEN)
}

/// A buffer finished with a struct as its root.
pub fn root_struct(buf: &[u8]) -> Result<StructView<'_>, ReadError> {
    Ok(StructView::new(buf, root_loc(buf, 0)?))
}

/// The length stored in front of a size-prefixed buffer at `base`.
pub fn size_prefix(buf: &[u8], base: usize) -> Result<u32, ReadError> {
    check_len(buf, base + SIZE_PREFIX_LEN)?;
    Ok(read_u32_le(buf, base))
}

/// Whether the buffer carries `identifier` right after its root offset.
pub fn buffer_has_identifier(
    buf: &[u8],
    identifier: [u8; FILE_IDENTIFIER_LEN],
    size_prefixed: bool,
) -> bool {
    let start = SIZE_UOFFSET + if size_prefixed { SIZE_PREFIX_LEN } else { 0 };
    buf.get(start..start + FILE_IDENTIFIER_LEN) == Some(&identifier[..])
}

//! Zero-copy access to finished buffers.
//!
//! Views borrow the buffer and decode on demand. Only root resolution is
//! bounds-checked with an error; everything below it trusts the buffer.

mod root;
mod table;
mod union;
mod vector;


pub use root::{
    buffer_has_identifier, root_loc, root_struct, root_table, root_table_at, size_prefix,
    size_prefixed_root_table, size_prefixed_root_table_at,
};
pub use table::{Table, VTable};
pub use union::{UNION_NONE, UnionVariant};
pub use vector::{Element, Vector, VectorIter};

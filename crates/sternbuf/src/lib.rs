#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Zero-copy binary object runtime.
//!
//! - [`Builder`] serializes an object graph back-to-front into one buffer,
//!   deduplicating vtables and shared strings.
//! - [`Table`], [`Vector`] and [`StructView`] read a finished buffer in place.
//! - [`TableMut`] rewrites scalar fields in place.
//! - [`Pack`] / [`Unpack`] convert between views and owned native trees.
//!
//! Accessor layers address fields two ways: the builder takes a slot index,
//! readers and mutators take the slot's vtable offset, [`field_offset`].

pub mod builder;
pub mod error;
pub mod mutate;
pub mod object;
pub mod offsets;
pub mod options;
pub mod reader;
pub mod scalar;
pub mod structs;


pub use builder::{Builder, Nesting, VTableCache};
pub use error::{BuildError, ReadError};
pub use mutate::{StructMut, TableMut, root_table_mut, size_prefixed_root_table_mut};
pub use object::{Pack, Unpack, pack_finished, pack_vector_of_tables, unpack_vector};
pub use offsets::{
    FILE_IDENTIFIER_LEN, MAX_BUFFER_SIZE, SIZE_PREFIX_LEN, SOffset, TailOffset, UOffset, VOffset,
    field_offset,
};
pub use options::{BuilderOptions, FloatDefaultPolicy};
pub use reader::{
    Element, Table, UNION_NONE, UnionVariant, VTable, Vector, VectorIter, buffer_has_identifier,
    root_loc, root_struct, root_table, root_table_at, size_prefix, size_prefixed_root_table,
    size_prefixed_root_table_at,
};
pub use scalar::Scalar;
pub use structs::{InlineStruct, StructView};

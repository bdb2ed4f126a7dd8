//! Bridge between zero-copy views and owned native trees.
//!
//! Each generated table type implements [`Unpack`] on its view and [`Pack`]
//! on its native counterpart. Packing writes children before parents, since
//! a parent's offset slots must refer to data that already exists.

use crate::builder::Builder;
use crate::error::BuildError;
use crate::offsets::TailOffset;
use crate::reader::{Element, Vector};

/// An owned value that can serialize itself into a builder.
pub trait Pack {
    fn pack(&self, builder: &mut Builder) -> Result<TailOffset, BuildError>;
}

/// A view that can materialize an owned copy of itself.
pub trait Unpack {
    type Native;

    fn unpack(&self) -> Self::Native;
}

impl<P: Pack + ?Sized> Pack for Box<P> {
    fn pack(&self, builder: &mut Builder) -> Result<TailOffset, BuildError> {
        (**self).pack(builder)
    }
}

/// Pack each item, then a vector referring to them in order.
pub fn pack_vector_of_tables<P: Pack>(
    builder: &mut Builder,
    items: &[P],
) -> Result<TailOffset, BuildError> {
    let offsets = items
        .iter()
        .map(|item| item.pack(builder))
        .collect::<Result<Vec<_>, _>>()?;
    builder.create_vector_of_tables(&offsets)
}

pub fn unpack_vector<'a, T>(vector: Vector<'a, T>) -> Vec<T::Native>
where
    T: Element<'a> + Unpack,
{
    vector.iter().map(|item| item.unpack()).collect()
}

/// Pack `root` as the root of a fresh generation and return the finished
/// bytes.
pub fn pack_finished<'b, P: Pack + ?Sized>(
    builder: &'b mut Builder,
    root: &P,
    size_prefixed: bool,
) -> Result<&'b [u8], BuildError> {
    builder.reset();
    let off = root.pack(builder)?;
    builder.finish(off, size_prefixed)?;
    builder.finished_data()
}

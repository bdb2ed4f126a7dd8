use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::error::ReadError;
use crate::offsets::{SIZE_UOFFSET, follow_uoffset, read_u32_le};
use crate::scalar::Scalar;

use super::table::{Table, read_byte_slice, read_str};

/// A type stored in a vector slot of fixed width.
pub trait Element<'a>: Sized {
    /// Bytes per slot.
    const WIDTH: usize;

    /// Decode the slot at absolute position `loc`.
    fn read_at(buf: &'a [u8], loc: usize) -> Self;
}

impl<'a, T: Scalar> Element<'a> for T {
    const WIDTH: usize = T::SIZE;

    #[inline]
    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        T::read_le(&buf[loc..])
    }
}

/// Strings decode per element; one bad entry does not poison the vector.
impl<'a> Element<'a> for Result<&'a str, ReadError> {
    const WIDTH: usize = SIZE_UOFFSET;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        read_str(buf, follow_uoffset(buf, loc))
    }
}

/// Raw bytes of a `[string]` or `[[u8]]` element.
impl<'a> Element<'a> for &'a [u8] {
    const WIDTH: usize = SIZE_UOFFSET;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        read_byte_slice(buf, follow_uoffset(buf, loc))
    }
}

impl<'a> Element<'a> for Table<'a> {
    const WIDTH: usize = SIZE_UOFFSET;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        Table::new(buf, follow_uoffset(buf, loc))
    }
}

/// Zero-copy view of a vector: a u32 length followed by fixed-width slots.
pub struct Vector<'a, T> {
    buf: &'a [u8],
    loc: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> Clone for Vector<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Vector<'_, T> {}

impl<T> std::fmt::Debug for Vector<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector")
            .field("loc", &self.loc)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, T: Element<'a>> Vector<'a, T> {
    /// View the vector whose length word is at `loc`.
    pub fn new(buf: &'a [u8], loc: usize) -> Self {
        Self {
            buf,
            loc,
            len: read_u32_le(buf, loc) as usize,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute position of slot `idx`.
    pub fn slot_loc(&self, idx: usize) -> usize {
        self.loc + SIZE_UOFFSET + idx * T::WIDTH
    }

    pub fn get(&self, idx: usize) -> T {
        assert!(
            idx < self.len,
            "vector index {idx} out of bounds (len {})",
            self.len
        );
        T::read_at(self.buf, self.slot_loc(idx))
    }

    pub fn try_get(&self, idx: usize) -> Option<T> {
        (idx < self.len).then(|| T::read_at(self.buf, self.slot_loc(idx)))
    }

    pub fn first(&self) -> Option<T> {
        self.try_get(0)
    }

    pub fn last(&self) -> Option<T> {
        self.len.checked_sub(1).map(|idx| self.get(idx))
    }

    /// The raw slot bytes.
    pub fn bytes(&self) -> &'a [u8] {
        let start = self.slot_loc(0);
        &self.buf[start..start + self.len * T::WIDTH]
    }

    pub fn iter(&self) -> VectorIter<'a, T> {
        VectorIter {
            vector: *self,
            front: 0,
            back: self.len,
        }
    }

    /// Binary search a vector sorted ascending under `compare`.
    ///
    /// `compare(element, key)` must order elements the same way they were
    /// ordered when the vector was written. Returns `None` when no element
    /// matches.
    pub fn lookup_by_key<K: ?Sized>(
        &self,
        key: &K,
        mut compare: impl FnMut(&T, &K) -> Ordering,
    ) -> Option<T> {
        let mut lo = 0;
        let mut hi = self.len;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let elem = self.get(mid);
            match compare(&elem, key) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(elem),
            }
        }
        None
    }
}

pub struct VectorIter<'a, T> {
    vector: Vector<'a, T>,
    front: usize,
    back: usize,
}

impl<'a, T: Element<'a>> Iterator for VectorIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let item = self.vector.get(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Element<'a>> DoubleEndedIterator for VectorIter<'a, T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.vector.get(self.back))
    }
}

impl<'a, T: Element<'a>> ExactSizeIterator for VectorIter<'a, T> {}

impl<'a, T: Element<'a>> IntoIterator for Vector<'a, T> {
    type Item = T;
    type IntoIter = VectorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Fixed-width little-endian scalars.

use crate::options::FloatDefaultPolicy;

/// A value stored inline with a fixed width and little-endian byte order.
///
/// Every multi-byte scalar is written at an address aligned to its own width,
/// so [`SIZE`](Self::SIZE) doubles as the alignment.
pub trait Scalar: Copy + PartialEq + std::fmt::Debug {
    const SIZE: usize;

    /// Decode from the first `SIZE` bytes of `bytes`.
    fn read_le(bytes: &[u8]) -> Self;

    /// Encode into the first `SIZE` bytes of `out`.
    fn write_le(self, out: &mut [u8]);

    /// Whether a slot holding `self` may be omitted because it equals the
    /// field's declared `default`.
    #[inline]
    fn matches_default(self, default: Self, _policy: FloatDefaultPolicy) -> bool {
        self == default
    }
}

macro_rules! impl_int_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut arr = [0u8; std::mem::size_of::<$t>()];
                arr.copy_from_slice(&bytes[..Self::SIZE]);
                <$t>::from_le_bytes(arr)
            }

            #[inline]
            fn write_le(self, out: &mut [u8]) {
                out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

impl_int_scalar!(u8, i8, u16, i16, u32, i32, u64, i64);

// Floats compare by bit pattern so a NaN default can be suppressed and a
// negative zero survives a zero default.
macro_rules! impl_float_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut arr = [0u8; std::mem::size_of::<$t>()];
                arr.copy_from_slice(&bytes[..Self::SIZE]);
                <$t>::from_le_bytes(arr)
            }

            #[inline]
            fn write_le(self, out: &mut [u8]) {
                out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn matches_default(self, default: Self, policy: FloatDefaultPolicy) -> bool {
                match policy {
                    FloatDefaultPolicy::BitPattern => self.to_bits() == default.to_bits(),
                    FloatDefaultPolicy::AlwaysStore => false,
                }
            }
        }
    )*};
}

impl_float_scalar!(f32, f64);

impl Scalar for bool {
    const SIZE: usize = 1;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn write_le(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }
}

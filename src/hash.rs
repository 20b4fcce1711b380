//! Typed hash dispatch.
//!
//! Values accepted by a sketch are either fixed-width scalars or contiguous sequences of
//! them. Both are hashed by feeding their byte image into [`murmur3_x86_32`] with seed `0`.
//! The set of supported types is closed: anything else fails to compile.
//!
//! Numeric values use their little-endian byte image, `bool` is a single `0`/`1` byte,
//! `char` is its `u32` scalar value and `str` is its UTF-8 bytes. A sequence hashes the
//! concatenation of its elements' images, so a scalar and a one-element sequence holding
//! it hash the same.

use std::mem::size_of;

use crate::murmur::{murmur3_x86_32, Murmur3};

/// Seed used for all typed hashing
const SEED: u32 = 0;

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width value that can be an element of a hashed sequence.
pub trait Scalar: sealed::Sealed + Copy {
    /// Byte image of the value
    type Bytes: AsRef<[u8]>;

    fn to_hash_bytes(self) -> Self::Bytes;

    /// Hash a contiguous sequence of values
    #[inline]
    fn hash_slice(values: &[Self]) -> u32 {
        let mut state = Murmur3::new(SEED);
        for &value in values {
            state.write(value.to_hash_bytes().as_ref());
        }
        state.finish()
    }
}

/// Value that can be added to a [`HyperLogLog`](crate::HyperLogLog) sketch.
pub trait HashInput: sealed::Sealed {
    /// 32-bit hash of the value
    fn hash32(&self) -> u32;
}

macro_rules! impl_numeric_scalar {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                type Bytes = [u8; size_of::<$t>()];

                #[inline]
                fn to_hash_bytes(self) -> Self::Bytes {
                    self.to_le_bytes()
                }
            }

            impl HashInput for $t {
                #[inline]
                fn hash32(&self) -> u32 {
                    murmur3_x86_32(&self.to_le_bytes(), SEED)
                }
            }
        )*
    };
}

impl_numeric_scalar!(u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl sealed::Sealed for u8 {}

impl Scalar for u8 {
    type Bytes = [u8; 1];

    #[inline]
    fn to_hash_bytes(self) -> Self::Bytes {
        [self]
    }

    /// Bytes are their own image, no need to go through the incremental state
    #[inline]
    fn hash_slice(values: &[Self]) -> u32 {
        murmur3_x86_32(values, SEED)
    }
}

impl HashInput for u8 {
    #[inline]
    fn hash32(&self) -> u32 {
        murmur3_x86_32(&[*self], SEED)
    }
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    type Bytes = [u8; 1];

    #[inline]
    fn to_hash_bytes(self) -> Self::Bytes {
        [u8::from(self)]
    }
}

impl HashInput for bool {
    #[inline]
    fn hash32(&self) -> u32 {
        murmur3_x86_32(&self.to_hash_bytes(), SEED)
    }
}

impl sealed::Sealed for char {}

impl Scalar for char {
    type Bytes = [u8; 4];

    #[inline]
    fn to_hash_bytes(self) -> Self::Bytes {
        u32::from(self).to_le_bytes()
    }
}

impl HashInput for char {
    #[inline]
    fn hash32(&self) -> u32 {
        murmur3_x86_32(&self.to_hash_bytes(), SEED)
    }
}

impl<S: Scalar> sealed::Sealed for [S] {}

impl<S: Scalar> HashInput for [S] {
    #[inline]
    fn hash32(&self) -> u32 {
        S::hash_slice(self)
    }
}

impl<S: Scalar, const N: usize> sealed::Sealed for [S; N] {}

impl<S: Scalar, const N: usize> HashInput for [S; N] {
    #[inline]
    fn hash32(&self) -> u32 {
        S::hash_slice(self)
    }
}

impl<S: Scalar> sealed::Sealed for Vec<S> {}

impl<S: Scalar> HashInput for Vec<S> {
    #[inline]
    fn hash32(&self) -> u32 {
        S::hash_slice(self)
    }
}

impl sealed::Sealed for str {}

impl HashInput for str {
    #[inline]
    fn hash32(&self) -> u32 {
        murmur3_x86_32(self.as_bytes(), SEED)
    }
}

impl sealed::Sealed for String {}

impl HashInput for String {
    #[inline]
    fn hash32(&self) -> u32 {
        self.as_str().hash32()
    }
}

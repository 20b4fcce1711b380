//! ## HyperLogLog estimator
//! Estimates the number of distinct values added to it using `2^P` registers.
//!
//! [Original HyperLogLog paper](http://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! Each added value is hashed to a 32-bit `h`:
//! - the top `P` bits of `h` select a register,
//! - the rank is the number of trailing zeros of `h`, capped at `32 - P`, plus one,
//! - the selected register keeps the maximum rank seen.
//!
//! The estimate is the bias-corrected harmonic mean of `2^register` with two corrections:
//! - small range (`E <= 2.5 * M`): linear counting over zero registers, if there are any.
//!   When no register is zero the raw estimate is used as is, even though it is known to
//!   be biased in this range.
//! - large range (`E > 2^32 / 30`): correction for hash collisions in the 32-bit space.

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::hash::HashInput;
use crate::precision::Precision;
use crate::registers::Registers;

/// Size of the 32-bit hash space
const TWO_POW_32: f64 = 4_294_967_296.0;

/// HyperLogLog sketch counting distinct values of type `T`.
///
/// ```
/// use hll_sketch::HyperLogLog;
///
/// let mut hll = HyperLogLog::<u32>::new(12).unwrap();
/// for i in 0..1000 {
///     hll.add(&(i % 100));
/// }
/// assert_eq!(hll.count(), 100);
/// ```
pub struct HyperLogLog<T: ?Sized> {
    precision: Precision,
    /// Bias correction constant `alpha * M^2`
    alpha_m_squared: f64,
    registers: Registers,
    _marker: PhantomData<fn(&T)>,
}

impl<T: HashInput + ?Sized> HyperLogLog<T> {
    /// Create new sketch with `2^precision` registers.
    ///
    /// Fails with [`Error::InvalidParameter`] unless `precision` is in `[4, 30]`.
    pub fn new(precision: u8) -> Result<Self> {
        Ok(Self::with_precision(Precision::new(precision)?))
    }

    /// Create new sketch with already validated precision
    pub fn with_precision(precision: Precision) -> Self {
        let m = precision.register_count();
        debug!(precision = precision.get(), registers = m, "creating HyperLogLog sketch");
        Self {
            precision,
            alpha_m_squared: alpha(m) * (m as f64) * (m as f64),
            registers: Registers::new(m),
            _marker: PhantomData,
        }
    }

    /// Create new sketch with the smallest precision providing given typical `relative_error`
    pub fn with_relative_error(relative_error: f64) -> Result<Self> {
        Ok(Self::with_precision(Precision::for_relative_error(
            relative_error,
        )?))
    }

    /// Add a value into the sketch
    #[inline]
    pub fn add(&mut self, value: &T) {
        self.add_hash(value.hash32());
    }

    /// Add an already hashed value into the sketch
    #[inline]
    pub fn add_hash(&mut self, hash: u32) {
        let rank_bits = self.precision.rank_bits();
        let idx = (hash >> rank_bits) as usize;
        let rank = hash.trailing_zeros().min(rank_bits) + 1;
        self.registers.raise(idx, rank as u8);
    }

    /// Return cardinality estimate.
    ///
    /// Once the raw estimate covers the whole 32-bit hash space the result saturates at
    /// `2^32`, which on 32-bit targets is clamped further to `usize::MAX`.
    pub fn count(&self) -> usize {
        let m = self.registers.len() as f64;
        let mut estimate = self.alpha_m_squared / self.registers.harmonic_sum();

        if estimate <= 2.5 * m {
            let zeros = self.registers.zeros();
            if zeros > 0 {
                estimate = m * (m / zeros as f64).ln();
            }
        } else if estimate > TWO_POW_32 / 30.0 {
            let ratio = estimate / TWO_POW_32;
            if ratio >= 1.0 {
                // the whole hash space is saturated, correction is undefined
                return TWO_POW_32 as usize;
            }
            estimate = -TWO_POW_32 * (1.0 - ratio).ln();
        }

        estimate as usize
    }

    /// Merge `rhs` into this sketch, making it estimate the union of both inputs.
    ///
    /// Fails with [`Error::IncompatibleSketch`] if sketches have different precision.
    pub fn merge(&mut self, rhs: &Self) -> Result<&mut Self> {
        if self.precision != rhs.precision {
            debug!(
                lhs = self.precision.get(),
                rhs = rhs.precision.get(),
                "rejecting merge of sketches with different precision"
            );
            return Err(Error::IncompatibleSketch {
                left: self.precision.get(),
                right: rhs.precision.get(),
            });
        }
        self.registers.merge_max(&rhs.registers);
        trace!(precision = self.precision.get(), "merged HyperLogLog sketch");
        Ok(self)
    }

    /// Return new sketch estimating the union of `self` and `rhs`
    pub fn union(&self, rhs: &Self) -> Result<Self> {
        let mut res = self.clone();
        res.merge(rhs)?;
        Ok(res)
    }

    /// Reset all registers to 0
    pub fn clear(&mut self) {
        trace!(precision = self.precision.get(), "clearing HyperLogLog sketch");
        self.registers.fill(0);
    }

    /// Typical relative error of estimates, `1.04 / sqrt(M)`
    #[inline]
    pub fn relative_error(&self) -> f64 {
        self.precision.relative_error()
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of registers `M`
    #[inline]
    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Return whether nothing was added since creation or last `clear`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|r| r == 0)
    }

    /// Return memory size of the sketch
    #[inline]
    pub fn size_of(&self) -> usize {
        size_of::<Self>() - size_of::<Registers>() + self.registers.size_of()
    }
}

impl<T: HashInput + ?Sized> Default for HyperLogLog<T> {
    fn default() -> Self {
        Self::with_precision(Precision::default())
    }
}

impl<T: ?Sized> Clone for HyperLogLog<T> {
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            alpha_m_squared: self.alpha_m_squared,
            registers: self.registers.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> PartialEq for HyperLogLog<T> {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.registers == other.registers
    }
}

impl<T: HashInput + ?Sized> Debug for HyperLogLog<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, registers: {}, count: {} }}",
            self.precision,
            self.register_count(),
            self.count()
        )
    }
}

impl<'a, T: HashInput + ?Sized + 'a> Extend<&'a T> for HyperLogLog<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: HashInput> Extend<T> for HyperLogLog<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(&value);
        }
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

//! Sketch precision: number of hash bits used to select a register.
//!
//! Precision `P` gives `2^P` registers and a typical relative error of `1.04 / sqrt(2^P)`:
//! - P = 4:  16 registers, 26%
//! - P = 12: 4096 registers, 1.62%
//! - P = 15: 32768 registers, 0.57% (default)
//! - P = 18: 262144 registers, 0.2%
//!
//! Supported range is `[4, 30]`, both ends inclusive. The upper bound keeps at least two
//! hash bits for the rank, and bounds the `32 - P` shift used on every insert.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u8);

impl Precision {
    /// Smallest supported precision
    pub const MIN: u8 = 4;
    /// Largest supported precision
    pub const MAX: u8 = 30;
    /// Precision used by `Default`
    pub const DEFAULT: Precision = Precision(15);

    /// Validate precision `p`
    pub fn new(p: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "precision {} is outside of supported range [{}, {}]",
                p,
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(p))
    }

    /// Smallest precision whose typical relative error does not exceed `error`.
    ///
    /// Errors coarser than what `MIN` provides resolve to `MIN`.
    pub fn for_relative_error(error: f64) -> Result<Self> {
        if !error.is_finite() || error <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "relative error must be a positive number, got {}",
                error
            )));
        }
        let registers = (1.04 / error).powi(2);
        let p = registers.log2().ceil().max(f64::from(Self::MIN));
        if p > f64::from(Self::MAX) {
            return Err(Error::InvalidParameter(format!(
                "relative error {} requires precision above {}",
                error,
                Self::MAX
            )));
        }
        Ok(Self(p as u8))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Number of registers, `2^P`
    #[inline]
    pub const fn register_count(self) -> usize {
        1 << self.0
    }

    /// Number of hash bits left for the rank, `32 - P`
    #[inline]
    pub(crate) const fn rank_bits(self) -> u32 {
        32 - self.0 as u32
    }

    /// Typical relative error of estimates, `1.04 / sqrt(2^P)`
    #[inline]
    pub fn relative_error(self) -> f64 {
        1.04 / (self.register_count() as f64).sqrt()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Precision {
    type Error = Error;

    fn try_from(p: u8) -> Result<Self> {
        Self::new(p)
    }
}

impl From<Precision> for u8 {
    fn from(p: Precision) -> Self {
        p.0
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(4 => Ok(4); "lower bound")]
    #[test_case(12 => Ok(12); "middle of range")]
    #[test_case(30 => Ok(30); "upper bound")]
    #[test_case(0 => Err(()); "zero")]
    #[test_case(3 => Err(()); "below lower bound")]
    #[test_case(31 => Err(()); "above upper bound")]
    #[test_case(255 => Err(()); "max u8")]
    fn test_new(p: u8) -> std::result::Result<u8, ()> {
        Precision::new(p).map(Precision::get).map_err(|_| ())
    }

    #[test]
    fn test_invalid_precision_message() {
        let err = Precision::try_from(31).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter: precision 31 is outside of supported range [4, 30]"
        );
    }

    #[test_case(0.5 => Ok(4); "coarse error clamps to min")]
    #[test_case(0.27 => Ok(4); "just below min")]
    #[test_case(0.0163 => Ok(12); "p12")]
    #[test_case(0.01 => Ok(14); "one percent")]
    #[test_case(0.0058 => Ok(15); "p15")]
    #[test_case(0.00001 => Err(()); "too precise")]
    #[test_case(0.0 => Err(()); "zero")]
    #[test_case(-0.1 => Err(()); "negative")]
    #[test_case(f64::NAN => Err(()); "nan")]
    fn test_for_relative_error(error: f64) -> std::result::Result<u8, ()> {
        Precision::for_relative_error(error)
            .map(Precision::get)
            .map_err(|_| ())
    }

    #[test]
    fn test_derived_values() {
        let p = Precision::default();
        assert_eq!(p.get(), 15);
        assert_eq!(p.register_count(), 32768);
        assert_eq!(p.rank_bits(), 17);
        assert!((p.relative_error() - 0.005_745).abs() < 1e-6);
        assert_eq!(p.to_string(), "15");
        assert_eq!(u8::from(p), 15);
    }
}

//! `hll-sketch` estimates the number of distinct elements in a stream or dataset using a
//! HyperLogLog sketch over 32-bit MurmurHash3 hashes.
//!
//! A sketch with precision `P` uses `2^P` one-byte registers and has a typical relative
//! error of `1.04 / sqrt(2^P)`. Sketches of equal precision can be merged to estimate the
//! cardinality of the union of their inputs.
//!
//! ```
//! use hll_sketch::HyperLogLog;
//!
//! let mut lhs = HyperLogLog::<str>::new(14).unwrap();
//! let mut rhs = HyperLogLog::<str>::new(14).unwrap();
//! lhs.extend(["apple", "banana", "cherry"]);
//! rhs.extend(["cherry", "durian"]);
//!
//! lhs.merge(&rhs).unwrap();
//! assert_eq!(lhs.count(), 4);
//! ```
//!
//! Sketches are not internally synchronized: keep one sketch per thread and merge them, or
//! put a shared sketch behind a lock.
pub mod error;
pub mod hash;
pub mod hyperloglog;
pub mod murmur;
pub mod precision;
pub mod registers;

pub use error::{Error, Result};
pub use hash::{HashInput, Scalar};
pub use hyperloglog::HyperLogLog;
pub use murmur::{murmur3_x86_32, Murmur3};
pub use precision::Precision;
pub use registers::Registers;

//! ## Register array
//! Fixed-length array of HyperLogLog registers, each holding the maximum rank observed
//! for the hashes routed to it. The array is allocated once; updates, merges and
//! resets work in place.

use std::fmt::{Debug, Formatter};
use std::mem::{size_of, size_of_val};

#[derive(Clone, PartialEq, Eq)]
pub struct Registers {
    ranks: Box<[u8]>,
}

impl Registers {
    /// Create `len` registers set to 0
    pub fn new(len: usize) -> Self {
        Self {
            ranks: vec![0; len].into_boxed_slice(),
        }
    }

    /// Number of registers
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Return rank stored in register `idx`, if it exists
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u8> {
        self.ranks.get(idx).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.ranks.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.ranks
    }

    /// Raise register `idx` to `rank` if `rank` is larger than its current value.
    /// Returns true if the register changed.
    #[inline]
    pub fn raise(&mut self, idx: usize, rank: u8) -> bool {
        match self.ranks.get_mut(idx) {
            Some(register) if rank > *register => {
                *register = rank;
                true
            }
            _ => false,
        }
    }

    /// Set every register to `value`
    #[inline]
    pub fn fill(&mut self, value: u8) {
        self.ranks.fill(value);
    }

    /// Replace every register with the maximum of itself and the matching register of `rhs`.
    ///
    /// Both arrays are expected to have the same length; extra registers on either side
    /// are left untouched.
    #[inline]
    pub fn merge_max(&mut self, rhs: &Registers) {
        debug_assert_eq!(self.len(), rhs.len());
        for (l, &r) in self.ranks.iter_mut().zip(rhs.ranks.iter()) {
            *l = (*l).max(r);
        }
    }

    /// Return new registers holding element-wise maximum of `a` and `b`
    pub fn element_wise_max(a: &Registers, b: &Registers) -> Registers {
        let mut res = a.clone();
        res.merge_max(b);
        res
    }

    /// Number of registers still set to 0
    #[inline]
    pub fn zeros(&self) -> usize {
        self.ranks.iter().filter(|&&r| r == 0).count()
    }

    /// Sum of `2^-rank` over all registers. Exact for every `u8` rank.
    #[inline]
    pub fn harmonic_sum(&self) -> f64 {
        self.ranks
            .iter()
            .map(|&r| 0.5f64.powi(i32::from(r)))
            .sum()
    }

    /// Return memory size of registers
    #[inline]
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.ranks)
    }
}

impl Debug for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ len: {}, zeros: {} }}", self.len(), self.zeros())
    }
}

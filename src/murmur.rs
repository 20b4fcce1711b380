//! ## MurmurHash3, x86 32-bit variant
//! Non-cryptographic hash used to spread sketch inputs uniformly over `[0, 2^32)`.
//!
//! [Reference implementation](https://github.com/aappleby/smhasher/blob/master/src/MurmurHash3.cpp)
//!
//! Input is consumed in 4-byte little-endian chunks. The trailing 1..3 bytes are mixed
//! like a chunk but folded into the state with a plain xor, then the total length and
//! the finalization mix ("avalanche") are applied.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const R1: u32 = 15;
const R2: u32 = 13;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;

/// Hash `bytes` with the given `seed`.
///
/// This is a `const fn`, so hashes of constant inputs are computed at compile time:
///
/// ```
/// use hll_sketch::murmur3_x86_32;
///
/// const HASH: u32 = murmur3_x86_32(b"test", 0);
/// assert_eq!(HASH, 0xba6b_d213);
/// ```
pub const fn murmur3_x86_32(bytes: &[u8], seed: u32) -> u32 {
    let len = bytes.len();
    let mut h = seed;

    let mut i = 0;
    while i + 4 <= len {
        let k = u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        h = mix_chunk(h, k);
        i += 4;
    }

    let tail = match len - i {
        3 => u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], 0]),
        2 => u32::from_le_bytes([bytes[i], bytes[i + 1], 0, 0]),
        1 => u32::from_le_bytes([bytes[i], 0, 0, 0]),
        _ => 0,
    };
    if len - i > 0 {
        h ^= mix_k(tail);
    }

    fmix(h ^ len as u32)
}

/// Incremental MurmurHash3 x86_32 state.
///
/// Splitting the input across several [`Murmur3::write`] calls does not change the
/// result: `finish` always equals [`murmur3_x86_32`] over the concatenated input.
#[derive(Debug, Clone)]
pub struct Murmur3 {
    h: u32,
    /// Bytes not yet forming a full 4-byte chunk
    tail: [u8; 4],
    tail_len: usize,
    /// Total number of bytes written (wrapping, as the length is mixed in as `u32`)
    len: u32,
}

impl Murmur3 {
    /// Create new hashing state with given `seed`
    #[inline]
    pub const fn new(seed: u32) -> Self {
        Self {
            h: seed,
            tail: [0; 4],
            tail_len: 0,
            len: 0,
        }
    }

    /// Feed `bytes` into the hash state
    #[inline]
    pub fn write(&mut self, mut bytes: &[u8]) {
        self.len = self.len.wrapping_add(bytes.len() as u32);

        // complete a chunk left over from the previous write first
        if self.tail_len > 0 {
            let take = (4 - self.tail_len).min(bytes.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&bytes[..take]);
            self.tail_len += take;
            bytes = &bytes[take..];
            if self.tail_len < 4 {
                return;
            }
            self.h = mix_chunk(self.h, u32::from_le_bytes(self.tail));
            self.tail_len = 0;
        }

        let mut chunks = bytes.chunks_exact(4);
        for chunk in &mut chunks {
            let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            self.h = mix_chunk(self.h, k);
        }

        let rest = chunks.remainder();
        self.tail[..rest.len()].copy_from_slice(rest);
        self.tail_len = rest.len();
    }

    /// Return the hash of all bytes written so far
    #[inline]
    pub fn finish(&self) -> u32 {
        let mut h = self.h;
        if self.tail_len > 0 {
            let mut tail = [0u8; 4];
            tail[..self.tail_len].copy_from_slice(&self.tail[..self.tail_len]);
            h ^= mix_k(u32::from_le_bytes(tail));
        }
        fmix(h ^ self.len)
    }
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline(always)]
const fn mix_k(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

#[inline(always)]
const fn mix_chunk(h: u32, k: u32) -> u32 {
    (h ^ mix_k(k)).rotate_left(R2).wrapping_mul(M).wrapping_add(N)
}

/// Finalization mix forcing all bits of the hash to avalanche
#[inline(always)]
const fn fmix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

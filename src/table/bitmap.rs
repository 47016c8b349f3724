//! Bit-packed null map (1 bit per row)
//!
//! Bits store validity: 1 = valid, 0 = null. The null map is owned by the
//! caller; transforms only write into it.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Each u64 holds 64 validity bits (LSB = bit 0)
    bits: Vec<u64>,
    /// Total number of rows (not bits)
    len: usize,
}

impl Bitmap {
    /// All rows valid
    pub fn new_all_valid(len: usize) -> Self {
        let words = len.div_ceil(64);
        let mut bits = vec![!0u64; words];

        // Mask off unused bits in last word
        let rem = len % 64;
        if rem != 0 {
            bits[words - 1] = (1u64 << rem) - 1;
        }

        Self { bits, len }
    }

    /// All rows null
    pub fn new_all_null(len: usize) -> Self {
        Self {
            bits: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Validity bit at row i (true = valid)
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "row {} out of bounds for bitmap of {}", i, self.len);
        (self.bits[i >> 6] >> (i & 63)) & 1 == 1
    }

    /// Set validity bit at row i
    #[inline]
    pub fn set(&mut self, i: usize, valid: bool) {
        assert!(i < self.len, "row {} out of bounds for bitmap of {}", i, self.len);
        let mask = 1u64 << (i & 63);
        if valid {
            self.bits[i >> 6] |= mask;
        } else {
            self.bits[i >> 6] &= !mask;
        }
    }

    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        !self.get(i)
    }

    #[inline]
    pub fn set_null(&mut self, i: usize, is_null: bool) {
        self.set(i, !is_null);
    }

    /// Number of null rows
    pub fn null_count(&self) -> usize {
        let valid: usize = self.bits.iter().map(|w| w.count_ones() as usize).sum();
        self.len - valid
    }

    /// Row indices that are null, in order
    pub fn null_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.is_null(i))
    }
}

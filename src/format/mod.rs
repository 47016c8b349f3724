//! Text rendering of packed values
//!
//! - `canonical`: fixed `YYYY-MM-DD HH:MM:SS[.ffffff]` form
//! - `compiler`: runtime `%`-directive formats (MySQL `DATE_FORMAT`)
//!
//! Both render into a fixed-capacity stack buffer; nothing here allocates.

pub mod canonical;
pub mod compiler;

pub use canonical::{to_canonical_string, write_canonical, CanonicalText};
pub use compiler::{date_format, DateFormat, FormatBuffer, FormatItem};

use crate::error::FormatError;

/// Fixed-capacity byte buffer that always keeps one byte for a terminator
#[derive(Clone, Copy)]
pub struct StackBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> StackBuf<N> {
    pub const CAPACITY: usize = N;

    #[inline]
    pub const fn new() -> Self {
        Self { bytes: [0; N], len: 0 }
    }

    /// Rendered bytes, without terminator
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Rendered text; every writer in this module emits ASCII
    #[inline]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn remaining(&self) -> usize {
        N - 1 - self.len
    }

    /// Append one byte; capacity is a caller invariant here
    #[inline]
    pub fn push(&mut self, b: u8) {
        assert!(self.remaining() > 0, "StackBuf<{}> overflow", N);
        self.bytes[self.len] = b;
        self.len += 1;
    }

    /// Append bytes, failing instead of truncating
    #[inline]
    pub fn try_extend(&mut self, src: &[u8]) -> Result<(), FormatError> {
        if src.len() > self.remaining() {
            return Err(FormatError::OutputOverflow);
        }
        self.bytes[self.len..self.len + src.len()].copy_from_slice(src);
        self.len += src.len();
        Ok(())
    }

    /// Append `value` in decimal, left-padded with zeros to `width`
    ///
    /// Negative values get a leading `-` ahead of the padding.
    pub fn try_push_padded(&mut self, value: i64, width: usize) -> Result<(), FormatError> {
        let mut digits = [0u8; 20];
        let n = decimal_digits(value.unsigned_abs(), &mut digits);
        let sign = (value < 0) as usize;
        let pad = width.saturating_sub(n);
        if sign + pad + n > self.remaining() {
            return Err(FormatError::OutputOverflow);
        }
        if value < 0 {
            self.push(b'-');
        }
        for _ in 0..pad {
            self.push(b'0');
        }
        for &d in &digits[20 - n..] {
            self.push(d);
        }
        Ok(())
    }
}

impl<const N: usize> Default for StackBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for StackBuf<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StackBuf").field(&self.as_str()).finish()
    }
}

/// Write `v` right-aligned into `out`, return the digit count
#[inline]
fn decimal_digits(mut v: u64, out: &mut [u8; 20]) -> usize {
    let mut i = out.len();
    loop {
        i -= 1;
        out[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    out.len() - i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_numbers() {
        let mut b = StackBuf::<16>::new();
        b.try_push_padded(7, 2).unwrap();
        b.push(b'|');
        b.try_push_padded(2024, 2).unwrap();
        b.push(b'|');
        b.try_push_padded(0, 3).unwrap();
        b.push(b'|');
        b.try_push_padded(-5, 2).unwrap();
        assert_eq!(b.as_str(), "07|2024|000|-05");
    }

    #[test]
    fn test_overflow_keeps_terminator_slot() {
        let mut b = StackBuf::<4>::new();
        assert!(b.try_extend(b"abc").is_ok());
        assert_eq!(b.try_extend(b"d"), Err(FormatError::OutputOverflow));
        assert_eq!(b.as_str(), "abc");
    }
}

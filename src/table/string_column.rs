//! Variable-width string column: zero-terminated byte runs + end offsets
//!
//! Row i spans `data[offsets[i-1]..offsets[i]]` (with `offsets[-1] = 0`),
//! and every span ends with a `0` terminator. A null row is a lone `0`;
//! only the caller's null map tells it apart from an empty string.

/// Finished string column
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringColumn {
    data: Vec<u8>,
    offsets: Vec<usize>,
}

impl StringColumn {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    fn span(&self, i: usize) -> (usize, usize) {
        let start = if i == 0 { 0 } else { self.offsets[i - 1] };
        (start, self.offsets[i])
    }

    /// Row bytes including the terminator
    pub fn raw(&self, i: usize) -> &[u8] {
        let (start, end) = self.span(i);
        &self.data[start..end]
    }

    /// Row bytes without the terminator
    pub fn bytes(&self, i: usize) -> &[u8] {
        let (start, end) = self.span(i);
        &self.data[start..end - 1]
    }

    /// Row as text; non-UTF-8 rows read as empty
    pub fn get(&self, i: usize) -> &str {
        std::str::from_utf8(self.bytes(i)).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Single-row column holding `s`, used for constant arguments
    pub fn from_constant(s: &str) -> Self {
        let mut builder = StringColumnBuilder::with_capacity(1, s.len() + 1);
        builder.append(s.as_bytes());
        builder.finish()
    }
}

impl<'a> FromIterator<&'a str> for StringColumn {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut builder = StringColumnBuilder::new();
        for s in iter {
            builder.append(s.as_bytes());
        }
        builder.finish()
    }
}

/// Append-only writer for a [`StringColumn`]
///
/// Owns the write cursor: each append copies the row, adds the terminator
/// and records the new end offset. Rows land in append order.
#[derive(Debug, Default)]
pub struct StringColumnBuilder {
    data: Vec<u8>,
    offsets: Vec<usize>,
}

impl StringColumnBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `rows` rows of up to `max_row_bytes` each (terminator
    /// included). An estimate: appends past it still grow the buffer.
    pub fn with_capacity(rows: usize, max_row_bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(rows.saturating_mul(max_row_bytes)),
            offsets: Vec::with_capacity(rows),
        }
    }

    /// Append one row. Like a C string, the row ends at the first NUL in
    /// `bytes`; anything after it is dropped.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.data.extend_from_slice(&bytes[..len]);
        self.data.push(0);
        self.offsets.push(self.data.len());
    }

    /// Append a null row: a single terminator
    #[inline]
    pub fn append_null(&mut self) {
        self.data.push(0);
        self.offsets.push(self.data.len());
    }

    /// Rows appended so far
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Current write position in the byte buffer
    pub fn cursor(&self) -> usize {
        self.data.len()
    }

    pub fn finish(self) -> StringColumn {
        StringColumn {
            data: self.data,
            offsets: self.offsets,
        }
    }
}

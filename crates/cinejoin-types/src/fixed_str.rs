//! Fixed-capacity, NUL-terminated byte strings.
//!
//! Row layouts keep their text columns inline so a relation is one flat
//! allocation. A [`FixedStr<N>`] owns an `N`-byte buffer; the logical value is
//! every byte before the first NUL. Construction never overflows: input longer
//! than `N - 1` bytes is truncated and the last byte stays NUL.

use std::fmt;

/// Inline bounded string with a buffer of `N` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    /// Longest value that fits while keeping the NUL terminator.
    pub const MAX_LEN: usize = N.saturating_sub(1);

    /// Copy `bytes` into a new buffer, truncating to [`Self::MAX_LEN`].
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let mut buf = [0_u8; N];
        let len = bytes.len().min(Self::MAX_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        Self { buf }
    }

    /// Bytes before the first NUL.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        let end = memchr::memchr(0, &self.buf).unwrap_or(N);
        &self.buf[..end]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.first().is_none_or(|&b| b == 0)
    }

    /// Size of the backing buffer, terminator included.
    #[must_use]
    pub const fn capacity() -> usize {
        N
    }

    /// Decode the value as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self { buf: [0_u8; N] }
    }
}

impl<const N: usize> From<&str> for FixedStr<N> {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl<const N: usize> From<&[u8]> for FixedStr<N> {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FixedStr")
            .field(&String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

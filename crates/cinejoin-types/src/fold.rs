//! ASCII case folding used by the prefix join.
//!
//! Letters fold to `0..26` regardless of case. Every other byte, including
//! digits, punctuation, whitespace and non-ASCII bytes, shares bucket 26.

/// Branching factor of a folded-alphabet trie.
pub const FOLD_FANOUT: usize = 27;

/// Bucket shared by all non-alphabetic bytes.
pub const OTHER_BUCKET: u8 = 26;

#[inline]
#[must_use]
pub const fn fold_byte(byte: u8) -> u8 {
    let lower = byte.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        lower - b'a'
    } else {
        OTHER_BUCKET
    }
}

/// True when `prefix` folds to a prefix of `text`.
#[must_use]
pub fn is_folded_prefix(prefix: &[u8], text: &[u8]) -> bool {
    prefix.len() <= text.len()
        && prefix
            .iter()
            .zip(text)
            .all(|(&p, &t)| fold_byte(p) == fold_byte(t))
}

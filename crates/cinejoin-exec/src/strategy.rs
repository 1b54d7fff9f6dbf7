use serde::{Deserialize, Serialize};

/// The interchangeable join engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Parallel hash join on `movie_id = title_id`.
    Hash,
    /// Cache-partitioned parallel merge join over key-sorted inputs.
    SortMerge,
    /// Trie join matching notes that prefix a title.
    PrefixTrie,
}

impl JoinStrategy {
    pub const ALL: [Self; 3] = [Self::Hash, Self::SortMerge, Self::PrefixTrie];

    /// Stable label used in logs and metrics dimensions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::SortMerge => "sort_merge",
            Self::PrefixTrie => "prefix_trie",
        }
    }

    /// True for strategies whose predicate is key equality.
    #[must_use]
    pub const fn is_equi_join(self) -> bool {
        matches!(self, Self::Hash | Self::SortMerge)
    }
}

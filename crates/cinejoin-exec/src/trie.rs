//! Arena-backed folded-alphabet trie.
//!
//! Nodes live in one `Vec` and refer to their children by index. Index 0 is
//! the root and can never be a child, so an absent edge is stored as `None`
//! in an `Option<NonZeroU32>` at no extra cost. Dropping the trie frees every
//! node at once.

use std::num::NonZeroU32;

use cinejoin_error::{JoinError, Result};
use cinejoin_types::{FOLD_FANOUT, fold_byte};
use smallvec::SmallVec;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<NonZeroU32>; FOLD_FANOUT],
    /// Owners of the words ending here, in insertion order.
    owners: SmallVec<[usize; 1]>,
}

impl TrieNode {
    fn child(&self, byte: u8) -> Option<usize> {
        self.children[usize::from(fold_byte(byte))].map(|idx| idx.get() as usize)
    }

    fn is_end_of_word(&self) -> bool {
        !self.owners.is_empty()
    }
}

/// Trie over case-folded byte strings that answers "which inserted words are
/// prefixes of this text".
#[derive(Debug, Clone)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }

    /// Insert `word` on behalf of `owner`. Duplicate words keep every owner.
    pub fn insert(&mut self, word: &[u8], owner: usize) -> Result<()> {
        let mut node = ROOT;
        for &byte in word {
            node = match self.nodes[node].child(byte) {
                Some(child) => child,
                None => {
                    let child = self.push_node()?;
                    self.nodes[node].children[usize::from(fold_byte(byte))] = Some(child);
                    child.get() as usize
                }
            };
        }
        self.nodes[node].owners.push(owner);
        self.words += 1;
        Ok(())
    }

    fn push_node(&mut self) -> Result<NonZeroU32> {
        let nodes = self.nodes.len();
        let idx = u32::try_from(nodes)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(JoinError::TrieCapacityExceeded { nodes })?;
        self.nodes.push(TrieNode::default());
        Ok(idx)
    }

    /// Call `visit` with the owner of every inserted word that is a folded
    /// prefix of `text`, shortest words first.
    ///
    /// Every node on the walk is checked, not only the last one, and the walk
    /// stops at the first byte without an edge: no word continues past it.
    pub fn for_each_prefix_of(&self, text: &[u8], mut visit: impl FnMut(usize)) {
        let mut node = &self.nodes[ROOT];
        for &byte in text {
            if node.is_end_of_word() {
                node.owners.iter().for_each(|&owner| visit(owner));
            }
            match node.child(byte) {
                Some(child) => node = &self.nodes[child],
                None => return,
            }
        }
        node.owners.iter().for_each(|&owner| visit(owner));
    }

    /// Nodes allocated, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Words inserted, duplicates included.
    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.words
    }
}

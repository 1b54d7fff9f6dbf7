//! Join observability counters.
//!
//! Process-local counters updated by every engine call. They carry no
//! configuration and never influence how a join executes.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::strategy::JoinStrategy;

static HASH_JOINS: AtomicU64 = AtomicU64::new(0);
static SORT_MERGE_JOINS: AtomicU64 = AtomicU64::new(0);
static PREFIX_JOINS: AtomicU64 = AtomicU64::new(0);
static PROBE_ROWS: AtomicU64 = AtomicU64::new(0);
static RESULT_ROWS: AtomicU64 = AtomicU64::new(0);
static MERGE_CHUNKS: AtomicU64 = AtomicU64::new(0);
static SKEW_FALLBACKS: AtomicU64 = AtomicU64::new(0);
static TRIE_NODES: AtomicU64 = AtomicU64::new(0);

/// Snapshot of the join counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinMetricsSnapshot {
    /// Hash join invocations.
    pub hash_joins: u64,
    /// Sort-merge join invocations.
    pub sort_merge_joins: u64,
    /// Prefix-trie join invocations.
    pub prefix_joins: u64,
    /// Rows looked up against a hash table or trie.
    pub probe_rows: u64,
    /// Result rows produced by all engines.
    pub result_rows: u64,
    /// Chunk pairs formed by the sort-merge partitioner.
    pub merge_chunks: u64,
    /// Times the partitioner gave up on a key run larger than its budget.
    pub skew_fallbacks: u64,
    /// Trie nodes allocated, root included.
    pub trie_nodes: u64,
}

impl JoinMetricsSnapshot {
    #[must_use]
    pub const fn invocations(&self, strategy: JoinStrategy) -> u64 {
        match strategy {
            JoinStrategy::Hash => self.hash_joins,
            JoinStrategy::SortMerge => self.sort_merge_joins,
            JoinStrategy::PrefixTrie => self.prefix_joins,
        }
    }
}

pub fn record_invocation(strategy: JoinStrategy) {
    let counter = match strategy {
        JoinStrategy::Hash => &HASH_JOINS,
        JoinStrategy::SortMerge => &SORT_MERGE_JOINS,
        JoinStrategy::PrefixTrie => &PREFIX_JOINS,
    };
    counter.fetch_add(1, Ordering::Relaxed);
}

pub fn record_probe_rows(rows: usize) {
    PROBE_ROWS.fetch_add(rows as u64, Ordering::Relaxed);
}

pub fn record_result_rows(rows: usize) {
    RESULT_ROWS.fetch_add(rows as u64, Ordering::Relaxed);
}

pub fn record_merge_chunks(chunks: usize) {
    MERGE_CHUNKS.fetch_add(chunks as u64, Ordering::Relaxed);
}

pub fn record_skew_fallback() {
    SKEW_FALLBACKS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_trie_nodes(nodes: usize) {
    TRIE_NODES.fetch_add(nodes as u64, Ordering::Relaxed);
}

#[must_use]
pub fn join_metrics_snapshot() -> JoinMetricsSnapshot {
    JoinMetricsSnapshot {
        hash_joins: HASH_JOINS.load(Ordering::Relaxed),
        sort_merge_joins: SORT_MERGE_JOINS.load(Ordering::Relaxed),
        prefix_joins: PREFIX_JOINS.load(Ordering::Relaxed),
        probe_rows: PROBE_ROWS.load(Ordering::Relaxed),
        result_rows: RESULT_ROWS.load(Ordering::Relaxed),
        merge_chunks: MERGE_CHUNKS.load(Ordering::Relaxed),
        skew_fallbacks: SKEW_FALLBACKS.load(Ordering::Relaxed),
        trie_nodes: TRIE_NODES.load(Ordering::Relaxed),
    }
}

/// Zero every counter. Concurrent joins may still race with the reset.
pub fn reset_join_metrics() {
    for counter in [
        &HASH_JOINS,
        &SORT_MERGE_JOINS,
        &PREFIX_JOINS,
        &PROBE_ROWS,
        &RESULT_ROWS,
        &MERGE_CHUNKS,
        &SKEW_FALLBACKS,
        &TRIE_NODES,
    ] {
        counter.store(0, Ordering::Relaxed);
    }
}

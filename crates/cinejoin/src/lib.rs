//! cinejoin: parallel joins between a movie database's `cast_info` and
//! `title` relations.
//!
//! Pick a [`JoinStrategy`] and call [`perform_join`]:
//!
//! ```
//! use cinejoin::{CastRow, JoinStrategy, TitleRow, perform_join};
//!
//! let cast = vec![CastRow { cast_id: 1, movie_id: 10, note: "Neo".into(), ..CastRow::default() }];
//! let title = vec![TitleRow { title_id: 10, title: "The Matrix".into(), ..TitleRow::default() }];
//!
//! let rows = perform_join(JoinStrategy::Hash, &cast, &title, 4).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].pair_id(), (1, 10));
//! ```
//!
//! [`JoinStrategy::SortMerge`] requires both relations sorted ascending by
//! join key; [`sort_by_join_key`] prepares them.

pub use cinejoin_error::{JoinError, Result};
pub use cinejoin_exec::{
    DEFAULT_CACHE_BYTES, JoinConfig, JoinMetricsSnapshot, JoinStrategy, ProbeSchedule,
    join_metrics_snapshot, reset_join_metrics,
};
pub use cinejoin_types::{
    CastRow, FixedStr, JoinKey, ResultRow, ThreadBudget, TitleRow, fold_byte, is_folded_prefix,
};

/// Engine modules, for callers that want the building blocks.
pub mod engines {
    pub use cinejoin_exec::hash_join::{
        HashJoinTable, hash_join, hash_join_build, hash_join_probe, hash_join_with_config,
    };
    pub use cinejoin_exec::prefix_join::{build_note_trie, prefix_join, prefix_join_with_config};
    pub use cinejoin_exec::sort_merge::{
        ChunkPair, align_cutoffs, merge_chunk, partition_chunks, sort_merge_join,
        sort_merge_join_with_config,
    };
    pub use cinejoin_exec::trie::PrefixTrie;
}

/// Run `strategy` over `cast` and `title` with at most `thread_budget`
/// workers. A budget `<= 0` runs on one thread.
pub fn perform_join(
    strategy: JoinStrategy,
    cast: &[CastRow],
    title: &[TitleRow],
    thread_budget: i32,
) -> Result<Vec<ResultRow>> {
    perform_join_with_config(strategy, cast, title, thread_budget, &JoinConfig::default())
}

/// [`perform_join`] with explicit engine settings.
pub fn perform_join_with_config(
    strategy: JoinStrategy,
    cast: &[CastRow],
    title: &[TitleRow],
    budget: impl Into<ThreadBudget>,
    config: &JoinConfig,
) -> Result<Vec<ResultRow>> {
    let budget = budget.into();
    tracing::trace!(strategy = strategy.as_str(), threads = budget.get(), "dispatching join");
    match strategy {
        JoinStrategy::Hash => cinejoin_exec::hash_join_with_config(cast, title, budget, config),
        JoinStrategy::SortMerge => {
            cinejoin_exec::sort_merge_join_with_config(cast, title, budget, config)
        }
        JoinStrategy::PrefixTrie => {
            cinejoin_exec::prefix_join_with_config(cast, title, budget, config)
        }
    }
}

/// Stable-sort rows ascending by join key, keeping input order within a key.
pub fn sort_by_join_key<T: JoinKey>(rows: &mut [T]) {
    rows.sort_by_key(JoinKey::join_key);
}

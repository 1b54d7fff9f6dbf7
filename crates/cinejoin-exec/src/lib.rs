//! Join engines for cinejoin.
//!
//! Three interchangeable engines join a `cast_info` relation with a `title`
//! relation:
//!
//! - [`hash_join`]: equi-join on `movie_id = title_id` through a hash table
//!   built from the smaller relation.
//! - [`sort_merge_join`]: equi-join over key-sorted inputs, partitioned into
//!   cache-sized chunk pairs that merge independently.
//! - [`prefix_join`]: matches cast notes that are a case-insensitive prefix of
//!   a title's name, through a [`PrefixTrie`].
//!
//! Every engine takes a [`ThreadBudget`](cinejoin_types::ThreadBudget) and
//! spawns at most that many scoped workers for the duration of the call.

mod aggregate;
mod dispatch;

pub mod config;
pub mod hash_join;
pub mod instrumentation;
pub mod prefix_join;
pub mod sort_merge;
pub mod strategy;
pub mod trie;

pub use config::{DEFAULT_CACHE_BYTES, JoinConfig, ProbeSchedule};
pub use hash_join::{
    HashJoinTable, hash_join, hash_join_build, hash_join_probe, hash_join_with_config,
};
pub use instrumentation::{JoinMetricsSnapshot, join_metrics_snapshot, reset_join_metrics};
pub use prefix_join::{build_note_trie, prefix_join, prefix_join_with_config};
pub use sort_merge::{
    ChunkPair, align_cutoffs, merge_chunk, partition_chunks, sort_merge_join,
    sort_merge_join_with_config,
};
pub use strategy::JoinStrategy;
pub use trie::PrefixTrie;

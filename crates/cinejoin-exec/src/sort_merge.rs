//! Cache-partitioned parallel sort-merge join.
//!
//! Both inputs must already be sorted ascending by join key. The partitioner
//! cuts them into chunk pairs of roughly [`JoinConfig::chunk_budget`] rows and
//! aligns every cut to the start of a key group in *both* relations, so each
//! key's rows land in exactly one chunk pair. Chunks are then merge-joined
//! independently and in parallel, and their results are stored in
//! index-addressed slots. The output is therefore ordered by key, then cast
//! input order, then title input order, whatever the thread count.
//!
//! Unsorted input is a caller error. It is only checked in debug builds and
//! otherwise yields silently wrong results.

use std::cmp::Ordering;
use std::ops::Range;
use std::sync::OnceLock;

use cinejoin_error::Result;
use cinejoin_types::{CastRow, JoinKey, ResultRow, ThreadBudget, TitleRow};

use crate::aggregate::collect_slots;
use crate::config::{JoinConfig, ProbeSchedule};
use crate::dispatch;
use crate::instrumentation::{
    record_invocation, record_merge_chunks, record_result_rows, record_skew_fallback,
};
use crate::strategy::JoinStrategy;

/// Row ranges of one independently joinable unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPair {
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl ChunkPair {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

// ── Partitioning ───────────────────────────────────────────────────────────

/// Resolve a tentative cut of both relations to a key-group boundary.
///
/// The boundary key `K` is the smaller of the keys at the two tentative
/// indices. Each cut walks backward from its tentative index while the
/// previous row's key is `>= K`, stopping at its offset. Afterwards every row
/// before either cut has a key `< K` and every row from either cut onward has
/// a key `>= K`, so no key group straddles the cut in either relation.
///
/// Returns `None` when a tentative index is out of range or behind its
/// offset: no further cut is possible.
#[must_use]
pub fn align_cutoffs<L: JoinKey, R: JoinKey>(
    left: &[L],
    right: &[R],
    offsets: (usize, usize),
    tentative: (usize, usize),
) -> Option<(usize, usize)> {
    let (left_off, right_off) = offsets;
    let (left_try, right_try) = tentative;
    if left_off > left_try || right_off > right_try {
        return None;
    }
    let boundary = left
        .get(left_try)?
        .join_key()
        .min(right.get(right_try)?.join_key());
    Some((
        group_start(left, left_off, left_try, boundary),
        group_start(right, right_off, right_try, boundary),
    ))
}

/// First index in `[floor, from]` such that every row from it up to `from`
/// has a key `>= boundary`.
fn group_start<T: JoinKey>(rows: &[T], floor: usize, from: usize, boundary: i32) -> usize {
    let mut idx = from;
    while idx > floor && rows[idx - 1].join_key() >= boundary {
        idx -= 1;
    }
    idx
}

/// Split two key-sorted relations into group-boundary-safe chunk pairs.
///
/// Together the chunks cover both relations exactly once and in order. When
/// a duplicate-key run is longer than `chunk_budget`, cutting stops and the
/// remaining suffixes of both relations become one final chunk, which keeps
/// the plan correct under any key skew at the cost of balance.
#[must_use]
pub fn partition_chunks<L: JoinKey, R: JoinKey>(
    left: &[L],
    right: &[R],
    chunk_budget: usize,
) -> Vec<ChunkPair> {
    let step = chunk_budget.max(1);
    let mut chunks = Vec::new();
    let (mut left_off, mut right_off) = (0, 0);

    while left_off < left.len() && right_off < right.len() {
        let tentative = (left_off.saturating_add(step), right_off.saturating_add(step));
        let Some((left_cut, right_cut)) =
            align_cutoffs(left, right, (left_off, right_off), tentative)
        else {
            break;
        };
        if left_cut == left_off && right_cut == right_off {
            record_skew_fallback();
            tracing::warn!(
                left_off,
                right_off,
                chunk_budget = step,
                "key run exceeds chunk budget, joining remaining rows as one chunk"
            );
            break;
        }
        chunks.push(ChunkPair {
            left: left_off..left_cut,
            right: right_off..right_cut,
        });
        left_off = left_cut;
        right_off = right_cut;
    }

    let tail = ChunkPair {
        left: left_off..left.len(),
        right: right_off..right.len(),
    };
    if !tail.is_empty() {
        chunks.push(tail);
    }
    chunks
}

// ── Merge ──────────────────────────────────────────────────────────────────

/// Sequential two-pointer merge join of one chunk pair.
///
/// On a key match, every cast row of the group is paired with every title row
/// of the group: the title cursor restarts at the group start for each cast
/// row, then both cursors skip past the group.
pub fn merge_chunk(cast: &[CastRow], title: &[TitleRow], out: &mut Vec<ResultRow>) {
    let (mut c, mut t) = (0, 0);
    while c < cast.len() && t < title.len() {
        match cast[c].movie_id.cmp(&title[t].title_id) {
            Ordering::Less => c += 1,
            Ordering::Greater => t += 1,
            Ordering::Equal => {
                let cast_end = run_end(cast, c);
                let title_end = run_end(title, t);
                for cast_row in &cast[c..cast_end] {
                    out.extend(
                        title[t..title_end]
                            .iter()
                            .map(|title_row| ResultRow::from_pair(cast_row, title_row)),
                    );
                }
                c = cast_end;
                t = title_end;
            }
        }
    }
}

/// One past the last row sharing `rows[start]`'s key.
fn run_end<T: JoinKey>(rows: &[T], start: usize) -> usize {
    let key = rows[start].join_key();
    rows[start..]
        .iter()
        .position(|row| row.join_key() != key)
        .map_or(rows.len(), |len| start + len)
}

// ── Engine ─────────────────────────────────────────────────────────────────

/// Sort-merge join with the default configuration.
pub fn sort_merge_join(
    cast_sorted: &[CastRow],
    title_sorted: &[TitleRow],
    budget: impl Into<ThreadBudget>,
) -> Result<Vec<ResultRow>> {
    sort_merge_join_with_config(cast_sorted, title_sorted, budget, &JoinConfig::default())
}

/// Sort-merge join of `cast_sorted` (by `movie_id`) and `title_sorted`
/// (by `title_id`).
pub fn sort_merge_join_with_config(
    cast_sorted: &[CastRow],
    title_sorted: &[TitleRow],
    budget: impl Into<ThreadBudget>,
    config: &JoinConfig,
) -> Result<Vec<ResultRow>> {
    config.validate()?;
    let budget = budget.into();
    record_invocation(JoinStrategy::SortMerge);
    if cast_sorted.is_empty() || title_sorted.is_empty() {
        return Ok(Vec::new());
    }
    debug_assert!(cast_sorted.is_sorted_by_key(JoinKey::join_key));
    debug_assert!(title_sorted.is_sorted_by_key(JoinKey::join_key));

    let _span = tracing::debug_span!(
        "join",
        strategy = JoinStrategy::SortMerge.as_str(),
        cast_rows = cast_sorted.len(),
        title_rows = title_sorted.len(),
        threads = budget.get(),
    )
    .entered();

    let chunk_budget = config.chunk_budget();
    let chunks = partition_chunks(cast_sorted, title_sorted, chunk_budget);
    record_merge_chunks(chunks.len());
    tracing::debug!(chunks = chunks.len(), chunk_budget, "sorted inputs partitioned");

    let slots: Vec<OnceLock<Vec<ResultRow>>> = chunks.iter().map(|_| OnceLock::new()).collect();
    let produced = dispatch::scatter(
        budget,
        chunks.len(),
        1,
        ProbeSchedule::DynamicBlocks,
        || 0_usize,
        |produced, range| {
            for idx in range {
                let chunk = &chunks[idx];
                let mut out = Vec::new();
                merge_chunk(
                    &cast_sorted[chunk.left.clone()],
                    &title_sorted[chunk.right.clone()],
                    &mut out,
                );
                *produced += out.len();
                let stored = slots[idx].set(out);
                debug_assert!(stored.is_ok(), "chunk {idx} merged twice");
            }
        },
    )?;
    tracing::trace!(?produced, "per-worker result rows");

    let out = collect_slots(slots);
    record_result_rows(out.len());
    tracing::debug!(results = out.len(), "sort-merge join finished");
    Ok(out)
}

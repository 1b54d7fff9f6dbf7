//! Parallel hash join on `movie_id = title_id`.
//!
//! Two phases: build a multimap from the smaller relation on the caller
//! thread, then probe it from the larger relation with up to `budget`
//! workers. The table is read-only once built, so probing needs no locks;
//! each worker appends to a private buffer and the buffers are concatenated
//! in worker order after the join barrier.

use cinejoin_error::Result;
use cinejoin_types::{CastRow, JoinKey, ResultRow, ThreadBudget, TitleRow};
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::aggregate::concat_partials;
use crate::config::JoinConfig;
use crate::dispatch;
use crate::instrumentation::{record_invocation, record_probe_rows, record_result_rows};
use crate::strategy::JoinStrategy;

// ── Build-Side Hash Table ──────────────────────────────────────────────────

/// Build-side rows grouped by join key.
///
/// Rows borrow the caller's relation. Within a key, rows keep build-side
/// input order, so every duplicate is emitted and emitted deterministically.
#[derive(Debug)]
pub struct HashJoinTable<'a, B> {
    buckets: HashMap<i32, SmallVec<[&'a B; 2]>>,
    rows: usize,
}

impl<'a, B: JoinKey> HashJoinTable<'a, B> {
    /// Build-side rows sharing `key`, in insertion order.
    #[must_use]
    pub fn matches(&self, key: i32) -> &[&'a B] {
        self.buckets
            .get(&key)
            .map(|rows| rows.as_slice())
            .unwrap_or_default()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of build rows, duplicates included.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }
}

/// Build a hash table over `rows`.
#[must_use]
pub fn hash_join_build<B: JoinKey>(rows: &[B]) -> HashJoinTable<'_, B> {
    let mut buckets: HashMap<i32, SmallVec<[&B; 2]>> = HashMap::with_capacity(rows.len());
    for row in rows {
        buckets.entry(row.join_key()).or_default().push(row);
    }
    HashJoinTable {
        buckets,
        rows: rows.len(),
    }
}

// ── Probe Phase ────────────────────────────────────────────────────────────

/// Probe `table` with every row of `probe`, appending one result per match.
///
/// `emit` receives the build row first and the probe row second.
pub fn hash_join_probe<B, P, E>(
    table: &HashJoinTable<'_, B>,
    probe: &[P],
    emit: &E,
    out: &mut Vec<ResultRow>,
) where
    B: JoinKey,
    P: JoinKey,
    E: Fn(&B, &P) -> ResultRow,
{
    for probe_row in probe {
        for &build_row in table.matches(probe_row.join_key()) {
            out.push(emit(build_row, probe_row));
        }
    }
}

// ── Engine ─────────────────────────────────────────────────────────────────

/// Hash-join `cast` and `title` with the default configuration.
pub fn hash_join(
    cast: &[CastRow],
    title: &[TitleRow],
    budget: impl Into<ThreadBudget>,
) -> Result<Vec<ResultRow>> {
    hash_join_with_config(cast, title, budget, &JoinConfig::default())
}

/// Hash-join `cast` and `title`.
///
/// The relation with fewer rows is the build side (cast on ties). The probe
/// side is distributed according to [`JoinConfig::probe_schedule`]. Output
/// order follows worker order and is not sorted.
pub fn hash_join_with_config(
    cast: &[CastRow],
    title: &[TitleRow],
    budget: impl Into<ThreadBudget>,
    config: &JoinConfig,
) -> Result<Vec<ResultRow>> {
    config.validate()?;
    let budget = budget.into();
    record_invocation(JoinStrategy::Hash);
    if cast.is_empty() || title.is_empty() {
        return Ok(Vec::new());
    }

    let _span = tracing::debug_span!(
        "join",
        strategy = JoinStrategy::Hash.as_str(),
        cast_rows = cast.len(),
        title_rows = title.len(),
        threads = budget.get(),
        schedule = config.probe_schedule.as_str(),
    )
    .entered();

    let parts = if cast.len() <= title.len() {
        let table = hash_join_build(cast);
        tracing::debug!(build = "cast", keys = table.key_count(), "hash table built");
        probe_parallel(&table, title, budget, config, &ResultRow::from_pair)?
    } else {
        let table = hash_join_build(title);
        tracing::debug!(build = "title", keys = table.key_count(), "hash table built");
        probe_parallel(
            &table,
            cast,
            budget,
            config,
            &|title_row: &TitleRow, cast_row: &CastRow| ResultRow::from_pair(cast_row, title_row),
        )?
    };

    let out = concat_partials(parts);
    record_result_rows(out.len());
    tracing::debug!(results = out.len(), "hash join finished");
    Ok(out)
}

fn probe_parallel<B, P, E>(
    table: &HashJoinTable<'_, B>,
    probe: &[P],
    budget: ThreadBudget,
    config: &JoinConfig,
    emit: &E,
) -> Result<Vec<Vec<ResultRow>>>
where
    B: JoinKey + Sync,
    P: JoinKey + Sync,
    E: Fn(&B, &P) -> ResultRow + Sync,
{
    record_probe_rows(probe.len());
    dispatch::scatter(
        budget,
        probe.len(),
        config.block_rows::<P>(),
        config.probe_schedule,
        Vec::new,
        |out, range| hash_join_probe(table, &probe[range], emit, out),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeSchedule;

    fn cast(cast_id: i32, movie_id: i32) -> CastRow {
        CastRow {
            cast_id,
            movie_id,
            ..CastRow::default()
        }
    }

    fn title(title_id: i32) -> TitleRow {
        TitleRow {
            title_id,
            ..TitleRow::default()
        }
    }

    fn sorted_pairs(rows: &[ResultRow]) -> Vec<(i32, i32)> {
        let mut pairs: Vec<_> = rows.iter().map(ResultRow::pair_id).collect();
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn build_groups_duplicates_in_input_order() {
        let rows = vec![cast(1, 5), cast(2, 7), cast(3, 5)];
        let table = hash_join_build(&rows);
        assert_eq!(table.key_count(), 2);
        assert_eq!(table.row_count(), 3);
        let ids: Vec<i32> = table.matches(5).iter().map(|r| r.cast_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(table.matches(99).is_empty());
    }

    #[test]
    fn probe_emits_one_row_per_match() {
        let build = vec![title(1), title(1), title(2)];
        let table = hash_join_build(&build);
        let probe = vec![cast(10, 1), cast(11, 3)];
        let mut out = Vec::new();
        hash_join_probe(
            &table,
            &probe,
            &|t: &TitleRow, c: &CastRow| ResultRow::from_pair(c, t),
            &mut out,
        );
        assert_eq!(sorted_pairs(&out), vec![(10, 1), (10, 1)]);
    }

    #[test]
    fn single_match() {
        let casts = vec![CastRow {
            note: "A".into(),
            ..cast(1, 10)
        }];
        let titles = vec![TitleRow {
            title: "A".into(),
            ..title(10)
        }];
        let out = hash_join(&casts, &titles, 2).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pair_id(), (1, 10));
        assert_eq!(out[0].note.as_bytes(), b"A");
        assert_eq!(out[0].title.as_bytes(), b"A");
    }

    #[test]
    fn duplicate_keys_produce_the_cross_product() {
        let casts = vec![cast(1, 5), cast(2, 5)];
        let titles = vec![
            TitleRow {
                imdb_id: 1,
                ..title(5)
            },
            TitleRow {
                imdb_id: 2,
                ..title(5)
            },
        ];
        let out = hash_join(&casts, &titles, 4).unwrap();
        assert_eq!(out.len(), 4);
        let mut combos: Vec<(i32, i32)> = out.iter().map(|r| (r.cast_id, r.imdb_id)).collect();
        combos.sort_unstable();
        assert_eq!(combos, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn empty_inputs_return_nothing() {
        let casts = vec![cast(1, 1)];
        let titles = vec![title(1)];
        assert!(hash_join(&casts, &[], 4).unwrap().is_empty());
        assert!(hash_join(&[], &titles, 4).unwrap().is_empty());
    }

    #[test]
    fn either_side_can_be_the_build_side() {
        // Fewer casts than titles builds on cast; the reverse builds on title.
        let casts = vec![cast(1, 1), cast(2, 2)];
        let titles: Vec<TitleRow> = (0..6).map(title).collect();
        assert_eq!(
            sorted_pairs(&hash_join(&casts, &titles, 3).unwrap()),
            vec![(1, 1), (2, 2)]
        );

        let casts: Vec<CastRow> = (0..6).map(|i| cast(100 + i, i % 3)).collect();
        let titles = vec![title(0), title(2)];
        assert_eq!(
            sorted_pairs(&hash_join(&casts, &titles, 3).unwrap()),
            vec![(100, 0), (102, 2), (103, 0), (105, 2)]
        );
    }

    #[test]
    fn every_schedule_and_budget_agrees() {
        let casts: Vec<CastRow> = (0..500).map(|i| cast(i, i % 37)).collect();
        let titles: Vec<TitleRow> = (0..40).flat_map(|k| [title(k), title(k)]).collect();
        let expected = sorted_pairs(&hash_join(&casts, &titles, 1).unwrap());
        assert_eq!(expected.len(), 500 * 2);

        for schedule in [
            ProbeSchedule::Contiguous,
            ProbeSchedule::RoundRobinBlocks,
            ProbeSchedule::DynamicBlocks,
        ] {
            // A tiny cache forces many probe blocks.
            let config = JoinConfig::default()
                .with_cache_bytes(1024)
                .with_probe_schedule(schedule);
            for threads in [0, 1, 3, 8] {
                let out = hash_join_with_config(&casts, &titles, threads, &config).unwrap();
                assert_eq!(
                    sorted_pairs(&out),
                    expected,
                    "schedule={} threads={threads}",
                    schedule.as_str()
                );
                assert!(out.iter().all(|r| r.movie_id == r.title_id));
            }
        }
    }

    #[test]
    fn contiguous_single_worker_follows_probe_order() {
        let casts = vec![cast(1, 2), cast(2, 1)];
        let titles = vec![title(1), title(2), title(3)];
        let out = hash_join(&casts, &titles, 1).unwrap();
        let ids: Vec<i32> = out.iter().map(|r| r.title_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = JoinConfig::default().with_cache_bytes(0);
        assert!(hash_join_with_config(&[cast(1, 1)], &[title(1)], 1, &config).is_err());
    }
}

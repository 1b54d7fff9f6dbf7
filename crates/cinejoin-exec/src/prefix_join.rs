//! Prefix join: pairs every cast row whose note is a case-insensitive prefix
//! of a title's name.
//!
//! The notes are indexed into a [`PrefixTrie`] on the caller thread, then
//! titles are walked against it in parallel blocks. Each worker collects into
//! a private buffer.

use cinejoin_error::Result;
use cinejoin_types::{CastRow, ResultRow, ThreadBudget, TitleRow};

use crate::aggregate::concat_partials;
use crate::config::JoinConfig;
use crate::dispatch;
use crate::instrumentation::{
    record_invocation, record_probe_rows, record_result_rows, record_trie_nodes,
};
use crate::strategy::JoinStrategy;
use crate::trie::PrefixTrie;

/// Index every cast note, owned by its row index in `cast`.
pub fn build_note_trie(cast: &[CastRow]) -> Result<PrefixTrie> {
    let mut trie = PrefixTrie::new();
    for (idx, row) in cast.iter().enumerate() {
        trie.insert(row.note.as_bytes(), idx)?;
    }
    Ok(trie)
}

/// Prefix-join `cast` and `title` with the default configuration.
pub fn prefix_join(
    cast: &[CastRow],
    title: &[TitleRow],
    budget: impl Into<ThreadBudget>,
) -> Result<Vec<ResultRow>> {
    prefix_join_with_config(cast, title, budget, &JoinConfig::default())
}

/// Prefix-join `cast` and `title`.
///
/// An empty note is a prefix of every title. Titles are distributed according
/// to [`JoinConfig::prefix_schedule`]; output order is unspecified.
pub fn prefix_join_with_config(
    cast: &[CastRow],
    title: &[TitleRow],
    budget: impl Into<ThreadBudget>,
    config: &JoinConfig,
) -> Result<Vec<ResultRow>> {
    config.validate()?;
    let budget = budget.into();
    record_invocation(JoinStrategy::PrefixTrie);
    if cast.is_empty() || title.is_empty() {
        return Ok(Vec::new());
    }

    let _span = tracing::debug_span!(
        "join",
        strategy = JoinStrategy::PrefixTrie.as_str(),
        cast_rows = cast.len(),
        title_rows = title.len(),
        threads = budget.get(),
        schedule = config.prefix_schedule.as_str(),
    )
    .entered();

    let trie = build_note_trie(cast)?;
    record_trie_nodes(trie.node_count());
    tracing::debug!(
        nodes = trie.node_count(),
        words = trie.word_count(),
        "note trie built"
    );

    record_probe_rows(title.len());
    let parts = dispatch::scatter(
        budget,
        title.len(),
        config.block_rows::<TitleRow>(),
        config.prefix_schedule,
        Vec::new,
        |out: &mut Vec<ResultRow>, range| {
            for title_row in &title[range] {
                trie.for_each_prefix_of(title_row.title.as_bytes(), |idx| {
                    out.push(ResultRow::from_pair(&cast[idx], title_row));
                });
            }
        },
    )?;

    let out = concat_partials(parts);
    record_result_rows(out.len());
    tracing::debug!(results = out.len(), "prefix join finished");
    Ok(out)
}

//! Merging partial result buffers into one output collection.

use std::sync::OnceLock;

/// Concatenate per-worker buffers in worker order.
#[must_use]
pub fn concat_partials<T>(parts: Vec<Vec<T>>) -> Vec<T> {
    let total = parts.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend(part);
    }
    out
}

/// Concatenate index-addressed slots in slot order. Unfilled slots add nothing.
#[must_use]
pub fn collect_slots<T>(slots: Vec<OnceLock<Vec<T>>>) -> Vec<T> {
    let total = slots.iter().map(|slot| slot.get().map_or(0, Vec::len)).sum();
    let mut out = Vec::with_capacity(total);
    for slot in slots {
        out.extend(slot.into_inner().unwrap_or_default());
    }
    out
}

//! Error types shared by every cinejoin crate.
//!
//! Steady-state join execution does not fail: empty inputs, keys without a
//! partner and out-of-range cutoffs are all represented by empty results or
//! `None`. The variants here cover the remaining cases where a call cannot
//! produce a result at all.

use thiserror::Error;

/// Errors raised by join configuration and execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// A configuration field holds a value the engines cannot work with.
    #[error("invalid join configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// A worker thread panicked before reaching the join barrier.
    #[error("join worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn join worker {worker}: {reason}")]
    WorkerSpawnFailed { worker: usize, reason: String },

    /// The prefix trie would need more nodes than its index type can address.
    #[error("prefix trie exceeded its node capacity ({nodes} nodes)")]
    TrieCapacityExceeded { nodes: usize },
}

impl JoinError {
    /// Shorthand for [`JoinError::InvalidConfig`].
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by caller-supplied settings.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, JoinError>;

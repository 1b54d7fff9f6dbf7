//! Engine tuning knobs.
//!
//! The cache budget has no canonical value: it depends on the machine the
//! join runs on. The default targets a typical 256 KiB per-core L2 cache.

use std::mem::size_of;

use cinejoin_error::{JoinError, Result};
use cinejoin_types::{CastRow, TitleRow};
use serde::{Deserialize, Serialize};

/// Default per-core cache footprint targeted by chunk and block sizing.
pub const DEFAULT_CACHE_BYTES: usize = 256 * 1024;

/// How a probe relation is handed out to workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeSchedule {
    /// One near-equal contiguous row range per worker.
    #[default]
    Contiguous,
    /// Cache-sized blocks, block `b` owned by worker `b % workers`.
    RoundRobinBlocks,
    /// Cache-sized blocks pulled from a shared queue as workers free up.
    DynamicBlocks,
}

impl ProbeSchedule {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contiguous => "contiguous",
            Self::RoundRobinBlocks => "round_robin_blocks",
            Self::DynamicBlocks => "dynamic_blocks",
        }
    }
}

/// Settings shared by all engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Target cache footprint of one unit of work, in bytes.
    pub cache_bytes: usize,
    /// Probe distribution for the hash join.
    pub probe_schedule: ProbeSchedule,
    /// Probe distribution for the prefix join.
    pub prefix_schedule: ProbeSchedule,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            cache_bytes: DEFAULT_CACHE_BYTES,
            probe_schedule: ProbeSchedule::Contiguous,
            prefix_schedule: ProbeSchedule::DynamicBlocks,
        }
    }
}

impl JoinConfig {
    #[must_use]
    pub fn with_cache_bytes(mut self, cache_bytes: usize) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    #[must_use]
    pub fn with_probe_schedule(mut self, schedule: ProbeSchedule) -> Self {
        self.probe_schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_prefix_schedule(mut self, schedule: ProbeSchedule) -> Self {
        self.prefix_schedule = schedule;
        self
    }

    /// Reject settings the engines cannot size work from.
    pub fn validate(&self) -> Result<()> {
        if self.cache_bytes == 0 {
            return Err(JoinError::invalid_config(
                "cache_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Rows per sort-merge chunk: how many records of the wider relation
    /// fill `cache_bytes`. Never zero.
    #[must_use]
    pub fn chunk_budget(&self) -> usize {
        let widest = size_of::<CastRow>().max(size_of::<TitleRow>());
        (self.cache_bytes / widest).max(1)
    }

    /// Rows of `T` per probe block, sized to half of `cache_bytes` so the
    /// block and the lookups it triggers share the cache. Never zero.
    #[must_use]
    pub fn block_rows<T>(&self) -> usize {
        (self.cache_bytes / 2 / size_of::<T>().max(1)).max(1)
    }
}

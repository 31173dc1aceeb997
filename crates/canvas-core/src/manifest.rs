//! Run manifest emitted after a completed materialization.
//!
//! The plan hash only depends on the date range and the weekday table, so two
//! runs over the same plan report the same hash even though their timestamps
//! and tokens differ.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hash::Hash256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(pub Uuid);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub id: ManifestId,

    /// Stable hash of the plan summary (range + weekday table + total).
    pub plan_hash: Hash256,

    /// Tool version string for provenance.
    pub tool_version: String,

    /// Commits created by the day loop (baseline and amend excluded).
    pub commits: u64,

    /// Days walked.
    pub days: u64,

    /// Milliseconds since Unix epoch (UTC).
    pub started_ms: u64,
    pub finished_ms: u64,
}

impl RunManifest {
    pub fn new(plan_hash: Hash256, started_ms: u64) -> Self {
        Self {
            id: ManifestId(Uuid::new_v4()),
            plan_hash,
            tool_version: crate::VERSION.to_string(),
            commits: 0,
            days: 0,
            started_ms,
            finished_ms: started_ms,
        }
    }

    pub fn finish(mut self, finished_ms: u64, commits: u64, days: u64) -> Self {
        self.finished_ms = finished_ms;
        self.commits = commits;
        self.days = days;
        self
    }

    pub fn duration_ms(&self) -> u64 {
        self.finished_ms.saturating_sub(self.started_ms)
    }
}

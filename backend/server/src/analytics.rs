//! # Analytics
//!
//! View and download counters for individual papers.
//!
//! ## Keys
//! `{branchSlug}|{semester}|{subjectSlug}|{pyqId}`, e.g.
//! `cse-ai-and-ml|1|engineering-mathematics-i|engineering-mathematics-i-2024`.
//!
//! ## Implementation
//! - Two independent maps, one per [`CounterKind`]
//! - A key is created on its first hit and only ever goes up
//! - Absent key means zero
//! - Lives for the process lifetime only, restarts reset everything
//! - Keyspace is bounded by the dataset (branch x semester x subject x paper), so no eviction
//!
//! Handlers only see the [`CounterStore`] trait, so tests can swap in their own store.
use std::{collections::BTreeMap, fmt};

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    Views,
    Downloads,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsKey<'a> {
    pub branch: &'a str,
    pub semester: &'a str,
    pub subject: &'a str,
    pub pyq_id: &'a str,
}

impl fmt::Display for AnalyticsKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.branch, self.semester, self.subject, self.pyq_id
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub views: BTreeMap<String, u64>,
    pub downloads: BTreeMap<String, u64>,
}

pub trait CounterStore: Send + Sync {
    /// Returns the count after the increment.
    fn increment(&self, kind: CounterKind, key: &str) -> u64;

    /// Point in time copy. Not atomic across the two maps.
    fn snapshot(&self) -> AnalyticsSnapshot;
}

#[derive(Default)]
pub struct MemoryCounters {
    views: DashMap<String, u64>,
    downloads: DashMap<String, u64>,
}

impl MemoryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: CounterKind) -> &DashMap<String, u64> {
        match kind {
            CounterKind::Views => &self.views,
            CounterKind::Downloads => &self.downloads,
        }
    }
}

impl CounterStore for MemoryCounters {
    fn increment(&self, kind: CounterKind, key: &str) -> u64 {
        // shard stays locked until `count` drops
        let mut count = self.map(kind).entry(key.to_string()).or_insert(0);
        *count += 1;

        debug!("{kind:?} {key} -> {}", *count);

        *count
    }

    fn snapshot(&self) -> AnalyticsSnapshot {
        let copy = |map: &DashMap<String, u64>| -> BTreeMap<String, u64> {
            map.iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect()
        };

        AnalyticsSnapshot {
            views: copy(&self.views),
            downloads: copy(&self.downloads),
        }
    }
}

//! Per-kind record counts.

use crate::models::RecordKind;
use crate::store::RecordStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Row count for every kind in [`RecordKind::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordCounts(BTreeMap<RecordKind, u64>);

impl RecordCounts {
    /// Count every registered kind in `store`.
    pub fn capture<S: RecordStore + ?Sized>(store: &S) -> Self {
        Self(
            RecordKind::ALL
                .iter()
                .map(|kind| (*kind, store.count(*kind)))
                .collect(),
        )
    }

    pub fn get(&self, kind: RecordKind) -> u64 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordKind, u64)> + '_ {
        self.0.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Signed difference `later - self` for every kind, zero deltas included.
    pub fn delta(&self, later: &RecordCounts) -> BTreeMap<RecordKind, i64> {
        RecordKind::ALL
            .iter()
            .map(|kind| (*kind, later.get(*kind) as i64 - self.get(*kind) as i64))
            .collect()
    }
}

impl FromIterator<(RecordKind, u64)> for RecordCounts {
    fn from_iter<I: IntoIterator<Item = (RecordKind, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

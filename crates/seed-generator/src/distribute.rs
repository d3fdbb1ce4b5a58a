//! Relationship-distribution algorithms.
//!
//! These precompute how child records are spread across parents before a
//! batch runs:
//! - [`partition_case_groups`] - sibling groups over a pool of cases
//! - [`PairingPool`] - unused (a, b) combinations for join records
//! - [`address_assignment_order`] - which users receive addresses first

use crate::rng::SeedRng;
use seed_core::RecordId;
use std::collections::{HashSet, VecDeque};

/// Members every case group gets before any extension.
pub const MIN_GROUP_SIZE: usize = 2;

/// Split `pool` into `group_count` sibling groups.
///
/// With at least two ids per group available, the pool is shuffled once and
/// walked without reuse. Each group starts at two members, grows to three
/// with 30% probability and, having grown, to four with a further one in
/// three. Growth never eats into the two ids reserved for each group still
/// to be formed. With fewer ids than that, each group independently samples
/// two distinct ids, so groups may overlap.
pub fn partition_case_groups(
    rng: &mut SeedRng,
    pool: &[RecordId],
    group_count: usize,
) -> Vec<Vec<RecordId>> {
    if group_count == 0 || pool.is_empty() {
        return Vec::new();
    }

    if pool.len() < MIN_GROUP_SIZE * group_count {
        return (0..group_count)
            .map(|_| sample_distinct(rng, pool, MIN_GROUP_SIZE))
            .collect();
    }

    let shuffled = rng.shuffled(pool);
    let mut cursor = 0;
    let mut groups = Vec::with_capacity(group_count);

    for formed in 0..group_count {
        let unformed_after = group_count - formed - 1;
        let available = shuffled.len() - cursor;
        let max_size = available - MIN_GROUP_SIZE * unformed_after;

        let mut size = MIN_GROUP_SIZE;
        if rng.below(10) < 3 {
            size += 1;
            if rng.below(3) < 1 {
                size += 1;
            }
        }
        let size = size.min(max_size);

        groups.push(shuffled[cursor..cursor + size].to_vec());
        cursor += size;
    }

    groups
}

/// Up to `n` distinct elements of `pool`, drawn without replacement.
pub fn sample_distinct(rng: &mut SeedRng, pool: &[RecordId], n: usize) -> Vec<RecordId> {
    let mut candidates = pool.to_vec();
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        match rng.pop_random(&mut candidates) {
            Ok(id) => picked.push(id),
            Err(_) => break,
        }
    }
    picked
}

fn dedup(ids: &[RecordId]) -> Vec<RecordId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Not-yet-used (a, b) id combinations for one batch of join records.
///
/// Built from a shuffled copy of `a`, each entry holding its own shuffled
/// copy of `b`. Pairs are consumed destructively, so no pair is yielded
/// twice, and an entry is dropped once its counterparts run out.
#[derive(Debug, Clone)]
pub struct PairingPool {
    entries: VecDeque<(RecordId, Vec<RecordId>)>,
}

impl PairingPool {
    pub fn new(rng: &mut SeedRng, a: &[RecordId], b: &[RecordId]) -> Self {
        let a = rng.shuffled(&dedup(a));
        let b = dedup(b);

        let mut entries = VecDeque::with_capacity(a.len());
        if !b.is_empty() {
            for a_id in a {
                entries.push_back((a_id, rng.shuffled(&b)));
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pairs not yet drawn.
    pub fn remaining(&self) -> usize {
        self.entries.iter().map(|(_, b)| b.len()).sum()
    }

    /// Draw from the front entry, then rotate it to the back.
    ///
    /// Covers every `a` once before revisiting any of them.
    pub fn next_round_robin(&mut self) -> Option<(RecordId, RecordId)> {
        let (a, mut counterparts) = self.entries.pop_front()?;
        let b = counterparts.pop()?;
        if !counterparts.is_empty() {
            self.entries.push_back((a, counterparts));
        }
        Some((a, b))
    }

    /// Draw a random counterpart from a uniformly chosen entry.
    pub fn next_random(&mut self, rng: &mut SeedRng) -> Option<(RecordId, RecordId)> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.below(self.entries.len());
        let (a, counterparts) = self.entries.get_mut(index)?;
        let a = *a;
        let b = rng.pop_random(counterparts).ok()?;
        if counterparts.is_empty() {
            self.entries.remove(index);
        }
        Some((a, b))
    }
}

/// Order users so those without an address come first.
///
/// Each partition is shuffled independently: users without an address
/// first, then users with one.
pub fn address_assignment_order<F>(
    rng: &mut SeedRng,
    users: &[RecordId],
    has_address: F,
) -> Vec<RecordId>
where
    F: Fn(RecordId) -> bool,
{
    let (with, without): (Vec<RecordId>, Vec<RecordId>) =
        users.iter().copied().partition(|id| has_address(*id));

    let mut order = rng.shuffled(&without);
    order.extend(rng.shuffled(&with));
    order
}

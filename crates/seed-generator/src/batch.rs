//! Retry-bounded batch generation.
//!
//! [`generate_many`] drives "create `count` records" by invoking an attempt
//! closure repeatedly. Failures are recorded in the output rather than
//! raised, and a single shared budget of extra attempts absorbs them across
//! the whole batch.

use crate::error::SeedError;
use seed_core::{RecordId, RecordKind};
use tracing::{debug, info};

/// Outcome of one attempt: the created record's id or why it failed.
pub type SeedResult = Result<RecordId, SeedError>;

/// What a single attempt produced.
#[derive(Debug)]
pub enum Attempt {
    /// A record was created.
    Created(RecordId),
    /// The attempt failed; recorded and counted against the budget.
    Failed(SeedError),
    /// The attempt hit an already-existing association. Nothing is recorded
    /// and no attempt is consumed.
    Redraw,
    /// No valid input remains; records `PoolExhausted` and ends the batch.
    Exhausted,
}

impl From<Result<RecordId, SeedError>> for Attempt {
    fn from(result: Result<RecordId, SeedError>) -> Self {
        match result {
            Ok(id) => Attempt::Created(id),
            Err(error) => Attempt::Failed(error),
        }
    }
}

/// Run `attempt` until `count` records exist or `count + extra_try_count`
/// attempts have been made.
///
/// The closure receives `ctx` and the zero-based attempt index. A
/// non-positive `count` returns an empty vector without calling it.
pub fn generate_many<C, F>(
    ctx: &mut C,
    kind: RecordKind,
    count: i64,
    extra_try_count: usize,
    mut attempt: F,
) -> Vec<SeedResult>
where
    F: FnMut(&mut C, usize) -> Attempt,
{
    let mut results = Vec::new();
    if count <= 0 {
        return results;
    }

    let count = count as usize;
    let max_attempts = count.saturating_add(extra_try_count);
    let mut successes = 0;
    let mut attempt_index = 0;
    let mut redraws = 0u64;

    while successes < count && attempt_index < max_attempts {
        match attempt(ctx, attempt_index) {
            Attempt::Created(id) => {
                results.push(Ok(id));
                successes += 1;
                attempt_index += 1;
            }
            Attempt::Failed(error) => {
                debug!("{} attempt {} failed: {}", kind, attempt_index, error);
                results.push(Err(error));
                attempt_index += 1;
            }
            Attempt::Redraw => {
                redraws += 1;
            }
            Attempt::Exhausted => {
                debug!("{} input exhausted after {} attempts", kind, attempt_index);
                results.push(Err(SeedError::PoolExhausted(kind)));
                break;
            }
        }
    }

    info!(
        "Seeded {}: {} of {} requested, {} failed attempts, {} redraws",
        kind,
        successes,
        count,
        results.len() - successes,
        redraws
    );

    results
}

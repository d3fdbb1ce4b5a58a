//! Single-record generators and their batch counterparts.
//!
//! Each record kind gets two operations on [`RecordCreator`]:
//! - `seed_<kind>` creates one record from required parent references and
//!   returns it, or the reason it could not be created.
//! - `seed_<kind>s` creates `count` records, spreading them over a set of
//!   parents, and returns one [`SeedResult`] per attempt.
//!
//! Field values are drawn in a fixed order before the single store write so
//! that a given seed always produces the same records.
//!
//! [`RecordCreator`]: crate::RecordCreator
//! [`SeedResult`]: crate::SeedResult

mod associations;
mod banners;
mod case_groups;
mod cases;
mod contacts;
mod orgs;
mod reference_data;
mod users;

use crate::batch::Attempt;
use crate::error::SeedError;
use seed_core::Stored;

/// Batch outcome of a single-record generator call.
pub(crate) fn attempt<M>(result: Result<Stored<M>, SeedError>) -> Attempt {
    result.map(|stored| stored.id).into()
}

/// Batch outcome of a join-record generator call; an existing pair is
/// redrawn instead of counted.
pub(crate) fn join_attempt<M>(result: Result<Stored<M>, SeedError>) -> Attempt {
    match result {
        Err(error) if error.is_duplicate_association() => Attempt::Redraw,
        other => attempt(other),
    }
}

/// Uppercase the first letter of `word`.
pub(crate) fn titleize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Round to cents.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("alias"), "Alias");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(12.0), 12.0);
    }
}

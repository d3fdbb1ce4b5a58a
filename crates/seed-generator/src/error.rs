//! Error types for record generation.
//!
//! Two families are kept apart:
//! - [`ArgumentError`] - caller misuse (bad reference shapes, bad
//!   construction parameters). Raised before any store access or RNG draw and
//!   never absorbed by batch retry logic.
//! - [`SeedError`] - a single creation attempt failed. Batch operations record
//!   these in their result sequence.

use seed_core::{RecordId, RecordKind, StoreError, UserRole};
use thiserror::Error;

/// Invalid arguments passed to a generation operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    /// Neither the record nor the id form of a required reference was given.
    #[error("{0} is required")]
    MissingReference(String),

    /// Both the record and the id form of a required reference were given.
    #[error("cannot use {0}")]
    AmbiguousReference(String),

    /// A reference holds records of the wrong kind.
    #[error("param {param} must contain {expected} records, found {found}")]
    WrongType {
        param: String,
        expected: RecordKind,
        found: RecordKind,
    },

    /// A collection that must be non-empty is empty.
    #[error("{0} must contain at least one element")]
    EmptyCollection(String),

    /// A numeric parameter is outside its allowed range.
    #[error("{0}")]
    OutOfRange(String),

    /// A parameter could not be interpreted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failure of one record creation attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedError {
    /// Invalid arguments to a single-record generator.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The store rejected the record or could not resolve a parent.
    #[error(transparent)]
    Store(StoreError),

    /// The join record for this pair already exists.
    #[error("duplicate association: {0}")]
    DuplicateAssociation(StoreError),

    /// The referenced user does not have the role the record requires.
    #[error("user {user_id} has role {actual}, expected {expected}")]
    InvalidRole {
        user_id: RecordId,
        expected: UserRole,
        actual: UserRole,
    },

    /// A domain rule on the referenced records was not met.
    #[error("{0}")]
    OutOfRange(String),

    /// No unused parent combinations remain for this batch.
    #[error("no unused {0} combinations remain")]
    PoolExhausted(RecordKind),
}

impl SeedError {
    pub fn is_duplicate_association(&self) -> bool {
        matches!(self, SeedError::DuplicateAssociation(_))
    }
}

impl From<StoreError> for SeedError {
    fn from(error: StoreError) -> Self {
        if error.is_duplicate_association() {
            SeedError::DuplicateAssociation(error)
        } else {
            SeedError::Store(error)
        }
    }
}

//! Record store trait and error types.
//!
//! This module defines the [`RecordStore`] trait the generator writes
//! through, allowing the same generation logic to target:
//! - The in-memory store (`MemoryStore`) used for previews and tests
//! - An application database adapter implemented outside this workspace

use crate::counts::RecordCounts;
use crate::models::{Model, Record, RecordData, RecordId, RecordKind, Stored};
use std::fmt;
use thiserror::Error;

/// Why the store rejected a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCategory {
    /// A unique attribute collides with an existing record.
    Uniqueness,
    /// A join record for this exact pair already exists.
    DuplicateAssociation,
    /// A referenced parent record does not exist.
    MissingParent,
    /// Any other model validation.
    Invalid,
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationCategory::Uniqueness => "uniqueness",
            ValidationCategory::DuplicateAssociation => "duplicate association",
            ValidationCategory::MissingParent => "missing parent",
            ValidationCategory::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// Errors reported by a record store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The record failed validation and was not saved.
    #[error("{kind} failed to save ({category}): {message}")]
    Validation {
        kind: RecordKind,
        category: ValidationCategory,
        message: String,
    },

    /// No record of this kind has the given id.
    #[error("Couldn't find {kind} with 'id'={id}")]
    NotFound { kind: RecordKind, id: RecordId },

    /// The store returned a record of a different kind than requested.
    #[error("Expected a {expected} record, found {found}")]
    UnexpectedKind {
        expected: RecordKind,
        found: RecordKind,
    },
}

impl StoreError {
    pub fn validation(
        kind: RecordKind,
        category: ValidationCategory,
        message: impl Into<String>,
    ) -> Self {
        StoreError::Validation {
            kind,
            category,
            message: message.into(),
        }
    }

    /// Validation category, if this is a validation failure.
    pub fn category(&self) -> Option<ValidationCategory> {
        match self {
            StoreError::Validation { category, .. } => Some(*category),
            _ => None,
        }
    }

    pub fn is_duplicate_association(&self) -> bool {
        self.category() == Some(ValidationCategory::DuplicateAssociation)
    }
}

/// Storage backend for generated records.
///
/// Each `create` is atomic: it either persists the whole record (including
/// any rows the record implies, such as case group memberships) or returns
/// an error and leaves the store unchanged.
pub trait RecordStore {
    /// Validate and persist a new record, assigning its id.
    fn create(&mut self, data: RecordData) -> Result<Record, StoreError>;

    /// Look up a record by kind and id.
    fn find(&self, kind: RecordKind, id: RecordId) -> Result<Record, StoreError>;

    /// Validate and overwrite an existing record.
    fn update(&mut self, record: Record) -> Result<Record, StoreError>;

    /// All records of a kind, in id order.
    fn query_all(&self, kind: RecordKind) -> Vec<Record>;

    /// Number of records of a kind.
    fn count(&self, kind: RecordKind) -> u64;

    /// Counts for every registered kind.
    fn count_all(&self) -> RecordCounts {
        RecordCounts::capture(self)
    }

    /// Create a record and return it typed.
    fn create_model<M: Model>(&mut self, model: M) -> Result<Stored<M>, StoreError>
    where
        Self: Sized,
    {
        let record = self.create(model.into())?;
        typed(record)
    }

    /// Find a record and return it typed.
    fn find_model<M: Model>(&self, id: RecordId) -> Result<Stored<M>, StoreError>
    where
        Self: Sized,
    {
        let record = self.find(M::KIND, id)?;
        typed(record)
    }

    /// All records of kind `M`, typed.
    fn query_models<M: Model>(&self) -> Vec<Stored<M>>
    where
        Self: Sized,
    {
        self.query_all(M::KIND)
            .into_iter()
            .filter_map(Record::into_stored)
            .collect()
    }
}

fn typed<M: Model>(record: Record) -> Result<Stored<M>, StoreError> {
    let found = record.kind();
    record.into_stored().ok_or(StoreError::UnexpectedKind {
        expected: M::KIND,
        found,
    })
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn create(&mut self, data: RecordData) -> Result<Record, StoreError> {
        (**self).create(data)
    }

    fn find(&self, kind: RecordKind, id: RecordId) -> Result<Record, StoreError> {
        (**self).find(kind, id)
    }

    fn update(&mut self, record: Record) -> Result<Record, StoreError> {
        (**self).update(record)
    }

    fn query_all(&self, kind: RecordKind) -> Vec<Record> {
        (**self).query_all(kind)
    }

    fn count(&self, kind: RecordKind) -> u64 {
        (**self).count(kind)
    }
}

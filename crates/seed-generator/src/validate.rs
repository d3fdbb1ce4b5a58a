//! Required-reference arguments and their validation.
//!
//! Every generator that depends on parent records accepts each parent either
//! as a materialized [`Record`] or as a bare [`RecordId`]. Exactly one form
//! must be supplied. Validation happens before any store access or RNG draw.

use crate::error::ArgumentError;
use seed_core::{Record, RecordId, RecordKind};

/// Reference to one required parent record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordRef<'a> {
    pub record: Option<&'a Record>,
    pub id: Option<RecordId>,
}

/// A validated single reference.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Record(&'a Record),
    Id(RecordId),
}

impl Resolved<'_> {
    pub fn id(&self) -> RecordId {
        match self {
            Resolved::Record(record) => record.id,
            Resolved::Id(id) => *id,
        }
    }
}

impl<'a> RecordRef<'a> {
    pub fn record(record: &'a Record) -> Self {
        Self {
            record: Some(record),
            id: None,
        }
    }

    pub fn id(id: impl Into<RecordId>) -> Self {
        Self {
            record: None,
            id: Some(id.into()),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Both forms at once. Always rejected by [`RecordRef::validate`].
    pub fn both(record: &'a Record, id: impl Into<RecordId>) -> Self {
        Self {
            record: Some(record),
            id: Some(id.into()),
        }
    }

    /// Check that exactly one form is present and that a given record is
    /// of `kind`. `name` is the parameter name used in error messages.
    pub fn validate(self, kind: RecordKind, name: &str) -> Result<Resolved<'a>, ArgumentError> {
        match (self.record, self.id) {
            (None, None) => Err(ArgumentError::MissingReference(format!(
                "{name}: or {name}_id:"
            ))),
            (Some(_), Some(_)) => Err(ArgumentError::AmbiguousReference(format!(
                "{name}: and {name}_id:"
            ))),
            (Some(record), None) => {
                if record.kind() != kind {
                    return Err(ArgumentError::WrongType {
                        param: format!("{name}:"),
                        expected: kind,
                        found: record.kind(),
                    });
                }
                Ok(Resolved::Record(record))
            }
            (None, Some(id)) => Ok(Resolved::Id(id)),
        }
    }
}

/// Reference to a non-empty set of parent records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordsRef<'a> {
    pub records: Option<&'a [Record]>,
    pub ids: Option<&'a [RecordId]>,
}

impl<'a> RecordsRef<'a> {
    pub fn records(records: &'a [Record]) -> Self {
        Self {
            records: Some(records),
            ids: None,
        }
    }

    pub fn ids(ids: &'a [RecordId]) -> Self {
        Self {
            records: None,
            ids: Some(ids),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Both forms at once. Always rejected by [`RecordsRef::validate`].
    pub fn both(records: &'a [Record], ids: &'a [RecordId]) -> Self {
        Self {
            records: Some(records),
            ids: Some(ids),
        }
    }

    /// Check exclusivity, element kind and non-emptiness, returning the ids
    /// as a fresh vector. `singular`/`plural` name the parameter in errors.
    pub fn validate(
        self,
        kind: RecordKind,
        singular: &str,
        plural: &str,
    ) -> Result<Vec<RecordId>, ArgumentError> {
        match (self.records, self.ids) {
            (None, None) => Err(ArgumentError::MissingReference(format!(
                "{plural}: or {singular}_ids:"
            ))),
            (Some(_), Some(_)) => Err(ArgumentError::AmbiguousReference(format!(
                "{plural}: and {singular}_ids:"
            ))),
            (Some(records), None) => {
                if let Some(wrong) = records.iter().find(|record| record.kind() != kind) {
                    return Err(ArgumentError::WrongType {
                        param: format!("{plural}:"),
                        expected: kind,
                        found: wrong.kind(),
                    });
                }
                if records.is_empty() {
                    return Err(ArgumentError::EmptyCollection(format!("param {plural}:")));
                }
                Ok(records.iter().map(|record| record.id).collect())
            }
            (None, Some(ids)) => {
                if ids.is_empty() {
                    return Err(ArgumentError::EmptyCollection(format!(
                        "param {singular}_ids:"
                    )));
                }
                Ok(ids.to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::{CasaOrg, CaseContact, ContactMedium};

    fn org_record(id: i64) -> Record {
        Record::new(
            RecordId(id),
            CasaOrg {
                name: format!("Org {id}"),
                address: "1 Main St".to_string(),
            }
            .into(),
        )
    }

    fn contact_record(id: i64) -> Record {
        Record::new(
            RecordId(id),
            CaseContact {
                casa_case_id: RecordId(1),
                creator_id: RecordId(2),
                occurred_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                duration_minutes: 30,
                medium: ContactMedium::Video,
                miles_driven: 0,
                want_driving_reimbursement: false,
            }
            .into(),
        )
    }

    #[test]
    fn test_single_reference_forms() {
        let record = contact_record(3);

        let resolved = RecordRef::record(&record)
            .validate(RecordKind::CaseContact, "case_contact")
            .unwrap();
        assert_eq!(resolved.id(), RecordId(3));

        let resolved = RecordRef::id(9)
            .validate(RecordKind::CaseContact, "case_contact")
            .unwrap();
        assert!(matches!(resolved, Resolved::Id(RecordId(9))));
    }

    #[test]
    fn test_single_reference_missing_and_ambiguous() {
        let record = contact_record(3);

        let missing = RecordRef::none()
            .validate(RecordKind::CaseContact, "case_contact")
            .unwrap_err();
        assert_eq!(
            missing.to_string(),
            "case_contact: or case_contact_id: is required"
        );

        let ambiguous = RecordRef::both(&record, 3)
            .validate(RecordKind::CaseContact, "case_contact")
            .unwrap_err();
        assert_eq!(
            ambiguous.to_string(),
            "cannot use case_contact: and case_contact_id:"
        );
    }

    #[test]
    fn test_single_reference_wrong_kind() {
        let record = org_record(1);
        let error = RecordRef::record(&record)
            .validate(RecordKind::CaseContact, "case_contact")
            .unwrap_err();
        assert!(matches!(error, ArgumentError::WrongType { .. }));
    }

    #[test]
    fn test_plural_reference_forms() {
        let records = vec![contact_record(1), contact_record(2)];
        let ids = records
            .iter()
            .map(|record| record.id)
            .collect::<Vec<_>>();

        assert_eq!(
            RecordsRef::records(&records)
                .validate(RecordKind::CaseContact, "case_contact", "case_contacts")
                .unwrap(),
            ids
        );
        assert_eq!(
            RecordsRef::ids(&ids)
                .validate(RecordKind::CaseContact, "case_contact", "case_contacts")
                .unwrap(),
            ids
        );
    }

    #[test]
    fn test_plural_reference_errors() {
        let records = vec![contact_record(1)];
        let ids = vec![RecordId(1)];
        let validate = |reference: RecordsRef<'_>| {
            reference.validate(RecordKind::CaseContact, "case_contact", "case_contacts")
        };

        assert!(matches!(
            validate(RecordsRef::none()),
            Err(ArgumentError::MissingReference(_))
        ));
        assert!(matches!(
            validate(RecordsRef::both(&records, &ids)),
            Err(ArgumentError::AmbiguousReference(_))
        ));
        assert!(matches!(
            validate(RecordsRef::records(&[])),
            Err(ArgumentError::EmptyCollection(_))
        ));
        assert!(matches!(
            validate(RecordsRef::ids(&[])),
            Err(ArgumentError::EmptyCollection(_))
        ));

        let orgs = vec![org_record(5)];
        assert!(matches!(
            validate(RecordsRef::records(&orgs)),
            Err(ArgumentError::WrongType { .. })
        ));
    }
}

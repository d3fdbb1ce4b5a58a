//! Many-to-many join records between cases and their reference data.
//!
//! Batches draw parent pairs from a [`PairingPool`] so no pair is attempted
//! twice. A pair that already exists in the store is redrawn without
//! spending an attempt.

use super::join_attempt;
use crate::batch::{generate_many, Attempt, SeedResult};
use crate::creator::RecordCreator;
use crate::distribute::PairingPool;
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use seed_core::{
    CasaCase, CasaCaseContactType, CasaCaseEmancipationCategory, RecordId, RecordKind,
    RecordStore, Stored, TRANSITION_AGE,
};
use tracing::{debug, warn};

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    pub fn seed_casa_case_contact_type(
        &mut self,
        casa_case: RecordRef<'_>,
        contact_type: RecordRef<'_>,
    ) -> Result<Stored<CasaCaseContactType>, SeedError> {
        let casa_case = casa_case.validate(RecordKind::CasaCase, "casa_case")?;
        let contact_type = contact_type.validate(RecordKind::ContactType, "contact_type")?;

        self.create(CasaCaseContactType {
            casa_case_id: casa_case.id(),
            contact_type_id: contact_type.id(),
        })
    }

    /// Link cases to contact types, visiting every case once before any case
    /// gets a second contact type.
    pub fn seed_casa_case_contact_types(
        &mut self,
        casa_cases: RecordsRef<'_>,
        contact_types: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let case_ids = casa_cases.validate(RecordKind::CasaCase, "casa_case", "casa_cases")?;
        let contact_type_ids =
            contact_types.validate(RecordKind::ContactType, "contact_type", "contact_types")?;
        if count <= 0 {
            return Ok(Vec::new());
        }

        let mut pool = PairingPool::new(&mut self.rng, &case_ids, &contact_type_ids);

        let budget = self.extra_try_count;
        Ok(generate_many(
            self,
            RecordKind::CasaCaseContactType,
            count,
            budget,
            |creator, _| match pool.next_round_robin() {
                Some((case_id, contact_type_id)) => join_attempt(
                    creator.seed_casa_case_contact_type(
                        RecordRef::id(case_id),
                        RecordRef::id(contact_type_id),
                    ),
                ),
                None => Attempt::Exhausted,
            },
        ))
    }

    /// Link a transition-age case to an emancipation category.
    ///
    /// Cases younger than [`TRANSITION_AGE`] are rejected with
    /// [`SeedError::OutOfRange`].
    pub fn seed_casa_case_emancipation_category(
        &mut self,
        casa_case: RecordRef<'_>,
        emancipation_category: RecordRef<'_>,
    ) -> Result<Stored<CasaCaseEmancipationCategory>, SeedError> {
        let casa_case = casa_case.validate(RecordKind::CasaCase, "casa_case")?;
        let emancipation_category = emancipation_category
            .validate(RecordKind::EmancipationCategory, "emancipation_category")?;

        let case = self.resolve::<CasaCase>(casa_case)?;
        if !case.in_transition_age(self.today) {
            return Err(SeedError::OutOfRange(format!(
                "casa case {} must be at least {} years old to receive emancipation categories",
                case.id, TRANSITION_AGE
            )));
        }

        self.create(CasaCaseEmancipationCategory {
            casa_case_id: case.id,
            emancipation_category_id: emancipation_category.id(),
        })
    }

    /// Link random transition-age cases to random emancipation categories.
    ///
    /// Cases that cannot be found are skipped with a warning, as are cases
    /// below transition age.
    pub fn seed_casa_case_emancipation_categories(
        &mut self,
        casa_cases: RecordsRef<'_>,
        emancipation_categories: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let case_ids = casa_cases.validate(RecordKind::CasaCase, "casa_case", "casa_cases")?;
        let category_ids = emancipation_categories.validate(
            RecordKind::EmancipationCategory,
            "emancipation_category",
            "emancipation_categories",
        )?;
        if count <= 0 {
            return Ok(Vec::new());
        }

        let eligible = self.transition_age_cases(&case_ids);
        debug!(
            "{} of {} cases are of transition age",
            eligible.len(),
            case_ids.len()
        );
        let mut pool = PairingPool::new(&mut self.rng, &eligible, &category_ids);

        let budget = self.extra_try_count;
        Ok(generate_many(
            self,
            RecordKind::CasaCaseEmancipationCategory,
            count,
            budget,
            |creator, _| match pool.next_random(&mut creator.rng) {
                Some((case_id, category_id)) => join_attempt(
                    creator.seed_casa_case_emancipation_category(
                        RecordRef::id(case_id),
                        RecordRef::id(category_id),
                    ),
                ),
                None => Attempt::Exhausted,
            },
        ))
    }

    fn transition_age_cases(&self, case_ids: &[RecordId]) -> Vec<RecordId> {
        case_ids
            .iter()
            .filter_map(|id| match self.store.find_model::<CasaCase>(*id) {
                Ok(case) => Some(case),
                Err(error) => {
                    warn!("Skipping casa case {}: {}", id, error);
                    None
                }
            })
            .filter(|case| case.in_transition_age(self.today))
            .map(|case| case.id)
            .collect()
    }
}

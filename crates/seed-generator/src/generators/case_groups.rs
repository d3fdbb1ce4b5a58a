//! Sibling case groups.

use super::attempt;
use crate::batch::{generate_many, SeedResult};
use crate::creator::RecordCreator;
use crate::distribute::{partition_case_groups, sample_distinct, MIN_GROUP_SIZE};
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use seed_core::{CaseGroup, RecordKind, RecordStore, Stored};
use tracing::debug;

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Group `casa_cases` as siblings under a family name.
    ///
    /// Membership rows are written by the store together with the group.
    pub fn seed_case_group(
        &mut self,
        casa_org: RecordRef<'_>,
        casa_cases: RecordsRef<'_>,
    ) -> Result<Stored<CaseGroup>, SeedError> {
        let casa_org = casa_org.validate(RecordKind::CasaOrg, "casa_org")?;
        let case_ids = casa_cases.validate(RecordKind::CasaCase, "casa_case", "casa_cases")?;

        let name = format!("{} Family", self.faker.last_name(&mut self.rng));

        self.create(CaseGroup {
            casa_org_id: casa_org.id(),
            name,
            case_ids,
        })
    }

    /// Create `count` groups over a shared case pool.
    ///
    /// The pool is partitioned once up front (see [`partition_case_groups`])
    /// and attempt `i` uses group `i`. Retries beyond the planned groups draw
    /// a fresh pair of cases.
    pub fn seed_case_groups(
        &mut self,
        casa_org: RecordRef<'_>,
        casa_cases: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let casa_org_id = casa_org.validate(RecordKind::CasaOrg, "casa_org")?.id();
        let case_ids = casa_cases.validate(RecordKind::CasaCase, "casa_case", "casa_cases")?;
        if count <= 0 {
            return Ok(Vec::new());
        }

        let groups = partition_case_groups(&mut self.rng, &case_ids, count as usize);
        debug!(
            "Partitioned {} cases into {} case groups",
            case_ids.len(),
            groups.len()
        );

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::CaseGroup, count, budget, |creator, index| {
            let members = match groups.get(index) {
                Some(group) => group.clone(),
                None => sample_distinct(&mut creator.rng, &case_ids, MIN_GROUP_SIZE),
            };
            attempt(creator.seed_case_group(RecordRef::id(casa_org_id), RecordsRef::ids(&members)))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{creator, creator_with_budget};
    use crate::validate::{RecordRef, RecordsRef};
    use crate::{ArgumentError, SeedError};
    use seed_core::{CaseGroup, CaseGroupMembership, MemoryStore, RecordId, RecordKind, RecordStore};
    use std::collections::HashSet;

    fn org_with_cases(
        creator: &mut crate::RecordCreator<MemoryStore>,
        cases: i64,
    ) -> (RecordId, Vec<RecordId>) {
        let org = creator.seed_casa_org().unwrap();
        let case_ids = creator
            .seed_casa_cases(RecordsRef::ids(&[org.id]), cases)
            .unwrap()
            .into_iter()
            .filter_map(Result::ok)
            .collect();
        (org.id, case_ids)
    }

    #[test]
    fn test_seed_case_group_writes_memberships() {
        let mut creator = creator(61);
        let (org_id, case_ids) = org_with_cases(&mut creator, 3);

        let group = creator
            .seed_case_group(RecordRef::id(org_id), RecordsRef::ids(&case_ids))
            .unwrap();

        assert!(group.name.ends_with(" Family"));
        assert_eq!(group.case_ids, case_ids);
        assert_eq!(creator.store().count(RecordKind::CaseGroupMembership), 3);
        assert!(creator
            .store()
            .query_models::<CaseGroupMembership>()
            .iter()
            .all(|membership| membership.case_group_id == group.id));
    }

    #[test]
    fn test_seed_case_group_requires_cases() {
        let mut creator = creator(62);
        let org = creator.seed_casa_org().unwrap();

        let result = creator.seed_case_group(RecordRef::id(org.id), RecordsRef::ids(&[]));
        assert!(matches!(
            result,
            Err(SeedError::Argument(ArgumentError::EmptyCollection(_)))
        ));
    }

    #[test]
    fn test_seed_case_groups_partitions_pool() {
        let mut creator = creator_with_budget(63, 0);
        let (org_id, case_ids) = org_with_cases(&mut creator, 12);
        assert_eq!(case_ids.len(), 12);

        let results = creator
            .seed_case_groups(RecordRef::id(org_id), RecordsRef::ids(&case_ids), 4)
            .unwrap();
        assert_eq!(results.len(), 4);

        let groups = creator.store().query_models::<CaseGroup>();
        let mut seen = HashSet::new();
        for group in &groups {
            assert!(group.case_ids.len() >= 2);
            for case_id in &group.case_ids {
                assert!(seen.insert(*case_id), "case {case_id} in two groups");
            }
        }
    }

    #[test]
    fn test_seed_case_groups_zero_count() {
        let mut creator = creator(64);
        let (org_id, case_ids) = org_with_cases(&mut creator, 4);

        let results = creator
            .seed_case_groups(RecordRef::id(org_id), RecordsRef::ids(&case_ids), 0)
            .unwrap();
        assert!(results.is_empty());

        let result = creator.seed_case_groups(RecordRef::none(), RecordsRef::ids(&case_ids), 0);
        assert!(matches!(result, Err(ArgumentError::MissingReference(_))));
    }
}

//! Organizations and platform-wide admin accounts.

use super::attempt;
use crate::batch::{generate_many, SeedResult};
use crate::creator::{RecordCreator, DEFAULT_PASSWORD};
use crate::error::SeedError;
use crate::faker::FakeData;
use seed_core::{AllCasaAdmin, CasaOrg, RecordKind, RecordStore, Stored};

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Create one organization named after a county.
    pub fn seed_casa_org(&mut self) -> Result<Stored<CasaOrg>, SeedError> {
        let name = format!("{} County", self.faker.neutral_first_name(&mut self.rng));
        let address = self.faker.full_address(&mut self.rng);

        self.create(CasaOrg { name, address })
    }

    pub fn seed_casa_orgs(&mut self, count: i64) -> Vec<SeedResult> {
        let budget = self.extra_try_count;
        generate_many(self, RecordKind::CasaOrg, count, budget, |creator, _| {
            attempt(creator.seed_casa_org())
        })
    }

    /// Create one platform-wide admin account.
    pub fn seed_all_casa_admin(&mut self) -> Result<Stored<AllCasaAdmin>, SeedError> {
        let email = self.faker.email(&mut self.rng);

        self.create(AllCasaAdmin {
            email,
            password: DEFAULT_PASSWORD.to_string(),
        })
    }

    pub fn seed_all_casa_admins(&mut self, count: i64) -> Vec<SeedResult> {
        let budget = self.extra_try_count;
        generate_many(self, RecordKind::AllCasaAdmin, count, budget, |creator, _| {
            attempt(creator.seed_all_casa_admin())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{creator, creator_with_budget, today};
    use crate::{CreatorConfig, RecordCreator, SeedError};
    use seed_core::{RecordKind, RecordStore};

    #[test]
    fn test_seed_casa_org() {
        let mut creator = creator(42);
        let org = creator.seed_casa_org().unwrap();

        assert!(org.name.ends_with(" County"));
        assert!(!org.address.is_empty());
        assert_eq!(creator.store().count(RecordKind::CasaOrg), 1);
    }

    #[test]
    fn test_same_seed_repeats_org_names() {
        let mut first = creator_with_budget(0, 5);
        let results = first.seed_casa_orgs(2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);

        let mut second = RecordCreator::new(
            first.into_store(),
            CreatorConfig::seeded(0).with_today(today()),
        )
        .unwrap();
        let results = second.seed_casa_orgs(2);

        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(SeedError::Store(_)))));
    }

    #[test]
    fn test_seed_casa_orgs_negative_count() {
        let mut creator = creator(1);
        assert!(creator.seed_casa_orgs(-1).is_empty());
        assert!(creator.seed_casa_orgs(0).is_empty());
        assert_eq!(creator.store().count(RecordKind::CasaOrg), 0);
    }

    #[test]
    fn test_seed_all_casa_admins() {
        let mut creator = creator_with_budget(7, 5);
        let results = creator.seed_all_casa_admins(3);

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
        assert_eq!(creator.store().count(RecordKind::AllCasaAdmin), 3);
    }

    #[test]
    fn test_zero_count_draws_nothing() {
        let mut idle = creator(5);
        let mut fresh = creator(5);

        idle.seed_casa_orgs(0);
        idle.seed_all_casa_admins(-4);

        assert_eq!(
            idle.seed_casa_org().unwrap().model,
            fresh.seed_casa_org().unwrap().model
        );
    }
}

//! Languages, mileage rates and emancipation categories.

use super::{attempt, round2, titleize};
use crate::batch::{generate_many, SeedResult};
use crate::creator::RecordCreator;
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use seed_core::{EmancipationCategory, Language, MileageRate, RecordKind, RecordStore, Stored};

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    pub fn seed_language(&mut self, casa_org: RecordRef<'_>) -> Result<Stored<Language>, SeedError> {
        let casa_org = casa_org.validate(RecordKind::CasaOrg, "casa_org")?;

        let name = self.faker.language_name(&mut self.rng);

        self.create(Language {
            casa_org_id: casa_org.id(),
            name,
        })
    }

    pub fn seed_languages(
        &mut self,
        casa_orgs: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let casa_org_ids = casa_orgs.validate(RecordKind::CasaOrg, "casa_org", "casa_orgs")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::Language, count, budget, |creator, _| {
            let result = creator
                .pick(&casa_org_ids)
                .and_then(|org_id| creator.seed_language(RecordRef::id(org_id)));
            attempt(result)
        }))
    }

    /// Create one active per-mile rate, effective some day in the last ten
    /// years.
    pub fn seed_mileage_rate(
        &mut self,
        casa_org: RecordRef<'_>,
    ) -> Result<Stored<MileageRate>, SeedError> {
        let casa_org = casa_org.validate(RecordKind::CasaOrg, "casa_org")?;

        let amount = round2(self.rng.range_inclusive(0.3, 0.8));
        let effective_date = self.faker.date_past(&mut self.rng, self.today, 3650);

        self.create(MileageRate {
            casa_org_id: casa_org.id(),
            amount,
            effective_date,
            is_active: true,
        })
    }

    pub fn seed_mileage_rates(
        &mut self,
        casa_orgs: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let casa_org_ids = casa_orgs.validate(RecordKind::CasaOrg, "casa_org", "casa_orgs")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::MileageRate, count, budget, |creator, _| {
            let result = creator
                .pick(&casa_org_ids)
                .and_then(|org_id| creator.seed_mileage_rate(RecordRef::id(org_id)));
            attempt(result)
        }))
    }

    pub fn seed_emancipation_category(
        &mut self,
    ) -> Result<Stored<EmancipationCategory>, SeedError> {
        let name = (0..3)
            .map(|_| titleize(&self.faker.word(&mut self.rng)))
            .collect::<Vec<_>>()
            .join(" ");
        let mutually_exclusive = self.rng.chance(0.5);

        self.create(EmancipationCategory {
            name,
            mutually_exclusive,
        })
    }

    pub fn seed_emancipation_categories(&mut self, count: i64) -> Vec<SeedResult> {
        let budget = self.extra_try_count;
        generate_many(self, RecordKind::EmancipationCategory, count, budget, |creator, _| {
            attempt(creator.seed_emancipation_category())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{creator, creator_with_budget, today};
    use crate::validate::{RecordRef, RecordsRef};
    use crate::SeedError;
    use seed_core::{Language, MileageRate, RecordKind, RecordStore};

    #[test]
    fn test_language_names_unique_per_org() {
        let mut creator = creator_with_budget(51, 100);
        let org = creator.seed_casa_org().unwrap();

        let results = creator
            .seed_languages(RecordsRef::ids(&[org.id]), 10)
            .unwrap();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 10);

        let mut names: Vec<String> = creator
            .store()
            .query_models::<Language>()
            .into_iter()
            .map(|language| language.model.name.to_lowercase())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_language_collisions_are_recorded() {
        let mut creator = creator(52);
        let org = creator.seed_casa_org().unwrap();

        // More languages than the provider knows: later attempts must fail.
        let results = creator
            .seed_languages(RecordsRef::ids(&[org.id]), 60)
            .unwrap();

        assert_eq!(results.len(), 60);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(SeedError::Store(_)))));
    }

    #[test]
    fn test_seed_mileage_rate() {
        let mut creator = creator(53);
        let org = creator.seed_casa_org().unwrap();
        let rate = creator.seed_mileage_rate(RecordRef::id(org.id)).unwrap();

        assert!(rate.is_active);
        assert!(rate.amount >= 0.3 && rate.amount <= 0.8);
        assert!(rate.effective_date < today());
        assert_eq!(
            creator.store().query_models::<MileageRate>()[0].casa_org_id,
            org.id
        );
    }

    #[test]
    fn test_seed_emancipation_categories() {
        let mut creator = creator_with_budget(54, 5);
        let results = creator.seed_emancipation_categories(4);

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 4);
        assert_eq!(creator.store().count(RecordKind::EmancipationCategory), 4);
        let category = creator.seed_emancipation_category().unwrap();
        assert_eq!(category.name.split(' ').count(), 3);
    }
}

//! Youth cases.

use super::attempt;
use crate::batch::{generate_many, SeedResult};
use crate::creator::RecordCreator;
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use chrono::NaiveDate;
use seed_core::{CasaCase, RecordKind, RecordStore, Stored};

/// One in this many cases is drawn from the older-youth age band.
const OLDER_YOUTH_ODDS: usize = 20;

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Create one case in an organization.
    ///
    /// The youth's birth month is drawn from 18 to 21 years ago for one case
    /// in twenty and from 0 to 18 years ago otherwise. The date in care falls
    /// between the birth month and today.
    pub fn seed_casa_case(&mut self, casa_org: RecordRef<'_>) -> Result<Stored<CasaCase>, SeedError> {
        let casa_org = casa_org.validate(RecordKind::CasaOrg, "casa_org")?;

        let birth_month_year_youth = self.random_youth_birth_month();
        let case_number = self.random_case_number();
        let date_in_care = self
            .faker
            .date_between(&mut self.rng, birth_month_year_youth, self.today);

        self.create(CasaCase {
            casa_org_id: casa_org.id(),
            case_number,
            birth_month_year_youth,
            date_in_care,
        })
    }

    pub fn seed_casa_cases(
        &mut self,
        casa_orgs: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let casa_org_ids = casa_orgs.validate(RecordKind::CasaOrg, "casa_org", "casa_orgs")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::CasaCase, count, budget, |creator, _| {
            let result = creator
                .pick(&casa_org_ids)
                .and_then(|org_id| creator.seed_casa_case(RecordRef::id(org_id)));
            attempt(result)
        }))
    }

    fn random_youth_birth_month(&mut self) -> NaiveDate {
        if self.rng.below(OLDER_YOUTH_ODDS) < 1 {
            self.faker.birth_month(&mut self.rng, self.today, 18, 21)
        } else {
            self.faker.birth_month(&mut self.rng, self.today, 0, 18)
        }
    }

    /// Three groups of four uppercase alphanumerics, e.g. `7QK2-B0XM-4TZA`.
    fn random_case_number(&mut self) -> String {
        (0..3)
            .map(|_| self.faker.alphanumeric(&mut self.rng, 4).to_uppercase())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{creator, creator_with_budget, today};
    use crate::validate::{RecordRef, RecordsRef};
    use crate::{ArgumentError, SeedError};
    use chrono::Datelike;
    use seed_core::{CasaCase, RecordId, RecordKind, RecordStore};

    #[test]
    fn test_seed_casa_case_fields() {
        let mut creator = creator(11);
        let org = creator.seed_casa_org().unwrap();
        let case = creator.seed_casa_case(RecordRef::id(org.id)).unwrap();

        assert_eq!(case.casa_org_id, org.id);
        assert_eq!(case.birth_month_year_youth.day(), 1);
        assert!(case.date_in_care >= case.birth_month_year_youth);
        assert!(case.date_in_care <= today());

        let groups: Vec<&str> = case.case_number.split('-').collect();
        assert_eq!(groups.len(), 3);
        for group in groups {
            assert_eq!(group.len(), 4);
            assert!(group
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_birth_months_mostly_minors() {
        let mut creator = creator_with_budget(12, 20);
        let org = creator.seed_casa_org().unwrap();
        let results = creator
            .seed_casa_cases(RecordsRef::ids(&[org.id]), 200)
            .unwrap();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 200);

        let cases = creator.store().query_models::<CasaCase>();
        let older = cases
            .iter()
            .filter(|case| case.age_in_years(today()) >= 18)
            .count();
        assert!(older < 60, "{older} of 200 cases are older youth");
    }

    #[test]
    fn test_birth_months_never_exceed_age_21() {
        for seed in 0..20 {
            let mut creator = creator_with_budget(seed, 50);
            let org = creator.seed_casa_org().unwrap();
            creator
                .seed_casa_cases(RecordsRef::ids(&[org.id]), 500)
                .unwrap();

            for case in creator.store().query_models::<CasaCase>() {
                let age = case.age_in_years(today());
                assert!(age <= 21, "seed {seed}: case aged {age}");
                assert!(case.date_in_care >= case.birth_month_year_youth);
            }
        }
    }

    #[test]
    fn test_seed_casa_case_unknown_org() {
        let mut creator = creator(13);
        let result = creator.seed_casa_case(RecordRef::id(RecordId(-1)));
        assert!(matches!(result, Err(SeedError::Store(_))));
    }

    #[test]
    fn test_seed_casa_cases_missing_reference() {
        let mut creator = creator(13);
        let result = creator.seed_casa_cases(RecordsRef::none(), 2);
        assert!(matches!(result, Err(ArgumentError::MissingReference(_))));
        assert_eq!(creator.store().count(RecordKind::CasaCase), 0);
    }

    #[test]
    fn test_seed_casa_cases_deterministic() {
        let run = |seed| {
            let mut creator = creator(seed);
            let org = creator.seed_casa_org().unwrap();
            creator
                .seed_casa_cases(RecordsRef::ids(&[org.id]), 5)
                .unwrap();
            creator
                .store()
                .query_models::<CasaCase>()
                .into_iter()
                .map(|case| case.model)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(21), run(21));
    }
}

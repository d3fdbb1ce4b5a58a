//! Contact types, case contacts and their additional expenses.

use super::{attempt, round2, titleize};
use crate::batch::{generate_many, SeedResult};
use crate::creator::RecordCreator;
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use seed_core::{
    AdditionalExpense, CaseContact, ContactMedium, ContactType, RecordKind, RecordStore, Stored,
};

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Create one contact type in an organization. Nine in ten are active.
    pub fn seed_contact_type(
        &mut self,
        casa_org: RecordRef<'_>,
    ) -> Result<Stored<ContactType>, SeedError> {
        let casa_org = casa_org.validate(RecordKind::CasaOrg, "casa_org")?;

        let name = format!(
            "{} {}",
            titleize(&self.faker.word(&mut self.rng)),
            titleize(&self.faker.word(&mut self.rng))
        );
        let active = self.rng.chance(0.9);

        self.create(ContactType {
            casa_org_id: casa_org.id(),
            name,
            active,
        })
    }

    pub fn seed_contact_types(
        &mut self,
        casa_orgs: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let casa_org_ids = casa_orgs.validate(RecordKind::CasaOrg, "casa_org", "casa_orgs")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::ContactType, count, budget, |creator, _| {
            let result = creator
                .pick(&casa_org_ids)
                .and_then(|org_id| creator.seed_contact_type(RecordRef::id(org_id)));
            attempt(result)
        }))
    }

    /// Log one contact on a case, authored by `creator`.
    ///
    /// Only in-person contacts carry mileage, and only contacts with
    /// mileage may request reimbursement.
    pub fn seed_case_contact(
        &mut self,
        casa_case: RecordRef<'_>,
        creator: RecordRef<'_>,
    ) -> Result<Stored<CaseContact>, SeedError> {
        let casa_case = casa_case.validate(RecordKind::CasaCase, "casa_case")?;
        let creator = creator.validate(RecordKind::User, "creator")?;

        let occurred_at = self.faker.date_past(&mut self.rng, self.today, 365);
        let duration_minutes = self.rng.range_inclusive(15, 180);
        let medium = ContactMedium::ALL[self.rng.below(ContactMedium::ALL.len())];
        let miles_driven = match medium {
            ContactMedium::InPerson => self.rng.range_inclusive(0, 100),
            _ => 0,
        };
        let want_driving_reimbursement = miles_driven > 0 && self.rng.chance(0.5);

        self.create(CaseContact {
            casa_case_id: casa_case.id(),
            creator_id: creator.id(),
            occurred_at,
            duration_minutes,
            medium,
            miles_driven,
            want_driving_reimbursement,
        })
    }

    pub fn seed_case_contacts(
        &mut self,
        casa_cases: RecordsRef<'_>,
        creators: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let case_ids = casa_cases.validate(RecordKind::CasaCase, "casa_case", "casa_cases")?;
        let creator_ids = creators.validate(RecordKind::User, "creator", "creators")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::CaseContact, count, budget, |creator, _| {
            let result = creator.pick(&case_ids).and_then(|case_id| {
                let author_id = creator.pick(&creator_ids)?;
                creator.seed_case_contact(RecordRef::id(case_id), RecordRef::id(author_id))
            });
            attempt(result)
        }))
    }

    /// Attach one expense to a case contact.
    pub fn seed_additional_expense(
        &mut self,
        case_contact: RecordRef<'_>,
    ) -> Result<Stored<AdditionalExpense>, SeedError> {
        let case_contact = case_contact.validate(RecordKind::CaseContact, "case_contact")?;

        let other_expense_amount = self.rng.range_inclusive(1, 40) as f64 + round2(self.rng.unit());
        let other_expenses_describe = self.faker.product_name(&mut self.rng);

        self.create(AdditionalExpense {
            case_contact_id: case_contact.id(),
            other_expense_amount,
            other_expenses_describe,
        })
    }

    pub fn seed_additional_expenses(
        &mut self,
        case_contacts: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let contact_ids =
            case_contacts.validate(RecordKind::CaseContact, "case_contact", "case_contacts")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::AdditionalExpense, count, budget, |creator, _| {
            let result = creator
                .pick(&contact_ids)
                .and_then(|contact_id| creator.seed_additional_expense(RecordRef::id(contact_id)));
            attempt(result)
        }))
    }
}

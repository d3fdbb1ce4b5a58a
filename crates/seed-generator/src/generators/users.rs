//! Users and their addresses.

use super::attempt;
use crate::batch::{generate_many, Attempt, SeedResult};
use crate::creator::{RecordCreator, DEFAULT_PASSWORD};
use crate::distribute::address_assignment_order;
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use seed_core::{Address, RecordKind, RecordStore, Stored, User, UserRole};
use std::collections::HashSet;

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Create one user of `role` in an organization.
    pub fn seed_user(
        &mut self,
        casa_org: RecordRef<'_>,
        role: UserRole,
    ) -> Result<Stored<User>, SeedError> {
        let casa_org = casa_org.validate(RecordKind::CasaOrg, "casa_org")?;

        let first = self.faker.first_name(&mut self.rng);
        let last = self.faker.last_name(&mut self.rng);
        let suffix = self.rng.range_inclusive(1, 999);

        self.create(User {
            casa_org_id: casa_org.id(),
            email: format!("{first}.{last}{suffix}@example.com").to_lowercase(),
            display_name: format!("{first} {last}"),
            role,
            password: DEFAULT_PASSWORD.to_string(),
        })
    }

    pub fn seed_users(
        &mut self,
        casa_orgs: RecordsRef<'_>,
        role: UserRole,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let casa_org_ids = casa_orgs.validate(RecordKind::CasaOrg, "casa_org", "casa_orgs")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::User, count, budget, |creator, _| {
            let result = creator
                .pick(&casa_org_ids)
                .and_then(|org_id| creator.seed_user(RecordRef::id(org_id), role));
            attempt(result)
        }))
    }

    /// Give a user an address.
    ///
    /// A user has at most one address: if one exists it is updated in place
    /// and returned instead of creating another.
    pub fn seed_address(&mut self, user: RecordRef<'_>) -> Result<Stored<Address>, SeedError> {
        let user = user.validate(RecordKind::User, "user")?;

        let content = self.faker.full_address(&mut self.rng);

        let user = self.resolve::<User>(user)?;
        let existing = self
            .store
            .query_models::<Address>()
            .into_iter()
            .find(|address| address.user_id == user.id);

        match existing {
            Some(mut address) => {
                address.model.content = content;
                self.update(address)
            }
            None => self.create(Address {
                user_id: user.id,
                content,
            }),
        }
    }

    /// Assign addresses across `users`, preferring users without one.
    ///
    /// Users are ordered once up front (see [`address_assignment_order`]) and
    /// visited in that order, one per attempt. Running past the last user
    /// ends the batch with `PoolExhausted`.
    pub fn seed_addresses(
        &mut self,
        users: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let user_ids = users.validate(RecordKind::User, "user", "users")?;
        if count <= 0 {
            return Ok(Vec::new());
        }

        let addressed: HashSet<_> = self
            .store
            .query_models::<Address>()
            .into_iter()
            .map(|address| address.user_id)
            .collect();
        let order = address_assignment_order(&mut self.rng, &user_ids, |id| {
            addressed.contains(&id)
        });

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::Address, count, budget, |creator, index| {
            match order.get(index) {
                Some(user_id) => attempt(creator.seed_address(RecordRef::id(*user_id))),
                None => Attempt::Exhausted,
            }
        }))
    }
}

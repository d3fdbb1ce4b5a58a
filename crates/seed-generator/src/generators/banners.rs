//! Organization banners.

use super::{attempt, titleize};
use crate::batch::{generate_many, SeedResult};
use crate::creator::RecordCreator;
use crate::error::{ArgumentError, SeedError};
use crate::faker::FakeData;
use crate::validate::{RecordRef, RecordsRef};
use seed_core::{Banner, RecordId, RecordKind, RecordStore, Stored, User, UserRole};
use tracing::{debug, warn};

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Publish a new active banner authored by an org admin.
    ///
    /// Every active banner of the admin's organization is deactivated first.
    /// If the new banner is then rejected, those banners are reactivated and
    /// the original error is returned.
    pub fn seed_banner(&mut self, casa_admin: RecordRef<'_>) -> Result<Stored<Banner>, SeedError> {
        let casa_admin = casa_admin.validate(RecordKind::User, "casa_admin")?;

        let name = format!(
            "{} {}",
            titleize(&self.faker.word(&mut self.rng)),
            titleize(&self.faker.word(&mut self.rng))
        );
        let content = self.faker.sentence(&mut self.rng, 8);
        let expires_at = if self.rng.chance(0.5) {
            Some(self.faker.date_future(&mut self.rng, self.today, 30))
        } else {
            None
        };

        let author = self.resolve::<User>(casa_admin)?;
        if author.role != UserRole::CasaAdmin {
            return Err(SeedError::InvalidRole {
                user_id: author.id,
                expected: UserRole::CasaAdmin,
                actual: author.role,
            });
        }

        let deactivated = self.deactivate_banners(author.casa_org_id)?;

        let created = self.create(Banner {
            casa_org_id: author.casa_org_id,
            user_id: author.id,
            name,
            content,
            active: true,
            expires_at,
        });

        if created.is_err() {
            self.reactivate_banners(&deactivated);
        }
        created
    }

    pub fn seed_banners(
        &mut self,
        casa_admins: RecordsRef<'_>,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let admin_ids = casa_admins.validate(RecordKind::User, "casa_admin", "casa_admins")?;

        let budget = self.extra_try_count;
        Ok(generate_many(self, RecordKind::Banner, count, budget, |creator, _| {
            let result = creator
                .pick(&admin_ids)
                .and_then(|admin_id| creator.seed_banner(RecordRef::id(admin_id)));
            attempt(result)
        }))
    }

    fn deactivate_banners(&mut self, casa_org_id: RecordId) -> Result<Vec<RecordId>, SeedError> {
        let active: Vec<Stored<Banner>> = self
            .store
            .query_models::<Banner>()
            .into_iter()
            .filter(|banner| banner.active && banner.casa_org_id == casa_org_id)
            .collect();

        let mut deactivated = Vec::with_capacity(active.len());
        for mut banner in active {
            banner.model.active = false;
            match self.update(banner) {
                Ok(banner) => deactivated.push(banner.id),
                Err(error) => {
                    self.reactivate_banners(&deactivated);
                    return Err(error);
                }
            }
        }
        Ok(deactivated)
    }

    fn reactivate_banners(&mut self, ids: &[RecordId]) {
        for id in ids {
            let restored = self
                .store
                .find_model::<Banner>(*id)
                .map_err(SeedError::from)
                .and_then(|mut banner| {
                    banner.model.active = true;
                    self.update(banner)
                });
            match restored {
                Ok(_) => debug!("Reactivated banner {}", id),
                Err(error) => warn!("Failed to reactivate banner {}: {}", id, error),
            }
        }
    }
}

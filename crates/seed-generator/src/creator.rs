//! The record creator session.

use crate::error::{ArgumentError, SeedError};
use crate::faker::{FakeData, WordListFaker};
use crate::rng::SeedRng;
use crate::validate::Resolved;
use chrono::{NaiveDate, Utc};
use seed_core::{Model, RecordCounts, RecordId, RecordKind, RecordStore, StoreError, Stored};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Password given to every generated account.
pub const DEFAULT_PASSWORD: &str = "12345678";

/// Construction parameters for a [`RecordCreator`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorConfig {
    /// Seed for all random draws; `None` uses OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Extra attempts each batch operation may spend on failures.
    #[serde(default)]
    pub extra_try_count: i64,

    /// Date treated as "today"; defaults to the current UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl CreatorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_extra_try_count(mut self, extra_try_count: i64) -> Self {
        self.extra_try_count = extra_try_count;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Parse a config from YAML. Values of the wrong type are rejected with
    /// [`ArgumentError::InvalidArgument`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ArgumentError> {
        serde_yaml::from_str(yaml).map_err(|e| ArgumentError::InvalidArgument(e.to_string()))
    }
}

/// Seeded generator session writing through a [`RecordStore`].
///
/// One creator owns one RNG; every generator draws from it in a fixed
/// order, so two creators built with the same seed over the same initial
/// store produce identical records for identical call sequences.
pub struct RecordCreator<S, F = WordListFaker> {
    pub(crate) store: S,
    pub(crate) rng: SeedRng,
    pub(crate) faker: F,
    pub(crate) extra_try_count: usize,
    pub(crate) today: NaiveDate,
    initial_counts: RecordCounts,
}

impl<S: RecordStore> RecordCreator<S, WordListFaker> {
    /// Create a session using the built-in [`WordListFaker`].
    pub fn new(store: S, config: CreatorConfig) -> Result<Self, ArgumentError> {
        Self::with_faker(store, config, WordListFaker)
    }
}

impl<S: RecordStore, F: FakeData> RecordCreator<S, F> {
    /// Create a session with a custom field-value provider.
    ///
    /// Snapshots the store's record counts so that
    /// [`record_creation_counts_since_init`](Self::record_creation_counts_since_init)
    /// can report what this session added.
    pub fn with_faker(store: S, config: CreatorConfig, faker: F) -> Result<Self, ArgumentError> {
        let extra_try_count = usize::try_from(config.extra_try_count).map_err(|_| {
            ArgumentError::OutOfRange(format!(
                "param extra_try_count: must be a non-negative integer, got {}",
                config.extra_try_count
            ))
        })?;

        let initial_counts = store.count_all();
        let today = config.today.unwrap_or_else(|| Utc::now().date_naive());

        info!(
            "Record creator initialized (seed: {:?}, extra tries: {}, today: {})",
            config.seed, extra_try_count, today
        );

        Ok(Self {
            store,
            rng: SeedRng::new(config.seed),
            faker,
            extra_try_count,
            today,
            initial_counts,
        })
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }

    pub fn extra_try_count(&self) -> usize {
        self.extra_try_count
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Counts captured when the session started.
    pub fn initial_counts(&self) -> &RecordCounts {
        &self.initial_counts
    }

    /// Records added (or removed) per kind since the session started.
    ///
    /// Every registered kind is present, including those with a zero delta.
    pub fn record_creation_counts_since_init(&self) -> BTreeMap<RecordKind, i64> {
        self.initial_counts.delta(&self.store.count_all())
    }

    /// Materialize a validated reference as a typed record.
    pub(crate) fn resolve<M: Model>(&self, reference: Resolved<'_>) -> Result<Stored<M>, SeedError> {
        match reference {
            Resolved::Record(record) => {
                let found = record.kind();
                record.clone().into_stored().ok_or_else(|| {
                    StoreError::UnexpectedKind {
                        expected: M::KIND,
                        found,
                    }
                    .into()
                })
            }
            Resolved::Id(id) => Ok(self.store.find_model(id)?),
        }
    }

    /// Persist one record.
    pub(crate) fn create<M: Model>(&mut self, model: M) -> Result<Stored<M>, SeedError> {
        let stored = self.store.create_model(model)?;
        debug!("Created {} {}", M::KIND, stored.id);
        Ok(stored)
    }

    /// Overwrite one existing record.
    pub(crate) fn update<M: Model>(&mut self, stored: Stored<M>) -> Result<Stored<M>, SeedError> {
        let record = self.store.update(stored.into_record())?;
        let found = record.kind();
        let updated = record.into_stored().ok_or(StoreError::UnexpectedKind {
            expected: M::KIND,
            found,
        })?;
        debug!("Updated {} {}", M::KIND, updated.id);
        Ok(updated)
    }

    /// Uniformly chosen id from a validated, non-empty id list.
    pub(crate) fn pick(&mut self, ids: &[RecordId]) -> Result<RecordId, SeedError> {
        Ok(*self.rng.sample(ids)?)
    }
}

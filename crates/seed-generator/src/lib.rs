//! Deterministic synthetic record generation for CASA data.
//!
//! A [`RecordCreator`] owns a seeded RNG, a fake data provider and a
//! [`seed_core::RecordStore`]. Every generator draws its field values from
//! that one RNG in a fixed order, so identical seeds and call sequences over
//! identical stores produce identical records.
//!
//! # Architecture
//!
//! ```text
//! RecordCreator ──► generators::*  seed_<kind>(refs) / seed_<kind>s(refs, count)
//!      │                 │
//!      │                 ├── validate    (RecordRef / RecordsRef exclusivity)
//!      │                 ├── distribute  (case groups, pairing pools, address order)
//!      │                 └── batch       (generate_many retry budget)
//!      │
//!      ├── rng    (SeedRng over StdRng)
//!      ├── faker  (FakeData field values)
//!      └── store  (seed_core::RecordStore)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{MemoryStore, RecordKind, RecordStore, UserRole};
//! use seed_generator::{CreatorConfig, RecordCreator, RecordRef, RecordsRef};
//!
//! let config = CreatorConfig::seeded(42).with_extra_try_count(5);
//! let mut creator = RecordCreator::new(MemoryStore::new(), config).unwrap();
//!
//! let org = creator.seed_casa_org().unwrap();
//! let results = creator
//!     .seed_users(RecordsRef::ids(&[org.id]), UserRole::Volunteer, 3)
//!     .unwrap();
//!
//! assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
//! assert_eq!(creator.store().count(RecordKind::User), 3);
//!
//! let volunteer = results[0].clone().unwrap();
//! creator.seed_address(RecordRef::id(volunteer)).unwrap();
//! ```

pub mod batch;
pub mod creator;
pub mod distribute;
pub mod error;
pub mod faker;
mod generators;
pub mod rng;
pub mod validate;

// Re-exports for convenience
pub use batch::{generate_many, Attempt, SeedResult};
pub use creator::{CreatorConfig, RecordCreator, DEFAULT_PASSWORD};
pub use distribute::{address_assignment_order, partition_case_groups, PairingPool};
pub use error::{ArgumentError, SeedError};
pub use faker::{FakeData, WordListFaker};
pub use rng::SeedRng;
pub use validate::{RecordRef, RecordsRef, Resolved};

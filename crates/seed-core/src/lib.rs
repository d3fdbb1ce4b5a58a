//! Core types for the casa-seed record generator.
//!
//! This crate provides the foundational types shared by the generator and
//! the command-line front end:
//!
//! - [`RecordKind`] - Statically enumerated catalog of record kinds
//! - [`RecordData`] / [`Record`] - Attribute payloads and stored records
//! - [`Model`] / [`Stored`] - Typed access to a single record kind
//! - [`RecordStore`] - Abstract record store the generator writes through
//! - [`MemoryStore`] - In-memory store enforcing the application's validations
//! - [`RecordCounts`] - Per-kind row counts
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator  (RecordCreator writes through RecordStore)
//!    │
//!    └─── casa-seed       (plan runner and CLI, previews into MemoryStore)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{CasaOrg, MemoryStore, RecordKind, RecordStore};
//!
//! let mut store = MemoryStore::new();
//! let org = store
//!     .create_model(CasaOrg {
//!         name: "Avery County".to_string(),
//!         address: "1 Main St".to_string(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(store.count(RecordKind::CasaOrg), 1);
//! assert_eq!(org.name, "Avery County");
//! ```

pub mod counts;
pub mod memory;
pub mod models;
pub mod store;

// Re-exports for convenience
pub use counts::RecordCounts;
pub use memory::MemoryStore;
pub use models::{
    AdditionalExpense, Address, AllCasaAdmin, Banner, CasaCase, CasaCaseContactType,
    CasaCaseEmancipationCategory, CasaOrg, CaseContact, CaseGroup, CaseGroupMembership,
    ContactMedium, ContactType, EmancipationCategory, Language, MileageRate, Model, Record,
    RecordData, RecordId, RecordKind, Stored, User, UserRole, TRANSITION_AGE,
};
pub use store::{RecordStore, StoreError, ValidationCategory};

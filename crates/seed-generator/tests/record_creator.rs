//! Integration tests for RecordCreator sessions.
//!
//! These tests verify that:
//! 1. Identical seeds over identical stores produce identical records
//! 2. Batch attempts are bounded by `count + extra_try_count`
//! 3. Reference validation aborts a call before anything is written
//! 4. Session counts report exactly what a session added

use chrono::NaiveDate;
use seed_core::{
    MemoryStore, Record, RecordId, RecordKind, RecordStore, StoreError, UserRole,
    ValidationCategory,
};
use seed_generator::{ArgumentError, CreatorConfig, RecordCreator, RecordRef, RecordsRef, SeedError};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Helper to create a seeded creator over an empty store
fn create_test_creator(seed: u64, extra_try_count: i64) -> RecordCreator<MemoryStore> {
    RecordCreator::new(
        MemoryStore::with_today(today()),
        CreatorConfig::seeded(seed)
            .with_extra_try_count(extra_try_count)
            .with_today(today()),
    )
    .unwrap()
}

fn ok_ids(results: Vec<seed_generator::SeedResult>) -> Vec<RecordId> {
    results.into_iter().filter_map(Result::ok).collect()
}

/// Run a small but complete seeding session and dump every record.
fn run_session(seed: u64) -> Vec<Record> {
    let mut creator = create_test_creator(seed, 20);

    let orgs = ok_ids(creator.seed_casa_orgs(2));
    let volunteers = ok_ids(
        creator
            .seed_users(RecordsRef::ids(&orgs), UserRole::Volunteer, 6)
            .unwrap(),
    );
    let admins = ok_ids(
        creator
            .seed_users(RecordsRef::ids(&orgs), UserRole::CasaAdmin, 2)
            .unwrap(),
    );
    creator.seed_addresses(RecordsRef::ids(&volunteers), 4).unwrap();
    let cases = ok_ids(creator.seed_casa_cases(RecordsRef::ids(&orgs[..1]), 10).unwrap());
    let contact_types = ok_ids(creator.seed_contact_types(RecordsRef::ids(&orgs), 3).unwrap());
    let contacts = ok_ids(
        creator
            .seed_case_contacts(RecordsRef::ids(&cases), RecordsRef::ids(&volunteers), 8)
            .unwrap(),
    );
    creator
        .seed_additional_expenses(RecordsRef::ids(&contacts), 4)
        .unwrap();
    creator
        .seed_casa_case_contact_types(RecordsRef::ids(&cases), RecordsRef::ids(&contact_types), 6)
        .unwrap();
    let categories = ok_ids(creator.seed_emancipation_categories(3));
    creator
        .seed_casa_case_emancipation_categories(
            RecordsRef::ids(&cases),
            RecordsRef::ids(&categories),
            3,
        )
        .unwrap();
    creator
        .seed_case_groups(RecordRef::id(orgs[0]), RecordsRef::ids(&cases), 2)
        .unwrap();
    creator.seed_banners(RecordsRef::ids(&admins), 2).unwrap();
    creator.seed_languages(RecordsRef::ids(&orgs), 3).unwrap();
    creator.seed_mileage_rates(RecordsRef::ids(&orgs), 2).unwrap();

    let store = creator.into_store();
    RecordKind::ALL
        .iter()
        .flat_map(|kind| store.query_all(*kind))
        .collect()
}

#[test]
fn test_same_seed_same_records() {
    let first = run_session(2024);
    let second = run_session(2024);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_diverge() {
    assert_ne!(run_session(1), run_session(2));
}

#[test]
fn test_attempts_bounded_by_extra_try_count() {
    let mut creator = create_test_creator(0, 0);

    let results = creator
        .seed_additional_expenses(RecordsRef::ids(&[RecordId(-1)]), 2)
        .unwrap();

    assert_eq!(results.len(), 2);
    for result in &results {
        let Err(SeedError::Store(error)) = result else {
            panic!("expected a store validation failure, got {result:?}");
        };
        assert_eq!(error.category(), Some(ValidationCategory::MissingParent));
    }

    let mut creator = create_test_creator(0, 3);
    let results = creator
        .seed_additional_expenses(RecordsRef::ids(&[RecordId(-1)]), 2)
        .unwrap();
    assert_eq!(results.len(), 5);
}

#[test]
fn test_reseeding_same_store_fails_on_uniqueness() {
    let mut first = create_test_creator(0, 5);
    assert_eq!(ok_ids(first.seed_casa_orgs(2)).len(), 2);

    let mut second = RecordCreator::new(
        first.into_store(),
        CreatorConfig::seeded(0).with_today(today()),
    )
    .unwrap();
    let results = second.seed_casa_orgs(2);

    assert_eq!(results.len(), 2);
    for result in results {
        assert!(matches!(
            result,
            Err(SeedError::Store(StoreError::Validation {
                category: ValidationCategory::Uniqueness,
                ..
            }))
        ));
    }
}

#[test]
fn test_reference_errors_abort_before_writing() {
    let mut creator = create_test_creator(5, 0);
    let org = creator.seed_casa_org().unwrap().into_record();
    let before = creator.store().count_all();

    assert!(matches!(
        creator.seed_casa_cases(RecordsRef::none(), 3),
        Err(ArgumentError::MissingReference(_))
    ));
    assert!(matches!(
        creator.seed_casa_cases(RecordsRef::both(std::slice::from_ref(&org), &[org.id]), 3),
        Err(ArgumentError::AmbiguousReference(_))
    ));
    assert!(matches!(
        creator.seed_casa_cases(RecordsRef::ids(&[]), 3),
        Err(ArgumentError::EmptyCollection(_))
    ));

    let after = creator.store().count_all();
    assert_eq!(before.delta(&after)[&RecordKind::CasaCase], 0);
}

#[test]
fn test_pool_exhaustion_ends_batch() {
    let mut creator = create_test_creator(9, 10);
    let org = creator.seed_casa_org().unwrap();
    let case = creator.seed_casa_case(RecordRef::id(org.id)).unwrap();
    let contact_types = ok_ids(creator.seed_contact_types(RecordsRef::ids(&[org.id]), 2).unwrap());
    assert_eq!(contact_types.len(), 2);

    let results = creator
        .seed_casa_case_contact_types(
            RecordsRef::ids(&[case.id]),
            RecordsRef::ids(&contact_types),
            5,
        )
        .unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[..2].iter().all(Result::is_ok));
    assert_eq!(
        results[2],
        Err(SeedError::PoolExhausted(RecordKind::CasaCaseContactType))
    );
}

#[test]
fn test_counts_since_init_cover_every_kind() {
    let mut creator = create_test_creator(3, 5);
    let orgs = ok_ids(creator.seed_casa_orgs(2));
    creator
        .seed_users(RecordsRef::ids(&orgs), UserRole::Supervisor, 3)
        .unwrap();

    let counts = creator.record_creation_counts_since_init();

    assert_eq!(counts.len(), RecordKind::ALL.len());
    assert_eq!(counts[&RecordKind::CasaOrg], 2);
    assert_eq!(counts[&RecordKind::User], 3);
    assert_eq!(counts[&RecordKind::Banner], 0);
}

//! End-to-end tests for seed plans loaded from disk.

use casa_seed::{preview, PlanError, PlanRunner, SeedPlan};
use chrono::NaiveDate;
use seed_core::{MemoryStore, RecordKind, RecordStore};
use std::io::Write;
use tempfile::NamedTempFile;

const FULL_PLAN: &str = r#"
seed: 2024
extra_try_count: 25
today: 2024-06-01
counts:
  all_casa_admins: 1
  orgs: 2
  volunteers: 8
  supervisors: 2
  casa_admins: 2
  addresses: 6
  cases: 12
  contact_types: 4
  case_contacts: 10
  additional_expenses: 5
  case_contact_types: 8
  emancipation_categories: 3
  case_emancipation_categories: 2
  case_groups: 2
  banners: 2
  languages: 3
  mileage_rates: 2
"#;

/// Helper to write a plan to a temporary file
fn write_plan(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_plan_from_file() {
    let file = write_plan(FULL_PLAN);
    let plan = SeedPlan::from_file(file.path()).unwrap();

    assert_eq!(plan.seed, Some(2024));
    assert_eq!(plan.today, NaiveDate::from_ymd_opt(2024, 6, 1));
    assert_eq!(plan.counts.case_contacts, 10);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SeedPlan::from_file("/nonexistent/seed_plan.yaml");
    assert!(matches!(result, Err(PlanError::IoError(_))));
}

#[test]
fn test_full_plan_preview() {
    let file = write_plan(FULL_PLAN);
    let plan = SeedPlan::from_file(file.path()).unwrap();
    let report = preview(&plan).unwrap();

    assert_eq!(report.stages.len(), 17);
    assert!(report.stages.iter().all(|stage| stage.skipped.is_none()));
    assert_eq!(report.created[&RecordKind::CasaOrg], 2);
    assert_eq!(report.created[&RecordKind::User], 12);
    assert_eq!(report.created[&RecordKind::CasaCase], 12);
    let groups = report.created[&RecordKind::CaseGroup];
    assert!(report.created[&RecordKind::CaseGroupMembership] >= 2 * groups);
    assert!(report.created[&RecordKind::Banner] <= 2);
}

#[test]
fn test_identical_plans_identical_reports() {
    let plan = SeedPlan::from_yaml(FULL_PLAN).unwrap();

    let first = serde_json::to_string(&preview(&plan).unwrap()).unwrap();
    let second = serde_json::to_string(&preview(&plan).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_runner_extends_existing_store() {
    let plan = SeedPlan::from_yaml(
        "seed: 3\nextra_try_count: 5\ntoday: 2024-06-01\ncounts:\n  orgs: 1\n",
    )
    .unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let runner = PlanRunner::new(MemoryStore::with_today(today), &plan).unwrap();
    let (_, store) = runner.run(&plan.counts);
    assert_eq!(store.count(RecordKind::CasaOrg), 1);

    let follow_up = SeedPlan::from_yaml(
        "seed: 4\nextra_try_count: 5\ntoday: 2024-06-01\ncounts:\n  volunteers: 3\n",
    )
    .unwrap();
    let runner = PlanRunner::new(store, &follow_up).unwrap();
    let (report, store) = runner.run(&follow_up.counts);

    assert_eq!(report.created[&RecordKind::User], 3);
    assert_eq!(report.created[&RecordKind::CasaOrg], 0);
    assert_eq!(store.count(RecordKind::User), 3);
}

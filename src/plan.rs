//! Seed plans: how many records of each kind to generate, and the runner
//! that executes them stage by stage.

use chrono::{NaiveDate, Utc};
use seed_core::{
    CasaCase, CasaOrg, CaseContact, ContactType, EmancipationCategory, MemoryStore, Model,
    RecordId, RecordKind, RecordStore, User, UserRole,
};
use seed_generator::{
    ArgumentError, CreatorConfig, RecordCreator, RecordRef, RecordsRef, SeedResult,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Error type for plan operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Error reading plan file
    #[error("Failed to read plan file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A value in the plan is out of range
    #[error("Invalid plan: {0}")]
    Invalid(String),

    /// The creator rejected the plan's settings
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Records to create per stage. Missing entries default to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanCounts {
    pub orgs: i64,
    pub all_casa_admins: i64,
    pub volunteers: i64,
    pub supervisors: i64,
    pub casa_admins: i64,
    pub addresses: i64,
    pub cases: i64,
    pub contact_types: i64,
    pub case_contacts: i64,
    pub additional_expenses: i64,
    pub case_contact_types: i64,
    pub emancipation_categories: i64,
    pub case_emancipation_categories: i64,
    pub case_groups: i64,
    pub banners: i64,
    pub languages: i64,
    pub mileage_rates: i64,
}

/// One step of a plan, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AllCasaAdmins,
    Orgs,
    Volunteers,
    Supervisors,
    CasaAdmins,
    Addresses,
    Cases,
    ContactTypes,
    CaseContacts,
    AdditionalExpenses,
    CaseContactTypes,
    EmancipationCategories,
    CaseEmancipationCategories,
    CaseGroups,
    Banners,
    Languages,
    MileageRates,
}

impl Stage {
    /// Every stage, parents before children.
    pub const ALL: [Stage; 17] = [
        Stage::AllCasaAdmins,
        Stage::Orgs,
        Stage::Volunteers,
        Stage::Supervisors,
        Stage::CasaAdmins,
        Stage::Addresses,
        Stage::Cases,
        Stage::ContactTypes,
        Stage::CaseContacts,
        Stage::AdditionalExpenses,
        Stage::CaseContactTypes,
        Stage::EmancipationCategories,
        Stage::CaseEmancipationCategories,
        Stage::CaseGroups,
        Stage::Banners,
        Stage::Languages,
        Stage::MileageRates,
    ];

    /// The key this stage is counted under in a plan file.
    pub fn name(self) -> &'static str {
        match self {
            Stage::AllCasaAdmins => "all_casa_admins",
            Stage::Orgs => "orgs",
            Stage::Volunteers => "volunteers",
            Stage::Supervisors => "supervisors",
            Stage::CasaAdmins => "casa_admins",
            Stage::Addresses => "addresses",
            Stage::Cases => "cases",
            Stage::ContactTypes => "contact_types",
            Stage::CaseContacts => "case_contacts",
            Stage::AdditionalExpenses => "additional_expenses",
            Stage::CaseContactTypes => "case_contact_types",
            Stage::EmancipationCategories => "emancipation_categories",
            Stage::CaseEmancipationCategories => "case_emancipation_categories",
            Stage::CaseGroups => "case_groups",
            Stage::Banners => "banners",
            Stage::Languages => "languages",
            Stage::MileageRates => "mileage_rates",
        }
    }

    /// The record kind this stage creates.
    pub fn kind(self) -> RecordKind {
        match self {
            Stage::AllCasaAdmins => RecordKind::AllCasaAdmin,
            Stage::Orgs => RecordKind::CasaOrg,
            Stage::Volunteers | Stage::Supervisors | Stage::CasaAdmins => RecordKind::User,
            Stage::Addresses => RecordKind::Address,
            Stage::Cases => RecordKind::CasaCase,
            Stage::ContactTypes => RecordKind::ContactType,
            Stage::CaseContacts => RecordKind::CaseContact,
            Stage::AdditionalExpenses => RecordKind::AdditionalExpense,
            Stage::CaseContactTypes => RecordKind::CasaCaseContactType,
            Stage::EmancipationCategories => RecordKind::EmancipationCategory,
            Stage::CaseEmancipationCategories => RecordKind::CasaCaseEmancipationCategory,
            Stage::CaseGroups => RecordKind::CaseGroup,
            Stage::Banners => RecordKind::Banner,
            Stage::Languages => RecordKind::Language,
            Stage::MileageRates => RecordKind::MileageRate,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl PlanCounts {
    /// Requested count for one stage.
    pub fn count(&self, stage: Stage) -> i64 {
        match stage {
            Stage::AllCasaAdmins => self.all_casa_admins,
            Stage::Orgs => self.orgs,
            Stage::Volunteers => self.volunteers,
            Stage::Supervisors => self.supervisors,
            Stage::CasaAdmins => self.casa_admins,
            Stage::Addresses => self.addresses,
            Stage::Cases => self.cases,
            Stage::ContactTypes => self.contact_types,
            Stage::CaseContacts => self.case_contacts,
            Stage::AdditionalExpenses => self.additional_expenses,
            Stage::CaseContactTypes => self.case_contact_types,
            Stage::EmancipationCategories => self.emancipation_categories,
            Stage::CaseEmancipationCategories => self.case_emancipation_categories,
            Stage::CaseGroups => self.case_groups,
            Stage::Banners => self.banners,
            Stage::Languages => self.languages,
            Stage::MileageRates => self.mileage_rates,
        }
    }

    /// `(stage, count)` pairs in execution order.
    pub fn stages(&self) -> [(Stage, i64); 17] {
        Stage::ALL.map(|stage| (stage, self.count(stage)))
    }

    /// Total records requested across all stages.
    pub fn total(&self) -> i64 {
        self.stages().iter().map(|(_, count)| count).sum()
    }
}

/// A seeding plan, typically loaded from YAML.
///
/// ```yaml
/// seed: 42
/// extra_try_count: 10
/// today: 2024-06-01
/// counts:
///   orgs: 2
///   volunteers: 20
///   cases: 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPlan {
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub extra_try_count: i64,

    #[serde(default)]
    pub today: Option<NaiveDate>,

    #[serde(default)]
    pub counts: PlanCounts,
}

impl SeedPlan {
    /// Load plan from YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse plan from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, PlanError> {
        let plan: SeedPlan = serde_yaml::from_str(yaml)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Reject negative budgets and counts.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.extra_try_count < 0 {
            return Err(PlanError::Invalid(format!(
                "extra_try_count must be non-negative, got {}",
                self.extra_try_count
            )));
        }
        for (stage, count) in self.counts.stages() {
            if count < 0 {
                return Err(PlanError::Invalid(format!(
                    "counts.{stage} must be non-negative, got {count}"
                )));
            }
        }
        Ok(())
    }

    pub fn creator_config(&self) -> CreatorConfig {
        CreatorConfig {
            seed: self.seed,
            extra_try_count: self.extra_try_count,
            today: self.today,
        }
    }
}

/// Outcome of one plan stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub kind: RecordKind,
    pub requested: i64,
    pub created: usize,
    pub failed: usize,
    /// Distinct failure messages, in first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Why the stage did not run, if it was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl StageReport {
    fn completed(stage: Stage, requested: i64, results: &[SeedResult]) -> Self {
        let mut errors: Vec<String> = Vec::new();
        for error in results.iter().filter_map(|result| result.as_ref().err()) {
            let message = error.to_string();
            if !errors.contains(&message) {
                errors.push(message);
            }
        }
        let created = results.iter().filter(|result| result.is_ok()).count();

        Self {
            stage,
            kind: stage.kind(),
            requested,
            created,
            failed: results.len() - created,
            errors,
            skipped: None,
        }
    }

    fn skipped(stage: Stage, requested: i64, reason: String) -> Self {
        Self {
            stage,
            kind: stage.kind(),
            requested,
            created: 0,
            failed: 0,
            errors: Vec::new(),
            skipped: Some(reason),
        }
    }
}

/// Result of running a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub seed: Option<u64>,
    pub extra_try_count: usize,
    pub today: NaiveDate,
    pub stages: Vec<StageReport>,
    /// Records added per kind, every kind included.
    pub created: BTreeMap<RecordKind, i64>,
}

impl PlanReport {
    pub fn total_created(&self) -> i64 {
        self.created.values().sum()
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seed {
            Some(seed) => writeln!(f, "Seed: {seed}")?,
            None => writeln!(f, "Seed: (random)")?,
        }
        writeln!(f, "Today: {}", self.today)?;
        writeln!(f, "Extra tries: {}", self.extra_try_count)?;
        writeln!(f)?;

        writeln!(f, "Stages:")?;
        for stage in &self.stages {
            match &stage.skipped {
                Some(reason) => writeln!(f, "  {:<30} skipped: {}", stage.stage, reason)?,
                None => writeln!(
                    f,
                    "  {:<30} {:>5} / {:<5} created, {} failed",
                    stage.stage, stage.created, stage.requested, stage.failed
                )?,
            }
            for error in &stage.errors {
                writeln!(f, "      - {error}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Created:")?;
        for (kind, count) in self.created.iter().filter(|(_, count)| **count != 0) {
            writeln!(f, "  {:<30} {:>5}", kind.name(), count)?;
        }
        write!(f, "  {:<30} {:>5}", "total", self.total_created())
    }
}

/// Executes a [`SeedPlan`] stage by stage against one store.
///
/// Each stage looks up its parent records in the store as it stands after
/// the previous stages, so a plan can be run against a store that already
/// holds data. A stage whose parents are missing is skipped with a warning.
pub struct PlanRunner<S: RecordStore> {
    creator: RecordCreator<S>,
    stages: Vec<StageReport>,
}

impl<S: RecordStore> PlanRunner<S> {
    pub fn new(store: S, plan: &SeedPlan) -> Result<Self, PlanError> {
        plan.validate()?;
        let creator = RecordCreator::new(store, plan.creator_config())?;
        Ok(Self {
            creator,
            stages: Vec::new(),
        })
    }

    /// Run every stage with a non-zero count and report the results.
    pub fn run(mut self, counts: &PlanCounts) -> (PlanReport, S) {
        info!(
            "Running seed plan ({} records requested)",
            counts.total()
        );

        for (stage, count) in counts.stages() {
            if count > 0 {
                self.run_stage(stage, count);
            }
        }

        let report = PlanReport {
            seed: self.creator.seed(),
            extra_try_count: self.creator.extra_try_count(),
            today: self.creator.today(),
            stages: self.stages,
            created: self.creator.record_creation_counts_since_init(),
        };
        info!("Seed plan finished: {} records created", report.total_created());

        (report, self.creator.into_store())
    }

    fn run_stage(&mut self, stage: Stage, count: i64) {
        let outcome = match stage {
            Stage::AllCasaAdmins => Ok(self.creator.seed_all_casa_admins(count)),
            Stage::Orgs => Ok(self.creator.seed_casa_orgs(count)),
            Stage::Volunteers => self.users_stage(UserRole::Volunteer, count),
            Stage::Supervisors => self.users_stage(UserRole::Supervisor, count),
            Stage::CasaAdmins => self.users_stage(UserRole::CasaAdmin, count),
            Stage::Addresses => {
                let users = self.ids::<User>();
                self.creator.seed_addresses(RecordsRef::ids(&users), count)
            }
            Stage::Cases => {
                let orgs = self.ids::<CasaOrg>();
                self.creator.seed_casa_cases(RecordsRef::ids(&orgs), count)
            }
            Stage::ContactTypes => {
                let orgs = self.ids::<CasaOrg>();
                self.creator.seed_contact_types(RecordsRef::ids(&orgs), count)
            }
            Stage::CaseContacts => {
                let cases = self.ids::<CasaCase>();
                let creators = self.user_ids(&[UserRole::Volunteer, UserRole::Supervisor]);
                self.creator.seed_case_contacts(
                    RecordsRef::ids(&cases),
                    RecordsRef::ids(&creators),
                    count,
                )
            }
            Stage::AdditionalExpenses => {
                let contacts = self.ids::<CaseContact>();
                self.creator
                    .seed_additional_expenses(RecordsRef::ids(&contacts), count)
            }
            Stage::CaseContactTypes => {
                let cases = self.ids::<CasaCase>();
                let contact_types = self.ids::<ContactType>();
                self.creator.seed_casa_case_contact_types(
                    RecordsRef::ids(&cases),
                    RecordsRef::ids(&contact_types),
                    count,
                )
            }
            Stage::EmancipationCategories => Ok(self.creator.seed_emancipation_categories(count)),
            Stage::CaseEmancipationCategories => {
                let cases = self.ids::<CasaCase>();
                let categories = self.ids::<EmancipationCategory>();
                self.creator.seed_casa_case_emancipation_categories(
                    RecordsRef::ids(&cases),
                    RecordsRef::ids(&categories),
                    count,
                )
            }
            Stage::CaseGroups => self.case_groups_stage(count),
            Stage::Banners => {
                let admins = self.user_ids(&[UserRole::CasaAdmin]);
                self.creator.seed_banners(RecordsRef::ids(&admins), count)
            }
            Stage::Languages => {
                let orgs = self.ids::<CasaOrg>();
                self.creator.seed_languages(RecordsRef::ids(&orgs), count)
            }
            Stage::MileageRates => {
                let orgs = self.ids::<CasaOrg>();
                self.creator.seed_mileage_rates(RecordsRef::ids(&orgs), count)
            }
        };

        let report = match outcome {
            Ok(results) => StageReport::completed(stage, count, &results),
            Err(error) => {
                warn!("Skipping stage {}: {}", stage, error);
                StageReport::skipped(stage, count, error.to_string())
            }
        };
        self.stages.push(report);
    }

    fn users_stage(
        &mut self,
        role: UserRole,
        count: i64,
    ) -> Result<Vec<SeedResult>, ArgumentError> {
        let orgs = self.ids::<CasaOrg>();
        self.creator.seed_users(RecordsRef::ids(&orgs), role, count)
    }

    /// Case groups go to the organization with the most cases.
    fn case_groups_stage(&mut self, count: i64) -> Result<Vec<SeedResult>, ArgumentError> {
        let cases = self.creator.store().query_models::<CasaCase>();
        let mut by_org: BTreeMap<RecordId, Vec<RecordId>> = BTreeMap::new();
        for case in &cases {
            by_org.entry(case.casa_org_id).or_default().push(case.id);
        }
        let busiest = by_org
            .into_iter()
            .max_by(|(a_org, a), (b_org, b)| a.len().cmp(&b.len()).then(b_org.cmp(a_org)));

        match busiest {
            Some((org_id, case_ids)) => self.creator.seed_case_groups(
                RecordRef::id(org_id),
                RecordsRef::ids(&case_ids),
                count,
            ),
            None => self
                .creator
                .seed_case_groups(RecordRef::none(), RecordsRef::ids(&[]), count),
        }
    }

    fn ids<M: Model>(&self) -> Vec<RecordId> {
        self.creator
            .store()
            .query_all(M::KIND)
            .into_iter()
            .map(|record| record.id)
            .collect()
    }

    fn user_ids(&self, roles: &[UserRole]) -> Vec<RecordId> {
        self.creator
            .store()
            .query_models::<User>()
            .into_iter()
            .filter(|user| roles.contains(&user.role))
            .map(|user| user.id)
            .collect()
    }
}

/// Run `plan` against a fresh in-memory store.
pub fn preview(plan: &SeedPlan) -> Result<PlanReport, PlanError> {
    let today = plan.today.unwrap_or_else(|| Utc::now().date_naive());
    let store = MemoryStore::with_today(today);
    let plan = SeedPlan {
        today: Some(today),
        ..plan.clone()
    };

    let runner = PlanRunner::new(store, &plan)?;
    let (report, _) = runner.run(&plan.counts);
    Ok(report)
}

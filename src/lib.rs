//! casa-seed library
//!
//! Plan-driven seeding of CASA records on top of `seed_generator`.
//!
//! # Features
//!
//! - Seed plans: per-stage record counts, seed and retry budget in one YAML file
//! - Dependency-ordered stages: each stage draws its parents from the store
//! - Reproducible reports: identical plans produce identical reports
//!
//! # CLI Usage
//!
//! ```bash
//! # Validate a plan
//! casa-seed check-plan --plan seed_plan.yaml
//!
//! # Run a plan against an in-memory store and print what it created
//! casa-seed preview --plan seed_plan.yaml --seed 42 --format json
//! ```

pub mod plan;

pub use plan::{preview, PlanCounts, PlanError, PlanReport, PlanRunner, SeedPlan, Stage, StageReport};

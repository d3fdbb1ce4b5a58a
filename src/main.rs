//! Command-line interface for casa-seed
//!
//! # Usage Examples
//!
//! ```bash
//! # Check a plan file for unknown or negative entries
//! casa-seed check-plan --plan seed_plan.yaml
//!
//! # Preview a plan with its own seed
//! casa-seed preview --plan seed_plan.yaml
//!
//! # Override the seed and retry budget, print JSON
//! casa-seed preview --plan seed_plan.yaml \
//!   --seed 42 \
//!   --extra-try-count 20 \
//!   --format json
//! ```

use anyhow::Context;
use casa_seed::{preview, SeedPlan};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "casa-seed")]
#[command(about = "Deterministic synthetic record generator for CASA databases")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a seed plan against an in-memory store and report the results
    Preview {
        /// Path to the seed plan YAML file
        #[arg(long, env = "CASA_SEED_PLAN")]
        plan: PathBuf,

        /// Seed overriding the plan's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Extra attempts per batch overriding the plan's value
        #[arg(long)]
        extra_try_count: Option<i64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a seed plan without running it
    CheckPlan {
        /// Path to the seed plan YAML file
        #[arg(long, env = "CASA_SEED_PLAN")]
        plan: PathBuf,
    },
}

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    #[value(name = "text")]
    Text,
    /// JSON report
    #[value(name = "json")]
    Json,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            plan,
            seed,
            extra_try_count,
            format,
        } => run_preview(plan, seed, extra_try_count, format),
        Commands::CheckPlan { plan } => run_check_plan(plan),
    }
}

fn run_preview(
    path: PathBuf,
    seed: Option<u64>,
    extra_try_count: Option<i64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut plan = SeedPlan::from_file(&path)
        .with_context(|| format!("Failed to load plan from {path:?}"))?;

    if seed.is_some() {
        plan.seed = seed;
    }
    if let Some(extra_try_count) = extra_try_count {
        plan.extra_try_count = extra_try_count;
    }

    let report = preview(&plan).context("Failed to run seed plan")?;

    match format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }
    Ok(())
}

fn run_check_plan(path: PathBuf) -> anyhow::Result<()> {
    let plan = SeedPlan::from_file(&path)
        .with_context(|| format!("Failed to load plan from {path:?}"))?;

    println!(
        "Plan OK: {} records requested across {} stages",
        plan.counts.total(),
        plan.counts
            .stages()
            .iter()
            .filter(|(_, count)| *count > 0)
            .count()
    );
    Ok(())
}

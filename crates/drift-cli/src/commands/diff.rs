use crate::context::AppContext;
use anyhow::{Context, Result};
use clap::Args;
use drift_diff::DiffOptions;

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot id, history-relative path, or absolute path to compare from.
    #[arg(long)]
    pub from: String,

    /// Snapshot id, history-relative path, or absolute path to compare to.
    #[arg(long)]
    pub to: String,

    /// Dotted-path field prefixes to ignore in addition to the built-ins.
    #[arg(long = "ignore-fields")]
    pub ignore_fields: Vec<String>,

    /// Provider tags to skip entirely.
    #[arg(long = "ignore-provider")]
    pub ignore_providers: Vec<String>,

    /// Drop resource changes below this risk level from the report
    /// (summary counts are unaffected).
    #[arg(long = "min-severity", value_parser = super::parse_risk_level)]
    pub min_severity: Option<drift_core::RiskLevel>,

    /// Group related changes by rollout-naming prefix and shared dependency.
    #[arg(long)]
    pub correlate: bool,
}

pub async fn run(ctx: &AppContext, args: DiffArgs) -> Result<()> {
    let from = ctx.store.load(&args.from).context("failed to load --from snapshot")?;
    let to = ctx.store.load(&args.to).context("failed to load --to snapshot")?;

    let mut options = DiffOptions::default()
        .ignore_fields(args.ignore_fields)
        .ignore_providers(args.ignore_providers);
    if let Some(level) = args.min_severity {
        options = options.min_risk_level(level);
    }
    if args.correlate {
        options = options.with_correlation();
    }

    let report = drift_diff::diff(&from, &to, &options)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.summary.total > 0 {
        std::process::exit(1);
    }
    Ok(())
}

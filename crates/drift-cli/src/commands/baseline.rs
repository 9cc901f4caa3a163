use crate::context::AppContext;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum BaselineCommands {
    /// Tag an existing snapshot as a named baseline.
    Create(BaselineCreateArgs),
    /// List known baselines.
    List(BaselineListArgs),
}

#[derive(Args)]
pub struct BaselineCreateArgs {
    /// Snapshot id or path to tag.
    #[arg(long)]
    pub snapshot: String,

    /// Baseline name.
    #[arg(long)]
    pub name: String,

    /// Why this snapshot was chosen as a baseline.
    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Args)]
pub struct BaselineListArgs {
    #[arg(long)]
    pub provider: Option<String>,
}

pub async fn run(ctx: &AppContext, command: BaselineCommands) -> Result<()> {
    match command {
        BaselineCommands::Create(args) => create(ctx, args).await,
        BaselineCommands::List(args) => list(ctx, args).await,
    }
}

async fn create(ctx: &AppContext, args: BaselineCreateArgs) -> Result<()> {
    let snapshot = ctx.store.load(&args.snapshot).context("failed to load --snapshot")?;
    let path = ctx
        .store
        .save_baseline(snapshot, &args.name, args.reason.as_deref())
        .context("failed to save baseline")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({"name": args.name, "path": path}))?
    );
    Ok(())
}

async fn list(ctx: &AppContext, args: BaselineListArgs) -> Result<()> {
    let filter = match &args.provider {
        Some(provider) => drift_store::SnapshotFilter::default().provider(provider),
        None => drift_store::SnapshotFilter::default(),
    };
    let baselines: Vec<_> = ctx
        .store
        .timeline(&filter)?
        .into_iter()
        .filter(|info| info.baseline_name().is_some())
        .collect();

    println!("{}", serde_json::to_string_pretty(&baselines)?);
    Ok(())
}

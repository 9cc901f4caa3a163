use crate::context::AppContext;
use anyhow::{bail, Context, Result};
use clap::Args;
use drift_collector::CollectorConfig;
use tokio_util::sync::CancellationToken;

#[derive(Args)]
pub struct ScanArgs {
    /// Provider to scan (local-state, cluster, cloud-a, cloud-b).
    #[arg(long)]
    pub provider: String,

    /// State-file paths for the local-state collector. Directories passed
    /// here are each treated as a separate codebase root.
    #[arg(long = "state-path")]
    pub state_paths: Vec<std::path::PathBuf>,

    /// Namespaces to scan (cluster collector).
    #[arg(long)]
    pub namespace: Vec<String>,

    /// Region (cloud-a, single-region).
    #[arg(long)]
    pub region: Option<String>,

    /// Regions (cloud-b, optionally multi-region).
    #[arg(long)]
    pub regions: Vec<String>,

    /// Project id (cloud-b, required).
    #[arg(long)]
    pub project: Option<String>,

    /// Don't persist the snapshot; just print it.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &AppContext, args: ScanArgs) -> Result<()> {
    let collector = ctx.registry.get(&args.provider)?;

    let mut config = collector.auto_discover().await.unwrap_or_default();
    if !args.state_paths.is_empty() {
        config.state_paths = args.state_paths;
    }
    if !args.namespace.is_empty() {
        config.namespaces = args.namespace;
    }
    if args.region.is_some() {
        config.region = args.region;
    }
    if !args.regions.is_empty() {
        config.regions = args.regions;
    }
    if args.project.is_some() {
        config.project_id = args.project;
    }

    collector.validate(&config).await.context("collector config failed validation")?;

    let snapshots = collector
        .collect_separate(CancellationToken::new(), &config)
        .await
        .context("collection failed")?;

    if snapshots.is_empty() {
        bail!("collector returned no snapshots");
    }

    let mut paths = Vec::new();
    for snapshot in &snapshots {
        if args.dry_run {
            continue;
        }
        paths.push(ctx.store.save(snapshot)?);
    }

    let output = serde_json::json!({
        "provider": args.provider,
        "snapshots": snapshots.iter().map(|s| serde_json::json!({
            "id": s.id,
            "timestamp": s.timestamp,
            "resource_count": s.resources.len(),
            "codebase": s.codebase(),
        })).collect::<Vec<_>>(),
        "saved_paths": paths,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

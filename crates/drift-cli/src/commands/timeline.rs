use crate::context::AppContext;
use anyhow::Result;
use clap::Args;
use drift_store::SnapshotFilter;

#[derive(Args)]
pub struct TimelineArgs {
    /// Restrict to one provider.
    #[arg(long)]
    pub provider: Option<String>,

    /// Newest-first instead of the default oldest-first order.
    #[arg(long)]
    pub reverse: bool,
}

pub async fn run(ctx: &AppContext, args: TimelineArgs) -> Result<()> {
    let mut filter = SnapshotFilter::default();
    if let Some(provider) = &args.provider {
        filter = filter.provider(provider);
    }

    let infos = if args.reverse {
        ctx.store.history(&filter)?
    } else {
        ctx.store.timeline(&filter)?
    };

    println!("{}", serde_json::to_string_pretty(&infos)?);
    Ok(())
}

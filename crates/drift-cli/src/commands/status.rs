use crate::context::AppContext;
use anyhow::Result;
use clap::Args;
use drift_collector::CollectorStatus;

#[derive(Args)]
pub struct StatusArgs {
    /// Restrict to one provider; defaults to every registered collector.
    #[arg(long)]
    pub provider: Option<String>,
}

pub async fn run(ctx: &AppContext, args: StatusArgs) -> Result<()> {
    let names: Vec<&'static str> = match &args.provider {
        Some(provider) => vec![ctx.registry.get(provider)?.name()],
        None => ctx.registry.names(),
    };

    let statuses: Vec<_> = names
        .into_iter()
        .map(|name| {
            let collector = ctx.registry.get(name).expect("name came from the registry");
            let (state, reason) = match collector.status() {
                CollectorStatus::Ready => ("ready", None),
                CollectorStatus::Degraded { reason } => ("degraded", Some(reason)),
                CollectorStatus::Unavailable { reason } => ("unavailable", Some(reason)),
            };
            serde_json::json!({"provider": name, "status": state, "reason": reason})
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&statuses)?);
    Ok(())
}

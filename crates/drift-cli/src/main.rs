use drift_cli::{Cli, Commands, Parser};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = drift_cli::context::AppContext::build(cli.store_root)?;

    match cli.command {
        Commands::Scan(args) => drift_cli::commands::scan::run(&ctx, args).await,
        Commands::Diff(args) => drift_cli::commands::diff::run(&ctx, args).await,
        Commands::Timeline(args) => drift_cli::commands::timeline::run(&ctx, args).await,
        Commands::Baseline { subcommand } => drift_cli::commands::baseline::run(&ctx, subcommand).await,
        Commands::Status(args) => drift_cli::commands::status::run(&ctx, args).await,
    }
}

/// Walks the anyhow error chain for a `drift_core::Error` to honor the exit-
/// code table from the error taxonomy; anything else maps to the generic
/// user-error code.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<drift_core::Error>())
        .map(|e| e.exit_code())
        .unwrap_or(1)
}

//! drift-kit command-line interface: a thin `clap`-derive binary exercising
//! the collection, storage, and diff library crates end-to-end. Interactive
//! auth wizards, ANSI rendering, and compliance narration are out of scope
//! here; every command emits JSON to stdout.

pub mod commands;
pub mod context;

pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "driftkit")]
#[command(about = "Detect and report drift in cloud infrastructure")]
#[command(version, author, long_about = None)]
pub struct Cli {
    /// Override the snapshot store root (default: $DRIFTKIT_HOME or ~/.driftkit).
    #[arg(long, global = true, value_name = "PATH")]
    pub store_root: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one or more collectors and persist the resulting snapshot(s).
    Scan(commands::scan::ScanArgs),
    /// Compute and print the drift report between two snapshots.
    Diff(commands::diff::DiffArgs),
    /// List snapshots chronologically.
    Timeline(commands::timeline::TimelineArgs),
    /// Baseline management.
    Baseline {
        #[command(subcommand)]
        subcommand: commands::baseline::BaselineCommands,
    },
    /// Report collector readiness without touching the network.
    Status(commands::status::StatusArgs),
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod trace;

#[derive(Parser)]
#[command(name = "metacore")]
#[command(about = "Replay host call traces through the gameplay event engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON-lines trace of host calls, printing broadcast events
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Path to config file
        #[arg(short, long, env = "METACORE_CONFIG")]
        config: Option<PathBuf>,

        /// Print the last level summary as JSON
        #[arg(long)]
        summary: bool,

        /// Do not print events
        #[arg(short, long)]
        quiet: bool,
    },
    /// List built-in event names
    Events,
    /// List interception points
    Hooks,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("metacore=info".parse()?)
                .add_directive("metacore_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            trace,
            config,
            summary,
            quiet,
        } => commands::replay::run(&trace, config.as_deref(), summary, quiet),
        Command::Events => {
            commands::events::run();
            Ok(())
        }
        Command::Hooks => {
            commands::hooks::run();
            Ok(())
        }
    }
}

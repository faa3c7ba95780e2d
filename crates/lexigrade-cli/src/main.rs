//! lexigrade CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lexigrade", version, about = "Pass/fail analyzer for vocabulary-test activity feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an activity feed
    Analyze {
        /// Path to the feed file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Pass threshold in percent (default: 94)
        #[arg(long)]
        threshold: Option<u32>,

        /// Also list failed tests per student
        #[arg(long)]
        show_failed: bool,

        /// Output format: table, json, csv, markdown, all
        #[arg(long, default_value = "table")]
        format: String,

        /// Output directory (default: ./lexigrade-results)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Scan a feed and list what the analyzer would drop
    Check {
        /// Path to the feed file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Create starter config and sample feed
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexigrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            threshold,
            show_failed,
            format,
            output,
            config,
        } => commands::analyze::execute(input, threshold, show_failed, format, output, config),
        Commands::Check { input } => commands::check::execute(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

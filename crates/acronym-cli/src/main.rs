mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, run::RunArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "acronym-bot",
    about = "Explain acronyms in recent Reddit comments, one sweep per invocation",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Bot root directory (default: auto-detect from acronym-bot.yaml)
    #[arg(long, global = true, env = "ACRONYM_BOT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep recent comments once and reply where acronyms pile up (default)
    Run(RunArgs),

    /// Show the persisted reply state
    State,

    /// Show which acronyms a text contains and the reply it would get
    Explain {
        /// Comment text to check
        text: String,
    },

    /// Inspect and validate acronym-bot.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    // Variables already set in the environment take precedence over `.env`.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_level = match &cli.command {
        None | Some(Commands::Run(_)) => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "could not read .env");
        }
    }

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        None => cmd::run::run(&root, cli.run, cli.json),
        Some(Commands::Run(args)) => cmd::run::run(&root, args, cli.json),
        Some(Commands::State) => cmd::state::run(&root, cli.json),
        Some(Commands::Explain { text }) => cmd::explain::run(&root, &text, cli.json),
        Some(Commands::Config { subcommand }) => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

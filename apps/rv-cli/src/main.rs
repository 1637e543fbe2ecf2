//! # rv-cli
//!
//! Command-line interface for the response validator.
//!
//! - `rv check` — evaluate a host `message_sending` payload and print `{cancel, error}`
//! - `rv config` — print the effective policy configuration
//! - `rv hooks` — list the hook registrations the plugins request
//! - `rv bootstrap` — print the canvas documentation notice
//! - `rv tool-result` — apply the summarize speech notice to a tool result

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rv_policy::PolicyConfig;
use tracing_subscriber::EnvFilter;

/// Response validator CLI — check agent responses against content policies.
#[derive(Parser)]
#[command(name = "rv", version, about)]
struct Cli {
    /// Policy config file (.toml, .yaml/.yml or .json). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a candidate response. Exits with status 1 when it is blocked.
    Check {
        /// Event JSON file, or `-` for stdin. Without --turn it must hold
        /// `{"event": {...}, "turn": {...}}`.
        #[arg(long, default_value = "-")]
        event: PathBuf,
        /// Turn context JSON file.
        #[arg(long)]
        turn: Option<PathBuf>,
        /// Print every rule consulted instead of just the outcome.
        #[arg(long)]
        trace: bool,
    },
    /// Print the effective configuration, rule order and compiled triggers as JSON.
    Config,
    /// List hook registrations.
    Hooks,
    /// Print the canvas documentation notice injected at agent bootstrap.
    Bootstrap,
    /// Add the speech notice to a persisted tool result.
    ToolResult {
        /// Tool result JSON file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: PathBuf,
        /// Voice ID for the speech tool.
        #[arg(long)]
        voice: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so they don't mix with JSON on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("rv_policy=info".parse()?)
                .add_directive("rv_hooks=info".parse()?)
                .add_directive("rv=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            tracing::debug!("loading policy config from {}", path.display());
            PolicyConfig::load(path)?
        }
        None => PolicyConfig::default(),
    };

    match &cli.command {
        Commands::Check { event, turn, trace } => {
            let blocked = commands::check::execute(&config, event, turn.as_deref(), *trace)?;
            Ok(if blocked {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Config => {
            commands::config::execute(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Hooks => {
            commands::config::hooks();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Bootstrap => {
            commands::plugins::bootstrap(&config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::ToolResult { input, voice } => {
            commands::plugins::tool_result(input, voice.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

//! Grid state replay CLI.
//!
//! Builds a grid state from an initialization config, applies a JSON array of
//! actions through the reducer, and prints the resulting state or page.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use gridstate::core::selectors::page_view;
use gridstate::core::types::GridDefaults;
use gridstate::io::settings::{SETTINGS_FILE, write_settings};
use gridstate::io::state_store::write_state;
use gridstate::logging;
use gridstate::replay::{ReplayInputs, load_inputs, replay_from_files};

#[derive(Parser)]
#[command(
    name = "gridstate",
    version,
    about = "Replay data-grid actions through the state reducer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default `gridstate.toml` if missing.
    Init {
        /// Overwrite an existing settings file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the final grid state as JSON.
    Reduce {
        #[command(flatten)]
        input: InputArgs,
        /// Write the state to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the current page (visible columns only) as JSON.
    Page(InputArgs),
    /// Validate the config and actions without reducing.
    Check(InputArgs),
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Initialization config (JSON object).
    #[arg(short, long)]
    config: PathBuf,
    /// Actions to apply (JSON array).
    #[arg(short, long)]
    actions: Option<PathBuf>,
    /// Settings file; defaults to `gridstate.toml` in the working directory.
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

impl From<InputArgs> for ReplayInputs {
    fn from(args: InputArgs) -> Self {
        Self {
            config_path: args.config,
            actions_path: args.actions,
            settings_path: args.settings,
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Reduce { input, out } => cmd_reduce(input.into(), out),
        Command::Page(args) => cmd_page(args.into()),
        Command::Check(args) => cmd_check(args.into()),
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Path::new(SETTINGS_FILE);
    if !force && path.exists() {
        info!(path = %path.display(), "settings already present");
        return Ok(());
    }
    write_settings(path, &GridDefaults::default())
        .with_context(|| format!("write {}", path.display()))
}

fn cmd_reduce(inputs: ReplayInputs, out: Option<PathBuf>) -> Result<()> {
    let state = replay_from_files(&inputs)?;
    match out {
        Some(path) => write_state(&path, &state),
        None => print_json(&state),
    }
}

fn cmd_page(inputs: ReplayInputs) -> Result<()> {
    let state = replay_from_files(&inputs)?;
    print_json(&page_view(&state))
}

fn cmd_check(inputs: ReplayInputs) -> Result<()> {
    let (_, actions, _) = load_inputs(&inputs)?;
    info!(actions = actions.len(), "inputs valid");
    println!("ok: {} action(s)", actions.len());
    Ok(())
}

/// Print `value` to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{}", payload);
    Ok(())
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! claude-matrix - a fleet manager for tmux sessions running an AI coding
//! assistant, one session per cloned repository.

mod attach;
mod color;
mod commands;
mod context;
mod help;
mod hook_config;
mod logging;
mod table;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use cm_core::Config;

use crate::context::AppContext;

#[derive(Parser)]
#[command(
    name = "claude-matrix",
    disable_version_flag = true,
    about = "Fleet manager for tmux sessions running an AI coding assistant"
)]
struct Cli {
    /// Enable debug output
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a repository and start a new session
    Create,
    /// Browse, switch to, rename, or delete sessions
    List,
    /// Print the discovered repository table
    ListRepos {
        /// Bypass the remote discovery cache's TTL for this run
        #[arg(long)]
        force_refresh: bool,
    },
    /// Set the session title shown in the picker
    Rename {
        /// New title; read from stdin when omitted
        title: Vec<String>,
    },
    /// Force a refresh of the remote repository cache
    Refresh,
    /// Print config, hook status, and session inventory
    Diagnose,
    /// Register this binary as the assistant's hook command
    SetupHooks,
    /// Unregister this binary's hook command
    RemoveHooks,
    /// Consume one hook event from stdin (invoked by the assistant itself)
    #[command(hide = true)]
    HookHandler {
        /// Lifecycle event name, e.g. `stop` or `pre-tool-use`
        #[arg(long)]
        from: String,
    },
    /// Print the binary name and version
    Version,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
/// Otherwise we render the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn cli_command() -> clap::Command {
    Cli::command()
        .help_template(help::template())
        .before_help(help::commands())
        .after_help(help::after_help())
        .styles(help::styles())
}

async fn run() -> Result<()> {
    let matches = match cli_command().try_get_matches() {
        Ok(m) => m,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp {
                let args: Vec<String> = std::env::args().collect();
                print_formatted_help(&args);
                return Ok(());
            }
            e.exit();
        }
    };
    let cli = Cli::from_arg_matches(&matches)?;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            help::print_help(cli_command());
            return Ok(());
        }
    };

    let home = dirs::home_dir().context("could not determine the home directory")?;
    let mut config = Config::resolve(home, &|key| std::env::var(key).ok());
    if cli.debug {
        config.debug = true;
    }
    logging::init(config.debug);

    let ctx = AppContext::new(config);

    match command {
        Commands::Create => commands::create::handle(&ctx).await?,
        Commands::List => commands::list::handle(&ctx).await?,
        Commands::ListRepos { force_refresh } => {
            commands::list_repos::handle(&ctx, force_refresh).await?
        }
        Commands::Rename { title } => commands::rename::handle(&ctx, &title).await?,
        Commands::Refresh => commands::refresh::handle(&ctx).await?,
        Commands::Diagnose => commands::diagnose::handle(&ctx).await?,
        Commands::SetupHooks => commands::hooks::setup(&ctx).await?,
        Commands::RemoveHooks => commands::hooks::remove(&ctx).await?,
        Commands::HookHandler { from } => {
            let body = commands::hook_handler::read_event_body()?;
            commands::hook_handler::handle(&ctx, &from, &body).await?
        }
        Commands::Version => commands::version::handle(),
    }

    Ok(())
}

/// Print help with post-hoc colorization, resolving the correct subcommand from args.
fn print_formatted_help(args: &[String]) {
    let cmd = cli_command();

    // Extract subcommand names from args (skip binary name and flags).
    // Handle both "claude-matrix list --help" and "claude-matrix help list".
    let non_flags: Vec<&String> = args
        .iter()
        .skip(1)
        .filter(|arg| !arg.starts_with('-'))
        .collect();

    let subcommand_names: Vec<&str> = if non_flags.first().map(|s| s.as_str()) == Some("help") {
        non_flags.iter().skip(1).map(|s| s.as_str()).collect()
    } else {
        non_flags.iter().map(|s| s.as_str()).collect()
    };

    let target_cmd = find_subcommand(cmd, &subcommand_names);
    help::print_help(target_cmd);
}

/// Recursively find a nested subcommand by name path.
pub(crate) fn find_subcommand(mut cmd: clap::Command, names: &[&str]) -> clap::Command {
    for name in names {
        let mut found_sub = None;
        for sub in cmd.get_subcommands() {
            if sub.get_name() == *name || sub.get_all_aliases().any(|a| a == *name) {
                found_sub = Some(sub.get_name().to_string());
                break;
            }
        }
        if let Some(sub_name) = found_sub {
            if let Some(sub) = cmd.find_subcommand_mut(&sub_name) {
                cmd = sub.clone();
            } else {
                break;
            }
        } else {
            break;
        }
    }
    cmd
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

#![allow(clippy::exit)]

//! `roster` — a command-line client for a remote user directory.

mod auth;
mod cli;
mod commands;
mod context;
mod output;
mod session_file;

use std::io::Write as _;

use anyhow::Result;
use clap::{CommandFactory as _, Parser as _};
use clap_complete::Generator;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::context::CliContext;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn generate_completions<G: Generator>(generator: G) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_owned();
    clap_complete::generate(generator, &mut cmd, bin_name, &mut std::io::stdout());
    std::io::stdout().flush().ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
        command => {
            let mut ctx = CliContext::new(cli.api_url)?;
            match command {
                Commands::Login => auth::run_login(&mut ctx).await,
                Commands::Logout => auth::run_logout(&mut ctx),
                Commands::Status => auth::run_status(&mut ctx),
                Commands::List { page, search } => {
                    commands::list::run_list(&mut ctx, page, search).await
                }
                Commands::Edit {
                    id,
                    first_name,
                    last_name,
                    email,
                } => commands::edit::run_edit(&mut ctx, id, first_name, last_name, email).await,
                Commands::Delete { id, yes } => {
                    commands::delete::run_delete(&mut ctx, id, yes).await
                }
                Commands::Browse => commands::browse::run_browse(&mut ctx).await,
                Commands::Completions { .. } => unreachable!("handled above"),
            }
        }
    }
}

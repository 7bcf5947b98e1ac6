mod cli;
mod commands;
mod config;
mod document;
mod records;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    let config_path = config::config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Key { fields } => commands::key::run(&ctx, &fields),
        Command::Extract { record, tree } => commands::marshal::extract(&ctx, record, &tree),
        Command::Populate {
            record,
            payload,
            state,
        } => commands::marshal::populate(&ctx, record, &payload, state.as_deref()),
        Command::Reconcile {
            prior,
            observed,
            json,
        } => {
            let config = config::Config::load(&config_path)?;
            commands::reconcile::run(&ctx, &config, &prior, &observed, json)
        }
        Command::Resolve {
            token,
            catalog,
            kind,
        } => commands::resolve::run(&ctx, &token, &catalog, kind),
        Command::Config(cmd) => commands::config::run(&ctx, cmd, &config_path),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tfbind", &mut io::stdout());
            Ok(())
        }
    }
}

#![warn(missing_docs)]

//! Entry point for the `shellctl` binary.

mod cli;
mod error;
mod resolve;
mod themes;

use std::{io, process};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {}", err.pretty());
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    registry()
        .with(log.env_filter())
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    match command {
        Commands::Resolve(args) => resolve::run(&args),
        Commands::Check(args) => resolve::check(&args),
        Commands::Themes => themes::list(),
        Commands::Theme(args) => themes::show(&args),
    }
}

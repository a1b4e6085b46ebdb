//! `suitctl` - CLI for suitstore
//!
//! This binary adds, lists, edits, and removes suit records in the working
//! snapshot, and saves or loads snapshots explicitly.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;

use suitstore::cli::{handle_config, Cli, Command, Session};
use suitstore::{init_logging, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Configuration commands never touch the snapshot
    if let Command::Config(config_cmd) = cli.command {
        return handle_config(&config, config_cmd, &mut out).context("config command failed");
    }

    let snapshot_path = config.snapshot_path();
    let mut session = Session::open(config, out);
    session
        .execute(cli.command)
        .with_context(|| format!("working snapshot: {}", snapshot_path.display()))
}

//! Command-line interface for suitstore.
//!
//! This module provides the CLI structure and command handlers for the
//! `suitctl` binary.

mod commands;
pub mod render;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_date, ConfigCommand, GetCommand, KindArg, ListCommand, LocationArgs, OutputFormat,
    RemoveCommand, SearchCommand, ShowCommand, SuitArgs, DATE_FORMAT,
};
pub use session::{handle_config, Session};

/// suitctl - Keep an inventory of space suits
///
/// Adds, edits, and removes suit records and keeps them in a snapshot file
/// that is read before and written after every change.
#[derive(Debug, Parser)]
#[command(name = "suitctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new suit
    Add(SuitArgs),

    /// List all suits
    List(ListCommand),

    /// Show one suit
    Show(ShowCommand),

    /// Find suits whose identifier or size contains some text
    Search(SearchCommand),

    /// Print a single attribute of a suit
    Get(GetCommand),

    /// Replace the suit with the given identifier
    Update(SuitArgs),

    /// Remove a suit
    Remove(RemoveCommand),

    /// Write all suits to a snapshot file
    Save(LocationArgs),

    /// Replace all suits with the contents of a snapshot file
    Load(LocationArgs),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::List(ListCommand {
                format: OutputFormat::Table,
            }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "suitctl");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = [
            "suitctl", "add", "T-01", "-s", "M", "-w", "80.5", "-d", "2025-01-10",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(suit) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(suit.id, "T-01");
        assert_eq!(suit.kind, KindArg::Standard);
        assert!((suit.weight - 80.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_add_training() {
        let args = [
            "suitctl",
            "add",
            "TR-2",
            "--size",
            "L",
            "--weight",
            "95",
            "--date",
            "2024-12-01",
            "--kind",
            "training",
            "--simulator",
            "centrifuge",
            "--material",
            "kevlar",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(suit) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(suit.kind, KindArg::Training);
        assert_eq!(suit.material.as_deref(), Some("kevlar"));
    }

    #[test]
    fn test_parse_add_requires_fields() {
        assert!(Cli::try_parse_from(["suitctl", "add", "T-01", "-s", "M"]).is_err());
    }

    #[test]
    fn test_parse_add_rejects_non_numeric_weight() {
        let args = [
            "suitctl", "add", "T-01", "-s", "M", "-w", "heavy", "-d", "2025-01-10",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_list_default_format() {
        let cli = Cli::try_parse_from(["suitctl", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List(ListCommand {
                format: OutputFormat::Table
            })
        ));
    }

    #[test]
    fn test_parse_show_json() {
        let cli = Cli::try_parse_from(["suitctl", "show", "t-01", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show(ShowCommand {
                format: OutputFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["suitctl", "get", "T-01", "material"]).unwrap();
        let Command::Get(get) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(get.id, "T-01");
        assert_eq!(get.attribute, "material");
    }

    #[test]
    fn test_parse_save_with_location() {
        let cli =
            Cli::try_parse_from(["suitctl", "save", "--dir", "/tmp", "--file", "x.dat"]).unwrap();
        let Command::Save(location) = cli.command else {
            panic!("expected save");
        };
        assert_eq!(location.dir.as_deref(), Some("/tmp"));
        assert_eq!(location.file.as_deref(), Some("x.dat"));
    }

    #[test]
    fn test_parse_load_without_location() {
        let cli = Cli::try_parse_from(["suitctl", "load"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Load(LocationArgs {
                dir: None,
                file: None
            })
        ));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["suitctl", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["suitctl", "-c", "/custom/config.toml", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["suitctl", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["suitctl", "list", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}

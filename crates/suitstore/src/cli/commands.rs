//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and turns raw
//! suit arguments into [`SuitRecord`]s.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::error::{Error, Result};
use crate::record::{SuitKind, SuitRecord};

/// Date format accepted for inspection dates and used when storing them.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields describing one suit, shared by `add` and `update`.
#[derive(Debug, Clone, Args)]
pub struct SuitArgs {
    /// Suit identifier
    pub id: String,

    /// Size label (e.g. S, M, L)
    #[arg(short, long)]
    pub size: String,

    /// Maximum supported weight in kilograms
    #[arg(short, long, allow_negative_numbers = true)]
    pub weight: f64,

    /// Last inspection date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Suit variant
    #[arg(short, long, value_enum, default_value = "standard")]
    pub kind: KindArg,

    /// Simulator type (training suits)
    #[arg(long)]
    pub simulator: Option<String>,

    /// Material (training suits)
    #[arg(long)]
    pub material: Option<String>,

    /// Terrain type (exploration suits)
    #[arg(long)]
    pub terrain: Option<String>,

    /// Pressure level (exploration suits)
    #[arg(long)]
    pub pressure: Option<f64>,
}

impl SuitArgs {
    /// Build the record these arguments describe.
    ///
    /// Text fields are trimmed and must not be blank, the weight must be a
    /// finite number, and the date must be a calendar date in `YYYY-MM-DD`
    /// form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] or [`Error::InvalidDate`] describing
    /// the first unusable field.
    pub fn to_record(&self) -> Result<SuitRecord> {
        let id = required("identifier", Some(&self.id))?;
        let size = required("size", Some(&self.size))?;
        let weight = finite("weight", Some(self.weight))?;
        let date = parse_date(&self.date)?;

        let kind = match self.kind {
            KindArg::Standard => SuitKind::Standard,
            KindArg::Training => SuitKind::Training {
                simulator_type: required("--simulator", self.simulator.as_deref())?,
                material: required("--material", self.material.as_deref())?,
            },
            KindArg::Exploration => SuitKind::Exploration {
                terrain_type: required("--terrain", self.terrain.as_deref())?,
                pressure_level: finite("--pressure", self.pressure)?,
            },
        };

        Ok(SuitRecord::new(id, size, weight, date).with_kind(kind))
    }
}

fn required(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::invalid_input(format!("{field} is required"))),
    }
}

fn finite(field: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(Error::invalid_input(format!("{field} must be a number, got {v}"))),
        None => Err(Error::invalid_input(format!("{field} is required"))),
    }
}

/// Parse an inspection date and return it in canonical `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if `input` is not a valid calendar date.
pub fn parse_date(input: &str) -> Result<String> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|_| Error::InvalidDate {
            input: trimmed.to_string(),
        })
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Identifier to look up (case-insensitive)
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Text to look for in identifiers and sizes
    pub query: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Get command arguments.
#[derive(Debug, Args)]
pub struct GetCommand {
    /// Identifier to look up (case-insensitive)
    pub id: String,

    /// Attribute name (e.g. size, max_supported_weight, material)
    pub attribute: String,
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Identifier of the suit to remove (case-insensitive)
    pub id: String,
}

/// Snapshot location overrides for `save` and `load`.
#[derive(Debug, Default, Args)]
pub struct LocationArgs {
    /// Directory of the snapshot file (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Snapshot file name (default: trajes_espaciales.dat)
    #[arg(long, value_name = "NAME")]
    pub file: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Suit variant argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KindArg {
    /// Base suit
    #[default]
    Standard,
    /// Training suit (needs --simulator and --material)
    Training,
    /// Exploration suit (needs --terrain and --pressure)
    Exploration,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

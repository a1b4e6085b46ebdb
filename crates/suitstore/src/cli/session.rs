//! Command execution against the working snapshot.
//!
//! A [`Session`] loads the configured snapshot into a [`RecordStore`] when it
//! opens, runs one or more commands against that store, and writes the
//! snapshot back after each successful change.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::accessor;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::SuitRecord;
use crate::snapshot::{self, SaveOutcome};
use crate::store::RecordStore;

use super::{render, Command, ConfigCommand, LocationArgs};

/// A record store bound to the configured working snapshot.
#[derive(Debug)]
pub struct Session<W: Write> {
    config: Config,
    store: RecordStore,
    out: W,
    snapshot_unreadable: bool,
}

impl<W: Write> Session<W> {
    /// Open a session, loading the working snapshot if autoload is enabled.
    ///
    /// A missing snapshot starts an empty store. A snapshot that exists but
    /// cannot be read also starts an empty store, and autosave is refused
    /// for the rest of the session so the file is not overwritten.
    pub fn open(config: Config, out: W) -> Self {
        let mut store = RecordStore::new();
        let mut snapshot_unreadable = false;

        if config.snapshot.autoload {
            let loaded = snapshot::load(
                &mut store,
                config.snapshot_directory(),
                config.snapshot_file_name(),
            );
            let path = config.snapshot_path();
            match loaded {
                Some(records) => debug!("Opened {} with {} suits", path.display(), records.len()),
                None if path.exists() => {
                    warn!(
                        "Snapshot {} could not be read; changes will not be saved",
                        path.display()
                    );
                    snapshot_unreadable = true;
                }
                None => debug!("No snapshot at {}, starting empty", path.display()),
            }
        }

        Self {
            config,
            store,
            out,
            snapshot_unreadable,
        }
    }

    /// The records currently held.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Consume the session and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected by the store, its input
    /// is invalid, or the working snapshot cannot be written afterwards.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add(args) => {
                let record = args.to_record()?;
                let id = record.identifier.clone();
                self.commit(|store| store.insert(record))?;
                info!("Added suit {id}");
                writeln!(self.out, "added {id}")?;
            }
            Command::List(cmd) => {
                render::records(&mut self.out, &self.store.list(), cmd.format)?;
            }
            Command::Show(cmd) => {
                let record = self.lookup(&cmd.id)?.clone();
                render::records(&mut self.out, &[record], cmd.format)?;
            }
            Command::Search(cmd) => {
                let matches = self.store.search(&cmd.query);
                debug!("Search '{}' matched {} suits", cmd.query, matches.len());
                render::records(&mut self.out, &matches, cmd.format)?;
            }
            Command::Get(cmd) => {
                let value = attribute_of(self.lookup(&cmd.id)?, &cmd.attribute)?;
                writeln!(self.out, "{value}")?;
            }
            Command::Update(args) => {
                let record = args.to_record()?;
                let id = record.identifier.clone();
                self.commit(|store| store.replace(&id, record))?;
                info!("Updated suit {id}");
                writeln!(self.out, "updated {id}")?;
            }
            Command::Remove(cmd) => {
                let removed = self.commit(|store| store.remove(&cmd.id))?;
                info!("Removed suit {}", removed.identifier);
                writeln!(self.out, "removed {}", removed.identifier)?;
            }
            Command::Save(args) => self.save_to(&args)?,
            Command::Load(args) => self.load_from(&args)?,
            Command::Config(cmd) => handle_config(&self.config, cmd, &mut self.out)?,
        }
        Ok(())
    }

    fn lookup(&self, id: &str) -> Result<&SuitRecord> {
        self.store.find(id).ok_or_else(|| Error::not_found(id))
    }

    fn save_to(&mut self, args: &LocationArgs) -> Result<()> {
        let (dir, file) = location(&self.config, args);
        match snapshot::save(&self.store, dir, file) {
            outcome @ SaveOutcome::Saved { .. } => {
                writeln!(self.out, "{outcome}")?;
                Ok(())
            }
            SaveOutcome::Failed { path, reason } => Err(Error::SaveFailed { path, reason }),
        }
    }

    fn load_from(&mut self, args: &LocationArgs) -> Result<()> {
        let (dir, file) = location(&self.config, args);
        let (dir, file) = (dir.map(str::to_owned), file.map(str::to_owned));
        let path = snapshot::resolve_path(dir.as_deref(), file.as_deref());
        let report = self.commit(|store| {
            snapshot::load_report(store, dir.as_deref(), file.as_deref())
                .ok_or(Error::SnapshotUnavailable { path })
        })?;

        writeln!(
            self.out,
            "loaded {} suits from {}",
            report.records.len(),
            report.path.display()
        )?;
        if report.dropped > 0 {
            writeln!(self.out, "skipped {} unusable entries", report.dropped)?;
        }
        Ok(())
    }

    /// Apply `change` to the store and persist the result.
    ///
    /// If the change is rejected the store is untouched. If persisting
    /// fails the store is restored to its contents before the change.
    fn commit<T>(&mut self, change: impl FnOnce(&mut RecordStore) -> Result<T>) -> Result<T> {
        let before = self.store.clone();
        let value = change(&mut self.store)?;
        if let Err(e) = self.persist() {
            debug!("Rolling back change after failed write: {e}");
            self.store = before;
            return Err(e);
        }
        Ok(value)
    }

    /// Write the store back to the working snapshot if autosave is on.
    fn persist(&mut self) -> Result<()> {
        if !self.config.snapshot.autosave {
            debug!("Autosave disabled, not writing snapshot");
            return Ok(());
        }
        if self.snapshot_unreadable {
            return Err(Error::OverwriteRefused {
                path: self.config.snapshot_path(),
            });
        }

        match snapshot::save(
            &self.store,
            self.config.snapshot_directory(),
            self.config.snapshot_file_name(),
        ) {
            SaveOutcome::Saved { path, records } => {
                debug!("Autosaved {records} suits to {}", path.display());
                Ok(())
            }
            SaveOutcome::Failed { path, reason } => Err(Error::SaveFailed { path, reason }),
        }
    }
}

/// Snapshot directory and file for `save`/`load`, falling back to the
/// configured working snapshot.
fn location<'a>(config: &'a Config, args: &'a LocationArgs) -> (Option<&'a str>, Option<&'a str>) {
    (
        args.dir.as_deref().or_else(|| config.snapshot_directory()),
        args.file.as_deref().or_else(|| config.snapshot_file_name()),
    )
}

fn attribute_of(record: &SuitRecord, name: &str) -> Result<accessor::AttributeValue> {
    if let Some(value) = accessor::attribute(record, name) {
        return Ok(value);
    }
    if accessor::attribute_names().any(|known| known == name) {
        Err(Error::invalid_input(format!(
            "{} is a {} suit and has no {name}",
            record.identifier, record.kind
        )))
    } else {
        let known: Vec<_> = accessor::attribute_names().collect();
        Err(Error::invalid_input(format!(
            "unknown attribute '{name}', expected one of: {}",
            known.join(", ")
        )))
    }
}

/// Run a configuration command.
///
/// # Errors
///
/// Returns an error if writing to `out` or JSON encoding fails.
pub fn handle_config<W: Write>(config: &Config, cmd: ConfigCommand, out: &mut W) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Snapshot]")?;
                writeln!(out, "  Path:      {}", config.snapshot_path().display())?;
                writeln!(out, "  Autoload:  {}", config.snapshot.autoload)?;
                writeln!(out, "  Autosave:  {}", config.snapshot.autosave)?;
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            let path: PathBuf = file.unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            match Config::load_from(Some(path)) {
                Ok(_) => writeln!(out, "Configuration is valid.")?,
                Err(e) => writeln!(out, "Configuration error: {e}")?,
            }
        }
    }
    Ok(())
}

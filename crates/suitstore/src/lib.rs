//! `suitstore` - An inventory of space suits kept in a flat snapshot file
//!
//! This library provides an in-memory [`RecordStore`] of suit records with
//! case-insensitive identifiers, whole-collection snapshot persistence, and
//! name-based attribute access for generic display.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod accessor;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod snapshot;
pub mod store;

pub use accessor::AttributeValue;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{SuitKind, SuitRecord};
pub use snapshot::{LoadReport, SaveOutcome};
pub use store::RecordStore;

//! On-disk snapshot encoding.
//!
//! A snapshot is a JSON document wrapping the ordered record list in an
//! envelope whose `format` and `version` fields act as a compatibility tag:
//!
//! ```json
//! { "format": "suitstore-snapshot", "version": 1, "records": [ ... ] }
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::record::{identifiers_match, SuitRecord};

/// Value of the envelope's `format` field.
pub const FORMAT_TAG: &str = "suitstore-snapshot";

/// The snapshot version this build reads and writes.
pub const FORMAT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    format: &'static str,
    version: u64,
    records: &'a [SuitRecord],
}

/// Records recovered from a snapshot, plus how many elements were discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Well-formed records, in file order.
    pub records: Vec<SuitRecord>,
    /// Elements that were not usable records.
    pub dropped: usize,
}

/// Encode a record list as snapshot bytes.
///
/// A record holding NaN or an infinity fails the whole encode.
///
/// # Errors
///
/// Returns [`Error::SnapshotFormat`] if a record holds a non-finite number,
/// or an error if serialization fails.
pub fn encode(records: &[SuitRecord]) -> Result<Vec<u8>> {
    if let Some(record) = records.iter().find(|r| !r.has_finite_numbers()) {
        return Err(Error::snapshot_format(format!(
            "suit {} holds a non-finite number",
            record.identifier
        )));
    }

    let envelope = Envelope {
        format: FORMAT_TAG,
        version: FORMAT_VERSION,
        records,
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

/// Decode snapshot bytes.
///
/// Elements of `records` that do not decode as a [`SuitRecord`], have a blank
/// identifier, or repeat an earlier identifier (ignoring case) are skipped
/// and counted in [`Decoded::dropped`].
///
/// # Errors
///
/// Returns an error if the bytes are not JSON, the compatibility tag does
/// not match, or `records` is not an array.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    let mut document: Value = serde_json::from_slice(bytes)?;

    let format = document.get("format").and_then(Value::as_str);
    if format != Some(FORMAT_TAG) {
        return Err(Error::snapshot_format(format!(
            "expected format tag '{FORMAT_TAG}', found {}",
            format.map_or_else(|| "none".to_string(), |f| format!("'{f}'"))
        )));
    }

    let version = document.get("version").and_then(Value::as_u64);
    if version != Some(FORMAT_VERSION) {
        return Err(Error::snapshot_format(format!(
            "unsupported snapshot version {}",
            version.map_or_else(|| "none".to_string(), |v| v.to_string())
        )));
    }

    let Some(Value::Array(elements)) = document.get_mut("records").map(Value::take) else {
        return Err(Error::snapshot_format("records is not an array"));
    };

    let total = elements.len();
    let mut records: Vec<SuitRecord> = Vec::with_capacity(total);
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<SuitRecord>(element) {
            Ok(record) if record.has_blank_identifier() => {
                warn!("Dropping snapshot element {}: blank identifier", index);
            }
            Ok(record)
                if records
                    .iter()
                    .any(|kept| identifiers_match(&kept.identifier, &record.identifier)) =>
            {
                warn!(
                    "Dropping snapshot element {}: duplicate identifier {}",
                    index, record.identifier
                );
            }
            Ok(record) => records.push(record),
            Err(e) => warn!("Dropping snapshot element {}: {}", index, e),
        }
    }

    Ok(Decoded {
        dropped: total - records.len(),
        records,
    })
}

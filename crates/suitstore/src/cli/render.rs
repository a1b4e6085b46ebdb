//! Output rendering for record listings.

use std::io::Write;

use crate::accessor::{self, AttributeValue};
use crate::error::Result;
use crate::record::{SuitKind, SuitRecord};

use super::OutputFormat;

/// Columns shown by the table format, in order.
const TABLE_COLUMNS: &[(&str, &str)] = &[
    ("identifier", "ID"),
    ("size", "SIZE"),
    ("max_supported_weight", "MAX KG"),
    ("last_inspection_date", "INSPECTED"),
    ("kind", "KIND"),
];

/// Write `records` to `out` in the requested format.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn records<W: Write>(out: &mut W, records: &[SuitRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for record in records {
                writeln!(out, "{}", plain_line(record))?;
            }
        }
        OutputFormat::Table => table(out, records)?,
    }
    Ok(())
}

fn plain_line(record: &SuitRecord) -> String {
    let base = format!(
        "{} size={} max_kg={} inspected={} kind={}",
        record.identifier,
        record.size,
        record.max_supported_weight,
        record.last_inspection_date,
        record.kind
    );
    match &record.kind {
        SuitKind::Standard => base,
        SuitKind::Training {
            simulator_type,
            material,
        } => format!("{base} simulator={simulator_type} material={material}"),
        SuitKind::Exploration {
            terrain_type,
            pressure_level,
        } => format!("{base} terrain={terrain_type} pressure={pressure_level}"),
    }
}

fn table<W: Write>(out: &mut W, records: &[SuitRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "(no suits)")?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            TABLE_COLUMNS
                .iter()
                .map(|(name, _)| cell(accessor::attribute(record, name)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = TABLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, (_, header))| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let headers: Vec<String> = TABLE_COLUMNS.iter().map(|(_, h)| (*h).to_string()).collect();
    write_row(out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn cell(value: Option<AttributeValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())?;
    Ok(())
}

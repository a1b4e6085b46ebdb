//! Named attribute lookup over suit records.
//!
//! Callers that only know an attribute by name (table columns, the `get`
//! command) go through [`attribute`], which dispatches on a fixed table of
//! accessor functions. Variant-specific names resolve to `None` for records
//! of another variant.

use crate::record::{SuitKind, SuitRecord};

/// A single attribute value read from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A textual attribute.
    Text(String),
    /// A numeric attribute.
    Number(f64),
}

impl AttributeValue {
    /// The text value, if this is a text attribute.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }

    /// The numeric value, if this is a numeric attribute.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

type Getter = fn(&SuitRecord) -> Option<AttributeValue>;

/// Every readable attribute name and its accessor.
pub const ATTRIBUTES: &[(&str, Getter)] = &[
    ("identifier", |r| Some(r.identifier.as_str().into())),
    ("size", |r| Some(r.size.as_str().into())),
    ("max_supported_weight", |r| {
        Some(r.max_supported_weight.into())
    }),
    ("last_inspection_date", |r| {
        Some(r.last_inspection_date.as_str().into())
    }),
    ("kind", |r| Some(r.kind.label().into())),
    ("simulator_type", |r| match &r.kind {
        SuitKind::Training { simulator_type, .. } => Some(simulator_type.as_str().into()),
        _ => None,
    }),
    ("material", |r| match &r.kind {
        SuitKind::Training { material, .. } => Some(material.as_str().into()),
        _ => None,
    }),
    ("terrain_type", |r| match &r.kind {
        SuitKind::Exploration { terrain_type, .. } => Some(terrain_type.as_str().into()),
        _ => None,
    }),
    ("pressure_level", |r| match &r.kind {
        SuitKind::Exploration { pressure_level, .. } => Some((*pressure_level).into()),
        _ => None,
    }),
];

/// Read the attribute called `name` from `record`.
///
/// Returns `None` when no attribute has that exact name, or when the name
/// belongs to a variant the record is not.
#[must_use]
pub fn attribute(record: &SuitRecord, name: &str) -> Option<AttributeValue> {
    ATTRIBUTES
        .iter()
        .find(|(attr, _)| *attr == name)
        .and_then(|(_, get)| get(record))
}

/// All attribute names, in table order.
pub fn attribute_names() -> impl Iterator<Item = &'static str> {
    ATTRIBUTES.iter().map(|(name, _)| *name)
}

/// The record identifier.
#[must_use]
pub fn identifier(record: &SuitRecord) -> Option<String> {
    text(record, "identifier")
}

/// The size label.
#[must_use]
pub fn size(record: &SuitRecord) -> Option<String> {
    text(record, "size")
}

/// The maximum supported weight in kilograms.
#[must_use]
pub fn max_supported_weight(record: &SuitRecord) -> Option<f64> {
    attribute(record, "max_supported_weight").and_then(|v| v.as_number())
}

/// The last inspection date as stored.
#[must_use]
pub fn last_inspection_date(record: &SuitRecord) -> Option<String> {
    text(record, "last_inspection_date")
}

fn text(record: &SuitRecord, name: &str) -> Option<String> {
    match attribute(record, name)? {
        AttributeValue::Text(text) => Some(text),
        AttributeValue::Number(_) => None,
    }
}

//! Core record types for suitstore.
//!
//! A [`SuitRecord`] carries the four base attributes every suit has plus a
//! [`SuitKind`] payload for the training and exploration variants.

use serde::{Deserialize, Serialize};

/// Variant-specific data attached to a suit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuitKind {
    /// A plain suit with only the base attributes.
    #[default]
    Standard,
    /// A suit built for a training simulator.
    Training {
        /// The simulator the suit is fitted for.
        simulator_type: String,
        /// What the suit is made of.
        material: String,
    },
    /// A suit built for surface exploration.
    Exploration {
        /// Terrain or body the suit is designed for.
        terrain_type: String,
        /// Pressure level the suit withstands.
        pressure_level: f64,
    },
}

impl SuitKind {
    /// Short lowercase label for this variant.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Training { .. } => "training",
            Self::Exploration { .. } => "exploration",
        }
    }
}

impl std::fmt::Display for SuitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One space suit in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitRecord {
    /// Unique key, compared without regard to case.
    pub identifier: String,
    /// Free-text size label.
    pub size: String,
    /// Maximum supported weight in kilograms.
    pub max_supported_weight: f64,
    /// Date of the last inspection, stored as entered.
    pub last_inspection_date: String,
    /// Variant payload.
    #[serde(default)]
    pub kind: SuitKind,
}

impl SuitRecord {
    /// Create a standard suit record.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        size: impl Into<String>,
        max_supported_weight: f64,
        last_inspection_date: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            size: size.into(),
            max_supported_weight,
            last_inspection_date: last_inspection_date.into(),
            kind: SuitKind::Standard,
        }
    }

    /// Replace the variant payload.
    #[must_use]
    pub fn with_kind(mut self, kind: SuitKind) -> Self {
        self.kind = kind;
        self
    }

    /// Turn this record into a training suit.
    #[must_use]
    pub fn training(self, simulator_type: impl Into<String>, material: impl Into<String>) -> Self {
        self.with_kind(SuitKind::Training {
            simulator_type: simulator_type.into(),
            material: material.into(),
        })
    }

    /// Turn this record into an exploration suit.
    #[must_use]
    pub fn exploration(self, terrain_type: impl Into<String>, pressure_level: f64) -> Self {
        self.with_kind(SuitKind::Exploration {
            terrain_type: terrain_type.into(),
            pressure_level,
        })
    }

    /// Whether the identifier is empty or whitespace only.
    #[must_use]
    pub fn has_blank_identifier(&self) -> bool {
        self.identifier.trim().is_empty()
    }

    /// Whether the weight and any variant number are finite.
    #[must_use]
    pub fn has_finite_numbers(&self) -> bool {
        let pressure_ok = match &self.kind {
            SuitKind::Exploration { pressure_level, .. } => pressure_level.is_finite(),
            SuitKind::Standard | SuitKind::Training { .. } => true,
        };
        self.max_supported_weight.is_finite() && pressure_ok
    }

    /// Case-insensitive identifier comparison.
    ///
    /// No whitespace trimming or locale-specific folding is applied.
    #[must_use]
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        identifiers_match(&self.identifier, identifier)
    }

    /// Whether two records agree on all four base attributes.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn same_base(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.size == other.size
            && self.max_supported_weight == other.max_supported_weight
            && self.last_inspection_date == other.last_inspection_date
    }
}

/// Compare two identifiers ignoring case.
#[must_use]
pub fn identifiers_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

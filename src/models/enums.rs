//! Enums for data modeling
//!
//! # Serde Casing Conventions
//!
//! - `kebab-case`: configuration keywords (DuplicatePolicy)
//! - `camelCase`: values that appear in ODCS documents (EndpointCardinality)
//! - `lowercase`: simple level keywords sent to the modeling service (ModelLevel)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy for entities that share a name in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first entity per name, drop later ones entirely
    IgnoreDuplicates,
    /// Keep every entity, renaming the 2nd, 3rd, ... occurrence to `name_2`, `name_3`, ...
    #[default]
    AddPostfix,
    /// Merge same-named entities, union of attributes by name (first wins)
    CombineAttributes,
}

impl DuplicatePolicy {
    /// All policies, in the order they are offered to users
    pub const ALL: [DuplicatePolicy; 3] = [
        DuplicatePolicy::AddPostfix,
        DuplicatePolicy::IgnoreDuplicates,
        DuplicatePolicy::CombineAttributes,
    ];

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            DuplicatePolicy::IgnoreDuplicates => "Ignore Duplicates",
            DuplicatePolicy::AddPostfix => "Add Postfix",
            DuplicatePolicy::CombineAttributes => "Combine Attributes",
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "ignore-duplicates" | "ignore" => Ok(DuplicatePolicy::IgnoreDuplicates),
            "add-postfix" | "postfix" => Ok(DuplicatePolicy::AddPostfix),
            "combine-attributes" | "combine" => Ok(DuplicatePolicy::CombineAttributes),
            _ => Err(format!(
                "Unknown duplicate handling: {}. Use 'ignore-duplicates', 'add-postfix' or 'combine-attributes'.",
                s
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Crow's feet endpoint cardinality as written in `logicalRelationships`
///
/// Values the importer does not recognise are kept verbatim in `Other` so the
/// ER notation can still draw them with the generic marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointCardinality {
    /// Exactly one - 1..1
    One,
    /// Zero or one (optional single) - 0..1
    ZeroOrOne,
    /// Zero or many (optional multiple) - 0..*
    ZeroOrMany,
    /// One or many (required multiple) - 1..*
    OneOrMany,
    /// Missing or unrecognised value
    #[serde(untagged)]
    Other(Option<String>),
}

impl EndpointCardinality {
    /// Parse from the raw ODCS keyword; never fails
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("one") => EndpointCardinality::One,
            Some("zeroOrOne") => EndpointCardinality::ZeroOrOne,
            Some("zeroOrMany") => EndpointCardinality::ZeroOrMany,
            Some("oneOrMany") => EndpointCardinality::OneOrMany,
            other => EndpointCardinality::Other(other.map(str::to_string)),
        }
    }

    /// `one` or `zeroOrOne`
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            EndpointCardinality::One | EndpointCardinality::ZeroOrOne
        )
    }

    /// `zeroOrMany` or `oneOrMany`
    pub fn is_multiple(&self) -> bool {
        matches!(
            self,
            EndpointCardinality::ZeroOrMany | EndpointCardinality::OneOrMany
        )
    }
}

impl fmt::Display for EndpointCardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointCardinality::One => f.write_str("one"),
            EndpointCardinality::ZeroOrOne => f.write_str("zeroOrOne"),
            EndpointCardinality::ZeroOrMany => f.write_str("zeroOrMany"),
            EndpointCardinality::OneOrMany => f.write_str("oneOrMany"),
            EndpointCardinality::Other(Some(raw)) => f.write_str(raw),
            EndpointCardinality::Other(None) => f.write_str("unspecified"),
        }
    }
}

/// Which end of a relationship declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipSide {
    From,
    To,
}

/// Relationship multiplicity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardinalityKind {
    OneToOne,
    /// One-to-many; `many` names the side whose cardinality is multiple
    OneToMany { many: RelationshipSide },
    /// Anything else (many-to-many, missing values); not sent to the modeling service
    Unsupported,
}

impl CardinalityKind {
    /// Classify a pair of endpoint cardinalities
    pub fn classify(from: &EndpointCardinality, to: &EndpointCardinality) -> Self {
        if from.is_single() && to.is_single() {
            CardinalityKind::OneToOne
        } else if from.is_single() && to.is_multiple() {
            CardinalityKind::OneToMany {
                many: RelationshipSide::To,
            }
        } else if from.is_multiple() && to.is_single() {
            CardinalityKind::OneToMany {
                many: RelationshipSide::From,
            }
        } else {
            CardinalityKind::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CardinalityKind::Unsupported)
    }
}

/// Model level in the modeling service; only physical models are created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelLevel {
    #[default]
    Physical,
}

//! Relationship models for the SDK

use super::enums::{CardinalityKind, EndpointCardinality};
use serde::{Deserialize, Serialize};

/// Name of the entity custom property that carries relationship declarations
pub const LOGICAL_RELATIONSHIPS_PROPERTY: &str = "logicalRelationships";

/// One side of a relationship declaration after parsing `(Entity.attr[,attr...])`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRef {
    /// Entity name (text before the first dot)
    pub entity: String,
    /// Bare attribute names (final dot segment of each comma-separated component)
    pub attributes: Vec<String>,
}

impl EndpointRef {
    /// Parse an endpoint reference; never fails
    ///
    /// A single leading `(` and trailing `)` are stripped, the text before the first
    /// `.` is the entity name and the remainder is split on `,`, keeping the last
    /// dot-separated segment of each component.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::models::EndpointRef;
    ///
    /// let endpoint = EndpointRef::parse("(Orders.a,Orders.b)");
    /// assert_eq!(endpoint.entity, "Orders");
    /// assert_eq!(endpoint.attributes, vec!["a", "b"]);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix(')').unwrap_or(trimmed);

        let (entity, remainder) = match trimmed.split_once('.') {
            Some((entity, remainder)) => (entity, remainder),
            None => (trimmed, ""),
        };

        let attributes = remainder
            .split(',')
            .filter_map(|component| component.rsplit('.').next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            entity: entity.trim().to_string(),
            attributes,
        }
    }
}

/// Raw relationship declaration as found in an entity's `logicalRelationships`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDeclaration {
    pub from: String,
    pub to: String,
    pub cardinality_from: EndpointCardinality,
    pub cardinality_to: EndpointCardinality,
    #[serde(default)]
    pub label: String,
}

impl RelationshipDeclaration {
    pub fn source(&self) -> EndpointRef {
        EndpointRef::parse(&self.from)
    }

    pub fn target(&self) -> EndpointRef {
        EndpointRef::parse(&self.to)
    }

    pub fn cardinality(&self) -> CardinalityKind {
        CardinalityKind::classify(&self.cardinality_from, &self.cardinality_to)
    }
}

/// Relationship whose endpoints both exist in the current entity set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_entity_name: String,
    pub source_attributes: Vec<String>,
    pub target_entity_name: String,
    pub target_attributes: Vec<String>,
    /// Raw endpoint cardinalities, kept for the ER notation markers
    pub cardinality_from: EndpointCardinality,
    pub cardinality_to: EndpointCardinality,
    pub cardinality: CardinalityKind,
    pub label: String,
}

impl Relationship {
    /// Resolve a declaration into a relationship without checking entity existence
    pub fn from_declaration(declaration: &RelationshipDeclaration) -> Self {
        let source = declaration.source();
        let target = declaration.target();
        Self {
            source_entity_name: source.entity,
            source_attributes: source.attributes,
            target_entity_name: target.entity,
            target_attributes: target.attributes,
            cardinality_from: declaration.cardinality_from.clone(),
            cardinality_to: declaration.cardinality_to.clone(),
            cardinality: declaration.cardinality(),
            label: declaration.label.clone(),
        }
    }
}

//! Relationship extraction
//!
//! Reads `logicalRelationships` custom properties and resolves each declaration
//! against a set of available entity names. Declarations whose endpoints are not
//! both available are dropped without error.

use crate::import::odcs_shared::parse_relationship_declarations;
use crate::models::{Entity, LOGICAL_RELATIONSHIPS_PROPERTY, Relationship, RelationshipDeclaration};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Extracts relationships from entity annotations
#[derive(Debug, Default)]
pub struct RelationshipExtractor;

impl RelationshipExtractor {
    pub fn new() -> Self {
        Self
    }

    /// All declarations in entity order, then declaration order
    pub fn declarations(&self, entities: &[Entity]) -> Vec<RelationshipDeclaration> {
        entities
            .iter()
            .flat_map(|entity| entity.custom_property_values(LOGICAL_RELATIONSHIPS_PROPERTY))
            .flat_map(parse_relationship_declarations)
            .collect()
    }

    /// Declarations of `entities` resolved against `available` entity names
    pub fn extract(&self, entities: &[Entity], available: &HashSet<&str>) -> Vec<Relationship> {
        self.resolve(&self.declarations(entities), available)
    }

    /// Resolve declarations, keeping only those whose endpoints are both available
    pub fn resolve(
        &self,
        declarations: &[RelationshipDeclaration],
        available: &HashSet<&str>,
    ) -> Vec<Relationship> {
        declarations
            .iter()
            .map(Relationship::from_declaration)
            .filter(|rel| {
                let keep = available.contains(rel.source_entity_name.as_str())
                    && available.contains(rel.target_entity_name.as_str());
                if !keep {
                    debug!(
                        "Skipping relationship {} -> {}: endpoint entity not available",
                        rel.source_entity_name, rel.target_entity_name
                    );
                }
                keep
            })
            .collect()
    }
}

/// Target-side attributes referenced by a set of relationships, per entity
///
/// An attribute is a foreign key when its name appears in the target attribute
/// list of a relationship whose target is its entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeySet {
    targets: HashMap<String, HashSet<String>>,
}

impl ForeignKeySet {
    pub fn from_relationships<'a, I>(relationships: I) -> Self
    where
        I: IntoIterator<Item = &'a Relationship>,
    {
        let mut targets: HashMap<String, HashSet<String>> = HashMap::new();
        for rel in relationships {
            targets
                .entry(rel.target_entity_name.clone())
                .or_default()
                .extend(rel.target_attributes.iter().cloned());
        }
        Self { targets }
    }

    pub fn contains(&self, entity: &str, attribute: &str) -> bool {
        self.targets
            .get(entity)
            .is_some_and(|attributes| attributes.contains(attribute))
    }
}

//! Model loading functionality
//!
//! Loads an ODCS document and applies duplicate handling, producing a
//! [`ResolvedModel`]. Every load rebuilds the model from the source text; nothing
//! is cached between runs.

use super::extractor::RelationshipExtractor;
use super::resolver::DuplicateResolver;
use super::selection::TableSelection;
use crate::import::{ImportError, ODCSImporter};
use crate::models::{DuplicatePolicy, Entity, Relationship};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Model loader
#[derive(Debug, Default)]
pub struct ModelLoader {
    importer: ODCSImporter,
    resolver: DuplicateResolver,
}

impl ModelLoader {
    /// Create a new model loader using the given duplicate handling policy
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            importer: ODCSImporter::new(),
            resolver: DuplicateResolver::new(policy),
        }
    }

    /// Load a model from YAML text
    pub fn load(&self, yaml_content: &str) -> Result<ResolvedModel, ImportError> {
        let result = self.importer.import(yaml_content)?;
        Ok(self.resolve(result.entities))
    }

    /// Load a model from a YAML file
    pub fn load_file(&self, path: &Path) -> Result<ResolvedModel, ImportError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ImportError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.load(&content)
    }

    /// Apply duplicate handling to already imported entities
    pub fn resolve(&self, source: Vec<Entity>) -> ResolvedModel {
        let entities = self.resolver.resolve(&source);
        info!(
            "Resolved {} source entities into {} entities ({})",
            source.len(),
            entities.len(),
            self.resolver.policy()
        );
        ResolvedModel {
            policy: self.resolver.policy(),
            source,
            entities,
        }
    }
}

/// Entities before and after duplicate handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModel {
    /// Policy that produced `entities`
    pub policy: DuplicatePolicy,
    /// Entities as they appear in the document
    pub source: Vec<Entity>,
    /// Name-unique entities after duplicate handling, in first-seen order
    pub entities: Vec<Entity>,
}

impl ResolvedModel {
    /// Names of the resolved entities, in order
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// Resolved entities contained in `selection`, in order
    pub fn selected_entities(&self, selection: &TableSelection) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|e| selection.contains(&e.name))
            .cloned()
            .collect()
    }

    /// Relationships declared on resolved entities, between resolved entities
    pub fn relationships(&self) -> Vec<Relationship> {
        let available = names_of(&self.entities);
        RelationshipExtractor::new().extract(&self.entities, &available)
    }

    /// Relationships declared on selected entities, between selected entities
    pub fn selected_relationships(&self, selection: &TableSelection) -> Vec<Relationship> {
        let selected = self.selected_entities(selection);
        let available = names_of(&selected);
        RelationshipExtractor::new().extract(&selected, &available)
    }

    /// Relationships declared anywhere in the source document, between selected entities
    pub fn source_relationships(&self, selection: &TableSelection) -> Vec<Relationship> {
        let selected = self.selected_entities(selection);
        let available = names_of(&selected);
        RelationshipExtractor::new().extract(&self.source, &available)
    }
}

fn names_of(entities: &[Entity]) -> HashSet<&str> {
    entities.iter().map(|e| e.name.as_str()).collect()
}

//! Ellie exporter for model-creation payloads.
//!
//! Builds the JSON body for `POST /api/v1/models`. Entities receive fresh
//! identifiers that relationships use for cross-referencing. Relationships come
//! from every declaration in the source document, but only one-to-one and
//! one-to-many relationships between exported entities are kept. Foreign key
//! flags are set in a final pass over the kept relationships.

use super::{ExportError, ExportResult};
use crate::model::{ForeignKeySet, ResolvedModel, TableSelection};
use crate::models::{Attribute, CardinalityKind, Entity, ModelLevel, Relationship, TypeField};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Type fields used for the `Data type` metadata key
pub const PAYLOAD_TYPE_PRIORITY: [TypeField; 2] = [TypeField::Physical, TypeField::Logical];

/// Progress status labels offered by the modeling service
pub const PROGRESS_STATUSES: [&str; 4] = [
    "Work in Progress",
    "Waiting for Approval",
    "Approved",
    "In Production",
];

/// Caller-chosen values carried into the payload
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadOptions {
    pub model_name: String,
    /// Target folder identifier as returned by the folder listing
    pub folder_id: JsonValue,
    /// Opaque progress/life-cycle label
    pub progress_status: String,
}

/// Request body for model creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateModelRequest {
    pub model: ModelPayload,
    /// Carried for the caller; not part of the request body
    #[serde(skip)]
    pub progress_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPayload {
    pub name: String,
    pub level: ModelLevel,
    pub folder_id: JsonValue,
    pub entities: Vec<EntityPayload>,
    pub relationships: Vec<RelationshipPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPayload {
    pub id: Uuid,
    pub name: String,
    pub attributes: Vec<AttributePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePayload {
    pub name: String,
    pub metadata: Map<String, JsonValue>,
    /// 1-based position within the entity
    pub order: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndType {
    One,
    Many,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEndpoint {
    pub id: Uuid,
    pub name: String,
    pub start_type: EndType,
    pub attribute_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetEndpoint {
    pub id: Uuid,
    pub name: String,
    pub end_type: EndType,
    pub attribute_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipPayload {
    pub source_entity: SourceEndpoint,
    pub target_entity: TargetEndpoint,
    #[serde(default)]
    pub description: Vec<JsonValue>,
}

impl CreateModelRequest {
    /// Serialize the request body
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::SerializationError(e.to_string()))
    }

    /// Attribute of an entity in the payload, by names
    pub fn attribute(&self, entity: &str, attribute: &str) -> Option<&AttributePayload> {
        self.model
            .entities
            .iter()
            .find(|e| e.name == entity)?
            .attributes
            .iter()
            .find(|a| a.name == attribute)
    }
}

/// Exporter for Ellie model-creation payloads
#[derive(Debug, Default)]
pub struct EllieExporter;

impl EllieExporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the payload for the selected entities with random entity identifiers.
    pub fn build(
        &self,
        model: &ResolvedModel,
        selection: &TableSelection,
        options: &PayloadOptions,
    ) -> CreateModelRequest {
        self.build_with_ids(model, selection, options, Uuid::new_v4)
    }

    /// Build the payload, drawing entity identifiers from `next_id`.
    pub fn build_with_ids<F>(
        &self,
        model: &ResolvedModel,
        selection: &TableSelection,
        options: &PayloadOptions,
        mut next_id: F,
    ) -> CreateModelRequest
    where
        F: FnMut() -> Uuid,
    {
        let mut entity_ids: HashMap<String, Uuid> = HashMap::new();
        let mut entities = Vec::new();
        for entity in model.entities.iter().filter(|e| selection.contains(&e.name)) {
            let id = next_id();
            entity_ids.insert(entity.name.clone(), id);
            entities.push(entity_payload(id, entity));
        }

        let kept: Vec<Relationship> = model
            .source_relationships(selection)
            .into_iter()
            .filter(|rel| {
                if !rel.cardinality.is_supported() {
                    debug!(
                        "Skipping relationship {} -> {}: unsupported cardinality",
                        rel.source_entity_name, rel.target_entity_name
                    );
                }
                rel.cardinality.is_supported()
            })
            .collect();

        let relationships: Vec<RelationshipPayload> = kept
            .iter()
            .filter_map(|rel| relationship_payload(rel, &entity_ids))
            .collect();

        // FK flags reflect only the relationships that made it into the payload
        let foreign_keys = ForeignKeySet::from_relationships(&kept);
        for entity in &mut entities {
            for attribute in &mut entity.attributes {
                if foreign_keys.contains(&entity.name, &attribute.name) {
                    attribute
                        .metadata
                        .insert("FK".to_string(), JsonValue::Bool(true));
                }
            }
        }

        info!(
            "Built payload for model {}: {} entities, {} relationships",
            options.model_name,
            entities.len(),
            relationships.len()
        );

        CreateModelRequest {
            model: ModelPayload {
                name: options.model_name.clone(),
                level: ModelLevel::Physical,
                folder_id: options.folder_id.clone(),
                entities,
                relationships,
            },
            progress_status: options.progress_status.clone(),
        }
    }

    /// Build and serialize the payload.
    pub fn export(
        &self,
        model: &ResolvedModel,
        selection: &TableSelection,
        options: &PayloadOptions,
    ) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: self.build(model, selection, options).to_json()?,
            format: "ellie".to_string(),
        })
    }
}

fn entity_payload(id: Uuid, entity: &Entity) -> EntityPayload {
    EntityPayload {
        id,
        name: entity.name.clone(),
        attributes: entity
            .attributes
            .iter()
            .enumerate()
            .map(|(idx, attr)| AttributePayload {
                name: attr.name.clone(),
                metadata: attribute_metadata(attr),
                order: idx + 1,
            })
            .collect(),
    }
}

/// Attribute custom properties verbatim, then the standard keys
fn attribute_metadata(attribute: &Attribute) -> Map<String, JsonValue> {
    let mut meta: Map<String, JsonValue> = attribute
        .custom_properties
        .iter()
        .map(|cp| (cp.property.clone(), cp.value.clone()))
        .collect();

    meta.insert("PK".to_string(), JsonValue::Bool(attribute.primary_key));
    meta.insert("Not null".to_string(), JsonValue::Bool(attribute.required));
    meta.insert("Unique".to_string(), JsonValue::Bool(attribute.unique));
    meta.insert(
        "Data type".to_string(),
        JsonValue::String(attribute.resolve_type(&PAYLOAD_TYPE_PRIORITY).to_string()),
    );
    meta.insert(
        "description".to_string(),
        JsonValue::String(attribute.description.clone()),
    );
    if let Some(default) = &attribute.default {
        meta.insert("Default".to_string(), default.clone());
    }
    if let Some(partitioned_by) = &attribute.partitioned_by {
        meta.insert("Partitioned by".to_string(), partitioned_by.clone());
    }
    meta
}

fn relationship_payload(
    rel: &Relationship,
    entity_ids: &HashMap<String, Uuid>,
) -> Option<RelationshipPayload> {
    let end_type = match rel.cardinality {
        CardinalityKind::OneToOne => EndType::One,
        CardinalityKind::OneToMany { .. } => EndType::Many,
        CardinalityKind::Unsupported => return None,
    };
    Some(RelationshipPayload {
        source_entity: SourceEndpoint {
            id: *entity_ids.get(&rel.source_entity_name)?,
            name: rel.source_entity_name.clone(),
            start_type: EndType::One,
            attribute_names: rel.source_attributes.clone(),
        },
        target_entity: TargetEndpoint {
            id: *entity_ids.get(&rel.target_entity_name)?,
            name: rel.target_entity_name.clone(),
            end_type,
            attribute_names: rel.target_attributes.clone(),
        },
        description: Vec::new(),
    })
}

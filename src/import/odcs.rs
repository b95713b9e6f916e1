//! ODCS parser service for parsing Open Data Contract Standard YAML files.
//!
//! Turns a YAML document into an ordered list of [`Entity`] values. The entity
//! list is read from `schema` (physical exports) or `entities` (logical exports),
//! and each entity's attributes from `properties` or `attributes`. Missing keys
//! degrade to empty collections instead of errors.

use super::odcs_shared::{
    first_present, first_present_array, first_present_string, flag, parse_custom_properties,
    scalar_to_string, yaml_to_json_value,
};
use super::{ImportError, ImportResult};
use crate::models::{Attribute, Entity};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info};

/// Candidate keys for the entity list, in priority order
pub const ENTITY_LIST_KEYS: [&str; 2] = ["schema", "entities"];

/// Candidate keys for an entity's attribute list, in priority order
pub const ATTRIBUTE_LIST_KEYS: [&str; 2] = ["properties", "attributes"];

/// ODCS parser service.
#[derive(Debug, Default)]
pub struct ODCSImporter;

impl ODCSImporter {
    /// Create a new ODCS parser instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::import::odcs::ODCSImporter;
    ///
    /// let importer = ODCSImporter::new();
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Import ODCS YAML content.
    ///
    /// # Arguments
    ///
    /// * `yaml_content` - ODCS YAML content as a string
    ///
    /// # Returns
    ///
    /// An `ImportResult` with the entities in source order, or a `ParseError`
    /// if the text is not valid YAML or its root is not a mapping.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::import::odcs::ODCSImporter;
    ///
    /// let yaml = r#"
    /// schema:
    ///   - name: users
    ///     properties:
    ///       - name: id
    ///         logicalType: integer
    ///         primaryKey: true
    /// "#;
    /// let result = ODCSImporter::new().import(yaml).unwrap();
    /// assert_eq!(result.entities.len(), 1);
    /// assert!(result.entities[0].attributes[0].primary_key);
    /// ```
    pub fn import(&self, yaml_content: &str) -> Result<ImportResult, ImportError> {
        let data: serde_yaml::Value = serde_yaml::from_str(yaml_content)
            .map_err(|e| ImportError::ParseError(format!("Error parsing YAML: {}", e)))?;
        let json_data =
            yaml_to_json_value(&data).map_err(|e| ImportError::ParseError(e.to_string()))?;
        self.import_value(&json_data)
    }

    /// Import from an already parsed document.
    pub fn import_value(&self, document: &JsonValue) -> Result<ImportResult, ImportError> {
        let root = match document {
            JsonValue::Object(obj) => obj,
            JsonValue::Null => {
                return Err(ImportError::ParseError("Empty YAML content".to_string()));
            }
            _ => {
                return Err(ImportError::ParseError(
                    "YAML root must be a mapping".to_string(),
                ));
            }
        };

        let mut skipped = 0usize;
        let mut entities = Vec::new();
        for item in first_present_array(root, &ENTITY_LIST_KEYS) {
            match item.as_object() {
                Some(obj) => entities.push(self.parse_entity(obj, &mut skipped)),
                None => {
                    debug!("Skipping non-mapping entity entry: {}", item);
                    skipped += 1;
                }
            }
        }

        info!(
            "Imported {} entities ({} attributes)",
            entities.len(),
            entities.iter().map(|e| e.attributes.len()).sum::<usize>()
        );

        Ok(ImportResult { entities, skipped })
    }

    fn parse_entity(&self, obj: &Map<String, JsonValue>, skipped: &mut usize) -> Entity {
        let name = obj.get("name").and_then(scalar_to_string).unwrap_or_default();

        let mut attributes = Vec::new();
        for item in first_present_array(obj, &ATTRIBUTE_LIST_KEYS) {
            match item.as_object() {
                Some(attr) => attributes.push(parse_attribute(attr)),
                None => {
                    debug!("Skipping non-mapping attribute in entity {}", name);
                    *skipped += 1;
                }
            }
        }

        Entity {
            name,
            attributes,
            custom_properties: parse_custom_properties(obj.get("customProperties")),
        }
    }
}

fn parse_attribute(obj: &Map<String, JsonValue>) -> Attribute {
    Attribute {
        name: obj.get("name").and_then(scalar_to_string).unwrap_or_default(),
        physical_type: first_present_string(obj, &["physicalType"]),
        logical_type: first_present_string(obj, &["logicalType"]),
        plain_type: first_present_string(obj, &["type"]),
        primary_key: flag(obj, "primaryKey"),
        required: flag(obj, "required"),
        unique: flag(obj, "unique"),
        description: first_present(obj, &["description"])
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        default: obj.get("default").cloned(),
        partitioned_by: obj.get("partitionedBy").cloned(),
        custom_properties: parse_custom_properties(obj.get("customProperties")),
    }
}

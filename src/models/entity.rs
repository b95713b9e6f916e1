//! Entity and attribute models for the SDK

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Custom property attached to an entity or attribute (ODCS: customProperties)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomProperty {
    /// Property name
    pub property: String,
    /// Property value, kept as parsed
    #[serde(default)]
    pub value: JsonValue,
}

/// Attribute type fields, in the spelling used by ODCS documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeField {
    /// `physicalType`
    Physical,
    /// `logicalType`
    Logical,
    /// `type`
    Plain,
}

/// Fallback when none of the requested type fields is present
pub const DEFAULT_DATA_TYPE: &str = "string";

/// Attribute model representing a column/field of an entity
///
/// The three type fields are kept separately because each output resolves
/// them with its own priority order (see [`Attribute::resolve_type`]).
///
/// # Example
///
/// ```rust
/// use ellie_importer::models::{Attribute, TypeField};
///
/// let mut attr = Attribute::new("id");
/// attr.logical_type = Some("integer".to_string());
/// attr.physical_type = Some("bigint".to_string());
///
/// assert_eq!(attr.resolve_type(&[TypeField::Physical, TypeField::Logical]), "bigint");
/// assert_eq!(attr.resolve_type(&[TypeField::Plain]), "string");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// ODCS `physicalType`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_type: Option<String>,
    /// ODCS `logicalType`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_type: Option<String>,
    /// Plain `type` field
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub plain_type: Option<String>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub description: String,
    /// `default` value; `Some(Null)` when the key is present with a null value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    /// `partitionedBy` value, same presence semantics as `default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_by: Option<JsonValue>,
    #[serde(default)]
    pub custom_properties: Vec<CustomProperty>,
}

impl Attribute {
    /// Create an attribute with no type information and all flags off
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Resolve the attribute type from the given fields in priority order,
    /// falling back to [`DEFAULT_DATA_TYPE`]
    pub fn resolve_type(&self, priority: &[TypeField]) -> &str {
        priority
            .iter()
            .find_map(|field| match field {
                TypeField::Physical => self.physical_type.as_deref(),
                TypeField::Logical => self.logical_type.as_deref(),
                TypeField::Plain => self.plain_type.as_deref(),
            })
            .unwrap_or(DEFAULT_DATA_TYPE)
    }

    /// Constraint flags in display order: PK, R (required), U (unique)
    pub fn constraint_flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.primary_key {
            flags.push("PK");
        }
        if self.required {
            flags.push("R");
        }
        if self.unique {
            flags.push("U");
        }
        flags
    }
}

/// Entity model representing a table/record type of the source schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity name; identity within a resolved model
    pub name: String,
    /// Attributes in source order
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub custom_properties: Vec<CustomProperty>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper used by tests and callers assembling entities by hand
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Values of every custom property with the given name
    pub fn custom_property_values<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a JsonValue> + 'a {
        self.custom_properties
            .iter()
            .filter(move |cp| cp.property == property)
            .map(|cp| &cp.value)
    }
}

//! Relationship validation functionality
//!
//! Lists the relationship declarations that the payload will not contain:
//! declarations whose endpoint entities are not exported, and declarations
//! with a cardinality the modeling service does not support. Neither is an
//! error for the transformation itself.

use crate::model::{RelationshipExtractor, ResolvedModel, TableSelection};
use crate::models::{EndpointCardinality, RelationshipDeclaration};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of relationship validation.
#[derive(Debug, Serialize, Deserialize)]
#[must_use = "validation results should be checked for dropped relationships"]
pub struct RelationshipValidationResult {
    /// Declarations referencing an entity that is not exported
    pub dangling: Vec<DanglingRelationship>,
    /// Declarations kept in diagrams but dropped from the payload
    pub unsupported: Vec<UnsupportedRelationship>,
}

impl RelationshipValidationResult {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.unsupported.is_empty()
    }
}

/// Declaration with a missing endpoint entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanglingRelationship {
    pub from: String,
    pub to: String,
    /// Endpoint entity names that are not exported
    pub missing_entities: Vec<String>,
}

/// Declaration whose cardinality is neither one-to-one nor one-to-many
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedRelationship {
    pub from: String,
    pub to: String,
    pub cardinality_from: EndpointCardinality,
    pub cardinality_to: EndpointCardinality,
}

/// Relationship validator
#[derive(Default)]
pub struct RelationshipValidator;

impl RelationshipValidator {
    /// Create a new relationship validator
    pub fn new() -> Self {
        Self
    }

    /// Check every source declaration against the selected entities
    pub fn validate(
        &self,
        model: &ResolvedModel,
        selection: &TableSelection,
    ) -> RelationshipValidationResult {
        let selected = model.selected_entities(selection);
        let available: HashSet<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        let declarations = RelationshipExtractor::new().declarations(&model.source);

        let mut result = RelationshipValidationResult {
            dangling: Vec::new(),
            unsupported: Vec::new(),
        };
        for declaration in &declarations {
            let missing = missing_entities(declaration, &available);
            if !missing.is_empty() {
                result.dangling.push(DanglingRelationship {
                    from: declaration.from.clone(),
                    to: declaration.to.clone(),
                    missing_entities: missing,
                });
            } else if !declaration.cardinality().is_supported() {
                result.unsupported.push(UnsupportedRelationship {
                    from: declaration.from.clone(),
                    to: declaration.to.clone(),
                    cardinality_from: declaration.cardinality_from.clone(),
                    cardinality_to: declaration.cardinality_to.clone(),
                });
            }
        }
        result
    }
}

fn missing_entities(
    declaration: &RelationshipDeclaration,
    available: &HashSet<&str>,
) -> Vec<String> {
    let mut missing = Vec::new();
    for endpoint in [declaration.source(), declaration.target()] {
        if !available.contains(endpoint.entity.as_str()) && !missing.contains(&endpoint.entity) {
            missing.push(endpoint.entity);
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelLoader;

    const YAML: &str = r#"
schema:
  - name: Orders
    customProperties:
      - property: logicalRelationships
        value:
          - from: (Orders.customer_id)
            to: (Customers.id)
            cardinalityFrom: zeroOrMany
            cardinalityTo: one
          - from: (Orders.id)
            to: (Products.id)
            cardinalityFrom: zeroOrMany
            cardinalityTo: zeroOrMany
          - from: (Orders.id)
            to: (Ghost.id)
            cardinalityFrom: one
            cardinalityTo: one
  - name: Customers
  - name: Products
"#;

    #[test]
    fn test_reports_dangling_and_unsupported() {
        let model = ModelLoader::default().load(YAML).unwrap();
        let result = RelationshipValidator::new().validate(&model, &TableSelection::All);

        assert_eq!(result.dangling.len(), 1);
        assert_eq!(result.dangling[0].missing_entities, vec!["Ghost"]);
        assert_eq!(result.unsupported.len(), 1);
        assert_eq!(result.unsupported[0].to, "(Products.id)");
        assert!(!result.is_clean());
    }

    #[test]
    fn test_selection_makes_relationships_dangling() {
        let model = ModelLoader::default().load(YAML).unwrap();
        let result =
            RelationshipValidator::new().validate(&model, &TableSelection::only(["Orders"]));

        assert_eq!(result.dangling.len(), 3);
        assert!(result.unsupported.is_empty());
    }
}

//! Mermaid exporter for entity-relationship diagrams.
//!
//! Each entity becomes a block listing `<type> <name>[_<flags>]` lines, where
//! flags are the underscore-joined subset of PK, R and U. Relationships become
//! lines with crow's feet markers; cardinalities the modeling service rejects
//! are still drawn.

use super::ExportResult;
use crate::model::ResolvedModel;
use crate::models::{Attribute, EndpointCardinality, Entity, Relationship, TypeField};

/// Type fields used for attribute types in the ER notation
pub const ER_TYPE_PRIORITY: [TypeField; 2] = [TypeField::Logical, TypeField::Plain];

/// Exporter for Mermaid `erDiagram` text
#[derive(Debug, Default)]
pub struct MermaidExporter;

impl MermaidExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export every resolved entity and the relationships between them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::export::MermaidExporter;
    /// use ellie_importer::model::ModelLoader;
    ///
    /// let model = ModelLoader::default()
    ///     .load("schema:\n  - name: users\n    properties:\n      - name: id\n        primaryKey: true\n")
    ///     .unwrap();
    /// let result = MermaidExporter::new().export(&model);
    /// assert!(result.content.contains("string id_PK"));
    /// ```
    pub fn export(&self, model: &ResolvedModel) -> ExportResult {
        ExportResult {
            content: self.render(&model.entities, &model.relationships()),
            format: "mermaid".to_string(),
        }
    }

    /// Render entities and relationships as an `erDiagram`
    pub fn render(&self, entities: &[Entity], relationships: &[Relationship]) -> String {
        let mut diagram = String::from("erDiagram\n");

        for entity in entities {
            diagram.push_str(&format!("    {} {{\n", identifier(&entity.name)));
            for attribute in &entity.attributes {
                diagram.push_str(&format!("        {}\n", attribute_line(attribute)));
            }
            diagram.push_str("    }\n");
        }

        for rel in relationships {
            diagram.push_str(&format!(
                "    {} {}--{} {} : \"{}\"\n",
                identifier(&rel.source_entity_name),
                marker(&rel.cardinality_from),
                marker(&rel.cardinality_to),
                identifier(&rel.target_entity_name),
                label(&rel.label)
            ));
        }

        diagram
    }
}

fn attribute_line(attribute: &Attribute) -> String {
    let flags = attribute.constraint_flags();
    let name = identifier(&attribute.name);
    let name = if flags.is_empty() {
        name
    } else {
        format!("{}_{}", name, flags.join("_"))
    };
    format!(
        "{} {}",
        data_type(attribute.resolve_type(&ER_TYPE_PRIORITY)),
        name
    )
}

/// Crow's feet marker for one side of a relationship line; both sides use the same mapping
pub fn marker(cardinality: &EndpointCardinality) -> &'static str {
    match cardinality {
        EndpointCardinality::One => "||",
        EndpointCardinality::ZeroOrMany => "o{",
        EndpointCardinality::ZeroOrOne => "o|",
        EndpointCardinality::OneOrMany => "|{",
        EndpointCardinality::Other(_) => "--",
    }
}

/// Entity and attribute names: alphanumerics, `_` and `-` only
fn identifier(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

/// Attribute types additionally keep brackets and parentheses, e.g. `varchar(255)`
fn data_type(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "_-()[]".contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    match sanitized.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => sanitized,
        _ => format!("_{}", sanitized),
    }
}

fn label(text: &str) -> String {
    text.replace('"', "'").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardinalityKind, TypeField};

    fn relationship(from: EndpointCardinality, to: EndpointCardinality) -> Relationship {
        Relationship {
            source_entity_name: "Orders".to_string(),
            source_attributes: vec!["customer_id".to_string()],
            target_entity_name: "Customers".to_string(),
            target_attributes: vec!["id".to_string()],
            cardinality: CardinalityKind::classify(&from, &to),
            cardinality_from: from,
            cardinality_to: to,
            label: "placed by".to_string(),
        }
    }

    #[test]
    fn test_attribute_flags_and_types() {
        let mut id = Attribute::new("id");
        id.primary_key = true;
        id.required = true;
        id.physical_type = Some("bigint".to_string());
        let mut email = Attribute::new("email");
        email.plain_type = Some("text".to_string());
        email.unique = true;
        let entity = Entity::new("Customers").with_attributes(vec![id, email]);

        let diagram = MermaidExporter::new().render(&[entity], &[]);
        assert_eq!(
            diagram,
            "erDiagram\n    Customers {\n        string id_PK_R\n        text email_U\n    }\n"
        );
        assert_eq!(ER_TYPE_PRIORITY, [TypeField::Logical, TypeField::Plain]);
    }

    #[test]
    fn test_relationship_markers() {
        let diagram = MermaidExporter::new().render(
            &[],
            &[relationship(
                EndpointCardinality::ZeroOrMany,
                EndpointCardinality::One,
            )],
        );
        assert!(diagram.contains("    Orders o{--|| Customers : \"placed by\"\n"));
    }

    #[test]
    fn test_unsupported_cardinality_still_rendered() {
        let diagram = MermaidExporter::new().render(
            &[],
            &[relationship(
                EndpointCardinality::OneOrMany,
                EndpointCardinality::ZeroOrMany,
            )],
        );
        assert!(diagram.contains("Orders |{--o{ Customers"));

        let diagram = MermaidExporter::new().render(
            &[],
            &[relationship(
                EndpointCardinality::Other(Some("many".to_string())),
                EndpointCardinality::ZeroOrOne,
            )],
        );
        assert!(diagram.contains("Orders ----o| Customers"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let mut attr = Attribute::new("unit price");
        attr.logical_type = Some("decimal(10,2)".to_string());
        let entity = Entity::new("order-lines v2").with_attributes(vec![attr]);
        let mut rel = relationship(EndpointCardinality::One, EndpointCardinality::One);
        rel.label = "says \"hi\"\nthere".to_string();

        let diagram = MermaidExporter::new().render(&[entity], &[rel]);
        assert!(diagram.contains("    order-lines_v2 {\n"));
        assert!(diagram.contains("        decimal(10_2) unit_price\n"));
        assert!(diagram.contains(": \"says 'hi' there\""));
    }
}

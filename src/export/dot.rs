//! Graphviz DOT exporter with record-shaped entity nodes.
//!
//! Only selected entities are drawn, and edges only between selected entities.
//! Foreign key flags are derived for display from the drawn relationships.

use super::ExportResult;
use crate::model::{ForeignKeySet, ResolvedModel, TableSelection};
use crate::models::{Attribute, Entity, Relationship, TypeField};

/// Type fields used for attribute types in graph nodes
pub const GRAPH_TYPE_PRIORITY: [TypeField; 3] =
    [TypeField::Physical, TypeField::Logical, TypeField::Plain];

/// DOT rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotOptions {
    /// Show every flag plus the description instead of name/type/PK/FK only
    pub full_metadata: bool,
}

/// Exporter for Graphviz DOT text
#[derive(Debug, Default)]
pub struct DotExporter {
    options: DotOptions,
}

impl DotExporter {
    pub fn new(options: DotOptions) -> Self {
        Self { options }
    }

    /// Export the selected entities of a resolved model.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::export::{DotExporter, DotOptions};
    /// use ellie_importer::model::{ModelLoader, TableSelection};
    ///
    /// let model = ModelLoader::default()
    ///     .load("schema:\n  - name: users\n    properties:\n      - name: id\n        primaryKey: true\n")
    ///     .unwrap();
    /// let result = DotExporter::default().export(&model, &TableSelection::All);
    /// assert!(result.content.contains(r#""users" [label="{users|id (PK): string\l}"]"#));
    /// ```
    pub fn export(&self, model: &ResolvedModel, selection: &TableSelection) -> ExportResult {
        let entities = model.selected_entities(selection);
        let relationships = model.selected_relationships(selection);
        ExportResult {
            content: self.render(&entities, &relationships),
            format: "dot".to_string(),
        }
    }

    /// Render entities and relationships; relationships are expected to be
    /// resolved against `entities` already.
    pub fn render(&self, entities: &[Entity], relationships: &[Relationship]) -> String {
        let foreign_keys = ForeignKeySet::from_relationships(relationships);

        let mut dot = String::from("digraph G {\n  node [shape=record,fontname=\"Arial\"];\n");

        for entity in entities {
            let fields: Vec<String> = entity
                .attributes
                .iter()
                .map(|attr| {
                    let is_fk = foreign_keys.contains(&entity.name, &attr.name);
                    self.field(attr, is_fk)
                })
                .collect();
            let label = format!(
                "{{{}|{}\\l}}",
                escape_record(&entity.name),
                fields.join("\\l")
            );
            dot.push_str(&format!(
                "  {} [label=\"{}\"]\n",
                quoted_id(&entity.name),
                label
            ));
        }

        for rel in relationships {
            dot.push_str(&format!(
                "  {} -> {} [label=\"{}\"]\n",
                quoted_id(&rel.source_entity_name),
                quoted_id(&rel.target_entity_name),
                escape_string(&rel.label)
            ));
        }

        dot.push_str("}\n");
        dot
    }

    fn field(&self, attribute: &Attribute, is_fk: bool) -> String {
        let mut flags = attribute.constraint_flags();
        if is_fk {
            flags.push("FK");
        }
        if !self.options.full_metadata {
            flags.retain(|f| *f == "PK" || *f == "FK");
        }

        let flag_str = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(","))
        };
        let mut field = format!(
            "{}{}: {}",
            attribute.name,
            flag_str,
            attribute.resolve_type(&GRAPH_TYPE_PRIORITY)
        );
        if self.options.full_metadata && !attribute.description.is_empty() {
            field.push_str(&format!(" // {}", attribute.description));
        }
        escape_record(&field)
    }
}

/// Node identifiers are always quoted so any entity name is a valid ID
fn quoted_id(name: &str) -> String {
    format!("\"{}\"", escape_string(name))
}

/// Escape text for a double-quoted DOT string
fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\r' | '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text inside a record label, where braces, bars and angle brackets are syntax
fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' | '}' | '|' | '<' | '>' | '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\r' | '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardinalityKind, EndpointCardinality};

    fn orders_and_customers() -> (Vec<Entity>, Vec<Relationship>) {
        let mut id = Attribute::new("id");
        id.primary_key = true;
        id.required = true;
        id.physical_type = Some("bigint".to_string());
        let mut customer_id = Attribute::new("customer_id");
        customer_id.description = "buyer".to_string();
        let orders = Entity::new("Orders").with_attributes(vec![id.clone(), customer_id]);
        let customers = Entity::new("Customers").with_attributes(vec![id]);

        let rel = Relationship {
            source_entity_name: "Orders".to_string(),
            source_attributes: vec!["customer_id".to_string()],
            target_entity_name: "Customers".to_string(),
            target_attributes: vec!["id".to_string()],
            cardinality_from: EndpointCardinality::ZeroOrMany,
            cardinality_to: EndpointCardinality::One,
            cardinality: CardinalityKind::classify(
                &EndpointCardinality::ZeroOrMany,
                &EndpointCardinality::One,
            ),
            label: String::new(),
        };
        (vec![orders, customers], vec![rel])
    }

    #[test]
    fn test_compact_fields() {
        let (entities, relationships) = orders_and_customers();
        let dot = DotExporter::default().render(&entities, &relationships);

        assert!(dot.starts_with("digraph G {\n  node [shape=record,fontname=\"Arial\"];\n"));
        assert!(dot.contains(
            "  \"Orders\" [label=\"{Orders|id (PK): bigint\\lcustomer_id: string\\l}\"]\n"
        ));
        assert!(dot.contains("  \"Customers\" [label=\"{Customers|id (PK,FK): bigint\\l}\"]\n"));
        assert!(dot.contains("  \"Orders\" -> \"Customers\" [label=\"\"]\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_full_metadata_fields() {
        let (entities, relationships) = orders_and_customers();
        let dot = DotExporter::new(DotOptions {
            full_metadata: true,
        })
        .render(&entities, &relationships);

        assert!(dot.contains("{Orders|id (PK,R): bigint\\lcustomer_id: string // buyer\\l}"));
        assert!(dot.contains("{Customers|id (PK,R,FK): bigint\\l}"));
    }

    #[test]
    fn test_entity_without_attributes() {
        let dot = DotExporter::default().render(&[Entity::new("Empty")], &[]);
        assert!(dot.contains("  \"Empty\" [label=\"{Empty|\\l}\"]\n"));
    }

    #[test]
    fn test_record_syntax_is_escaped() {
        let mut attr = Attribute::new("tags");
        attr.logical_type = Some("map<string|int>".to_string());
        let entity = Entity::new("my \"odd\" {table}").with_attributes(vec![attr]);

        let dot = DotExporter::default().render(&[entity], &[]);
        assert!(dot.contains("  \"my \\\"odd\\\" {table}\" [label="));
        assert!(dot.contains("{my \\\"odd\\\" \\{table\\}|tags: map\\<string\\|int\\>\\l}"));
    }
}

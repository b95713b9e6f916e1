//! End-to-end pipeline tests: document -> resolved model -> diagrams and payload

use ellie_importer::export::ellie::{EndType, PayloadOptions};
use ellie_importer::export::{DotExporter, DotOptions, EllieExporter, MermaidExporter};
use ellie_importer::model::{ModelLoader, TableSelection};
use ellie_importer::models::DuplicatePolicy;
use ellie_importer::validation::RelationshipValidator;
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

const ORDERS_CUSTOMERS: &str = r#"
schema:
  - name: Orders
    properties:
      - name: id
        physicalType: bigint
        primaryKey: true
      - name: customer_id
        logicalType: integer
    customProperties:
      - property: logicalRelationships
        value:
          - from: (Orders.customer_id)
            to: (Customers.id)
            cardinalityFrom: zeroOrMany
            cardinalityTo: one
  - name: Customers
    properties:
      - name: id
        primaryKey: true
"#;

const WITH_MANY_TO_MANY: &str = r#"
schema:
  - name: Students
    properties:
      - name: id
    customProperties:
      - property: logicalRelationships
        value:
          - from: (Students.id)
            to: (Courses.id)
            cardinalityFrom: zeroOrMany
            cardinalityTo: zeroOrMany
            label: enrolled in
  - name: Courses
    properties:
      - name: id
"#;

fn options() -> PayloadOptions {
    PayloadOptions {
        model_name: "Sample Model Name".to_string(),
        folder_id: json!(12),
        progress_status: "Work in Progress".to_string(),
    }
}

fn sequential_ids() -> impl FnMut() -> Uuid {
    let mut next = 0u128;
    move || {
        next += 1;
        Uuid::from_u128(next)
    }
}

mod payload_tests {
    use super::*;

    #[test]
    fn test_orders_customers_payload() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let request = EllieExporter::new().build_with_ids(
            &model,
            &TableSelection::All,
            &options(),
            sequential_ids(),
        );

        let payload = &request.model;
        assert_eq!(payload.name, "Sample Model Name");
        assert_eq!(payload.folder_id, json!(12));
        assert_eq!(payload.entities.len(), 2);
        assert_eq!(payload.relationships.len(), 1);

        let rel = &payload.relationships[0];
        assert_eq!(rel.source_entity.name, "Orders");
        assert_eq!(rel.source_entity.id, Uuid::from_u128(1));
        assert_eq!(rel.source_entity.start_type, EndType::One);
        assert_eq!(rel.source_entity.attribute_names, vec!["customer_id"]);
        assert_eq!(rel.target_entity.name, "Customers");
        assert_eq!(rel.target_entity.id, Uuid::from_u128(2));
        assert_eq!(rel.target_entity.end_type, EndType::Many);
        assert_eq!(rel.target_entity.attribute_names, vec!["id"]);

        // FK lands on the attribute named by `to`
        let customers_id = request.attribute("Customers", "id").unwrap();
        assert_eq!(customers_id.metadata.get("FK"), Some(&json!(true)));
        let customer_id = request.attribute("Orders", "customer_id").unwrap();
        assert_eq!(customer_id.metadata.get("FK"), None);
    }

    #[test]
    fn test_payload_json_shape() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let request = EllieExporter::new().build_with_ids(
            &model,
            &TableSelection::All,
            &options(),
            sequential_ids(),
        );
        let body: JsonValue = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(body["model"]["level"], json!("physical"));
        assert_eq!(body["model"]["folderId"], json!(12));
        assert!(body["model"].get("progressStatus").is_none());

        let id = &body["model"]["entities"][0]["attributes"][0];
        assert_eq!(id["order"], json!(1));
        assert_eq!(id["metadata"]["Data type"], json!("bigint"));
        assert_eq!(id["metadata"]["PK"], json!(true));
        assert_eq!(id["metadata"]["Not null"], json!(false));

        let customer_id = &body["model"]["entities"][0]["attributes"][1];
        assert_eq!(customer_id["order"], json!(2));
        assert_eq!(customer_id["metadata"]["Data type"], json!("integer"));

        let rel = &body["model"]["relationships"][0];
        assert_eq!(rel["sourceEntity"]["startType"], json!("one"));
        assert_eq!(rel["targetEntity"]["endType"], json!("many"));
        assert_eq!(rel["description"], json!([]));
    }

    #[test]
    fn test_unsupported_cardinality_excluded_from_payload() {
        let model = ModelLoader::default().load(WITH_MANY_TO_MANY).unwrap();
        let request = EllieExporter::new().build(&model, &TableSelection::All, &options());

        assert!(request.model.relationships.is_empty());
        for entity in &request.model.entities {
            for attribute in &entity.attributes {
                assert!(attribute.metadata.get("FK").is_none());
            }
        }

        let report = RelationshipValidator::new().validate(&model, &TableSelection::All);
        assert_eq!(report.unsupported.len(), 1);
    }

    #[test]
    fn test_selection_drops_dangling_relationship() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let selection = TableSelection::only(["Orders"]);
        let request = EllieExporter::new().build(&model, &selection, &options());

        assert_eq!(request.model.entities.len(), 1);
        assert!(request.model.relationships.is_empty());
    }

    #[test]
    fn test_fresh_ids_per_build() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let exporter = EllieExporter::new();
        let first = exporter.build(&model, &TableSelection::All, &options());
        let second = exporter.build(&model, &TableSelection::All, &options());

        assert_ne!(first.model.entities[0].id, second.model.entities[0].id);
        assert_ne!(first.model.entities[0].id, first.model.entities[1].id);
    }
}

mod diagram_tests {
    use super::*;

    #[test]
    fn test_orders_customers_mermaid() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let diagram = MermaidExporter::new().export(&model).content;

        assert!(diagram.starts_with("erDiagram\n"));
        assert!(diagram.contains("    Orders {\n"));
        assert!(diagram.contains("        string id_PK\n"));
        assert!(diagram.contains("        integer customer_id\n"));
        assert!(diagram.contains("    Orders o{--|| Customers : \"\"\n"));
    }

    #[test]
    fn test_unsupported_cardinality_still_rendered() {
        let model = ModelLoader::default().load(WITH_MANY_TO_MANY).unwrap();

        let mermaid = MermaidExporter::new().export(&model).content;
        assert!(mermaid.contains("    Students o{--o{ Courses : \"enrolled in\"\n"));

        let dot = DotExporter::default()
            .export(&model, &TableSelection::All)
            .content;
        assert!(dot.contains("  \"Students\" -> \"Courses\" [label=\"enrolled in\"]\n"));
    }

    #[test]
    fn test_dot_selection_omits_dangling_edge() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let dot = DotExporter::default()
            .export(&model, &TableSelection::only(["Orders"]))
            .content;

        assert!(dot.contains("\"Orders\""));
        assert!(!dot.contains("Customers"));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn test_dot_marks_display_foreign_keys() {
        let model = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let compact = DotExporter::default()
            .export(&model, &TableSelection::All)
            .content;
        assert!(compact.contains("{Customers|id (PK,FK): string\\l}"));

        let full = DotExporter::new(DotOptions {
            full_metadata: true,
        })
        .export(&model, &TableSelection::All)
        .content;
        assert!(full.contains("{Orders|id (PK): bigint\\lcustomer_id: integer\\l}"));
    }

    #[test]
    fn test_diagrams_are_deterministic() {
        let first = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();
        let second = ModelLoader::default().load(ORDERS_CUSTOMERS).unwrap();

        assert_eq!(
            MermaidExporter::new().export(&first),
            MermaidExporter::new().export(&second)
        );
        assert_eq!(
            DotExporter::default().export(&first, &TableSelection::All),
            DotExporter::default().export(&second, &TableSelection::All)
        );
    }
}

mod duplicate_tests {
    use super::*;

    const DUPLICATED: &str = r#"
schema:
  - name: Users
    properties:
      - name: id
        primaryKey: true
  - name: Users
    properties:
      - name: id
        unique: true
      - name: email
"#;

    #[test]
    fn test_policies_through_pipeline() {
        let ignore = ModelLoader::new(DuplicatePolicy::IgnoreDuplicates)
            .load(DUPLICATED)
            .unwrap();
        assert_eq!(ignore.entity_names(), vec!["Users"]);
        assert_eq!(ignore.entities[0].attributes.len(), 1);

        let postfix = ModelLoader::new(DuplicatePolicy::AddPostfix)
            .load(DUPLICATED)
            .unwrap();
        assert_eq!(postfix.entity_names(), vec!["Users", "Users_2"]);

        let combined = ModelLoader::new(DuplicatePolicy::CombineAttributes)
            .load(DUPLICATED)
            .unwrap();
        assert_eq!(combined.entity_names(), vec!["Users"]);
        let users = &combined.entities[0];
        assert_eq!(users.attributes.len(), 2);
        assert!(users.attributes[0].primary_key);
        assert!(!users.attributes[0].unique);
    }

    #[test]
    fn test_policy_is_noop_without_collisions() {
        let outputs: Vec<_> = DuplicatePolicy::ALL
            .iter()
            .map(|policy| {
                ModelLoader::new(*policy)
                    .load(ORDERS_CUSTOMERS)
                    .unwrap()
                    .entities
            })
            .collect();
        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(outputs[1], outputs[2]);
    }
}

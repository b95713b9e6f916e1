//! Shared utilities for ODCS parsing.
//!
//! Source documents come from exports that use either "logical" or "physical"
//! vocabulary, so most lookups accept several candidate keys. Lookups never fail:
//! absent, null or empty values simply count as missing.

use crate::models::{CustomProperty, EndpointCardinality, RelationshipDeclaration};
use anyhow::Result;
use serde_json::{Map, Value as JsonValue};

/// Convert YAML Value to JSON Value for easier manipulation.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<JsonValue> {
    use anyhow::Context;
    // Convert YAML to JSON via serialization
    let json_str = serde_json::to_string(yaml).context("Failed to convert YAML to JSON")?;
    serde_json::from_str(&json_str).context("Failed to parse JSON")
}

/// Whether a value counts as present: not null, not `false`, not zero,
/// not an empty string, list or mapping.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

/// Return the value of the first candidate key that is present, trying keys in order.
pub fn first_present<'a>(
    obj: &'a Map<String, JsonValue>,
    keys: &[&str],
) -> Option<&'a JsonValue> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| is_truthy(value))
}

/// Same as [`first_present`] but only yields sequences; anything else is an empty slice.
pub fn first_present_array<'a>(
    obj: &'a Map<String, JsonValue>,
    keys: &[&str],
) -> &'a [JsonValue] {
    first_present(obj, keys)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Render a scalar as a string; strings are returned verbatim.
pub fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String value of the first present candidate key.
pub fn first_present_string(obj: &Map<String, JsonValue>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys).and_then(scalar_to_string)
}

/// YAML 1.1 spellings of `false` that YAML 1.2 parsers leave as strings
const FALSE_WORDS: [&str; 3] = ["no", "off", "false"];

/// Boolean flag with truthiness semantics; a missing key is `false`.
///
/// `no`, `off` and `false` strings (any case) are `false`.
pub fn flag(obj: &Map<String, JsonValue>, key: &str) -> bool {
    match obj.get(key) {
        Some(JsonValue::String(s)) => {
            !s.is_empty() && !FALSE_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w))
        }
        Some(value) => is_truthy(value),
        None => false,
    }
}

/// Parse a `customProperties` list; entries that are not mappings are skipped.
pub fn parse_custom_properties(value: Option<&JsonValue>) -> Vec<CustomProperty> {
    let Some(items) = value.and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|obj| CustomProperty {
            property: obj
                .get("property")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            value: obj.get("value").cloned().unwrap_or(JsonValue::Null),
        })
        .collect()
}

/// Parse the value of a `logicalRelationships` custom property.
///
/// Each mapping element becomes a declaration; missing fields default to empty
/// strings and unrecognised cardinalities are kept as [`EndpointCardinality::Other`].
pub fn parse_relationship_declarations(value: &JsonValue) -> Vec<RelationshipDeclaration> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|obj| {
            let text = |key: &str| obj.get(key).and_then(scalar_to_string).unwrap_or_default();
            RelationshipDeclaration {
                from: text("from"),
                to: text("to"),
                cardinality_from: EndpointCardinality::parse(
                    obj.get("cardinalityFrom").and_then(|v| v.as_str()),
                ),
                cardinality_to: EndpointCardinality::parse(
                    obj.get("cardinalityTo").and_then(|v| v.as_str()),
                ),
                label: text("label"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_present_skips_missing_and_empty() {
        let value = json!({"schema": [], "entities": [{"name": "a"}]});
        let obj = value.as_object().unwrap();

        let found = first_present(obj, &["schema", "entities"]).unwrap();
        assert_eq!(found, &json!([{"name": "a"}]));
        assert!(first_present(obj, &["models"]).is_none());
        assert!(first_present_array(obj, &["models"]).is_empty());
    }

    #[test]
    fn test_first_present_prefers_earlier_key() {
        let value = json!({"properties": [1], "attributes": [2]});
        let obj = value.as_object().unwrap();
        assert_eq!(
            first_present_array(obj, &["properties", "attributes"]),
            &[json!(1)]
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!(1)));
    }

    #[test]
    fn test_flag_reads_yaml11_false_words() {
        let value = json!({
            "a": "no",
            "b": "OFF",
            "c": "False",
            "d": "yes",
            "e": true,
            "f": " ",
            "g": 1
        });
        let obj = value.as_object().unwrap();
        assert!(!flag(obj, "a"));
        assert!(!flag(obj, "b"));
        assert!(!flag(obj, "c"));
        assert!(flag(obj, "d"));
        assert!(flag(obj, "e"));
        assert!(flag(obj, "f"));
        assert!(flag(obj, "g"));
        assert!(!flag(obj, "missing"));
    }

    #[test]
    fn test_parse_custom_properties_skips_non_mappings() {
        let value = json!([{"property": "owner", "value": "team-a"}, "junk", {"value": 3}]);
        let props = parse_custom_properties(Some(&value));
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].property, "owner");
        assert_eq!(props[0].value, json!("team-a"));
        assert_eq!(props[1].property, "");
    }

    #[test]
    fn test_parse_relationship_declarations_defaults() {
        let value = json!([{"from": "(A.x)", "cardinalityFrom": "one"}]);
        let decls = parse_relationship_declarations(&value);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].from, "(A.x)");
        assert_eq!(decls[0].to, "");
        assert_eq!(decls[0].cardinality_from, EndpointCardinality::One);
        assert_eq!(decls[0].cardinality_to, EndpointCardinality::Other(None));
        assert_eq!(decls[0].label, "");
    }
}

//! Duplicate entity handling
//!
//! Applies a [`DuplicatePolicy`] to entities in source order. The output is
//! ordered by first appearance and, for every policy, downstream code matches
//! relationship endpoints against the output names.

use crate::models::{DuplicatePolicy, Entity};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolves entities sharing a name according to a policy
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateResolver {
    policy: DuplicatePolicy,
}

impl DuplicateResolver {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Resolve duplicates, returning a fresh list; the input is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::model::DuplicateResolver;
    /// use ellie_importer::models::{DuplicatePolicy, Entity};
    ///
    /// let entities = vec![Entity::new("a"), Entity::new("a"), Entity::new("a")];
    /// let resolved = DuplicateResolver::new(DuplicatePolicy::AddPostfix).resolve(&entities);
    /// let names: Vec<_> = resolved.iter().map(|e| e.name.as_str()).collect();
    /// assert_eq!(names, vec!["a", "a_2", "a_3"]);
    /// ```
    pub fn resolve(&self, entities: &[Entity]) -> Vec<Entity> {
        match self.policy {
            DuplicatePolicy::IgnoreDuplicates => ignore_duplicates(entities),
            DuplicatePolicy::AddPostfix => add_postfix(entities),
            DuplicatePolicy::CombineAttributes => combine_attributes(entities),
        }
    }
}

fn ignore_duplicates(entities: &[Entity]) -> Vec<Entity> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for entity in entities {
        if seen.insert(entity.name.as_str()) {
            kept.push(entity.clone());
        } else {
            debug!("Dropping duplicate entity {}", entity.name);
        }
    }
    kept
}

fn add_postfix(entities: &[Entity]) -> Vec<Entity> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    entities
        .iter()
        .map(|entity| {
            let count = counts.entry(entity.name.as_str()).or_insert(0);
            *count += 1;
            let mut resolved = entity.clone();
            if *count > 1 {
                resolved.name = format!("{}_{}", entity.name, count);
                debug!("Renamed duplicate entity {} to {}", entity.name, resolved.name);
            }
            resolved
        })
        .collect()
}

/// Attributes of the first occurrence are kept as-is; later occurrences only
/// contribute attribute names not seen yet for that entity.
fn combine_attributes(entities: &[Entity]) -> Vec<Entity> {
    let mut merged: Vec<Entity> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut attribute_names: Vec<HashSet<String>> = Vec::new();

    for entity in entities {
        match index.get(entity.name.as_str()) {
            Some(&position) => {
                let known = &mut attribute_names[position];
                for attribute in &entity.attributes {
                    if known.insert(attribute.name.clone()) {
                        merged[position].attributes.push(attribute.clone());
                    }
                }
                debug!("Merged duplicate entity {}", entity.name);
            }
            None => {
                index.insert(entity.name.as_str(), merged.len());
                attribute_names.push(entity.attributes.iter().map(|a| a.name.clone()).collect());
                merged.push(entity.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, CustomProperty};
    use serde_json::json;

    fn entity(name: &str, attributes: &[&str]) -> Entity {
        Entity::new(name).with_attributes(attributes.iter().map(|a| Attribute::new(*a)).collect())
    }

    fn names(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_ignore_duplicates_keeps_first() {
        let entities = vec![entity("a", &["x"]), entity("b", &[]), entity("a", &["y"])];
        let resolved = DuplicateResolver::new(DuplicatePolicy::IgnoreDuplicates).resolve(&entities);

        assert_eq!(names(&resolved), vec!["a", "b"]);
        assert_eq!(resolved[0].attributes.len(), 1);
        assert_eq!(resolved[0].attributes[0].name, "x");
    }

    #[test]
    fn test_add_postfix_counts_per_name() {
        let entities = vec![
            entity("a", &[]),
            entity("b", &[]),
            entity("a", &[]),
            entity("b", &[]),
            entity("a", &[]),
        ];
        let resolved = DuplicateResolver::new(DuplicatePolicy::AddPostfix).resolve(&entities);
        assert_eq!(names(&resolved), vec!["a", "b", "a_2", "b_2", "a_3"]);
    }

    #[test]
    fn test_combine_attributes_first_wins() {
        let mut first = entity("a", &["id", "name"]);
        first.attributes[1].description = "first".to_string();
        first.custom_properties.push(CustomProperty {
            property: "owner".to_string(),
            value: json!("team-1"),
        });

        let mut second = entity("a", &["name", "email"]);
        second.attributes[0].description = "second".to_string();
        second.custom_properties.push(CustomProperty {
            property: "owner".to_string(),
            value: json!("team-2"),
        });

        let entities = vec![first, entity("b", &[]), second];
        let resolved =
            DuplicateResolver::new(DuplicatePolicy::CombineAttributes).resolve(&entities);

        assert_eq!(names(&resolved), vec!["a", "b"]);
        let merged = &resolved[0];
        let attrs: Vec<_> = merged.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(attrs, vec!["id", "name", "email"]);
        assert_eq!(merged.attributes[1].description, "first");
        assert_eq!(merged.custom_properties.len(), 1);
        assert_eq!(merged.custom_properties[0].value, json!("team-1"));
    }

    #[test]
    fn test_policies_agree_without_collisions() {
        let entities = vec![entity("a", &["x", "x"]), entity("b", &["y"])];
        let expected = entities.clone();

        for policy in DuplicatePolicy::ALL {
            assert_eq!(DuplicateResolver::new(policy).resolve(&entities), expected);
        }
    }
}

//! Table validation functionality
//!
//! Reports entity names that occur more than once in a document and what the
//! active duplicate handling policy turns them into.

use crate::model::ResolvedModel;
use crate::models::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of table validation.
#[derive(Debug, Serialize, Deserialize)]
#[must_use = "validation results should be checked for naming conflicts"]
pub struct TableValidationResult {
    /// Naming conflicts found in the source document, in first-seen order
    pub naming_conflicts: Vec<NamingConflict>,
}

/// Entity name shared by several source entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConflict {
    pub name: String,
    /// Number of source entities with this name
    pub occurrences: usize,
    pub policy: DuplicatePolicy,
    /// Names the conflicting entities carry after resolution
    pub resolved_names: Vec<String>,
}

/// Table validator
#[derive(Default)]
pub struct TableValidator;

impl TableValidator {
    /// Create a new table validator
    ///
    /// # Example
    ///
    /// ```rust
    /// use ellie_importer::validation::tables::TableValidator;
    ///
    /// let validator = TableValidator::new();
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Detect entity names used more than once in the source document
    pub fn detect_naming_conflicts(&self, model: &ResolvedModel) -> TableValidationResult {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entity in &model.source {
            let count = counts.entry(entity.name.as_str()).or_insert(0);
            if *count == 0 {
                order.push(entity.name.as_str());
            }
            *count += 1;
        }

        let naming_conflicts = order
            .into_iter()
            .filter(|name| counts[name] > 1)
            .map(|name| NamingConflict {
                name: name.to_string(),
                occurrences: counts[name],
                policy: model.policy,
                resolved_names: resolved_names(model, name, counts[name]),
            })
            .collect();

        TableValidationResult { naming_conflicts }
    }
}

fn resolved_names(model: &ResolvedModel, name: &str, occurrences: usize) -> Vec<String> {
    match model.policy {
        DuplicatePolicy::AddPostfix => std::iter::once(name.to_string())
            .chain((2..=occurrences).map(|n| format!("{}_{}", name, n)))
            .collect(),
        DuplicatePolicy::IgnoreDuplicates | DuplicatePolicy::CombineAttributes => {
            vec![name.to_string()]
        }
    }
}

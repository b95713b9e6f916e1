//! Import functionality
//!
//! Provides the parser for ODCS (Open Data Contract Standard) YAML documents
//! that describe entities, their attributes and logical relationships.

pub mod odcs;
pub mod odcs_shared;

use crate::models::Entity;

/// Result of an import operation.
///
/// Contains the entities in source order, before any duplicate handling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[must_use = "import results should be processed"]
pub struct ImportResult {
    /// Entities extracted from the document
    pub entities: Vec<Entity>,
    /// Number of entity/attribute entries skipped because they were not mappings
    pub skipped: usize,
}

/// Error during import
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

// Re-export for convenience
pub use odcs::ODCSImporter;

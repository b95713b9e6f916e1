//! Export functionality
//!
//! Provides exporters for:
//! - Mermaid `erDiagram` (entity-relationship notation)
//! - Graphviz DOT with record-shaped nodes (labeled-graph notation)
//! - Ellie model-creation payload (JSON)

pub mod dot;
pub mod ellie;
pub mod mermaid;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// Re-export for convenience
pub use dot::{DotExporter, DotOptions};
pub use ellie::{EllieExporter, PayloadOptions};
pub use mermaid::MermaidExporter;

//! Ellie Importer - ODCS data models to diagrams and Ellie models
//!
//! Provides:
//! - ODCS YAML parsing into a normalized entity model
//! - Duplicate entity handling and relationship extraction
//! - Mermaid and Graphviz DOT diagram export
//! - Ellie model-creation payloads and a blocking API client
//! - Configuration file support

#[cfg(feature = "api-backend")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod model;
pub mod models;
pub mod validation;

// Re-export commonly used types
#[cfg(feature = "api-backend")]
pub use api::{ApiError, EllieClient, Folder};
pub use config::{ConfigError, ImporterConfig};
pub use export::{
    DotExporter, DotOptions, EllieExporter, ExportError, ExportResult, MermaidExporter,
    PayloadOptions,
};
pub use import::{ImportError, ImportResult, ODCSImporter};
pub use model::{ModelLoader, ResolvedModel, TableSelection};
pub use validation::{
    RelationshipValidationResult, RelationshipValidator, TableValidationResult, TableValidator,
};

// Re-export models
pub use models::enums::*;
pub use models::{Attribute, CustomProperty, Entity, Relationship, RelationshipDeclaration};

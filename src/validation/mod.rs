//! Validation functionality
//!
//! Provides reports for:
//! - Table validation (entity names shared by several source entities)
//! - Relationship validation (declarations dropped from the payload)

pub mod relationships;
pub mod tables;

pub use relationships::{RelationshipValidationResult, RelationshipValidator};
pub use tables::{TableValidationResult, TableValidator};

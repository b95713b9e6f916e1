//! Models module
//!
//! Defines the normalized data model shared by the importer, the diagram
//! exporters and the payload builder.

pub mod entity;
pub mod enums;
pub mod relationship;

pub use entity::{Attribute, CustomProperty, DEFAULT_DATA_TYPE, Entity, TypeField};
pub use enums::*;
pub use relationship::{
    EndpointRef, LOGICAL_RELATIONSHIPS_PROPERTY, Relationship, RelationshipDeclaration,
};

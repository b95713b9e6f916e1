//! Model resolution
//!
//! Turns imported entities into the normalized model consumed by the exporters:
//! - Duplicate handling (`DuplicateResolver`)
//! - Relationship extraction and foreign key derivation (`RelationshipExtractor`)
//! - Table selection (`TableSelection`)
//! - Loading a document end to end (`ModelLoader`)

pub mod extractor;
pub mod loader;
pub mod resolver;
pub mod selection;

pub use extractor::{ForeignKeySet, RelationshipExtractor};
pub use loader::{ModelLoader, ResolvedModel};
pub use resolver::DuplicateResolver;
pub use selection::TableSelection;

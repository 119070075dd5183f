//! Business logic services for persistence and archiving.
//!
//! This module contains the services that sit between the data models and
//! the file system: the content binder, the catalog store and the archive
//! packer.

pub mod archive;
pub mod catalog;
pub mod content_binder;

// Re-export commonly used types
pub use catalog::{CatalogEntry, ContentCatalog, ContentKind, JsonCatalog, PositionBinding};
pub use content_binder::{ContentBinder, SaveFailure, SaveReport};

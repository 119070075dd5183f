//! Data models for the room grid, materials and content groups.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are designed to be independent of UI and persistence logic.

pub mod content;
pub mod grid;
pub mod material;
pub mod point;
pub mod segment;

// Re-export all model types
pub use content::{ContentElement, MediaFile};
pub use grid::{Edge, GridModel};
pub use material::{default_materials, Material};
pub use point::MappingPoint;
pub use segment::Segment;

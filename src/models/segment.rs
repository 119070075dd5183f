//! Grid cell value type.

use serde::{Deserialize, Serialize};

/// One cell of the room grid.
///
/// Both fields are non-owning references: the material name resolves
/// against the material list supplied at decode time and the content
/// number resolves through the content binder. Cells are value-copied
/// whenever the grid is resized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Name of the assigned material, if any.
    pub material: Option<String>,
    /// Number of the bound content group, if any.
    pub content: Option<u32>,
}

impl Segment {
    /// Creates an empty segment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the segment carries neither material nor content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.material.is_none() && self.content.is_none()
    }
}

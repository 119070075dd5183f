//! Surface materials assignable to grid segments.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A surface material a grid segment can carry.
///
/// Identity follows the stable `name` only: two materials with the same
/// name compare equal even when their presentation differs. Grid files
/// store the name, so renaming a material orphans its cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Stable identifier written into grid files.
    pub name: String,
    /// Human-readable name shown in pickers.
    pub presentation_name: String,
    /// Fill color as `#rrggbb`.
    pub color: String,
    /// Text color as `#rrggbb`.
    pub text_color: String,
}

impl Material {
    /// Creates a material.
    pub fn new(
        name: impl Into<String>,
        presentation_name: impl Into<String>,
        color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            presentation_name: presentation_name.into(),
            color: color.into(),
            text_color: text_color.into(),
        }
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Stock materials with their fallback colors, in presentation order.
const DEFAULT_MATERIAL_VALUES: [(&str, &str, &str); 8] = [
    ("eraser", "#ffffff", "#000000"),
    ("wall", "#696969", "#ffffff"),
    ("furniture", "#d2b48c", "#000000"),
    ("window", "#4169e1", "#ffffff"),
    ("door", "#8b4513", "#ffffff"),
    ("stairs", "#87ceeb", "#000000"),
    ("elevator", "#0000cd", "#ffffff"),
    ("escalator", "#ffe4b5", "#000000"),
];

/// Returns the stock material set with its default colors.
///
/// The presentation name starts out equal to the identifier; localization
/// happens in the editor layer.
#[must_use]
pub fn default_materials() -> Vec<Material> {
    DEFAULT_MATERIAL_VALUES
        .iter()
        .map(|(name, color, text_color)| Material::new(*name, *name, *color, *text_color))
        .collect()
}

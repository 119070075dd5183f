//! Grid position keys.

use serde::{Deserialize, Serialize};

/// A 3-D grid coordinate: `x` is the column, `y` the row, `z` the vertical
/// coordinate in floor-height steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingPoint {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
    /// Vertical coordinate (floor index times floor height).
    pub z: usize,
}

impl MappingPoint {
    /// Creates a mapping point.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Formats the canonical position key used for content bindings.
    ///
    /// This is the only place the key format lives; every producer and
    /// consumer of position keys goes through this codec.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.x, self.y, self.z)
    }

    /// Parses a canonical position key back into a point.
    ///
    /// Returns `None` for anything [`key`](Self::key) cannot have produced.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let mut parts = key.split(':');
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        let z = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { x, y, z })
    }
}

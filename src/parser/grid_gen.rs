//! Grid text generation.
//!
//! Serializes a [`GridModel`] into the tab-separated grid format: the
//! `x\ty\tz\tmaterial` header followed by one line per cell. The format
//! carries no explicit dimensions; the decoder re-infers them from the
//! coordinates.

use std::fs;
use std::path::Path;

use crate::constants::GRID_HEADER;
use crate::error::PersistenceError;
use crate::models::{GridModel, MappingPoint};
use crate::services::ContentBinder;

/// Generates the canonical grid text for a grid and its content bindings.
///
/// Cells are emitted floor by floor (z ascending in floor-height steps),
/// then row by row, then column by column, with no trailing newline after
/// the last line. A cell without a material writes an empty fourth field.
///
/// As a side effect every position binding in the binder is cleared and
/// re-added from the cells that carry a content reference, so the binder
/// leaves this function in exact agreement with the returned text.
pub fn generate_grid(grid: &GridModel, binder: &mut ContentBinder) -> String {
    binder.clear_all_positions();

    let mut lines = Vec::with_capacity(grid.floors() * grid.rows() * grid.columns() + 1);
    lines.push(GRID_HEADER.to_string());

    for (floor, row, column, segment) in grid.cells() {
        let z = floor * grid.floor_height();
        let material = segment.material.as_deref().unwrap_or("");
        lines.push(format!("{column}\t{row}\t{z}\t{material}"));

        if let Some(content_number) = segment.content {
            binder.add_position(content_number, &MappingPoint::new(column, row, z).key());
        }
    }

    lines.join("\n")
}

/// Saves the grid text to a file.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub fn save_grid(
    grid: &GridModel,
    binder: &mut ContentBinder,
    path: &Path,
) -> Result<(), PersistenceError> {
    let text = generate_grid(grid, binder);
    fs::write(path, text)?;
    Ok(())
}

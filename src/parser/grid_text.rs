//! Grid text parsing.
//!
//! Decodes the tab-separated grid stream back into a [`GridModel`]. The
//! stream carries no explicit dimensions, so decoding runs in two passes
//! over the same lines: the first infers floors, floor height and the
//! row/column counts, the second fills the cells.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::SegmentSizing;
use crate::error::{FormatError, PersistenceError};
use crate::models::{GridModel, MappingPoint, Material};
use crate::services::ContentBinder;

/// Loads a grid from a text file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or the stream does not
/// decode; see [`parse_grid_str`] for the format errors.
pub fn load_grid(
    path: &Path,
    materials: &[Material],
    binder: &ContentBinder,
    sizing: &SegmentSizing,
) -> Result<GridModel, PersistenceError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_grid_str(&content, materials, binder, sizing)?)
}

/// Parses the canonical grid text into a grid.
///
/// The first line is always treated as the header and skipped. Dimensions
/// are inferred from the data: the floor count from the number of distinct
/// z runs, the floor height from the first z transition (1 for a
/// single-floor stream, which carries no height information), and the row
/// and column counts from the coordinates of the last line.
///
/// Material names resolve against `materials`; names that resolve to
/// nothing leave the cell bare, deliberately without failing, so a grid
/// file survives a shrunken material set. Content attaches to cells whose
/// position key is bound in the binder.
///
/// # Errors
///
/// Returns a [`FormatError`] when a line is structurally invalid, the
/// stream has no data lines, the z column steps backwards before a floor
/// height is known, or a cell lies outside the inferred dimensions.
pub fn parse_grid_str(
    content: &str,
    materials: &[Material],
    binder: &ContentBinder,
    sizing: &SegmentSizing,
) -> Result<GridModel, FormatError> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2 {
        return Err(FormatError::EmptyGrid);
    }
    let data_lines = &lines[1..];

    // Pass 1: infer dimensions.
    let mut floors = 0usize;
    let mut floor_height: Option<usize> = None;
    let mut last_z: Option<usize> = None;
    let mut last_cell = (0usize, 0usize);

    for (offset, line) in data_lines.iter().enumerate() {
        let (column, row, z, _) = split_line(line, offset + 2)?;
        match last_z {
            None => floors += 1,
            Some(previous) if z != previous => {
                if floor_height.is_none() {
                    if z < previous {
                        return Err(FormatError::InvalidFloorHeight {
                            previous,
                            current: z,
                        });
                    }
                    floor_height = Some(z - previous);
                }
                floors += 1;
            }
            Some(_) => {}
        }
        last_z = Some(z);
        last_cell = (column, row);
    }

    let floor_height = floor_height.unwrap_or(1);
    let (columns, rows) = (last_cell.0 + 1, last_cell.1 + 1);

    // Pass 2: fill cells.
    let known_materials: HashSet<&str> = materials
        .iter()
        .map(|material| material.name.as_str())
        .collect();
    let mut grid = GridModel::new(rows, columns, floors, floor_height, sizing);

    for (offset, line) in data_lines.iter().enumerate() {
        let line_number = offset + 2;
        let (column, row, z, material) = split_line(line, line_number)?;
        let floor = z / floor_height;

        let Some(segment) = grid.get_mut(floor, row, column) else {
            return Err(FormatError::PositionOutOfBounds {
                line: line_number,
                column,
                row,
                z,
            });
        };

        if let Some(name) = material {
            if known_materials.contains(name) {
                segment.material = Some(name.to_string());
            } else {
                debug!("Unresolved material name '{}', cell left bare", name);
            }
        }

        if let Some(element) = binder.get_by_position(&MappingPoint::new(column, row, z).key()) {
            segment.content = Some(element.content_number);
        }
    }

    Ok(grid)
}

/// Splits one data line into its coordinates and optional material name.
///
/// An empty fourth field counts as no material; fields past the fourth
/// are ignored.
fn split_line(line: &str, line_number: usize) -> Result<(usize, usize, usize, Option<&str>), FormatError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(FormatError::ShortLine {
            line: line_number,
            fields: fields.len(),
        });
    }
    let column = parse_coordinate(fields[0], "x", line_number)?;
    let row = parse_coordinate(fields[1], "y", line_number)?;
    let z = parse_coordinate(fields[2], "z", line_number)?;
    let material = fields.get(3).copied().filter(|name| !name.is_empty());
    Ok((column, row, z, material))
}

fn parse_coordinate(value: &str, field: &'static str, line_number: usize) -> Result<usize, FormatError> {
    value.parse().map_err(|_| FormatError::InvalidNumber {
        line: line_number,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_materials;
    use crate::services::JsonCatalog;

    fn binder() -> ContentBinder {
        ContentBinder::new(Box::new(JsonCatalog::new()), "en")
    }

    fn parse(content: &str) -> Result<GridModel, FormatError> {
        parse_grid_str(
            content,
            &default_materials(),
            &binder(),
            &SegmentSizing::default(),
        )
    }

    #[test]
    fn test_single_floor_dimensions() {
        let grid = parse("x\ty\tz\tmaterial\n0\t0\t0\t\n1\t0\t0\t\n0\t1\t0\t\n1\t1\t0\twall")
            .unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.floors(), 1);
        assert_eq!(grid.floor_height(), 1);
        assert_eq!(grid.get(0, 1, 1).unwrap().material.as_deref(), Some("wall"));
    }

    #[test]
    fn test_floor_height_from_first_transition() {
        let grid = parse("x\ty\tz\tmaterial\n0\t0\t0\t\n0\t0\t4\t\n0\t0\t8\t").unwrap();
        assert_eq!(grid.floors(), 3);
        assert_eq!(grid.floor_height(), 4);
    }

    #[test]
    fn test_empty_stream_is_rejected() {
        assert!(matches!(parse(""), Err(FormatError::EmptyGrid)));
        assert!(matches!(
            parse("x\ty\tz\tmaterial"),
            Err(FormatError::EmptyGrid)
        ));
    }

    #[test]
    fn test_short_line_is_rejected() {
        let result = parse("x\ty\tz\tmaterial\n0\t0\t0\t\n1\t0\n");
        assert!(matches!(
            result,
            Err(FormatError::ShortLine { line: 3, fields: 2 })
        ));
    }

    #[test]
    fn test_bad_coordinate_is_rejected() {
        let result = parse("x\ty\tz\tmaterial\n0\tnope\t0\t");
        assert!(matches!(
            result,
            Err(FormatError::InvalidNumber { field: "y", .. })
        ));
    }

    #[test]
    fn test_negative_coordinate_is_rejected() {
        let result = parse("x\ty\tz\tmaterial\n-1\t0\t0\t");
        assert!(matches!(
            result,
            Err(FormatError::InvalidNumber { field: "x", .. })
        ));
    }

    #[test]
    fn test_descending_z_is_rejected() {
        let result = parse("x\ty\tz\tmaterial\n0\t0\t5\t\n0\t0\t2\t");
        assert!(matches!(
            result,
            Err(FormatError::InvalidFloorHeight {
                previous: 5,
                current: 2
            })
        ));
    }

    #[test]
    fn test_cell_outside_inferred_grid_is_rejected() {
        // The last line fixes the grid at 2x2; the 5 on line 3 cannot fit.
        let result = parse("x\ty\tz\tmaterial\n0\t0\t0\t\n5\t0\t0\t\n1\t1\t0\t");
        assert!(matches!(
            result,
            Err(FormatError::PositionOutOfBounds {
                line: 3,
                column: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_material_leaves_cell_bare() {
        let grid = parse("x\ty\tz\tmaterial\n0\t0\t0\tgranite").unwrap();
        assert!(grid.get(0, 0, 0).unwrap().material.is_none());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let grid = parse("x\ty\tz\tmaterial\n0\t0\t0\twall\textra\tfields").unwrap();
        assert_eq!(grid.get(0, 0, 0).unwrap().material.as_deref(), Some("wall"));
    }
}

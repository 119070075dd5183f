//! Shared test fixtures for persistence tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use roomgrid::config::SegmentSizing;
use roomgrid::models::{default_materials, ContentElement, GridModel, Material};
use roomgrid::services::{ContentBinder, JsonCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the stock material set used by most tests.
pub fn test_materials() -> Vec<Material> {
    default_materials()
}

/// Creates a grid whose cells carry a deterministic material pattern.
///
/// # Arguments
/// * `rows` - Number of rows per floor
/// * `columns` - Number of columns per floor
/// * `floors` - Number of floors
/// * `floor_height` - Vertical distance between floors
///
/// # Returns
/// A grid where roughly two thirds of the cells carry a stock material,
/// spread over every floor, and the rest stay empty.
pub fn patterned_grid(
    rows: usize,
    columns: usize,
    floors: usize,
    floor_height: usize,
) -> GridModel {
    let materials = test_materials();
    let mut grid = GridModel::new(rows, columns, floors, floor_height, &SegmentSizing::default());

    for floor in 0..floors {
        for row in 0..rows {
            for column in 0..columns {
                let index = (floor * rows + row) * columns + column;
                if index % 3 != 0 {
                    let material = &materials[index % materials.len()];
                    grid.get_mut(floor, row, column)
                        .expect("cell inside fresh grid")
                        .material = Some(material.name.clone());
                }
            }
        }
    }
    grid
}

/// Creates a binder with the given languages and numbered content groups.
///
/// # Arguments
/// * `languages` - Language codes; the first one becomes the default
/// * `count` - Number of content groups to insert (numbered from 1)
pub fn binder_with_elements(languages: &[&str], count: u32) -> ContentBinder {
    let default = languages.first().copied().unwrap_or("en");
    let mut binder = ContentBinder::new(Box::new(JsonCatalog::new()), default);
    for language in languages.iter().skip(1) {
        binder.add_language(*language);
    }

    for number in 1..=count {
        binder.insert_element(
            ContentElement::new(number)
                .with_title(format!("Title {number}"))
                .with_description(format!("Subtitle {number}"))
                .with_url(format!("https://example.org/{number}"))
                .with_full_text(format!("Full text {number}")),
        );
    }
    binder
}

/// Creates a throwaway project directory inside a temp dir.
pub fn temp_project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let project = temp.path().join("project");
    fs::create_dir_all(&project).expect("Failed to create project dir");
    (temp, project)
}

/// Writes a small nested file tree suitable for archive tests.
pub fn write_sample_tree(root: &Path) {
    fs::create_dir_all(root.join("content").join("en")).expect("Failed to create content dir");
    fs::write(root.join("grid.txt"), "x\ty\tz\tmaterial\n0\t0\t0\twall")
        .expect("Failed to write grid file");
    fs::write(root.join("content").join("en").join("1-title.txt"), "Entrance\n")
        .expect("Failed to write title file");
    fs::write(
        root.join("content").join("en").join("1.jpg"),
        [0xFFu8, 0xD8, 0xFF, 0xE0],
    )
    .expect("Failed to write image file");
}

/// Reads every file under `root` into sorted (relative path, bytes) pairs.
pub fn read_tree(root: &Path) -> Vec<(String, Vec<u8>)> {
    fn walk(dir: &Path, base: &Path, out: &mut Vec<(String, Vec<u8>)>) {
        for entry in fs::read_dir(dir).expect("Failed to list directory") {
            let path = entry.expect("Failed to read dir entry").path();
            if path.is_dir() {
                walk(&path, base, out);
            } else {
                let relative = path
                    .strip_prefix(base)
                    .expect("entry under base")
                    .to_string_lossy()
                    .into_owned();
                out.push((relative, fs::read(&path).expect("Failed to read file")));
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

/// Asserts two grids agree on dimensions and on every cell's material and
/// content reference.
pub fn assert_same_cells(left: &GridModel, right: &GridModel) {
    assert_eq!(left.rows(), right.rows(), "row count differs");
    assert_eq!(left.columns(), right.columns(), "column count differs");
    assert_eq!(left.floors(), right.floors(), "floor count differs");

    for (floor, row, column, segment) in left.cells() {
        let other = right
            .get(floor, row, column)
            .expect("cell present in both grids");
        assert_eq!(
            segment.material, other.material,
            "material differs at ({floor}, {row}, {column})"
        );
        assert_eq!(
            segment.content, other.content,
            "content differs at ({floor}, {row}, {column})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_patterned_grid() {
        let grid = patterned_grid(2, 3, 2, 3);
        assert_eq!(grid.cells().count(), 12);
        assert!(grid.cells().any(|(_, _, _, segment)| segment.material.is_some()));
        assert!(grid.cells().any(|(_, _, _, segment)| segment.is_empty()));
    }

    #[test]
    fn test_fixture_binder() {
        let binder = binder_with_elements(&["en", "de"], 2);
        assert_eq!(binder.languages().len(), 2);
        assert_eq!(binder.contents("de").expect("german list").len(), 2);
        assert_eq!(binder.new_unused_content_number("en"), 3);
    }

    #[test]
    fn test_fixture_tree_round_trip() {
        let (_temp, project) = temp_project();
        write_sample_tree(&project);
        let tree = read_tree(&project);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[0].0, "content/en/1-title.txt");
    }
}

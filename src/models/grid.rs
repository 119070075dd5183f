//! The room grid and its resize transforms.

// Allow intentional numeric casts in the coordinate math
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use serde::{Deserialize, Serialize};

use crate::config::SegmentSizing;
use crate::error::ResizeRejected;
use crate::models::Segment;

/// Grid edge a row or column resize targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Row edge at index 0.
    Top,
    /// Row edge at the highest index.
    Bottom,
    /// Column edge at index 0.
    Left,
    /// Column edge at the highest index.
    Right,
}

impl Edge {
    /// True for the edges that change the row count (top and bottom).
    #[must_use]
    pub const fn affects_rows(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Dense 3-D grid of [`Segment`]s indexed by `(floor, row, column)`.
///
/// Cells are stored row-major per floor in a single vector whose length is
/// always `floors * rows * columns`. The resize operations build a complete
/// replacement vector and swap it in, so a rejected resize leaves the grid
/// untouched and a successful one never exposes a half-moved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    rows: usize,
    columns: usize,
    floors: usize,
    floor_height: usize,
    unit_size: f64,
    sizing: SegmentSizing,
    segments: Vec<Segment>,
}

impl GridModel {
    /// Creates a grid with every cell default-initialized.
    ///
    /// The unit size starts at the sizing default, clamped into bounds.
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows per floor
    /// * `columns` - Number of columns per floor
    /// * `floors` - Number of floors
    /// * `floor_height` - Vertical distance between floors, in grid units
    /// * `sizing` - Unit size bounds the grid will clamp against
    #[must_use]
    pub fn new(
        rows: usize,
        columns: usize,
        floors: usize,
        floor_height: usize,
        sizing: &SegmentSizing,
    ) -> Self {
        Self {
            rows,
            columns,
            floors,
            floor_height,
            unit_size: sizing.clamp(sizing.initial),
            sizing: *sizing,
            segments: vec![Segment::default(); floors * rows * columns],
        }
    }

    /// Number of rows per floor.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per floor.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of floors.
    #[must_use]
    pub const fn floors(&self) -> usize {
        self.floors
    }

    /// Vertical distance between floors, in grid units.
    #[must_use]
    pub const fn floor_height(&self) -> usize {
        self.floor_height
    }

    /// Sets the vertical distance between floors.
    pub fn set_floor_height(&mut self, floor_height: usize) {
        self.floor_height = floor_height;
    }

    /// Current segment unit size.
    #[must_use]
    pub const fn unit_size(&self) -> f64 {
        self.unit_size
    }

    /// Sets the segment unit size, clamped into the sizing bounds.
    pub fn set_unit_size(&mut self, size: f64) {
        self.unit_size = self.sizing.clamp(size);
    }

    /// World-space length of the grid (rows times unit size).
    #[must_use]
    pub fn length(&self) -> f64 {
        self.rows as f64 * self.unit_size
    }

    /// World-space width of the grid (columns times unit size).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.columns as f64 * self.unit_size
    }

    fn cell_index(&self, floor: usize, row: usize, column: usize) -> usize {
        (floor * self.rows + row) * self.columns + column
    }

    /// Returns the segment at the given cell, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, floor: usize, row: usize, column: usize) -> Option<&Segment> {
        if floor < self.floors && row < self.rows && column < self.columns {
            self.segments.get(self.cell_index(floor, row, column))
        } else {
            None
        }
    }

    /// Mutable access to the segment at the given cell.
    pub fn get_mut(&mut self, floor: usize, row: usize, column: usize) -> Option<&mut Segment> {
        if floor < self.floors && row < self.rows && column < self.columns {
            let index = self.cell_index(floor, row, column);
            self.segments.get_mut(index)
        } else {
            None
        }
    }

    /// Iterates every cell as `(floor, row, column, &segment)`.
    ///
    /// Order is floor-major, then row, then column ascending. This is the
    /// read-only view renderers and the grid encoder consume.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize, &Segment)> + '_ {
        let rows = self.rows;
        let columns = self.columns;
        self.segments.iter().enumerate().map(move |(index, segment)| {
            let column = index % columns;
            let row = (index / columns) % rows;
            let floor = index / (rows * columns);
            (floor, row, column, segment)
        })
    }

    /// Maps a world y coordinate to a row index.
    ///
    /// Negative or non-finite coordinates and coordinates past the last
    /// row map to `None`.
    #[must_use]
    pub fn coordinate_to_row(&self, y: f64) -> Option<usize> {
        if !y.is_finite() || y < 0.0 {
            return None;
        }
        let row = (y / self.unit_size) as usize;
        (row < self.rows).then_some(row)
    }

    /// Maps a world x coordinate to a column index.
    ///
    /// Negative or non-finite coordinates and coordinates past the last
    /// column map to `None`.
    #[must_use]
    pub fn coordinate_to_column(&self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < 0.0 {
            return None;
        }
        let column = (x / self.unit_size) as usize;
        (column < self.columns).then_some(column)
    }

    /// Appends a floor on top of the grid.
    ///
    /// The new floor is default-filled, or a deep copy of `source` when
    /// one is given. All existing floors keep their cells.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeRejected::FloorOutOfRange`] when `source` does not
    /// name an existing floor.
    pub fn add_floor(&mut self, source: Option<usize>) -> Result<(), ResizeRejected> {
        let floor_len = self.rows * self.columns;
        match source {
            Some(index) => {
                if index >= self.floors {
                    return Err(ResizeRejected::FloorOutOfRange {
                        index,
                        floors: self.floors,
                    });
                }
                let start = index * floor_len;
                let copied: Vec<Segment> = self.segments[start..start + floor_len].to_vec();
                self.segments.extend(copied);
            }
            None => {
                let new_len = self.segments.len() + floor_len;
                self.segments.resize(new_len, Segment::default());
            }
        }
        self.floors += 1;
        Ok(())
    }

    /// Removes the floor at `index`; the floors above shift down.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeRejected::FloorOutOfRange`] when `index` does not
    /// name an existing floor and [`ResizeRejected::LastFloor`] when the
    /// grid has only one floor left.
    pub fn remove_floor(&mut self, index: usize) -> Result<(), ResizeRejected> {
        if index >= self.floors {
            return Err(ResizeRejected::FloorOutOfRange {
                index,
                floors: self.floors,
            });
        }
        if self.floors == 1 {
            return Err(ResizeRejected::LastFloor);
        }
        let floor_len = self.rows * self.columns;
        let start = index * floor_len;
        self.segments.drain(start..start + floor_len);
        self.floors -= 1;
        Ok(())
    }

    /// Inserts `amount` rows or columns at `edge` on every floor.
    ///
    /// # Errors
    ///
    /// Currently infallible for inserts; the `Result` mirrors
    /// [`remove_at_edge`](Self::remove_at_edge).
    pub fn insert_at_edge(&mut self, amount: usize, edge: Edge) -> Result<(), ResizeRejected> {
        self.resize_edge(true, amount, edge)
    }

    /// Removes `amount` rows or columns at `edge` on every floor.
    ///
    /// # Errors
    ///
    /// Returns a [`ResizeRejected`] when the removal would leave the grid
    /// without rows or columns; the grid is unchanged in that case.
    pub fn remove_at_edge(&mut self, amount: usize, edge: Edge) -> Result<(), ResizeRejected> {
        self.resize_edge(false, amount, edge)
    }

    /// Inserts or removes `amount` complete rows or columns at `edge`.
    ///
    /// Inserted cells start out default-valued; removed cells are dropped
    /// along with any material or content reference they carried. Every
    /// unaffected cell keeps its value and shifts toward the opposite
    /// edge, on every floor at once.
    ///
    /// # Errors
    ///
    /// Returns a [`ResizeRejected`] when a removal would bring the row or
    /// column count to zero. The grid is left untouched on rejection.
    pub fn resize_edge(
        &mut self,
        add: bool,
        amount: usize,
        edge: Edge,
    ) -> Result<(), ResizeRejected> {
        let mut changed_rows = self.rows;
        let mut changed_columns = self.columns;

        if edge.affects_rows() {
            if add {
                changed_rows += amount;
            } else if self.rows <= amount {
                return Err(ResizeRejected::WouldEmptyRows { amount });
            } else {
                changed_rows -= amount;
            }
        } else if add {
            changed_columns += amount;
        } else if self.columns <= amount {
            return Err(ResizeRejected::WouldEmptyColumns { amount });
        } else {
            changed_columns -= amount;
        }

        // When adding, walk the larger (new) dimensions and pull values out
        // of the old vector; when removing, walk the old dimensions and push
        // surviving values into the new one. compare_* marks where the far
        // edge of the unaffected region sits in the walked coordinate space.
        let (walk_rows, walk_columns) = if add {
            (changed_rows, changed_columns)
        } else {
            (self.rows, self.columns)
        };
        let (compare_rows, compare_columns) = if add {
            (self.rows, self.columns)
        } else {
            (changed_rows, changed_columns)
        };

        let mut changed = vec![Segment::default(); self.floors * changed_rows * changed_columns];

        for floor in 0..self.floors {
            let mut copy_row = 0;
            for row in 0..walk_rows {
                let mut copy_column = 0;
                for column in 0..walk_columns {
                    let affected = match edge {
                        Edge::Top => row < amount,
                        Edge::Bottom => row >= compare_rows,
                        Edge::Left => column < amount,
                        Edge::Right => column >= compare_columns,
                    };
                    // Affected cells stay default when adding and are
                    // skipped when removing; only unaffected cells copy.
                    if !affected {
                        if add {
                            let source = (floor * self.rows + copy_row) * self.columns + copy_column;
                            let target = (floor * changed_rows + row) * changed_columns + column;
                            changed[target] = self.segments[source].clone();
                        } else {
                            let source = (floor * self.rows + row) * self.columns + column;
                            let target =
                                (floor * changed_rows + copy_row) * changed_columns + copy_column;
                            changed[target] = self.segments[source].clone();
                        }
                        copy_column += 1;
                    }
                }
                if copy_column > 0 {
                    copy_row += 1;
                }
            }
        }

        self.rows = changed_rows;
        self.columns = changed_columns;
        self.segments = changed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizing() -> SegmentSizing {
        SegmentSizing::default()
    }

    fn marked_grid(rows: usize, columns: usize, floors: usize) -> GridModel {
        let mut grid = GridModel::new(rows, columns, floors, 3, &sizing());
        for floor in 0..floors {
            for row in 0..rows {
                for column in 0..columns {
                    let segment = grid.get_mut(floor, row, column).unwrap();
                    segment.material = Some(format!("m{floor}-{row}-{column}"));
                }
            }
        }
        grid
    }

    #[test]
    fn test_new_grid_is_default_filled() {
        let grid = GridModel::new(2, 3, 2, 3, &sizing());
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.floors(), 2);
        assert!(grid.cells().all(|(_, _, _, segment)| segment.is_empty()));
        assert_eq!(grid.cells().count(), 12);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = GridModel::new(2, 2, 1, 3, &sizing());
        assert!(grid.get(0, 0, 0).is_some());
        assert!(grid.get(0, 2, 0).is_none());
        assert!(grid.get(0, 0, 2).is_none());
        assert!(grid.get(1, 0, 0).is_none());
    }

    #[test]
    fn test_cells_order_is_floor_row_column() {
        let grid = GridModel::new(2, 2, 2, 3, &sizing());
        let coords: Vec<(usize, usize, usize)> =
            grid.cells().map(|(f, r, c, _)| (f, r, c)).collect();
        assert_eq!(coords[0], (0, 0, 0));
        assert_eq!(coords[1], (0, 0, 1));
        assert_eq!(coords[2], (0, 1, 0));
        assert_eq!(coords[4], (1, 0, 0));
    }

    #[test]
    fn test_coordinate_mapping() {
        // unit size defaults to 30.0
        let grid = GridModel::new(4, 4, 1, 3, &sizing());
        assert_eq!(grid.coordinate_to_row(0.0), Some(0));
        assert_eq!(grid.coordinate_to_row(29.9), Some(0));
        assert_eq!(grid.coordinate_to_row(30.0), Some(1));
        assert_eq!(grid.coordinate_to_row(119.9), Some(3));
        assert_eq!(grid.coordinate_to_row(120.0), None);
        assert_eq!(grid.coordinate_to_row(-0.1), None);
        assert_eq!(grid.coordinate_to_column(95.0), Some(3));
        assert_eq!(grid.coordinate_to_column(f64::NAN), None);
    }

    #[test]
    fn test_unit_size_clamps_and_extents_follow() {
        let mut grid = GridModel::new(2, 3, 1, 3, &sizing());
        grid.set_unit_size(1000.0);
        assert!((grid.unit_size() - 100.0).abs() < f64::EPSILON);
        assert!((grid.length() - 200.0).abs() < f64::EPSILON);
        assert!((grid.width() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_floor_default_filled() {
        let mut grid = marked_grid(2, 2, 1);
        grid.add_floor(None).unwrap();

        assert_eq!(grid.floors(), 2);
        assert!(grid.get(1, 0, 0).unwrap().is_empty());
        assert_eq!(
            grid.get(0, 1, 1).unwrap().material.as_deref(),
            Some("m0-1-1")
        );
    }

    #[test]
    fn test_add_floor_copies_source() {
        let mut grid = marked_grid(2, 2, 2);
        grid.add_floor(Some(0)).unwrap();

        assert_eq!(grid.floors(), 3);
        assert_eq!(
            grid.get(2, 1, 0).unwrap().material.as_deref(),
            Some("m0-1-0")
        );
    }

    #[test]
    fn test_add_floor_rejects_bad_source() {
        let mut grid = marked_grid(2, 2, 1);
        assert_eq!(
            grid.add_floor(Some(5)),
            Err(ResizeRejected::FloorOutOfRange { index: 5, floors: 1 })
        );
        assert_eq!(grid.floors(), 1);
    }

    #[test]
    fn test_remove_floor_shifts_upper_floors_down() {
        let mut grid = marked_grid(2, 2, 3);
        grid.remove_floor(1).unwrap();

        assert_eq!(grid.floors(), 2);
        assert_eq!(
            grid.get(0, 0, 0).unwrap().material.as_deref(),
            Some("m0-0-0")
        );
        assert_eq!(
            grid.get(1, 0, 0).unwrap().material.as_deref(),
            Some("m2-0-0")
        );
    }

    #[test]
    fn test_remove_last_floor_is_rejected() {
        let mut grid = marked_grid(2, 2, 1);
        assert_eq!(grid.remove_floor(0), Err(ResizeRejected::LastFloor));
        assert_eq!(grid.floors(), 1);
    }

    #[test]
    fn test_insert_rows_at_top_shifts_existing() {
        let mut grid = marked_grid(2, 2, 1);
        grid.insert_at_edge(2, Edge::Top).unwrap();

        assert_eq!(grid.rows(), 4);
        assert!(grid.get(0, 0, 0).unwrap().is_empty());
        assert!(grid.get(0, 1, 1).unwrap().is_empty());
        assert_eq!(
            grid.get(0, 2, 0).unwrap().material.as_deref(),
            Some("m0-0-0")
        );
        assert_eq!(
            grid.get(0, 3, 1).unwrap().material.as_deref(),
            Some("m0-1-1")
        );
    }

    #[test]
    fn test_insert_columns_at_right_keeps_left_cells() {
        let mut grid = marked_grid(2, 2, 2);
        grid.insert_at_edge(1, Edge::Right).unwrap();

        assert_eq!(grid.columns(), 3);
        assert_eq!(
            grid.get(1, 1, 1).unwrap().material.as_deref(),
            Some("m1-1-1")
        );
        assert!(grid.get(0, 0, 2).unwrap().is_empty());
        assert!(grid.get(1, 1, 2).unwrap().is_empty());
    }

    #[test]
    fn test_remove_columns_at_left_shifts_survivors() {
        let mut grid = marked_grid(2, 3, 1);
        grid.remove_at_edge(1, Edge::Left).unwrap();

        assert_eq!(grid.columns(), 2);
        assert_eq!(
            grid.get(0, 0, 0).unwrap().material.as_deref(),
            Some("m0-0-1")
        );
        assert_eq!(
            grid.get(0, 1, 1).unwrap().material.as_deref(),
            Some("m0-1-2")
        );
    }

    #[test]
    fn test_remove_rows_at_bottom_drops_last_rows() {
        let mut grid = marked_grid(3, 2, 1);
        grid.remove_at_edge(1, Edge::Bottom).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(
            grid.get(0, 1, 0).unwrap().material.as_deref(),
            Some("m0-1-0")
        );
        assert!(grid.get(0, 2, 0).is_none());
    }

    #[test]
    fn test_removal_to_zero_is_rejected_and_grid_unchanged() {
        let mut grid = marked_grid(2, 3, 2);
        let before = grid.clone();

        assert_eq!(
            grid.remove_at_edge(2, Edge::Top),
            Err(ResizeRejected::WouldEmptyRows { amount: 2 })
        );
        assert_eq!(
            grid.remove_at_edge(5, Edge::Right),
            Err(ResizeRejected::WouldEmptyColumns { amount: 5 })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_zero_amount_resize_is_a_no_op() {
        let mut grid = marked_grid(2, 2, 1);
        let before = grid.clone();

        grid.insert_at_edge(0, Edge::Left).unwrap();
        grid.remove_at_edge(0, Edge::Bottom).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_insert_then_remove_restores_grid() {
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            let mut grid = marked_grid(3, 4, 2);
            let before = grid.clone();

            grid.insert_at_edge(2, edge).unwrap();
            grid.remove_at_edge(2, edge).unwrap();
            assert_eq!(grid, before, "round trip failed for {edge:?}");
        }
    }
}

//! Error types shared across the crate.
//!
//! The grid codec, the content binder and the archive service each surface
//! their own failure modes; [`PersistenceError`] composes them for the
//! project-level load and save entry points.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding a grid text stream.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A data line had fewer than the three mandatory tab-separated fields.
    #[error("line {line}: expected at least 3 tab-separated fields, found {fields}")]
    ShortLine {
        /// 1-based line number in the stream, counting the header.
        line: usize,
        /// Number of fields the line actually had.
        fields: usize,
    },

    /// A coordinate field could not be parsed as a non-negative integer.
    #[error("line {line}: field '{field}' is not a valid coordinate: {value:?}")]
    InvalidNumber {
        /// 1-based line number in the stream, counting the header.
        line: usize,
        /// Name of the offending field (`x`, `y` or `z`).
        field: &'static str,
        /// Raw text of the field.
        value: String,
    },

    /// The stream contained a header but no data lines.
    #[error("grid stream contains no data lines")]
    EmptyGrid,

    /// The z column stepped backwards, so no positive floor height exists.
    #[error("z coordinate stepped from {previous} to {current}, floor height must be positive")]
    InvalidFloorHeight {
        /// z value of the line before the bad transition.
        previous: usize,
        /// z value of the line at the bad transition.
        current: usize,
    },

    /// A line referenced a cell outside the dimensions inferred from the stream.
    #[error("line {line}: position ({column}, {row}, z={z}) lies outside the inferred grid")]
    PositionOutOfBounds {
        /// 1-based line number in the stream, counting the header.
        line: usize,
        /// Column index of the offending cell.
        column: usize,
        /// Row index of the offending cell.
        row: usize,
        /// Raw z coordinate of the offending cell.
        z: usize,
    },
}

/// Errors raised by a content catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store could not be read or written.
    #[error("catalog I/O failed for {path}: {source}")]
    Io {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The backing store content could not be parsed or serialized.
    #[error("catalog store {path} is malformed: {source}")]
    Malformed {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}

/// Composite error for project-level load and save operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The grid text stream is malformed.
    #[error("grid format error: {0}")]
    Format(#[from] FormatError),

    /// The content catalog could not be read or written.
    #[error("content catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A grid resize request that was refused.
///
/// Rejection always leaves the grid exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResizeRejected {
    /// Removing the requested number of rows would leave the grid with none.
    #[error("removing {amount} rows would leave the grid with no rows")]
    WouldEmptyRows {
        /// Requested removal amount.
        amount: usize,
    },

    /// Removing the requested number of columns would leave the grid with none.
    #[error("removing {amount} columns would leave the grid with no columns")]
    WouldEmptyColumns {
        /// Requested removal amount.
        amount: usize,
    },

    /// The referenced floor does not exist.
    #[error("floor {index} does not exist, the grid has {floors} floors")]
    FloorOutOfRange {
        /// Requested floor index.
        index: usize,
        /// Number of floors the grid currently has.
        floors: usize,
    },

    /// A grid keeps at least one floor.
    #[error("cannot remove the last remaining floor")]
    LastFloor,
}

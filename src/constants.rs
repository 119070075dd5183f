//! Format-level constants.
//!
//! This module defines the constants shared by the grid text codec, the
//! content binder and the archive container. They describe the on-disk
//! formats and must not change without a migration story for existing
//! project files.

/// Header line of the grid text format.
pub const GRID_HEADER: &str = "x\ty\tz\tmaterial";

/// Number of raw catalog entries that make up one content group.
pub const CONTENTS_PER_ELEMENT: usize = 7;

/// Language used when none is configured or requested.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Name of the per-project content directory.
pub const CONTENT_DIR_NAME: &str = "content";

/// ASCII magic written at the start of every packed archive.
///
/// The trailing space is part of the magic.
pub const ARCHIVE_MAGIC: &[u8] = b"MODEL-EDITOR-FILE ";

/// Conventional file extension of packed archives (without the dot).
pub const ARCHIVE_EXTENSION: &str = "mef";

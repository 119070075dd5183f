//! Content-entry catalog store.
//!
//! The catalog is the small per-project database that records, in
//! declaration order, the typed entries making up each content group,
//! together with the grid positions bound to them. Foreign stores plug in
//! through the [`ContentCatalog`] trait; [`JsonCatalog`] is the built-in
//! JSON-backed implementation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::CatalogError;

/// File name of the built-in catalog store inside a project directory.
pub const CATALOG_FILE_NAME: &str = "content-catalog.json";

/// Kind of a raw catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Plain text file (title or subtitle slot).
    TextFile,
    /// URL stored as a one-line text file.
    Url,
    /// Image file.
    Image,
    /// Audio file.
    Audio,
    /// Video file.
    Movie,
    /// Rich text file.
    HtmlTextFile,
}

/// One raw entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Entry kind.
    pub kind: ContentKind,
    /// File name of the entry's data inside a language folder.
    pub data: String,
    /// Canonical position keys bound to this entry.
    #[serde(default)]
    pub positions: Vec<String>,
}

/// A position binding to register against an already-appended entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionBinding {
    /// Kind of the bound entry.
    pub kind: ContentKind,
    /// Data file name of the bound entry.
    pub data: String,
    /// Canonical position key.
    pub position: String,
}

/// Store of typed content entries and their position bindings.
///
/// The binder drives this trait during load and save; implementations only
/// hold and persist the raw entry list, they never interpret it.
pub trait ContentCatalog: std::fmt::Debug {
    /// Enumerates all entries in declaration order.
    ///
    /// # Errors
    ///
    /// Fails when the backing store cannot be read.
    fn entries(&self) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Appends an entry of the given kind, without positions.
    fn append(&mut self, kind: ContentKind, data: &str);

    /// Registers position bindings against already-appended entries.
    ///
    /// A binding attaches to the first entry matching its kind and data
    /// name; bindings that match nothing are logged and dropped.
    fn bind_positions(&mut self, bindings: Vec<PositionBinding>);

    /// Persists the catalog into the given project directory.
    ///
    /// # Errors
    ///
    /// Fails when the store cannot be written.
    fn store(&mut self, project_dir: &Path) -> Result<(), CatalogError>;
}

/// JSON-backed [`ContentCatalog`] persisted as [`CATALOG_FILE_NAME`].
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    entries: Vec<CatalogEntry>,
}

impl JsonCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the catalog stored in a project directory.
    ///
    /// A missing store file yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Fails when the store file exists but cannot be read or parsed.
    pub fn open(project_dir: &Path) -> Result<Self, CatalogError> {
        let path = project_dir.join(CATALOG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let entries =
            serde_json::from_str(&content).map_err(|source| CatalogError::Malformed { path, source })?;
        Ok(Self { entries })
    }
}

impl ContentCatalog for JsonCatalog {
    fn entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn append(&mut self, kind: ContentKind, data: &str) {
        self.entries.push(CatalogEntry {
            kind,
            data: data.to_string(),
            positions: Vec::new(),
        });
    }

    fn bind_positions(&mut self, bindings: Vec<PositionBinding>) {
        for binding in bindings {
            let entry = self
                .entries
                .iter_mut()
                .find(|entry| entry.kind == binding.kind && entry.data == binding.data);
            match entry {
                Some(entry) => entry.positions.push(binding.position),
                None => warn!(
                    "Position binding references no catalog entry: {} ({:?})",
                    binding.data, binding.kind
                ),
            }
        }
    }

    fn store(&mut self, project_dir: &Path) -> Result<(), CatalogError> {
        let path = project_dir.join(CATALOG_FILE_NAME);
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|source| CatalogError::Malformed {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, content).map_err(|source| CatalogError::Io { path, source })?;
        Ok(())
    }
}

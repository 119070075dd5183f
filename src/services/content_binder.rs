//! Multilingual content binding and persistence.
//!
//! The binder owns the per-language lists of content groups, keeps their
//! position bindings identical across languages, and drives the catalog
//! when a project is loaded or saved. Content lives on disk as a
//! `content/<language>/` tree of small text and media files whose names
//! derive from the group number.

// Allow intentional narrowing when deriving content numbers
#![allow(clippy::cast_possible_truncation)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::constants::{CONTENTS_PER_ELEMENT, CONTENT_DIR_NAME};
use crate::error::PersistenceError;
use crate::files;
use crate::models::{ContentElement, MediaFile};
use crate::services::catalog::{CatalogEntry, ContentCatalog, ContentKind, PositionBinding};

/// A single failed file operation during a save.
#[derive(Debug)]
pub struct SaveFailure {
    /// Path the operation targeted.
    pub path: PathBuf,
    /// The I/O error that occurred.
    pub error: std::io::Error,
}

/// Outcome of a best-effort content save.
///
/// Per-file failures do not abort the save; they are collected here so the
/// caller can surface them.
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Per-file failures, in the order they occurred.
    pub failures: Vec<SaveFailure>,
}

impl SaveReport {
    /// True when every file operation succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Canonical per-element file names, in slot order.
struct ElementFiles {
    title: String,
    subtitle: String,
    url: String,
    image: String,
    audio: String,
    video: String,
    full_text: String,
}

impl ElementFiles {
    fn new(content_number: u32) -> Self {
        Self {
            title: format!("{content_number}-title.txt"),
            subtitle: format!("{content_number}-subtitle.txt"),
            url: format!("{content_number}-url.txt"),
            image: format!("{content_number}.jpg"),
            audio: format!("{content_number}.mp3"),
            video: format!("{content_number}.mp4"),
            full_text: format!("{content_number}.txt"),
        }
    }
}

/// Owner of the multilingual content groups of one project.
///
/// Content groups are replicated per language; the position lists of the
/// replicas are kept identical by routing every position change through
/// [`add_position`](Self::add_position) and
/// [`clear_all_positions`](Self::clear_all_positions).
#[derive(Debug)]
pub struct ContentBinder {
    default_language: String,
    languages: Vec<String>,
    elements: BTreeMap<String, Vec<ContentElement>>,
    catalog: Box<dyn ContentCatalog>,
}

impl ContentBinder {
    /// Creates an empty binder with only the default language registered.
    pub fn new(catalog: Box<dyn ContentCatalog>, default_language: impl Into<String>) -> Self {
        let default_language = default_language.into();
        let mut elements = BTreeMap::new();
        elements.insert(default_language.clone(), Vec::new());
        Self {
            languages: vec![default_language.clone()],
            default_language,
            elements,
            catalog,
        }
    }

    /// Loads the binder for a project directory.
    ///
    /// Languages come from the subdirectory names of `content/`, sorted for
    /// determinism; a project without a `content/` directory (or without
    /// language folders) yields an empty binder carrying only the default
    /// language. Content groups are composed from the catalog entries in
    /// declaration order, chunked in groups of [`CONTENTS_PER_ELEMENT`]:
    /// the chunk-opening entry carries the group's position bindings, and
    /// each following entry fills one slot of the element.
    ///
    /// # Errors
    ///
    /// Fails when the content directory cannot be listed or the catalog
    /// cannot be read. Missing individual content files are not errors;
    /// they read as empty text.
    pub fn load(
        project_dir: &Path,
        catalog: Box<dyn ContentCatalog>,
        default_language: impl Into<String>,
    ) -> Result<Self, PersistenceError> {
        let default_language = default_language.into();
        let content_dir = project_dir.join(CONTENT_DIR_NAME);
        if !content_dir.exists() {
            return Ok(Self::new(catalog, default_language));
        }

        let mut languages = Vec::new();
        for entry in fs::read_dir(&content_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                languages.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        languages.sort();
        if languages.is_empty() {
            languages.push(default_language.clone());
        }

        let entries = catalog.entries()?;
        let mut elements = BTreeMap::new();
        for language in &languages {
            let language_dir = content_dir.join(language);
            elements.insert(language.clone(), compose_elements(&entries, &language_dir));
        }

        Ok(Self {
            default_language,
            languages,
            elements,
            catalog,
        })
    }

    /// Registered languages, in load order.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// The configured default language.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Returns the content list for a language.
    ///
    /// Falls back to the default language's list when the requested one is
    /// not registered.
    #[must_use]
    pub fn contents(&self, language: &str) -> Option<&[ContentElement]> {
        self.elements
            .get(language)
            .or_else(|| self.elements.get(&self.default_language))
            .map(Vec::as_slice)
    }

    /// Returns one element by list index, with language fallback.
    #[must_use]
    pub fn get(&self, index: usize, language: &str) -> Option<&ContentElement> {
        self.contents(language).and_then(|list| list.get(index))
    }

    /// Mutable access to one element of a specific language, no fallback.
    ///
    /// Position lists must not be edited through this handle; use
    /// [`add_position`](Self::add_position) so all languages stay in sync.
    pub fn get_mut(&mut self, index: usize, language: &str) -> Option<&mut ContentElement> {
        self.elements
            .get_mut(language)
            .and_then(|list| list.get_mut(index))
    }

    /// Finds the element bound to a position key.
    ///
    /// Only the first language's list is scanned; position lists are
    /// identical across languages by invariant.
    #[must_use]
    pub fn get_by_position(&self, position: &str) -> Option<&ContentElement> {
        let first = self.languages.first()?;
        self.elements.get(first)?.iter().find(|element| {
            element.positions.iter().any(|bound| bound == position)
        })
    }

    /// Binds a position key to a content group in every language.
    pub fn add_position(&mut self, content_number: u32, position: &str) {
        for list in self.elements.values_mut() {
            for element in list.iter_mut() {
                if element.content_number == content_number {
                    element.positions.push(position.to_string());
                }
            }
        }
    }

    /// Clears every position binding in every language.
    pub fn clear_all_positions(&mut self) {
        for list in self.elements.values_mut() {
            for element in list.iter_mut() {
                element.positions.clear();
            }
        }
    }

    /// Next unused content group number (1 for an empty binder).
    #[must_use]
    pub fn new_unused_content_number(&self, language: &str) -> u32 {
        self.contents(language)
            .into_iter()
            .flatten()
            .map(|element| element.content_number)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Inserts a new content group into every language.
    ///
    /// Each language receives its own clone, so translations can diverge
    /// afterwards while the group keeps one number everywhere.
    pub fn insert_element(&mut self, element: ContentElement) {
        for list in self.elements.values_mut() {
            list.push(element.clone());
        }
    }

    /// Registers a new language, seeded with copies of the first
    /// language's elements.
    pub fn add_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if self.elements.contains_key(&language) {
            return;
        }
        let seed = self
            .languages
            .first()
            .and_then(|first| self.elements.get(first))
            .cloned()
            .unwrap_or_default();
        self.languages.push(language.clone());
        self.elements.insert(language, seed);
    }

    /// Drops a language; its folder is removed on the next save.
    pub fn remove_language(&mut self, language: &str) {
        self.languages.retain(|registered| registered != language);
        self.elements.remove(language);
    }

    /// Saves all content files under `destination/content/` and re-derives
    /// the catalog.
    ///
    /// The catalog is cleared and re-registered from the first language's
    /// element list: seven entries per group in canonical slot order, with
    /// one position binding per slot and bound cell. Text slots write their
    /// files in every language, media files are copied in only when marked
    /// updated, and files nothing references any more are deleted, as are
    /// the folders of dropped languages.
    ///
    /// Structural failures (creating directories, storing the catalog)
    /// abort with an error. Per-file failures are collected into the
    /// returned report so one unreadable media file cannot abort the rest
    /// of the save.
    ///
    /// # Errors
    ///
    /// Returns an error for structural failures only; inspect the report
    /// for per-file ones.
    pub fn save(&mut self, destination: &Path) -> Result<SaveReport, PersistenceError> {
        let content_dir = destination.join(CONTENT_DIR_NAME);
        fs::create_dir_all(&content_dir)?;

        self.catalog.clear();
        if let Some(list) = self.languages.first().and_then(|first| self.elements.get(first)) {
            let mut bindings = Vec::new();
            for element in list {
                register_catalog_entries(self.catalog.as_mut(), element, &mut bindings);
            }
            self.catalog.bind_positions(bindings);
        }

        let mut report = SaveReport::default();

        for language in &self.languages {
            let Some(list) = self.elements.get(language) else {
                continue;
            };
            let language_dir = content_dir.join(language);
            fs::create_dir_all(&language_dir)?;

            let mut referenced = Vec::new();
            for element in list {
                write_element_files(element, &language_dir, &mut referenced, &mut report);
            }
            remove_unreferenced_files(&language_dir, &referenced, &mut report);
        }

        for entry in fs::read_dir(&content_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() && !self.languages.contains(&name) {
                if let Err(error) = fs::remove_dir_all(entry.path()) {
                    warn!(
                        "Failed to remove dropped language folder {}: {}",
                        entry.path().display(),
                        error
                    );
                    report.failures.push(SaveFailure {
                        path: entry.path(),
                        error,
                    });
                }
            }
        }

        self.catalog.store(destination)?;
        Ok(report)
    }
}

/// Chunks raw catalog entries into elements for one language folder.
fn compose_elements(entries: &[CatalogEntry], language_dir: &Path) -> Vec<ContentElement> {
    let mut list: Vec<ContentElement> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if index % CONTENTS_PER_ELEMENT == 0 {
            let content_number = (index / CONTENTS_PER_ELEMENT + 1) as u32;
            let mut element = ContentElement::new(content_number);
            element.positions = entry.positions.clone();
            list.push(element);
        }
        let Some(element) = list.last_mut() else {
            continue;
        };
        apply_entry(element, entry, language_dir);
    }
    list
}

/// Applies one catalog entry to the slot its kind and data name select.
fn apply_entry(element: &mut ContentElement, entry: &CatalogEntry, language_dir: &Path) {
    let path = language_dir.join(&entry.data);
    match entry.kind {
        ContentKind::TextFile if entry.data.contains("-title") => {
            element.title = Some(files::read_text_file(&path));
        }
        ContentKind::TextFile => {
            element.description = Some(files::read_text_file(&path));
        }
        ContentKind::Url => {
            element.url = Some(files::read_text_file(&path));
        }
        ContentKind::HtmlTextFile => {
            element.full_text = Some(files::read_text_file(&path));
        }
        ContentKind::Image => element.image = Some(MediaFile::existing(path)),
        ContentKind::Audio => element.audio = Some(MediaFile::existing(path)),
        ContentKind::Movie => element.video = Some(MediaFile::existing(path)),
    }
}

/// Registers the seven canonical catalog entries for one element and
/// collects its position bindings, one per slot and bound cell.
fn register_catalog_entries(
    catalog: &mut dyn ContentCatalog,
    element: &ContentElement,
    bindings: &mut Vec<PositionBinding>,
) {
    let names = ElementFiles::new(element.content_number);
    let slots: [(ContentKind, &str); CONTENTS_PER_ELEMENT] = [
        (ContentKind::TextFile, &names.title),
        (ContentKind::TextFile, &names.subtitle),
        (ContentKind::Url, &names.url),
        (ContentKind::Image, &names.image),
        (ContentKind::Audio, &names.audio),
        (ContentKind::Movie, &names.video),
        (ContentKind::HtmlTextFile, &names.full_text),
    ];

    for (kind, data) in slots {
        catalog.append(kind, data);
    }
    for position in &element.positions {
        for (kind, data) in slots {
            bindings.push(PositionBinding {
                kind,
                data: data.to_string(),
                position: position.clone(),
            });
        }
    }
}

/// Writes one element's text fields and media copies into a language folder.
fn write_element_files(
    element: &ContentElement,
    language_dir: &Path,
    referenced: &mut Vec<String>,
    report: &mut SaveReport,
) {
    let names = ElementFiles::new(element.content_number);

    let texts: [(Option<&String>, &String); 4] = [
        (element.title.as_ref(), &names.title),
        (element.description.as_ref(), &names.subtitle),
        (element.url.as_ref(), &names.url),
        (element.full_text.as_ref(), &names.full_text),
    ];
    for (text, name) in texts {
        if let Some(text) = text {
            referenced.push(name.clone());
            let path = language_dir.join(name);
            if let Err(error) = files::write_text_file(&path, text) {
                warn!("Failed to write content text {}: {}", path.display(), error);
                report.failures.push(SaveFailure { path, error });
            }
        }
    }

    let media: [(Option<&MediaFile>, &String); 3] = [
        (element.image.as_ref(), &names.image),
        (element.audio.as_ref(), &names.audio),
        (element.video.as_ref(), &names.video),
    ];
    for (media_file, name) in media {
        if let Some(media_file) = media_file {
            referenced.push(name.clone());
            if media_file.updated {
                let target = language_dir.join(name);
                if let Err(error) = fs::copy(&media_file.path, &target) {
                    warn!(
                        "Failed to copy media {} to {}: {}",
                        media_file.path.display(),
                        target.display(),
                        error
                    );
                    report.failures.push(SaveFailure {
                        path: target,
                        error,
                    });
                }
            }
        }
    }
}

/// Deletes files in a language folder that no element references any more.
fn remove_unreferenced_files(language_dir: &Path, referenced: &[String], report: &mut SaveReport) {
    let entries = match fs::read_dir(language_dir) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(
                "Failed to list language folder {}: {}",
                language_dir.display(),
                error
            );
            report.failures.push(SaveFailure {
                path: language_dir.to_path_buf(),
                error,
            });
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && !referenced.contains(&name) {
            if let Err(error) = fs::remove_file(entry.path()) {
                warn!(
                    "Failed to remove unreferenced file {}: {}",
                    entry.path().display(),
                    error
                );
                report.failures.push(SaveFailure {
                    path: entry.path(),
                    error,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::JsonCatalog;

    fn empty_binder() -> ContentBinder {
        ContentBinder::new(Box::new(JsonCatalog::new()), "en")
    }

    #[test]
    fn test_new_binder_has_default_language_only() {
        let binder = empty_binder();
        assert_eq!(binder.languages(), ["en".to_string()]);
        assert_eq!(binder.contents("en"), Some(&[][..]));
        assert_eq!(binder.new_unused_content_number("en"), 1);
    }

    #[test]
    fn test_contents_falls_back_to_default_language() {
        let mut binder = empty_binder();
        binder.insert_element(ContentElement::new(1).with_title("Lobby"));

        let fallback = binder.contents("fr").unwrap();
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].title.as_deref(), Some("Lobby"));
    }

    #[test]
    fn test_add_language_seeds_from_first() {
        let mut binder = empty_binder();
        binder.insert_element(ContentElement::new(1).with_title("Lobby"));
        binder.add_language("de");

        assert_eq!(binder.languages(), ["en".to_string(), "de".to_string()]);
        let german = binder.contents("de").unwrap();
        assert_eq!(german[0].content_number, 1);
        assert_eq!(german[0].title.as_deref(), Some("Lobby"));
    }

    #[test]
    fn test_insert_element_reaches_every_language() {
        let mut binder = empty_binder();
        binder.add_language("de");
        binder.insert_element(ContentElement::new(1));

        assert_eq!(binder.contents("en").unwrap().len(), 1);
        assert_eq!(binder.elements.get("de").unwrap().len(), 1);
    }

    #[test]
    fn test_element_files_naming() {
        let names = ElementFiles::new(4);
        assert_eq!(names.title, "4-title.txt");
        assert_eq!(names.subtitle, "4-subtitle.txt");
        assert_eq!(names.url, "4-url.txt");
        assert_eq!(names.image, "4.jpg");
        assert_eq!(names.audio, "4.mp3");
        assert_eq!(names.video, "4.mp4");
        assert_eq!(names.full_text, "4.txt");
    }

    #[test]
    fn test_subtitle_file_is_not_mistaken_for_title() {
        let entry = CatalogEntry {
            kind: ContentKind::TextFile,
            data: "2-subtitle.txt".to_string(),
            positions: Vec::new(),
        };
        let mut element = ContentElement::new(2);
        apply_entry(&mut element, &entry, Path::new("/tmp/none"));

        assert!(element.title.is_none());
        assert!(element.description.is_some());
    }
}
